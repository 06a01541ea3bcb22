// Adapters layer: concrete implementations of the outward-facing ports.

pub mod facebook;
pub mod http;

pub use facebook::GraphPublisher;
pub use http::HttpPageFetcher;
