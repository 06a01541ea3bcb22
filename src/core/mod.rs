pub mod caption;
pub mod clean;
pub mod discount;
pub mod engine;
pub mod extract;
pub mod hashtag;
pub mod intro;
pub mod pipeline;
pub mod seen;

pub use crate::domain::model::{Listing, RawListing, RunSummary};
pub use crate::domain::ports::{ConfigProvider, PageFetcher, Pipeline, Publisher};
pub use crate::utils::error::Result;
