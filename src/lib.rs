pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{GraphPublisher, HttpPageFetcher};
pub use config::CliConfig;
pub use core::{engine::DealEngine, pipeline::DealPipeline};
pub use domain::model::{Listing, RawListing, RunSummary};
pub use domain::ports::{PageFetcher, Publisher};
pub use utils::error::{BotError, Result};
