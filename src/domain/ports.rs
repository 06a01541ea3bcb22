use crate::domain::model::{Listing, PublishReceipt, RawListing, RunSummary};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait Publisher: Send + Sync {
    fn publish(
        &self,
        caption: &str,
        image_url: Option<&str>,
    ) -> impl std::future::Future<Output = Result<PublishReceipt>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_url(&self) -> &str;
    fn affiliate_tag(&self) -> &str;
    fn page_id(&self) -> &str;
    fn access_token(&self) -> &str;
    fn graph_api_base(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn post_limit(&self) -> usize;
    fn scan_limit(&self) -> usize;
    fn post_delay(&self) -> Duration;
    fn state_dir(&self) -> &str;
    fn hashtag_seed(&self) -> Option<u64>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<RawListing>>;
    async fn transform(&self, raw: Vec<RawListing>) -> Result<Vec<Listing>>;
    async fn publish(&self, listings: Vec<Listing>) -> Result<RunSummary>;
}
