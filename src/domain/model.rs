use serde::{Deserialize, Serialize};

/// One deal candidate as pulled off the page, before normalization.
/// Optional fields are simply absent when the markup lacks them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawListing {
    pub identifier: Option<String>,
    pub raw_title: String,
    pub link: String,
    pub image_url: Option<String>,
    pub list_price: Option<String>,
    pub deal_price: Option<String>,
}

/// A normalized listing, ready to post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    /// Dedup key: the product code, or the cleaned title as fallback.
    pub identifier: String,
    pub title: String,
    pub link: String,
    pub image_url: Option<String>,
    pub discount_percent: Option<i64>,
    pub caption: String,
}

/// What the publish API answered. Logged, never interpreted further.
#[derive(Debug, Clone)]
pub struct PublishReceipt {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Candidates that entered the publish stage.
    pub found: usize,
    pub posted: usize,
    pub skipped_seen: usize,
    pub skipped_failed: usize,
}
