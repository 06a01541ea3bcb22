use crate::core::caption::build_caption;
use crate::core::clean::TitleCleaner;
use crate::core::discount::{discount_percent, format_discount};
use crate::core::extract::ListingExtractor;
use crate::core::hashtag::HashtagPicker;
use crate::core::intro::IntroSelector;
use crate::core::seen::{EpochKey, SeenStore};
use crate::domain::model::{Listing, RawListing, RunSummary};
use crate::domain::ports::{ConfigProvider, PageFetcher, Pipeline, Publisher};
use crate::utils::error::{BotError, Result};
use chrono::{Datelike, Utc};
use std::path::Path;
use url::Url;

pub struct DealPipeline<F: PageFetcher, P: Publisher, C: ConfigProvider> {
    fetcher: F,
    publisher: P,
    config: C,
    extractor: ListingExtractor,
    cleaner: TitleCleaner,
    hashtags: HashtagPicker,
    intros: IntroSelector,
}

impl<F: PageFetcher, P: Publisher, C: ConfigProvider> DealPipeline<F, P, C> {
    pub fn new(fetcher: F, publisher: P, config: C) -> Result<Self> {
        let origin = page_origin(config.source_url())?;
        let extractor = ListingExtractor::new(
            origin,
            config.affiliate_tag().to_string(),
            config.scan_limit(),
        );

        let seed = config
            .hashtag_seed()
            .unwrap_or_else(|| Utc::now().timestamp() as u64);

        Ok(Self {
            fetcher,
            publisher,
            config,
            extractor,
            cleaner: TitleCleaner::new(),
            hashtags: HashtagPicker::new(seed),
            intros: IntroSelector::new(seed),
        })
    }
}

#[async_trait::async_trait]
impl<F: PageFetcher, P: Publisher, C: ConfigProvider> Pipeline for DealPipeline<F, P, C> {
    async fn extract(&self) -> Result<Vec<RawListing>> {
        tracing::info!("Scraping deal grid: {}", self.config.source_url());
        let html = self.fetcher.fetch(self.config.source_url()).await?;
        let listings = self.extractor.extract(&html);
        tracing::debug!("Selector matched {} candidate cards", listings.len());
        Ok(listings)
    }

    async fn transform(&self, raw: Vec<RawListing>) -> Result<Vec<Listing>> {
        let month = Utc::now().month();
        let mut listings = Vec::new();

        for (index, raw) in raw.into_iter().enumerate() {
            let title = self.cleaner.clean(&raw.raw_title);

            // Dedup key: product code first, cleaned title as fallback.
            // Neither present means the card was pure noise.
            let identifier = match raw
                .identifier
                .clone()
                .or_else(|| (!title.is_empty()).then(|| title.clone()))
            {
                Some(id) => id,
                None => {
                    tracing::debug!("Skipping listing without identifier or title");
                    continue;
                }
            };

            let discount = discount_percent(raw.list_price.as_deref(), raw.deal_price.as_deref());

            let salt = index as u64;
            let tags = self.hashtags.pick(&title, salt);
            let intro = self.intros.pick(&title, discount, month, salt);
            let discount_line = discount.map(format_discount);
            let caption =
                build_caption(&intro, &title, discount_line.as_deref(), &raw.link, &tags);

            listings.push(Listing {
                identifier,
                title,
                link: raw.link,
                image_url: raw.image_url,
                discount_percent: discount,
                caption,
            });
        }

        Ok(listings)
    }

    async fn publish(&self, listings: Vec<Listing>) -> Result<RunSummary> {
        let epoch = EpochKey::current();
        let mut store = SeenStore::open(Path::new(self.config.state_dir()), &epoch)?;
        tracing::debug!(
            "Epoch {}: {} identifiers already posted",
            epoch.as_str(),
            store.len()
        );

        let mut summary = RunSummary {
            found: listings.len(),
            ..Default::default()
        };

        for listing in listings {
            if summary.posted >= self.config.post_limit() {
                break;
            }

            if store.contains(&listing.identifier) {
                tracing::info!("⏭ Already posted this week, skipping: {}", listing.title);
                summary.skipped_seen += 1;
                continue;
            }

            // Courtesy pause between posts, never before the first one.
            if summary.posted > 0 {
                tokio::time::sleep(self.config.post_delay()).await;
            }

            tracing::info!("Posting: {}", listing.title);
            match self
                .publisher
                .publish(&listing.caption, listing.image_url.as_deref())
                .await
            {
                Ok(receipt) => {
                    tracing::info!(status = receipt.status, "✅ Posted: {}", listing.title);
                    tracing::debug!("API response body: {}", receipt.body);
                    // Only a confirmed success marks the id as seen, so a
                    // failed post retries on the next run.
                    store.record(&listing.identifier)?;
                    summary.posted += 1;
                }
                Err(BotError::PublishError { status, body }) => {
                    tracing::warn!(status, "❌ Publish rejected for {}: {}", listing.title, body);
                    summary.skipped_failed += 1;
                }
                Err(e) => {
                    tracing::warn!("❌ Publish failed for {}: {}", listing.title, e);
                    summary.skipped_failed += 1;
                }
            }
        }

        Ok(summary)
    }
}

fn page_origin(source_url: &str) -> Result<String> {
    let url = Url::parse(source_url).map_err(|e| BotError::InvalidConfigValueError {
        field: "source_url".to_string(),
        value: source_url.to_string(),
        reason: e.to_string(),
    })?;
    let host = url
        .host_str()
        .ok_or_else(|| BotError::InvalidConfigValueError {
            field: "source_url".to_string(),
            value: source_url.to_string(),
            reason: "URL has no host".to_string(),
        })?;
    Ok(format!("{}://{}", url.scheme(), host))
}
