use anyhow::Result;
use deal_poster::core::Pipeline;
use deal_poster::domain::model::PublishReceipt;
use deal_poster::{
    BotError, CliConfig, DealEngine, DealPipeline, GraphPublisher, HttpPageFetcher, PageFetcher,
    Publisher,
};
use httpmock::prelude::*;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

const DEALS_PAGE: &str = r#"
<html><body>
<div data-testid="grid-deals-container">
    <a href="/dp/B08N5WRWNW">
        <img src="https://img.example/echo.jpg"/>
        <span class="a-price"><span class="a-offscreen">$24.99</span></span>
        <span class="a-price a-text-price"><span class="a-offscreen">$49.99</span></span>
        Echo Dot (5th Gen) 50% off $24.99
    </a>
    <a href="/dp/B0FIREHD10">Fire HD 10 Tablet</a>
    <a href="/dp/B0AIRFRYR1">Air Fryer 4QT</a>
</div>
</body></html>
"#;

fn test_config(source_url: String, graph_api_base: String, state_dir: String) -> CliConfig {
    CliConfig {
        source_url,
        affiliate_tag: "?tag=test-20".to_string(),
        page_id: Some("page123".to_string()),
        access_token: Some("testtoken".to_string()),
        graph_api_base,
        user_agent: "Mozilla/5.0".to_string(),
        post_limit: 3,
        scan_limit: 30,
        post_delay_secs: 0,
        state_dir,
        hashtag_seed: Some(42),
        verbose: false,
    }
}

fn build_real_pipeline(
    server: &MockServer,
    state_dir: &str,
) -> DealPipeline<HttpPageFetcher, GraphPublisher, CliConfig> {
    let config = test_config(
        server.url("/gp/goldbox"),
        server.base_url(),
        state_dir.to_string(),
    );
    let fetcher = HttpPageFetcher::new(config.user_agent.clone());
    let publisher = GraphPublisher::new(
        config.graph_api_base.clone(),
        config.page_id.clone().unwrap(),
        config.access_token.clone().unwrap(),
    );
    DealPipeline::new(fetcher, publisher, config).unwrap()
}

#[tokio::test]
async fn test_end_to_end_posts_and_records_ids() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let state_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    let page_mock = server.mock(|when, then| {
        when.method(GET).path("/gp/goldbox");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(DEALS_PAGE);
    });
    let feed_mock = server.mock(|when, then| {
        when.method(POST).path("/page123/feed");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"id": "page123_post"}));
    });

    let engine = DealEngine::new(build_real_pipeline(&server, &state_dir));
    let summary = engine.run().await?;

    page_mock.assert();
    feed_mock.assert_hits(3);
    assert_eq!(summary.found, 3);
    assert_eq!(summary.posted, 3);
    assert_eq!(summary.skipped_seen, 0);

    let posted = std::fs::read_to_string(temp_dir.path().join("posted_ids.txt"))?;
    assert_eq!(posted, "B08N5WRWNW\nB0FIREHD10\nB0AIRFRYR1\n");

    Ok(())
}

#[tokio::test]
async fn test_second_run_skips_already_posted() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let state_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/gp/goldbox");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(DEALS_PAGE);
    });
    let feed_mock = server.mock(|when, then| {
        when.method(POST).path("/page123/feed");
        then.status(200).json_body(serde_json::json!({"id": "x"}));
    });

    let engine = DealEngine::new(build_real_pipeline(&server, &state_dir));
    let first = engine.run().await?;
    assert_eq!(first.posted, 3);

    // Same state dir, same epoch: everything is filtered before the
    // publisher is ever consulted.
    let engine = DealEngine::new(build_real_pipeline(&server, &state_dir));
    let second = engine.run().await?;

    assert_eq!(second.posted, 0);
    assert_eq!(second.skipped_seen, 3);
    feed_mock.assert_hits(3);

    Ok(())
}

#[tokio::test]
async fn test_zero_listings_completes_without_publishing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let state_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/gp/goldbox");
        then.status(200)
            .header("Content-Type", "text/html")
            .body("<html><body><p>No deals today</p></body></html>");
    });
    let feed_mock = server.mock(|when, then| {
        when.method(POST).path("/page123/feed");
        then.status(200).json_body(serde_json::json!({"id": "x"}));
    });

    let engine = DealEngine::new(build_real_pipeline(&server, &state_dir));
    let summary = engine.run().await?;

    assert_eq!(summary.found, 0);
    assert_eq!(summary.posted, 0);
    feed_mock.assert_hits(0);

    Ok(())
}

#[tokio::test]
async fn test_failed_publish_does_not_mark_seen() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let state_dir = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/gp/goldbox");
        then.status(200)
            .header("Content-Type", "text/html")
            .body(DEALS_PAGE);
    });
    server.mock(|when, then| {
        when.method(POST).path("/page123/feed");
        then.status(500)
            .json_body(serde_json::json!({"error": {"message": "boom"}}));
    });

    let engine = DealEngine::new(build_real_pipeline(&server, &state_dir));
    let summary = engine.run().await?;

    assert_eq!(summary.posted, 0);
    assert_eq!(summary.skipped_failed, 3);

    // The ids stay eligible for the next run.
    let posted = std::fs::read_to_string(temp_dir.path().join("posted_ids.txt"))?;
    assert!(posted.is_empty());

    Ok(())
}

// ---------------------------------------------------------------------
// Stub-port tests: exercise the pipeline against in-memory collaborators
// so caption content can be asserted directly.
// ---------------------------------------------------------------------

#[derive(Clone)]
struct StaticFetcher {
    html: String,
}

impl PageFetcher for StaticFetcher {
    async fn fetch(&self, _url: &str) -> deal_poster::Result<String> {
        Ok(self.html.clone())
    }
}

#[derive(Clone, Default)]
struct RecordingPublisher {
    posts: Arc<Mutex<Vec<(String, Option<String>)>>>,
}

impl Publisher for RecordingPublisher {
    async fn publish(
        &self,
        caption: &str,
        image_url: Option<&str>,
    ) -> deal_poster::Result<PublishReceipt> {
        self.posts
            .lock()
            .unwrap()
            .push((caption.to_string(), image_url.map(str::to_string)));
        Ok(PublishReceipt {
            status: 200,
            body: "{\"id\":\"stub\"}".to_string(),
        })
    }
}

#[derive(Clone, Default)]
struct RejectingPublisher;

impl Publisher for RejectingPublisher {
    async fn publish(
        &self,
        _caption: &str,
        _image_url: Option<&str>,
    ) -> deal_poster::Result<PublishReceipt> {
        Err(BotError::PublishError {
            status: 400,
            body: "rejected".to_string(),
        })
    }
}

#[tokio::test]
async fn test_caption_contains_cleaned_title_discount_link_and_tags() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = test_config(
        "https://www.amazon.com/gp/goldbox".to_string(),
        "https://graph.facebook.com".to_string(),
        temp_dir.path().to_str().unwrap().to_string(),
    );

    let fetcher = StaticFetcher {
        html: DEALS_PAGE.to_string(),
    };
    let publisher = RecordingPublisher::default();
    let posts = publisher.posts.clone();

    let pipeline = DealPipeline::new(fetcher, publisher, config).unwrap();
    let raw = pipeline.extract().await?;
    let listings = pipeline.transform(raw).await?;
    pipeline.publish(listings).await?;

    let posts = posts.lock().unwrap();
    assert_eq!(posts.len(), 3);

    let (caption, image) = &posts[0];
    let lines: Vec<&str> = caption.lines().collect();
    // intro, title, discount, link, hashtags
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[1], "Echo Dot (5th Gen)");
    assert_eq!(lines[2], "💰 50% off");
    assert_eq!(lines[3], "👉 https://www.amazon.com/dp/B08N5WRWNW?tag=test-20");
    assert!(lines[4].starts_with('#'));
    assert_eq!(image.as_deref(), Some("https://img.example/echo.jpg"));

    // No prices on the other cards: no discount line.
    let (caption, _) = &posts[1];
    assert!(!caption.contains("% off"));

    Ok(())
}

#[tokio::test]
async fn test_post_limit_bounds_a_run() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let mut config = test_config(
        "https://www.amazon.com/gp/goldbox".to_string(),
        "https://graph.facebook.com".to_string(),
        temp_dir.path().to_str().unwrap().to_string(),
    );
    config.post_limit = 2;

    let fetcher = StaticFetcher {
        html: DEALS_PAGE.to_string(),
    };
    let publisher = RecordingPublisher::default();
    let posts = publisher.posts.clone();

    let pipeline = DealPipeline::new(fetcher, publisher, config).unwrap();
    let raw = pipeline.extract().await?;
    let listings = pipeline.transform(raw).await?;
    let summary = pipeline.publish(listings).await?;

    assert_eq!(summary.posted, 2);
    assert_eq!(posts.lock().unwrap().len(), 2);

    Ok(())
}

#[tokio::test]
async fn test_rejected_posts_counted_and_run_continues() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = test_config(
        "https://www.amazon.com/gp/goldbox".to_string(),
        "https://graph.facebook.com".to_string(),
        temp_dir.path().to_str().unwrap().to_string(),
    );

    let fetcher = StaticFetcher {
        html: DEALS_PAGE.to_string(),
    };
    let pipeline = DealPipeline::new(fetcher, RejectingPublisher, config).unwrap();
    let raw = pipeline.extract().await?;
    let listings = pipeline.transform(raw).await?;
    let summary = pipeline.publish(listings).await?;

    assert_eq!(summary.posted, 0);
    assert_eq!(summary.skipped_failed, 3);

    Ok(())
}
