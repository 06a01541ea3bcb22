use crate::domain::model::PublishReceipt;
use crate::domain::ports::Publisher;
use crate::utils::error::{BotError, Result};
use reqwest::Client;

/// Posts captions to a Facebook page feed through the Graph API. The
/// base URL is injectable so tests can point it at a mock server.
#[derive(Debug, Clone)]
pub struct GraphPublisher {
    client: Client,
    base_url: String,
    page_id: String,
    access_token: String,
}

impl GraphPublisher {
    pub fn new(
        base_url: impl Into<String>,
        page_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            page_id: page_id.into(),
            access_token: access_token.into(),
        }
    }

    fn feed_url(&self) -> String {
        format!(
            "{}/{}/feed",
            self.base_url.trim_end_matches('/'),
            self.page_id
        )
    }
}

impl Publisher for GraphPublisher {
    async fn publish(&self, caption: &str, image_url: Option<&str>) -> Result<PublishReceipt> {
        let mut form = vec![
            ("message", caption.to_string()),
            ("access_token", self.access_token.clone()),
        ];
        if let Some(image) = image_url {
            form.push(("link", image.to_string()));
        }

        let response = self.client.post(self.feed_url()).form(&form).send().await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(BotError::PublishError {
                status: status.as_u16(),
                body,
            });
        }

        Ok(PublishReceipt {
            status: status.as_u16(),
            body,
        })
    }
}
