use crate::domain::ports::PageFetcher;
use crate::utils::error::{BotError, Result};
use reqwest::header::USER_AGENT;
use reqwest::Client;

/// Plain GET with the configured User-Agent. No retries, no timeouts
/// beyond the client defaults; upstream flakiness is the scheduler's
/// problem.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    client: Client,
    user_agent: String,
}

impl HttpPageFetcher {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            user_agent: user_agent.into(),
        }
    }
}

impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        tracing::debug!("GET {}", url);
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Page response status: {}", status);
        if !status.is_success() {
            return Err(BotError::ProcessingError {
                message: format!("page fetch returned HTTP {}", status),
            });
        }

        Ok(response.text().await?)
    }
}
