use crate::domain::ports::ConfigProvider;
use crate::utils::error::{BotError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "deal-poster")]
#[command(about = "Scrapes a deals page and posts captions to a Facebook page")]
pub struct CliConfig {
    #[arg(long, default_value = "https://www.amazon.com/gp/goldbox")]
    pub source_url: String,

    /// Query suffix appended to every extracted product link.
    #[arg(long, default_value = "?tag=keithw.-20")]
    pub affiliate_tag: String,

    #[arg(long, env = "FB_PAGE_ID")]
    pub page_id: Option<String>,

    #[arg(long, env = "FB_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    #[arg(long, default_value = "https://graph.facebook.com")]
    pub graph_api_base: String,

    #[arg(long, default_value = "Mozilla/5.0")]
    pub user_agent: String,

    /// Maximum confirmed posts per run.
    #[arg(long, default_value = "3")]
    pub post_limit: usize,

    /// Maximum candidates pulled off the page before dedup.
    #[arg(long, default_value = "30")]
    pub scan_limit: usize,

    /// Courtesy delay between posts, in seconds.
    #[arg(long, default_value = "10")]
    pub post_delay_secs: u64,

    #[arg(long, default_value = "./state")]
    pub state_dir: String,

    /// Fixed RNG seed for hashtag/intro sampling; time-seeded when absent.
    #[arg(long)]
    pub hashtag_seed: Option<u64>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn source_url(&self) -> &str {
        &self.source_url
    }

    fn affiliate_tag(&self) -> &str {
        &self.affiliate_tag
    }

    fn page_id(&self) -> &str {
        self.page_id.as_deref().unwrap_or_default()
    }

    fn access_token(&self) -> &str {
        self.access_token.as_deref().unwrap_or_default()
    }

    fn graph_api_base(&self) -> &str {
        &self.graph_api_base
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    fn post_limit(&self) -> usize {
        self.post_limit
    }

    fn scan_limit(&self) -> usize {
        self.scan_limit
    }

    fn post_delay(&self) -> Duration {
        Duration::from_secs(self.post_delay_secs)
    }

    fn state_dir(&self) -> &str {
        &self.state_dir
    }

    fn hashtag_seed(&self) -> Option<u64> {
        self.hashtag_seed
    }
}

impl Validate for CliConfig {
    /// Runs every check and reports all failures at once, so a fresh
    /// deployment does not play whack-a-mole with missing settings.
    fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();

        let checks = [
            validation::validate_url("source_url", &self.source_url),
            validation::validate_url("graph_api_base", &self.graph_api_base),
            validation::validate_non_empty_string("affiliate_tag", &self.affiliate_tag),
            validation::validate_non_empty_string("user_agent", &self.user_agent),
            validation::validate_path("state_dir", &self.state_dir),
            validation::validate_positive_number("post_limit", self.post_limit, 1),
            validation::validate_positive_number("scan_limit", self.scan_limit, self.post_limit),
        ];
        for check in checks {
            if let Err(e) = check {
                problems.push(e.to_string());
            }
        }

        if let Err(e) = validation::validate_required_field("page_id (FB_PAGE_ID)", &self.page_id)
        {
            problems.push(e.to_string());
        }
        if let Err(e) = validation::validate_required_field(
            "access_token (FB_ACCESS_TOKEN)",
            &self.access_token,
        ) {
            problems.push(e.to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(BotError::ValidationError {
                message: problems.join("; "),
            })
        }
    }
}
