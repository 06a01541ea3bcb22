use clap::Parser;
use deal_poster::utils::{logger, validation::Validate};
use deal_poster::{CliConfig, DealEngine, DealPipeline, GraphPublisher, HttpPageFetcher};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting deal-poster");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置：必須在任何網路請求之前
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 創建適配器和管道
    let fetcher = HttpPageFetcher::new(config.user_agent.clone());
    let publisher = GraphPublisher::new(
        config.graph_api_base.clone(),
        config.page_id.clone().unwrap_or_default(),
        config.access_token.clone().unwrap_or_default(),
    );

    let pipeline = match DealPipeline::new(fetcher, publisher, config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("❌ Pipeline setup failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    let engine = DealEngine::new(pipeline);

    match engine.run().await {
        Ok(summary) => {
            tracing::info!(
                "✅ Run complete: {} posted, {} already seen, {} failed",
                summary.posted,
                summary.skipped_seen,
                summary.skipped_failed
            );
            println!(
                "✅ Run complete: {} posted out of {} candidates",
                summary.posted, summary.found
            );
        }
        Err(e) => {
            tracing::error!("❌ Run failed: {}", e);
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    }

    Ok(())
}
