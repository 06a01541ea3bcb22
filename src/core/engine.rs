use crate::domain::model::RunSummary;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;

pub struct DealEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> DealEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        println!("Starting deal run...");

        // Extract
        println!("Extracting listings...");
        let raw = self.pipeline.extract().await?;
        println!("Extracted {} candidate listings", raw.len());

        // Transform
        println!("Normalizing listings...");
        let listings = self.pipeline.transform(raw).await?;
        println!("{} listings ready to post", listings.len());

        // Publish
        println!("Publishing...");
        let summary = self.pipeline.publish(listings).await?;
        println!(
            "Posted {} of {} ({} already seen, {} failed)",
            summary.posted, summary.found, summary.skipped_seen, summary.skipped_failed
        );

        Ok(summary)
    }
}
