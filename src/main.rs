mod audio;
mod batch;
mod progress;
mod wav;

use anyhow::Result;

use crate::batch::{BatchConfig, BatchStatus};
use crate::progress::Reporter;

fn main() -> Result<()> {
    let config = BatchConfig::default();

    println!("Processing files...\n");

    let reporter = Reporter::new(0);
    let outcomes = batch::run(&config, &reporter)?;

    let tally = |status| {
        outcomes
            .iter()
            .filter(|outcome| outcome.status == status)
            .count()
    };
    let processed = tally(BatchStatus::Processed);
    let skipped = tally(BatchStatus::Skipped);
    let failed = tally(BatchStatus::Failed);

    println!("\nAll files processed!");
    println!("{processed} processed, {skipped} skipped, {failed} failed");

    Ok(())
}
