//! Console reporting for the batch run: a fixed-width progress bar plus
//! per-file lines printed above it.

use std::fmt::Display;

use indicatif::{ProgressBar, ProgressStyle};

pub struct Reporter {
    bar: ProgressBar,
}

impl Reporter {
    pub fn new(total: u64) -> Self {
        let bar = ProgressBar::new(total);
        bar.set_style(bar_style());
        Self { bar }
    }

    /// Reporter that renders nothing. Keeps test output quiet.
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
        }
    }

    /// Called once the driver knows how many candidate files there are.
    pub fn set_total(&self, total: u64) {
        self.bar.set_length(total);
    }

    pub fn file_processed(&self, name: &str) {
        self.bar.println(format!("File: {name}"));
    }

    pub fn file_skipped(&self, name: &str) {
        self.bar.println(format!("Skipped {name} (unsupported extension)"));
    }

    pub fn file_failed(&self, name: &str, error: &dyn Display) {
        self.bar.println(format!("Error processing {name}: {error}"));
    }

    /// Advance the bar to `completed` files out of the total.
    pub fn set_completed(&self, completed: u64) {
        self.bar.set_position(completed);
    }

    pub fn finish(&self) {
        self.bar.finish();
    }
}

fn bar_style() -> ProgressStyle {
    ProgressStyle::default_bar()
        .template("[{bar:30.cyan/blue}] {pos}/{len} ({percent}%)")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_reporter_accepts_all_calls() {
        let reporter = Reporter::hidden();
        reporter.set_total(3);
        reporter.file_processed("a.wav");
        reporter.file_skipped("b.txt");
        reporter.file_failed("c.wav", &"boom");
        reporter.set_completed(3);
        reporter.finish();
    }
}
