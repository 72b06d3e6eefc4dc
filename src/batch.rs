//! The per-file trim pipeline and the driver that runs it over a folder.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::audio::{DEFAULT_SILENCE_THRESHOLD, SilenceDetector};
use crate::progress::Reporter;
use crate::wav::{self, EncodeError, FormatError};

/// Batch settings. The defaults match a stock run: `input` and `output`
/// folders under the working directory, `.wav` inputs, 0.01 threshold.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub threshold: f32,
    /// Accepted file extensions, lowercase, without the dot.
    pub extensions: Vec<String>,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
            threshold: DEFAULT_SILENCE_THRESHOLD,
            extensions: vec!["wav".to_string()],
        }
    }
}

/// Terminal state of one input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchStatus {
    Processed,
    Skipped,
    Failed,
}

/// Per-file record of how the run handled it.
#[derive(Debug, Clone)]
pub struct BatchOutcome {
    pub filename: String,
    pub status: BatchStatus,
    pub detail: Option<String>,
}

/// Union of everything the per-file pipeline can raise.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Run the trim pipeline over every entry of the input folder, in
/// directory-listing order.
///
/// A stale output folder from an earlier run is removed up front; the
/// folder is recreated right before the first successful write, so a run
/// that processes nothing leaves no output folder behind. Individual file
/// failures are reported and recorded without stopping the run; only
/// setup failures (clearing stale output, enumerating the input folder)
/// abort.
pub fn run(config: &BatchConfig, reporter: &Reporter) -> Result<Vec<BatchOutcome>> {
    if config.output_dir.exists() {
        fs::remove_dir_all(&config.output_dir).with_context(|| {
            format!(
                "failed to clear output folder {}",
                config.output_dir.display()
            )
        })?;
    }

    let entries = fs::read_dir(&config.input_dir).with_context(|| {
        format!(
            "failed to read input folder {}",
            config.input_dir.display()
        )
    })?;
    let mut filenames = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| {
            format!("failed to read an entry of {}", config.input_dir.display())
        })?;
        filenames.push(entry.file_name());
    }

    let detector = SilenceDetector::new(config.threshold);
    reporter.set_total(filenames.len() as u64);

    let mut outcomes = Vec::with_capacity(filenames.len());
    for (index, filename) in filenames.iter().enumerate() {
        let name = filename.to_string_lossy().into_owned();
        let outcome = if !has_supported_extension(Path::new(filename), &config.extensions) {
            reporter.file_skipped(&name);
            BatchOutcome {
                filename: name,
                status: BatchStatus::Skipped,
                detail: Some("unsupported extension".to_string()),
            }
        } else {
            let input_path = config.input_dir.join(filename);
            let output_path = config.output_dir.join(filename);
            match process_file(&input_path, &output_path, &detector, &config.output_dir) {
                Ok(()) => {
                    reporter.file_processed(&name);
                    BatchOutcome {
                        filename: name,
                        status: BatchStatus::Processed,
                        detail: None,
                    }
                }
                Err(e) => {
                    reporter.file_failed(&name, &e);
                    BatchOutcome {
                        filename: name,
                        status: BatchStatus::Failed,
                        detail: Some(e.to_string()),
                    }
                }
            }
        };
        outcomes.push(outcome);
        reporter.set_completed((index + 1) as u64);
    }

    reporter.finish();
    Ok(outcomes)
}

fn has_supported_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .is_some_and(|ext| extensions.iter().any(|e| *e == ext))
}

/// Read, decode, trim leading silence, re-encode, and write one file.
///
/// The output folder is created here, just before the write, so it only
/// comes into existence once a file actually makes it through the
/// pipeline.
fn process_file(
    input_path: &Path,
    output_path: &Path,
    detector: &SilenceDetector,
    output_dir: &Path,
) -> Result<(), PipelineError> {
    let bytes = fs::read(input_path)?;
    let buffer = wav::decode(&bytes)?;
    let start = detector.first_audible_frame(&buffer);
    let trimmed = buffer.trim_from(start);
    let encoded = wav::encode(&trimmed)?;
    fs::create_dir_all(output_dir)?;
    fs::write(output_path, encoded)?;
    Ok(())
}
