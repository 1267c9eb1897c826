use std::process::ExitStatus;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to run extractor: {0}")]
    Io(#[from] std::io::Error),

    #[error("extractor failed ({status}): {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("unparseable extractor output: {0}")]
    Unparseable(#[from] serde_json::Error),

    #[error("video has no title")]
    MissingTitle,
}
