use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcrError {
    #[error("failed to launch tesseract at {path}")]
    Spawn {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("tesseract I/O error")]
    Io(#[from] std::io::Error),

    #[error("tesseract did not finish within {0:?}")]
    Timeout(Duration),

    #[error("tesseract exited with {status}: {stderr}")]
    Exit { status: String, stderr: String },

    #[error("tesseract produced invalid UTF-8")]
    InvalidOutput(#[from] std::string::FromUtf8Error),

    #[error("failed to encode image: {0}")]
    Encode(String),

    #[error("tesseract is missing language data: {}", .0.join(", "))]
    MissingLanguages(Vec<String>),
}
