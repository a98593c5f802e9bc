use jujutsu_types::CaptureRegion;
use thiserror::Error;

/// Failures that end a capture session.
///
/// Every variant is terminal for the session; nothing is retried and no
/// partial text reaches the clipboard.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("overlay error: {0}")]
    Overlay(String),

    #[error("invalid capture region {0:?}")]
    InvalidRegion(CaptureRegion),

    #[error("screen capture failed: {0}")]
    Capture(String),

    #[error("text recognition failed: {0}")]
    Recognition(String),

    #[error("clipboard write failed: {0}")]
    Clipboard(String),
}

impl SessionError {
    pub fn overlay(err: anyhow::Error) -> Self {
        Self::Overlay(format!("{err:#}"))
    }

    pub fn capture(err: anyhow::Error) -> Self {
        Self::Capture(format!("{err:#}"))
    }

    pub fn recognition(err: anyhow::Error) -> Self {
        Self::Recognition(format!("{err:#}"))
    }

    pub fn clipboard(err: anyhow::Error) -> Self {
        Self::Clipboard(format!("{err:#}"))
    }
}
