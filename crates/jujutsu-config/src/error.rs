use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Tesseract binary path detection not available for your operating system ({platform}), \
         please set $TESSERACT_BIN_PATH and try again."
    )]
    EngineNotFound { platform: String },

    #[error("failed to read config file {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value for ${var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },
}
