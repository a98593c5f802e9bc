use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable overriding the Tesseract executable location.
pub const TESSERACT_BIN_ENV: &str = "TESSERACT_BIN_PATH";

const WINDOWS_DEFAULT_PATH: &str = r"C:\Program Files\Tesseract-OCR\tesseract.exe";
const LINUX_DEFAULT_PATH: &str = "/usr/bin/tesseract";

fn default_timeout_ms() -> u64 {
    30_000
}

fn default_verify_languages() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OcrConfig {
    /// Explicit Tesseract executable; `$TESSERACT_BIN_PATH` takes precedence
    pub tesseract_path: Option<PathBuf>,
    /// Deadline for a single engine invocation
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// NFKC-normalize the result and drop spaces between CJK characters
    pub normalize_output: bool,
    /// Check at startup that the engine has the required language data
    #[serde(default = "default_verify_languages")]
    pub verify_languages: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            tesseract_path: None,
            timeout_ms: default_timeout_ms(),
            normalize_output: false,
            verify_languages: default_verify_languages(),
        }
    }
}

impl OcrConfig {
    /// Resolve the engine executable for the running platform.
    pub fn engine_path(&self) -> Result<PathBuf, ConfigError> {
        self.engine_path_for(std::env::consts::OS)
    }

    /// Resolve the engine executable as if running on `platform`.
    ///
    /// A configured path always wins; otherwise only platforms with a known
    /// install location resolve.
    pub fn engine_path_for(&self, platform: &str) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.tesseract_path {
            return Ok(path.clone());
        }

        platform_default(platform)
            .map(PathBuf::from)
            .ok_or_else(|| ConfigError::EngineNotFound {
                platform: platform.to_string(),
            })
    }
}

fn platform_default(platform: &str) -> Option<&'static str> {
    match platform {
        "windows" => Some(WINDOWS_DEFAULT_PATH),
        "linux" => Some(LINUX_DEFAULT_PATH),
        _ => None,
    }
}
