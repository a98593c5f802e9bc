use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::hotkey::HotkeyConfig;
use self::ocr::OcrConfig;
use self::overlay::OverlayConfig;

pub mod error;
pub mod hotkey;
pub mod ocr;
pub mod overlay;

pub use error::ConfigError;
pub use ocr::TESSERACT_BIN_ENV;

/// Environment variable pointing at a JSON config file.
pub const CONFIG_PATH_ENV: &str = "JUJUTSU_CONFIG";

fn default_log_filter() -> String {
    "info".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub ocr: OcrConfig,
    pub hotkeys: HotkeyConfig,
    pub overlay: OverlayConfig,

    /// `tracing` filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ocr: OcrConfig::default(),
            hotkeys: HotkeyConfig::default(),
            overlay: OverlayConfig::default(),
            log_filter: default_log_filter(),
        }
    }
}

/// Config file to read: `explicit` if given, else `$JUJUTSU_CONFIG`.
pub fn config_path<F>(explicit: Option<&Path>, lookup: F) -> Option<PathBuf>
where
    F: Fn(&str) -> Option<String>,
{
    explicit.map(Path::to_path_buf).or_else(|| {
        lookup(CONFIG_PATH_ENV)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
    })
}

impl Config {
    /// [`Config::load`] with the file picked by [`config_path`] from the process environment.
    pub fn load_from_env(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let path = config_path(explicit, |var| env::var(var).ok());
        Self::load(path.as_deref())
    }

    /// Defaults, then the optional JSON file, then process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|var| env::var(var).ok())?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        tracing::info!("Loading config from {}", path.display());
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply environment overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup(TESSERACT_BIN_ENV).filter(|v| !v.trim().is_empty()) {
            self.ocr.tesseract_path = Some(PathBuf::from(path));
        }

        if let Some(value) = lookup("OCR_TIMEOUT_MS") {
            self.ocr.timeout_ms = value
                .trim()
                .parse()
                .ok()
                .filter(|ms| *ms > 0)
                .ok_or(ConfigError::InvalidEnv {
                    var: "OCR_TIMEOUT_MS",
                    value,
                })?;
        }

        if let Some(filter) = lookup("JUJUTSU_LOG") {
            self.log_filter = filter;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_path_wins_over_file_path() {
        let mut config: Config =
            serde_json::from_str(r#"{"ocr": {"tesseract_path": "/from/file"}}"#).unwrap();
        config
            .apply_env(env_of(&[(TESSERACT_BIN_ENV, "/from/env")]))
            .unwrap();
        assert_eq!(config.ocr.tesseract_path, Some(PathBuf::from("/from/env")));
    }

    #[test]
    fn blank_env_path_is_ignored() {
        let mut config = Config::default();
        config
            .apply_env(env_of(&[(TESSERACT_BIN_ENV, "  ")]))
            .unwrap();
        assert_eq!(config.ocr.tesseract_path, None);
    }

    #[test]
    fn invalid_timeout_is_rejected() {
        let mut config = Config::default();
        let err = config
            .apply_env(env_of(&[("OCR_TIMEOUT_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidEnv {
                var: "OCR_TIMEOUT_MS",
                ..
            }
        ));

        let err = config
            .apply_env(env_of(&[("OCR_TIMEOUT_MS", "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { .. }));
    }

    #[test]
    fn env_overrides_timeout_and_log_filter() {
        let mut config = Config::default();
        config
            .apply_env(env_of(&[("OCR_TIMEOUT_MS", "1500"), ("JUJUTSU_LOG", "debug")]))
            .unwrap();
        assert_eq!(config.ocr.timeout_ms, 1500);
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn explicit_config_path_wins_over_env() {
        let env = env_of(&[(CONFIG_PATH_ENV, "/from/env.json")]);
        assert_eq!(
            config_path(Some(Path::new("/from/cli.json")), &env),
            Some(PathBuf::from("/from/cli.json"))
        );
        assert_eq!(config_path(None, &env), Some(PathBuf::from("/from/env.json")));
    }

    #[test]
    fn no_config_path_without_flag_or_env() {
        assert_eq!(config_path(None, env_of(&[])), None);
        assert_eq!(config_path(None, env_of(&[(CONFIG_PATH_ENV, " ")])), None);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.hotkeys.capture, "ctrl+Backquote");
        assert_eq!(config.hotkeys.cancel, "Escape");
        assert_eq!(config.overlay.min_selection_px, 3);
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("/definitely/not/here/jujutsu.json");
        let err = Config::from_file(path).unwrap_err();
        match err {
            ConfigError::Read { path: p, .. } => assert_eq!(p, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn opacity_is_clamped() {
        let mut overlay = OverlayConfig::default();
        overlay.opacity = 4.0;
        assert_eq!(overlay.clamped_opacity(), 1.0);
        overlay.opacity = f32::NAN;
        assert_eq!(overlay.clamped_opacity(), 0.3);
    }
}
