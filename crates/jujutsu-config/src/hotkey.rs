use serde::{Deserialize, Serialize};

fn default_capture() -> String {
    "ctrl+Backquote".to_string()
}

fn default_cancel() -> String {
    "Escape".to_string()
}

/// Global hotkeys in `global-hotkey` notation (`modifiers+Code`).
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct HotkeyConfig {
    #[serde(default = "default_capture")]
    pub capture: String,
    /// Only registered while a capture session is active
    #[serde(default = "default_cancel")]
    pub cancel: String,
    pub quit: Option<String>,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            capture: default_capture(),
            cancel: default_cancel(),
            quit: None,
        }
    }
}
