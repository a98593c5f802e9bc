use serde::{Deserialize, Serialize};

fn default_opacity() -> f32 {
    0.3
}

fn default_settle_ms() -> u64 {
    50
}

fn default_min_selection_px() -> u32 {
    3
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OverlayConfig {
    /// Alpha of the dimming layer, 0.0..=1.0
    #[serde(default = "default_opacity")]
    pub opacity: f32,
    /// Wait after hiding the overlay so the compositor drops it before the screen grab
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
    /// Selections with a shorter side are dropped without running OCR
    #[serde(default = "default_min_selection_px")]
    pub min_selection_px: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            opacity: default_opacity(),
            settle_ms: default_settle_ms(),
            min_selection_px: default_min_selection_px(),
        }
    }
}

impl OverlayConfig {
    pub fn clamped_opacity(&self) -> f32 {
        if self.opacity.is_nan() {
            return default_opacity();
        }
        self.opacity.clamp(0.0, 1.0)
    }
}
