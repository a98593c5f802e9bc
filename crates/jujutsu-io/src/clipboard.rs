use anyhow::{Context, Result};
use arboard::Clipboard;
use jujutsu_core::ClipboardSink;

/// System clipboard through `arboard`.
///
/// Keep it alive for the whole process: on X11 the selection is served by
/// this handle and disappears with it.
pub struct ArboardClipboard {
    inner: Clipboard,
}

impl ArboardClipboard {
    pub fn new() -> Result<Self> {
        let inner = Clipboard::new().context("Failed to open clipboard")?;
        Ok(Self { inner })
    }
}

impl ClipboardSink for ArboardClipboard {
    fn replace_text(&mut self, text: &str) -> Result<()> {
        if let Err(err) = self.inner.clear() {
            tracing::debug!("Clipboard clear failed: {err}");
        }
        self.inner
            .set_text(text)
            .context("Failed to write text to clipboard")
    }
}
