//! Capabilities the session needs from the host platform.
//!
//! Implementations wrap the native windowing, screen and clipboard APIs; the
//! state machine only talks to these traits.

use anyhow::Result;
use jujutsu_types::{CaptureRegion, CapturedImage, Point};

/// Full-screen selection surface.
pub trait Overlay {
    /// Show the semi-transparent overlay over the whole screen and grab pointer input.
    fn show_fullscreen_overlay(&mut self) -> Result<()>;

    /// Remove the overlay. Returns once the overlay can no longer appear in a screen grab.
    fn hide_overlay(&mut self) -> Result<()>;

    /// Draw the selection marker spanning `from` to `to` as given, without normalizing.
    fn draw_rect(&mut self, from: Point, to: Point);

    /// Screen position of the overlay's top-left corner, in physical pixels.
    fn origin(&self) -> Point;
}

pub trait ScreenGrabber {
    /// Snapshot the live screen inside `region`.
    fn capture_region(&self, region: CaptureRegion) -> Result<CapturedImage>;
}

pub trait TextRecognizer {
    /// Run OCR over `image`. An empty string means no text was found.
    fn recognize_image(&self, image: &CapturedImage) -> Result<String>;
}

pub trait ClipboardSink {
    /// Clear the clipboard, then set it to `text`.
    fn replace_text(&mut self, text: &str) -> Result<()>;
}
