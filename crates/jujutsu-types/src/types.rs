use crate::geometry::Point;

/// Events consumed by the application loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// Start a capture session (no-op while one is active).
    TriggerCapture,
    /// Abort the active session (no-op without one).
    TriggerCancel,
    /// Pointer or keyboard input from the overlay.
    Input(InputEvent),
    Quit,
}

/// Overlay input, already reduced to what the selection state machine needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Primary button pressed.
    Press(Point),
    /// Pointer moved while the primary button is held.
    Move(Point),
    /// Primary button released.
    Release(Point),
    /// Escape pressed inside the overlay.
    Cancel,
}

/// Raw RGBA8 pixels grabbed from the screen.
#[derive(Clone)]
pub struct CapturedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl CapturedImage {
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl std::fmt::Debug for CapturedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.data.len())
            .finish()
    }
}
