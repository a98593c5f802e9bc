/// Pointer position in physical pixels.
///
/// Overlay input is overlay-local; the overlay origin is a screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Normalized selection in overlay-local coordinates.
///
/// Width and height are never negative, whichever corner was recorded first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl SelectionRect {
    /// Resolve two drag corners into an origin and a size.
    pub fn from_corners(start: Point, current: Point) -> Self {
        Self {
            x: start.x.min(current.x),
            y: start.y.min(current.y),
            width: start.x.abs_diff(current.x),
            height: start.y.abs_diff(current.y),
        }
    }

    /// True when either side is shorter than `min_side` pixels.
    pub fn is_degenerate(&self, min_side: u32) -> bool {
        let min_side = min_side.max(1);
        self.width < min_side || self.height < min_side
    }

    /// Translate into absolute screen coordinates.
    pub fn to_screen(&self, origin: Point) -> CaptureRegion {
        CaptureRegion {
            x: origin.x.saturating_add(self.x),
            y: origin.y.saturating_add(self.y),
            width: self.width,
            height: self.height,
        }
    }
}

/// Absolute screen region handed to the recognition pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CaptureRegion {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CaptureRegion {
    pub fn right(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    pub fn bottom(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }
}
