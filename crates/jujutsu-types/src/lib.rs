pub mod geometry;
pub mod types;

pub use geometry::{CaptureRegion, Point, SelectionRect};
pub use types::{AppEvent, CapturedImage, InputEvent};
