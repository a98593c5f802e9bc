pub mod controller;
pub mod error;
pub mod pipeline;
pub mod platform;
pub mod session;

pub use controller::{CaptureController, CaptureOutcome, SessionSettings};
pub use error::SessionError;
pub use pipeline::{RecognitionPipeline, ScreenPipeline};
pub use platform::{ClipboardSink, Overlay, ScreenGrabber, TextRecognizer};
pub use session::{CaptureSession, Phase, Step};
