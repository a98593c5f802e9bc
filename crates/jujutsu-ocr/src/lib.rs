mod capture;
mod error;
mod hotkey;
mod postprocess;
mod tesseract;

pub use capture::{XcapGrabber, capture_screen_region};
pub use error::OcrError;
pub use hotkey::{HotkeyAction, HotkeyManager};
pub use postprocess::{clean_output, normalize_cjk};
pub use tesseract::{
    LANGUAGES, REQUIRED_LANGUAGES, TesseractEngine, TesseractRecognizer, encode_png,
    parse_language_list, profile_args,
};
