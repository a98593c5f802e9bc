slint::include_modules!();

pub mod overlay;

pub use overlay::SlintOverlay;
