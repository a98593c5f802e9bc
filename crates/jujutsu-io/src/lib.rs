pub mod clipboard;

pub use clipboard::ArboardClipboard;
