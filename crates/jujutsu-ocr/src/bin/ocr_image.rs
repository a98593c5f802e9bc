//! Run the fixed OCR profile on an image file: cargo run -p jujutsu-ocr --bin ocr_image -- <image>

use anyhow::{Context, Result};
use jujutsu_config::Config;
use jujutsu_core::TextRecognizer;
use jujutsu_ocr::{TesseractEngine, TesseractRecognizer};
use jujutsu_types::CapturedImage;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .context("usage: ocr_image <image>")?;

    // same .env and $JUJUTSU_CONFIG lookup as the app
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        eprintln!("Ignoring .env: {err}");
    }
    let config = Config::load_from_env(None)?;
    let engine = TesseractEngine::from_config(&config.ocr)?;
    let recognizer = TesseractRecognizer::new(engine)?;

    let image = image::open(&path)
        .with_context(|| format!("Failed to open {path}"))?
        .to_rgba8();
    let image = CapturedImage {
        width: image.width(),
        height: image.height(),
        data: image.into_raw(),
    };

    let start = std::time::Instant::now();
    let text = recognizer.recognize_image(&image)?;
    eprintln!(
        "{}: {} chars in {:?} using {}",
        path,
        text.chars().count(),
        start.elapsed(),
        recognizer.engine().path().display()
    );
    println!("{text}");
    Ok(())
}
