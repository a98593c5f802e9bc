use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use jujutsu_config::Config;
use jujutsu_core::{CaptureController, ScreenPipeline, SessionSettings};
use jujutsu_io::ArboardClipboard;
use jujutsu_ocr::{HotkeyManager, TesseractEngine, TesseractRecognizer, XcapGrabber};
use jujutsu_types::AppEvent;
use jujutsu_ui::SlintOverlay;
use slint::{Timer, TimerMode};

use self::app::{App, Flow};

mod app;
mod logging;

#[cfg(test)]
mod tests {
    mod dispatch_tests;
}

/// How often the UI thread drains hotkeys and overlay input.
const TICK: Duration = Duration::from_millis(16);

/// Drag-select a screen region and copy its Japanese text to the clipboard.
#[derive(Debug, Parser)]
#[command(name = "jujutsu", version)]
struct Cli {
    /// JSON config file (defaults to $JUJUTSU_CONFIG)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    /// Start one capture immediately and exit when it ends
    #[arg(long)]
    once: bool,

    /// Do not register global hotkeys
    #[arg(long)]
    no_hotkeys: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let dotenv = dotenvy::dotenv();

    let config = Config::load_from_env(cli.config.as_deref())?;

    logging::init(&config.log_filter, cli.log_json)?;

    match dotenv {
        Ok(path) => tracing::debug!("Loaded {}", path.display()),
        Err(err) if err.not_found() => {}
        Err(err) => tracing::warn!("Ignoring .env: {err}"),
    }

    run(&cli, &config)
}

fn run(cli: &Cli, config: &Config) -> Result<()> {
    let engine =
        TesseractEngine::from_config(&config.ocr).context("No usable Tesseract engine")?;
    tracing::info!(
        "Using tesseract at {} (timeout {:?})",
        engine.path().display(),
        engine.timeout()
    );

    let recognizer = TesseractRecognizer::new(engine)?;
    if config.ocr.verify_languages {
        recognizer
            .verify_languages()
            .context("Tesseract is not usable")?;
    }

    let (events_tx, events_rx) = kanal::unbounded::<AppEvent>();

    let overlay = SlintOverlay::new(&config.overlay, events_tx.clone())?;
    let clipboard = ArboardClipboard::new()?;
    let controller = CaptureController::new(
        overlay,
        ScreenPipeline::new(XcapGrabber, recognizer),
        clipboard,
        SessionSettings {
            min_selection_px: config.overlay.min_selection_px,
        },
    );

    let hotkeys = if cli.no_hotkeys {
        None
    } else {
        Some(HotkeyManager::from_config(&config.hotkeys)?)
    };
    if hotkeys.is_none() && !cli.once {
        tracing::warn!("Hotkeys disabled and --once not given, nothing will start a capture");
    }

    if cli.once {
        events_tx
            .send(AppEvent::TriggerCapture)
            .context("Failed to queue capture")?;
    }

    let app = Rc::new(RefCell::new(App::new(
        controller, hotkeys, events_rx, cli.once,
    )));

    let timer = Timer::default();
    {
        let app = app.clone();
        timer.start(TimerMode::Repeated, TICK, move || {
            if app.borrow_mut().tick() == Flow::Quit
                && let Err(err) = slint::quit_event_loop()
            {
                tracing::error!("Failed to stop event loop: {err}");
            }
        });
    }

    tracing::info!("Ready");
    // keeps running while the overlay is hidden
    slint::run_event_loop_until_quit().context("Event loop failed")?;

    timer.stop();
    drop(events_tx);

    if let Some(err) = app.borrow_mut().take_failure() {
        return Err(err).context("Capture failed");
    }
    tracing::info!("Shutting down");
    Ok(())
}
