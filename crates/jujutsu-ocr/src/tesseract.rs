use std::path::{Path, PathBuf};
use std::process::{Output, Stdio};
use std::time::Duration;

use anyhow::Context;
use image::{ExtendedColorType, ImageEncoder, codecs::png::PngEncoder};
use jujutsu_config::ocr::OcrConfig;
use jujutsu_core::TextRecognizer;
use jujutsu_types::CapturedImage;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::runtime::Runtime;

use crate::error::OcrError;
use crate::postprocess::{clean_output, normalize_cjk};

/// Horizontal and vertical Japanese in one pass.
pub const LANGUAGES: &str = "jpn+jpn_vert";
pub const REQUIRED_LANGUAGES: [&str; 2] = ["jpn", "jpn_vert"];

/// Neural nets LSTM engine only.
const ENGINE_MODE: &str = "1";
/// Single uniform block of text; handles both horizontal and vertical layout.
const PAGE_SEGMENTATION_MODE: &str = "6";

/// Tuning for dense CJK text: keep chopping, turn the other segmentation
/// heuristics off.
const TUNING: [(&str, &str); 7] = [
    ("chop_enable", "T"),
    ("use_new_state_cost", "F"),
    ("segment_segcost_rating", "F"),
    ("enable_new_segsearch", "0"),
    ("language_model_ngram_on", "0"),
    ("textord_force_make_prop_words", "F"),
    ("edges_max_children_per_outline", "40"),
];

/// Command line for one recognition: PNG on stdin, text on stdout.
pub fn profile_args() -> Vec<String> {
    let mut args = vec![
        "stdin".to_string(),
        "stdout".to_string(),
        "-l".to_string(),
        LANGUAGES.to_string(),
        "--oem".to_string(),
        ENGINE_MODE.to_string(),
        "--psm".to_string(),
        PAGE_SEGMENTATION_MODE.to_string(),
    ];
    for (name, value) in TUNING {
        args.push("-c".to_string());
        args.push(format!("{name}={value}"));
    }
    args
}

/// Parse `tesseract --list-langs` output into language codes.
pub fn parse_language_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("List of available languages"))
        .map(str::to_string)
        .collect()
}

pub fn encode_png(image: &CapturedImage) -> Result<Vec<u8>, OcrError> {
    let expected = image.width as usize * image.height as usize * 4;
    if image.is_empty() || image.data.len() != expected {
        return Err(OcrError::Encode(format!(
            "{}x{} image with {} bytes of RGBA data",
            image.width,
            image.height,
            image.data.len()
        )));
    }

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(
            &image.data,
            image.width,
            image.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| OcrError::Encode(e.to_string()))?;
    Ok(buffer)
}

/// Handle to the Tesseract executable with the fixed profile.
#[derive(Debug, Clone)]
pub struct TesseractEngine {
    path: PathBuf,
    timeout: Duration,
    normalize: bool,
}

impl TesseractEngine {
    pub fn new(path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            path: path.into(),
            timeout,
            normalize: false,
        }
    }

    pub fn from_config(config: &OcrConfig) -> anyhow::Result<Self> {
        let path = config.engine_path()?;
        Ok(Self::new(path, Duration::from_millis(config.timeout_ms))
            .with_normalization(config.normalize_output))
    }

    pub fn with_normalization(mut self, normalize: bool) -> Self {
        self.normalize = normalize;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Recognize text in PNG bytes.
    pub async fn recognize(&self, png: Vec<u8>) -> Result<String, OcrError> {
        let stdout = self.run(&profile_args(), Some(png)).await?;
        let text = clean_output(&String::from_utf8(stdout)?);
        if self.normalize {
            return Ok(normalize_cjk(&text));
        }
        Ok(text)
    }

    /// Languages the engine has traineddata for.
    pub async fn list_languages(&self) -> Result<Vec<String>, OcrError> {
        let output = self.run_capturing_all(&["--list-langs".to_string()]).await?;
        Ok(parse_language_list(&output))
    }

    /// Fail unless every language in the profile is installed.
    pub async fn verify_languages(&self) -> Result<(), OcrError> {
        let installed = self.list_languages().await?;
        let missing: Vec<String> = REQUIRED_LANGUAGES
            .iter()
            .filter(|lang| !installed.iter().any(|have| have == *lang))
            .map(|lang| lang.to_string())
            .collect();
        if missing.is_empty() {
            tracing::info!("Tesseract languages available: {}", installed.join(", "));
            Ok(())
        } else {
            Err(OcrError::MissingLanguages(missing))
        }
    }

    fn command(&self, args: &[String], stdin: Stdio) -> Command {
        let mut command = Command::new(&self.path);
        command
            .args(args)
            .stdin(stdin)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(windows)]
        {
            const CREATE_NO_WINDOW: u32 = 0x0800_0000;
            command.creation_flags(CREATE_NO_WINDOW);
        }

        command
    }

    fn spawn_error(&self, source: std::io::Error) -> OcrError {
        OcrError::Spawn {
            path: self.path.clone(),
            source,
        }
    }

    /// Run the engine under the deadline and return stdout.
    ///
    /// The child is killed when the deadline expires.
    async fn run(&self, args: &[String], input: Option<Vec<u8>>) -> Result<Vec<u8>, OcrError> {
        let stdin = if input.is_some() {
            Stdio::piped()
        } else {
            Stdio::null()
        };
        let mut child = self
            .command(args, stdin)
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let pipe = child.stdin.take();
        let feed = async move {
            if let (Some(mut pipe), Some(input)) = (pipe, input) {
                pipe.write_all(&input).await?;
                pipe.shutdown().await?;
            }
            Ok::<_, std::io::Error>(())
        };

        let run = async {
            let (fed, output) = tokio::join!(feed, child.wait_with_output());
            let output = check_status(output?)?;
            // a broken pipe only matters when the engine itself succeeded
            fed?;
            Ok::<_, OcrError>(output.stdout)
        };

        tokio::time::timeout(self.timeout, run)
            .await
            .map_err(|_| OcrError::Timeout(self.timeout))?
    }

    /// Some Tesseract builds print informational output on stderr.
    async fn run_capturing_all(&self, args: &[String]) -> Result<String, OcrError> {
        let child = self
            .command(args, Stdio::null())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| OcrError::Timeout(self.timeout))??;
        let output = check_status(output)?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push('\n');
        text.push_str(&String::from_utf8_lossy(&output.stderr));
        Ok(text)
    }
}

fn check_status(output: Output) -> Result<Output, OcrError> {
    if output.status.success() {
        return Ok(output);
    }
    Err(OcrError::Exit {
        status: output.status.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
    })
}

/// Blocking front for the engine, driven by its own current-thread runtime.
///
/// Runs on the caller's thread; the UI stays unresponsive until OCR returns.
pub struct TesseractRecognizer {
    engine: TesseractEngine,
    runtime: Runtime,
}

impl TesseractRecognizer {
    pub fn new(engine: TesseractEngine) -> anyhow::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to build OCR runtime")?;
        Ok(Self { engine, runtime })
    }

    pub fn engine(&self) -> &TesseractEngine {
        &self.engine
    }

    pub fn verify_languages(&self) -> Result<(), OcrError> {
        self.runtime.block_on(self.engine.verify_languages())
    }

    pub fn recognize_png(&self, png: Vec<u8>) -> Result<String, OcrError> {
        self.runtime.block_on(self.engine.recognize(png))
    }
}

impl TextRecognizer for TesseractRecognizer {
    fn recognize_image(&self, image: &CapturedImage) -> anyhow::Result<String> {
        let png = encode_png(image)?;
        tracing::debug!("Running tesseract on {} byte PNG", png.len());
        Ok(self.recognize_png(png)?)
    }
}
