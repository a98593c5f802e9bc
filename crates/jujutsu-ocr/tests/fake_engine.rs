//! Drives the engine wrapper against a stand-in executable.
#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use std::time::Duration;

use jujutsu_core::TextRecognizer;
use jujutsu_ocr::{OcrError, TesseractEngine, TesseractRecognizer};
use jujutsu_types::CapturedImage;

struct FakeEngine {
    dir: PathBuf,
    path: PathBuf,
}

impl FakeEngine {
    fn new(script: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("jujutsu-ocr-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("tesseract");
        fs::write(&path, format!("#!/bin/sh\n{script}\n")).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        Self { dir, path }
    }

    fn engine(&self, timeout: Duration) -> TesseractEngine {
        TesseractEngine::new(&self.path, timeout)
    }
}

impl Drop for FakeEngine {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

fn white_image() -> CapturedImage {
    CapturedImage {
        data: vec![255; 4 * 4 * 4],
        width: 4,
        height: 4,
    }
}

#[tokio::test]
async fn returns_stdout_without_page_separator() {
    let fake = FakeEngine::new("cat > /dev/null\nprintf '呪術廻戦\\n\\f'");
    let text = fake
        .engine(Duration::from_secs(5))
        .recognize(vec![0x89, b'P', b'N', b'G'])
        .await
        .unwrap();
    assert_eq!(text, "呪術廻戦");
}

#[tokio::test]
async fn passes_fixed_profile_arguments() {
    let fake = FakeEngine::new("cat > /dev/null\necho \"$@\"");
    let text = fake
        .engine(Duration::from_secs(5))
        .recognize(vec![1])
        .await
        .unwrap();
    assert!(text.starts_with("stdin stdout -l jpn+jpn_vert --oem 1 --psm 6"));
    assert!(text.contains("-c chop_enable=T"));
}

#[tokio::test]
async fn empty_output_is_empty_text() {
    let fake = FakeEngine::new("cat > /dev/null");
    let text = fake
        .engine(Duration::from_secs(5))
        .recognize(vec![1])
        .await
        .unwrap();
    assert_eq!(text, "");
}

#[tokio::test]
async fn non_zero_exit_carries_stderr() {
    let fake = FakeEngine::new(concat!(
        "cat > /dev/null\n",
        "echo 'Failed loading language jpn_vert' >&2\n",
        "exit 1",
    ));
    let err = fake
        .engine(Duration::from_secs(5))
        .recognize(vec![1])
        .await
        .unwrap_err();
    match err {
        OcrError::Exit { stderr, .. } => assert!(stderr.contains("jpn_vert")),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn slow_engine_times_out() {
    let fake = FakeEngine::new("sleep 5");
    let err = fake
        .engine(Duration::from_millis(200))
        .recognize(vec![1])
        .await
        .unwrap_err();
    assert!(matches!(err, OcrError::Timeout(_)));
}

#[tokio::test]
async fn invalid_utf8_is_rejected() {
    let fake = FakeEngine::new("cat > /dev/null\nprintf '\\377\\376'");
    let err = fake
        .engine(Duration::from_secs(5))
        .recognize(vec![1])
        .await
        .unwrap_err();
    assert!(matches!(err, OcrError::InvalidOutput(_)));
}

#[tokio::test]
async fn language_check_reports_missing_data() {
    let fake = FakeEngine::new(
        "echo 'List of available languages in \"/tessdata/\" (2):'\necho eng\necho jpn",
    );
    let engine = fake.engine(Duration::from_secs(5));
    assert_eq!(engine.list_languages().await.unwrap(), vec!["eng", "jpn"]);
    match engine.verify_languages().await.unwrap_err() {
        OcrError::MissingLanguages(missing) => assert_eq!(missing, vec!["jpn_vert"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn language_list_on_stderr_is_accepted() {
    let fake = FakeEngine::new(concat!(
        "echo 'List of available languages (2):' >&2\n",
        "echo jpn >&2\n",
        "echo jpn_vert >&2",
    ));
    fake.engine(Duration::from_secs(5))
        .verify_languages()
        .await
        .unwrap();
}

#[test]
fn blocking_recognizer_encodes_png_for_the_engine() {
    // succeed only when stdin starts with the PNG signature
    let fake = FakeEngine::new(concat!(
        "sig=$(dd bs=1 skip=1 count=3 2>/dev/null)\n",
        "cat > /dev/null\n",
        "[ \"$sig\" = PNG ] && printf ok || exit 3",
    ));
    let recognizer = TesseractRecognizer::new(fake.engine(Duration::from_secs(5))).unwrap();
    assert_eq!(recognizer.recognize_image(&white_image()).unwrap(), "ok");
}

#[test]
fn normalization_is_opt_in() {
    let fake = FakeEngine::new("cat > /dev/null\nprintf '呪 術'");
    let plain = TesseractRecognizer::new(fake.engine(Duration::from_secs(5))).unwrap();
    assert_eq!(plain.recognize_image(&white_image()).unwrap(), "呪 術");

    let normalized = TesseractRecognizer::new(
        fake.engine(Duration::from_secs(5)).with_normalization(true),
    )
    .unwrap();
    assert_eq!(normalized.recognize_image(&white_image()).unwrap(), "呪術");
}
