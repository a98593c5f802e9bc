use jujutsu_types::CaptureRegion;

use crate::error::SessionError;
use crate::platform::{ScreenGrabber, TextRecognizer};

/// Turns an absolute screen region into recognized text.
pub trait RecognitionPipeline {
    fn recognize(&self, region: CaptureRegion) -> Result<String, SessionError>;
}

/// Screen grab followed by OCR, nothing else.
pub struct ScreenPipeline<G, R> {
    grabber: G,
    recognizer: R,
}

impl<G, R> ScreenPipeline<G, R>
where
    G: ScreenGrabber,
    R: TextRecognizer,
{
    pub fn new(grabber: G, recognizer: R) -> Self {
        Self {
            grabber,
            recognizer,
        }
    }
}

impl<G, R> RecognitionPipeline for ScreenPipeline<G, R>
where
    G: ScreenGrabber,
    R: TextRecognizer,
{
    fn recognize(&self, region: CaptureRegion) -> Result<String, SessionError> {
        if region.width == 0 || region.height == 0 {
            return Err(SessionError::InvalidRegion(region));
        }

        let start = std::time::Instant::now();
        let image = self
            .grabber
            .capture_region(region)
            .map_err(SessionError::capture)?;
        if image.is_empty() {
            return Err(SessionError::Capture(format!(
                "screen grab of {region:?} returned no pixels"
            )));
        }
        tracing::debug!("Captured {:?} in {:?}", image, start.elapsed());

        let start = std::time::Instant::now();
        let text = self
            .recognizer
            .recognize_image(&image)
            .map_err(SessionError::recognition)?;
        tracing::debug!(
            "OCR finished in {:?}, {} chars",
            start.elapsed(),
            text.chars().count()
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use anyhow::anyhow;
    use jujutsu_types::CapturedImage;

    use super::*;

    struct FakeGrabber {
        regions: RefCell<Vec<CaptureRegion>>,
        fail: bool,
    }

    impl ScreenGrabber for FakeGrabber {
        fn capture_region(&self, region: CaptureRegion) -> anyhow::Result<CapturedImage> {
            self.regions.borrow_mut().push(region);
            if self.fail {
                return Err(anyhow!("permission denied"));
            }
            Ok(CapturedImage {
                data: vec![0; (region.width * region.height * 4) as usize],
                width: region.width,
                height: region.height,
            })
        }
    }

    struct FakeRecognizer(Option<&'static str>);

    impl TextRecognizer for FakeRecognizer {
        fn recognize_image(&self, image: &CapturedImage) -> anyhow::Result<String> {
            assert!(!image.is_empty());
            self.0
                .map(str::to_string)
                .ok_or_else(|| anyhow!("tesseract exited with status 1"))
        }
    }

    fn region() -> CaptureRegion {
        CaptureRegion {
            x: 100,
            y: 100,
            width: 30,
            height: 20,
        }
    }

    fn grabber(fail: bool) -> FakeGrabber {
        FakeGrabber {
            regions: RefCell::new(Vec::new()),
            fail,
        }
    }

    #[test]
    fn grabs_region_then_recognizes() {
        let pipeline = ScreenPipeline::new(grabber(false), FakeRecognizer(Some("呪術廻戦")));
        assert_eq!(pipeline.recognize(region()).unwrap(), "呪術廻戦");
        assert_eq!(*pipeline.grabber.regions.borrow(), vec![region()]);
    }

    #[test]
    fn empty_text_is_not_an_error() {
        let pipeline = ScreenPipeline::new(grabber(false), FakeRecognizer(Some("")));
        assert_eq!(pipeline.recognize(region()).unwrap(), "");
    }

    #[test]
    fn capture_failure_is_reported() {
        let pipeline = ScreenPipeline::new(grabber(true), FakeRecognizer(Some("unused")));
        let err = pipeline.recognize(region()).unwrap_err();
        assert!(matches!(err, SessionError::Capture(ref msg) if msg.contains("permission denied")));
    }

    #[test]
    fn engine_failure_is_reported() {
        let pipeline = ScreenPipeline::new(grabber(false), FakeRecognizer(None));
        let err = pipeline.recognize(region()).unwrap_err();
        assert!(matches!(err, SessionError::Recognition(_)));
    }

    #[test]
    fn empty_region_never_reaches_the_grabber() {
        let pipeline = ScreenPipeline::new(grabber(false), FakeRecognizer(Some("x")));
        let empty = CaptureRegion {
            width: 0,
            ..region()
        };
        assert!(matches!(
            pipeline.recognize(empty),
            Err(SessionError::InvalidRegion(_))
        ));
        assert!(pipeline.grabber.regions.borrow().is_empty());
    }
}
