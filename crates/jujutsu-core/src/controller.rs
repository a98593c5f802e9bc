use jujutsu_types::{CaptureRegion, InputEvent, SelectionRect};
use tracing::{debug, info, info_span, warn};

use crate::error::SessionError;
use crate::pipeline::RecognitionPipeline;
use crate::platform::{ClipboardSink, Overlay};
use crate::session::{CaptureSession, Step};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    /// Shortest accepted selection side in physical pixels
    pub min_selection_px: u32,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            min_selection_px: 3,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Text (possibly empty) was recognized and placed on the clipboard.
    Copied { region: CaptureRegion, text: String },
    /// Selection too small to recognize; dropped without OCR.
    Degenerate(SelectionRect),
    Cancelled,
}

/// Owns the single active capture session and the collaborators it drives.
///
/// `start_capture` and `abort_capture` are the only entry points that create
/// or drop a session outside of input dispatch.
pub struct CaptureController<O, P, C>
where
    O: Overlay,
    P: RecognitionPipeline,
    C: ClipboardSink,
{
    overlay: O,
    pipeline: P,
    clipboard: C,
    settings: SessionSettings,
    session: Option<CaptureSession>,
}

impl<O, P, C> CaptureController<O, P, C>
where
    O: Overlay,
    P: RecognitionPipeline,
    C: ClipboardSink,
{
    pub fn new(overlay: O, pipeline: P, clipboard: C, settings: SessionSettings) -> Self {
        Self {
            overlay,
            pipeline,
            clipboard,
            settings,
            session: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&CaptureSession> {
        self.session.as_ref()
    }

    /// Show the overlay and begin a session. No-op while one is active.
    pub fn start_capture(&mut self) -> Result<(), SessionError> {
        if let Some(session) = &self.session {
            debug!(session = %session.id(), "Capture already active, ignoring trigger");
            return Ok(());
        }

        let session = CaptureSession::new();
        let _span = info_span!("capture_session", id = %session.id()).entered();

        if let Err(err) = self.overlay.show_fullscreen_overlay() {
            if let Err(hide_err) = self.overlay.hide_overlay() {
                warn!("Failed to hide overlay after show error: {hide_err:#}");
            }
            return Err(SessionError::overlay(err));
        }

        info!("Capture session started");
        self.session = Some(session);
        Ok(())
    }

    /// Tear down the active session without recognition.
    ///
    /// Returns whether a session was active.
    pub fn abort_capture(&mut self) -> bool {
        let Some(mut session) = self.session.take() else {
            return false;
        };
        let _span = info_span!("capture_session", id = %session.id()).entered();

        session.abort();
        self.hide_overlay_logged();
        info!("Capture session aborted");
        true
    }

    /// Feed one overlay input event into the active session.
    ///
    /// Returns the outcome once the session has ended.
    pub fn handle_input(
        &mut self,
        event: InputEvent,
    ) -> Result<Option<CaptureOutcome>, SessionError> {
        let Some(session) = self.session.as_mut() else {
            debug!("Input without active session: {event:?}");
            return Ok(None);
        };
        let _span = info_span!("capture_session", id = %session.id()).entered();

        match session.handle(event) {
            Step::Ignored => Ok(None),
            Step::Started(point) => {
                self.overlay.draw_rect(point, point);
                Ok(None)
            }
            Step::Resized { start, current } => {
                self.overlay.draw_rect(start, current);
                Ok(None)
            }
            Step::Aborted => {
                self.session = None;
                self.hide_overlay_logged();
                info!("Capture session cancelled");
                Ok(Some(CaptureOutcome::Cancelled))
            }
            Step::Released(rect) => self.complete(rect).map(Some),
        }
    }

    fn complete(&mut self, rect: SelectionRect) -> Result<CaptureOutcome, SessionError> {
        if rect.is_degenerate(self.settings.min_selection_px) {
            self.session = None;
            self.hide_overlay_logged();
            info!("Selection {rect:?} too small, nothing to recognize");
            return Ok(CaptureOutcome::Degenerate(rect));
        }

        // origin has to be read while the overlay is still mapped
        let region = rect.to_screen(self.overlay.origin());

        // the grab must never see the overlay
        let hidden = self.overlay.hide_overlay();
        self.session = None;
        hidden.map_err(SessionError::overlay)?;

        info!("Recognizing region {region:?}");
        let text = self.pipeline.recognize(region)?;
        debug!("Recognized text: {text:?}");

        self.clipboard
            .replace_text(&text)
            .map_err(SessionError::clipboard)?;
        info!("Copied {} chars to clipboard", text.chars().count());

        Ok(CaptureOutcome::Copied { region, text })
    }

    fn hide_overlay_logged(&mut self) {
        if let Err(err) = self.overlay.hide_overlay() {
            warn!("Failed to hide overlay: {err:#}");
        }
    }
}

impl<O, P, C> Drop for CaptureController<O, P, C>
where
    O: Overlay,
    P: RecognitionPipeline,
    C: ClipboardSink,
{
    fn drop(&mut self) {
        self.abort_capture();
    }
}
