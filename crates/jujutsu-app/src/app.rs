use jujutsu_core::{
    CaptureController, CaptureOutcome, ClipboardSink, Overlay, RecognitionPipeline, SessionError,
};
use jujutsu_ocr::{HotkeyAction, HotkeyManager};
use jujutsu_types::AppEvent;
use kanal::Receiver;

/// Whether the event loop keeps running after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn hotkey_event(action: HotkeyAction) -> AppEvent {
    match action {
        HotkeyAction::Capture => AppEvent::TriggerCapture,
        HotkeyAction::Cancel => AppEvent::TriggerCancel,
        HotkeyAction::Quit => AppEvent::Quit,
    }
}

/// Route one event into the controller, returning the session error if any.
pub fn try_dispatch<O, P, C>(
    controller: &mut CaptureController<O, P, C>,
    event: AppEvent,
) -> Result<Flow, SessionError>
where
    O: Overlay,
    P: RecognitionPipeline,
    C: ClipboardSink,
{
    match event {
        AppEvent::TriggerCapture => controller.start_capture()?,
        AppEvent::TriggerCancel => {
            controller.abort_capture();
        }
        AppEvent::Input(input) => match controller.handle_input(input)? {
            Some(CaptureOutcome::Copied { text, .. }) if text.is_empty() => {
                tracing::info!("No text recognized, clipboard cleared");
            }
            Some(outcome) => tracing::debug!("Session finished: {outcome:?}"),
            None => {}
        },
        AppEvent::Quit => {
            tracing::info!("Quit requested");
            controller.abort_capture();
            return Ok(Flow::Quit);
        }
    }
    Ok(Flow::Continue)
}

/// Like [`try_dispatch`], but session failures are logged and leave the loop running.
pub fn dispatch<O, P, C>(controller: &mut CaptureController<O, P, C>, event: AppEvent) -> Flow
where
    O: Overlay,
    P: RecognitionPipeline,
    C: ClipboardSink,
{
    try_dispatch(controller, event).unwrap_or_else(|err| {
        tracing::error!("Capture failed: {err}");
        Flow::Continue
    })
}

/// Everything the UI-thread timer drives.
pub struct App<O, P, C>
where
    O: Overlay,
    P: RecognitionPipeline,
    C: ClipboardSink,
{
    controller: CaptureController<O, P, C>,
    hotkeys: Option<HotkeyManager>,
    events: Receiver<AppEvent>,
    once: bool,
    failure: Option<SessionError>,
}

impl<O, P, C> App<O, P, C>
where
    O: Overlay,
    P: RecognitionPipeline,
    C: ClipboardSink,
{
    pub fn new(
        controller: CaptureController<O, P, C>,
        hotkeys: Option<HotkeyManager>,
        events: Receiver<AppEvent>,
        once: bool,
    ) -> Self {
        Self {
            controller,
            hotkeys,
            events,
            once,
            failure: None,
        }
    }

    /// The error that ended a `--once` run, if it failed.
    pub fn take_failure(&mut self) -> Option<SessionError> {
        self.failure.take()
    }

    pub fn controller(&self) -> &CaptureController<O, P, C> {
        &self.controller
    }

    /// Drain hotkeys and queued overlay input, in that order.
    pub fn tick(&mut self) -> Flow {
        let mut pending: Vec<AppEvent> = self
            .hotkeys
            .as_ref()
            .map(|hotkeys| hotkeys.poll().into_iter().map(hotkey_event).collect())
            .unwrap_or_default();

        loop {
            match self.events.try_recv() {
                Ok(Some(event)) => pending.push(event),
                Ok(None) => break,
                Err(_) => {
                    tracing::warn!("Event channel closed");
                    return Flow::Quit;
                }
            }
        }

        for event in pending {
            match try_dispatch(&mut self.controller, event) {
                Ok(Flow::Quit) => return Flow::Quit,
                Ok(Flow::Continue) => {}
                Err(err) if self.once => {
                    tracing::error!("Capture failed: {err}");
                    self.controller.abort_capture();
                    self.failure = Some(err);
                    return Flow::Quit;
                }
                Err(err) => tracing::error!("Capture failed: {err}"),
            }
        }

        let active = self.controller.is_active();
        if let Some(hotkeys) = self.hotkeys.as_mut()
            && let Err(err) = hotkeys.set_cancel_armed(active)
        {
            tracing::warn!("{err:#}");
        }

        if self.once && !active {
            return Flow::Quit;
        }
        Flow::Continue
    }
}
