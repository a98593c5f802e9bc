use jujutsu_types::{InputEvent, Point, SelectionRect};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Overlay is up, waiting for the primary button.
    Idle,
    /// Button held; the marker follows the pointer.
    Dragging,
    /// Button released; the rectangle has been handed off.
    Completing,
    Aborted,
}

/// What the owner of the session has to do after an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The event does not apply to the current phase.
    Ignored,
    /// Drag began at this point; show a zero-size marker.
    Started(Point),
    /// Marker now spans `start` to `current`, raw.
    Resized { start: Point, current: Point },
    /// Drag finished with this normalized rectangle.
    Released(SelectionRect),
    /// Session cancelled; tear down without recognition.
    Aborted,
}

/// One drag-to-select lifecycle.
#[derive(Debug)]
pub struct CaptureSession {
    id: Uuid,
    phase: Phase,
    drag_start: Option<Point>,
    drag_current: Option<Point>,
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CaptureSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            phase: Phase::Idle,
            drag_start: None,
            drag_current: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn drag_start(&self) -> Option<Point> {
        self.drag_start
    }

    pub fn drag_current(&self) -> Option<Point> {
        self.drag_current
    }

    /// Accepts input only in `Idle` and `Dragging`.
    pub fn is_accepting_input(&self) -> bool {
        matches!(self.phase, Phase::Idle | Phase::Dragging)
    }

    pub fn handle(&mut self, event: InputEvent) -> Step {
        match (self.phase, event) {
            (Phase::Idle, InputEvent::Press(point)) => {
                self.phase = Phase::Dragging;
                self.drag_start = Some(point);
                self.drag_current = Some(point);
                Step::Started(point)
            }
            (Phase::Dragging, InputEvent::Move(point)) => {
                self.drag_current = Some(point);
                match self.drag_start {
                    Some(start) => Step::Resized {
                        start,
                        current: point,
                    },
                    None => Step::Ignored,
                }
            }
            (Phase::Dragging, InputEvent::Release(point)) => {
                self.drag_current = Some(point);
                let Some(start) = self.drag_start else {
                    return Step::Ignored;
                };
                self.phase = Phase::Completing;
                let rect = SelectionRect::from_corners(start, point);
                self.clear_drag();
                Step::Released(rect)
            }
            (Phase::Idle | Phase::Dragging, InputEvent::Cancel) => {
                self.abort();
                Step::Aborted
            }
            _ => Step::Ignored,
        }
    }

    /// Move to `Aborted` and drop drag state. No-op once completing or aborted.
    pub fn abort(&mut self) -> bool {
        if !self.is_accepting_input() {
            return false;
        }
        self.phase = Phase::Aborted;
        self.clear_drag();
        true
    }

    fn clear_drag(&mut self) {
        self.drag_start = None;
        self.drag_current = None;
    }
}
