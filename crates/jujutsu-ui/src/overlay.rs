use std::time::Duration;

use anyhow::{Context, Result};
use jujutsu_config::overlay::OverlayConfig;
use jujutsu_core::Overlay;
use jujutsu_types::{AppEvent, InputEvent, Point, SelectionRect};
use kanal::Sender;
use slint::ComponentHandle;

use crate::SelectionOverlay;

/// Logical overlay coordinates to physical overlay-local pixels.
pub fn to_physical(x: f32, y: f32, scale: f32) -> Point {
    Point::new((x * scale).round() as i32, (y * scale).round() as i32)
}

/// Physical selection to logical `(x, y, width, height)` for rendering.
pub fn to_logical(rect: SelectionRect, scale: f32) -> (f32, f32, f32, f32) {
    let scale = if scale > 0.0 { scale } else { 1.0 };
    (
        rect.x as f32 / scale,
        rect.y as f32 / scale,
        rect.width as f32 / scale,
        rect.height as f32 / scale,
    )
}

fn forward(events: &Sender<AppEvent>, event: InputEvent) {
    if events.send(AppEvent::Input(event)).is_err() {
        tracing::warn!("[SLINT] Event channel closed, dropping {event:?}");
    }
}

/// Slint-backed selection overlay.
///
/// Pointer and key input is forwarded as [`AppEvent::Input`] on `events`;
/// the positions are converted to physical pixels relative to the overlay.
pub struct SlintOverlay {
    window: SelectionOverlay,
    settle: Duration,
    visible: bool,
}

impl SlintOverlay {
    /// Must be called on the UI thread.
    pub fn new(config: &OverlayConfig, events: Sender<AppEvent>) -> Result<Self> {
        let window = SelectionOverlay::new().context("Failed to create overlay window")?;
        window.set_dim_opacity(config.clamped_opacity());

        let pointer = |make: fn(Point) -> InputEvent| {
            let weak = window.as_weak();
            let events = events.clone();
            move |x: f32, y: f32| {
                let Some(w) = weak.upgrade() else {
                    return;
                };
                let scale = w.window().scale_factor();
                forward(&events, make(to_physical(x, y, scale)));
            }
        };
        window.on_pointer_pressed(pointer(InputEvent::Press));
        window.on_pointer_moved(pointer(InputEvent::Move));
        window.on_pointer_released(pointer(InputEvent::Release));

        window.on_cancel_requested(move || forward(&events, InputEvent::Cancel));

        Ok(Self {
            window,
            settle: Duration::from_millis(config.settle_ms),
            visible: false,
        })
    }
}

impl Overlay for SlintOverlay {
    fn show_fullscreen_overlay(&mut self) -> Result<()> {
        self.window.set_selecting(false);
        self.window.window().set_fullscreen(true);
        self.window.show().context("Failed to show overlay")?;
        self.visible = true;
        tracing::debug!("[SLINT] Overlay shown");
        Ok(())
    }

    fn hide_overlay(&mut self) -> Result<()> {
        self.window.set_selecting(false);
        if !self.visible {
            return Ok(());
        }
        self.window.hide().context("Failed to hide overlay")?;
        self.visible = false;
        // give the compositor time to unmap the window before anything grabs the screen
        std::thread::sleep(self.settle);
        tracing::debug!("[SLINT] Overlay hidden");
        Ok(())
    }

    fn draw_rect(&mut self, from: Point, to: Point) {
        let scale = self.window.window().scale_factor();
        let (x, y, width, height) = to_logical(SelectionRect::from_corners(from, to), scale);
        self.window.set_sel_x(x);
        self.window.set_sel_y(y);
        self.window.set_sel_width(width);
        self.window.set_sel_height(height);
        self.window.set_selecting(true);
    }

    fn origin(&self) -> Point {
        let position = self.window.window().position();
        Point::new(position.x, position.y)
    }
}
