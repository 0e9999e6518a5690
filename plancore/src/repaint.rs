//! Frame pacing for the board
//!
//! egui only runs a frame when something asks for one.  The board wants a
//! steady 60 Hz tick while anything is in motion (easing cards, zoom,
//! pulsing completable tasks, a blinking caret, an armed double-click
//! timer) and no ticks at all while it is idle.
//!
//! `RepaintController` sits between the app and egui's repaint scheduler:
//! set continuous mode from the board's animation state, then call
//! [`RepaintController::end_frame`] at the bottom of `update()`.

use std::time::Duration;

/// One tick of the 60 Hz loop.
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);

/// Controls when the egui context should request repaints.
pub struct RepaintController {
    /// Whether continuous (timed) repainting is active.
    continuous: bool,
}

impl Default for RepaintController {
    fn default() -> Self {
        Self::new()
    }
}

impl RepaintController {
    pub fn new() -> Self {
        Self { continuous: true }
    }

    /// Enable or disable continuous 60 Hz repainting.
    pub fn set_continuous(&mut self, continuous: bool) {
        self.continuous = continuous;
    }

    /// Call at the **end** of your `update()` method.
    ///
    /// - Continuous mode → next frame after [`FRAME_INTERVAL`].
    /// - Otherwise → egui sleeps until the next input event.
    pub fn end_frame(&self, ctx: &egui::Context) {
        if self.continuous {
            ctx.request_repaint_after(FRAME_INTERVAL);
        }
    }
}
