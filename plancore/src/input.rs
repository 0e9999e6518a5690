//! Per-frame input snapshot
//!
//! The board samples every input source exactly once at the top of a frame
//! and hands the same `FrameInput` to every update.  Widgets and the board
//! never query egui directly, so the whole interaction core can be driven
//! from tests by building a `FrameInput` by hand.

use egui::{Event, Key, PointerButton, Pos2, Rect, Vec2};
use std::collections::HashSet;
use std::path::PathBuf;

/// Pressed/down/released flags of one mouse button for this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Went down this frame.
    pub pressed: bool,
    /// Held at the end of this frame.
    pub down: bool,
    /// Went up this frame.
    pub released: bool,
}

impl ButtonState {
    pub const PRESSED: Self = Self { pressed: true, down: true, released: false };
    pub const HELD: Self = Self { pressed: false, down: true, released: false };
    pub const RELEASED: Self = Self { pressed: false, down: false, released: true };
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    /// Mouse position in screen space, rounded to whole pixels.
    pub mouse: Pos2,
    /// Mouse position sampled on the previous frame.
    pub prev_mouse: Pos2,
    pub left: ButtonState,
    pub middle: ButtonState,
    pub right: ButtonState,
    /// Wheel movement in notches; positive is away from the user.
    pub wheel: f32,
    pub modifiers: Modifiers,
    /// Keys that went down this frame (no auto-repeat).
    pub keys_pressed: Vec<Key>,
    /// Keys held at the end of this frame.
    pub keys_down: HashSet<Key>,
    /// Printable ASCII typed this frame, in order.
    pub typed: String,
    pub dropped_files: Vec<PathBuf>,
    /// Wall-clock seconds since the app started.
    pub time: f64,
    /// Logical screen size.
    pub screen_size: Vec2,
}

impl FrameInput {
    /// Sample egui's input state for this frame.
    pub fn capture(ctx: &egui::Context, prev_mouse: Pos2) -> Self {
        ctx.input(|i| {
            let button = |b: PointerButton| ButtonState {
                pressed: i.pointer.button_pressed(b),
                down: i.pointer.button_down(b),
                released: i.pointer.button_released(b),
            };

            let mut keys_pressed = Vec::new();
            let mut typed = String::new();
            for event in &i.events {
                match event {
                    Event::Key { key, pressed: true, repeat: false, .. } => keys_pressed.push(*key),
                    Event::Text(text) => typed.extend(text.chars().filter(is_printable_ascii)),
                    _ => {}
                }
            }

            let wheel = if i.raw_scroll_delta.y > 0.0 {
                1.0
            } else if i.raw_scroll_delta.y < 0.0 {
                -1.0
            } else {
                0.0
            };

            Self {
                mouse: i.pointer.latest_pos().map(|p| p.round()).unwrap_or(prev_mouse),
                prev_mouse,
                left: button(PointerButton::Primary),
                middle: button(PointerButton::Middle),
                right: button(PointerButton::Secondary),
                wheel,
                modifiers: Modifiers {
                    shift: i.modifiers.shift,
                    alt: i.modifiers.alt,
                    ctrl: i.modifiers.ctrl || i.modifiers.mac_cmd,
                },
                keys_pressed,
                keys_down: i.keys_down.clone(),
                typed,
                dropped_files: i.raw.dropped_files.iter().filter_map(|f| f.path.clone()).collect(),
                time: i.time,
                screen_size: i.screen_rect().size(),
            }
        })
    }

    /// An idle frame with the mouse resting at `mouse`.
    pub fn at(mouse: Pos2, screen_size: Vec2) -> Self {
        Self {
            mouse,
            prev_mouse: mouse,
            screen_size,
            ..Default::default()
        }
    }

    /// Re-express the mouse relative to `viewport`, which becomes the screen.
    pub fn in_viewport(mut self, viewport: Rect) -> Self {
        let shift = viewport.min.to_vec2();
        self.mouse -= shift;
        self.prev_mouse -= shift;
        self.screen_size = viewport.size();
        self
    }

    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse - self.prev_mouse
    }

    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn any_released(&self) -> bool {
        self.left.released || self.middle.released || self.right.released
    }

    /// Whether this frame carried input that may have changed the board.
    pub fn any_input(&self) -> bool {
        !self.keys_pressed.is_empty()
            || self.left.released
            || self.middle.released
            || self.wheel != 0.0
    }
}

pub fn is_printable_ascii(c: &char) -> bool {
    (' '..='~').contains(c)
}
