//! Immediate-mode widgets
//!
//! Each widget is updated and drawn every frame against the same rect.
//! Stateful widgets are plain values: `update` applies this frame's input,
//! `draw` paints the current state, and `show` does both in that order.
//! Copying a widget copies all of its state.

use crate::input::FrameInput;
use crate::theme::{pixel_rect, text_job, PlanColors, StateColors, TextMeasure, WidgetState};
use egui::{vec2, Align2, Color32, Key, Painter, Pos2, Rect, Stroke, Vec2};

/// Frames Backspace must be held before it starts repeating.
pub const BACKSPACE_REPEAT_FRAMES: i32 = 30;

/// Amount a progress bar moves per click.
pub const PROGRESS_STEP: i32 = 5;

/// Space around text inside a text box.
pub const TEXT_PADDING: Vec2 = Vec2::new(8.0, 8.0);

pub fn widget_state(input: &FrameInput, rect: Rect, disabled: bool) -> WidgetState {
    if disabled {
        WidgetState::Disabled
    } else if rect.contains(input.mouse) {
        if input.left.down {
            WidgetState::Clicked
        } else {
            WidgetState::Highlighted
        }
    } else {
        WidgetState::Default
    }
}

/// Logic half of [`button`]: true on the frame the left button is released
/// over an enabled button.
pub fn button_clicked(input: &FrameInput, rect: Rect, disabled: bool) -> bool {
    !disabled && input.left.released && pixel_rect(rect).contains(input.mouse)
}

/// Draw a button and report whether it was clicked this frame.
pub fn button(painter: &Painter, input: &FrameInput, rect: Rect, text: &str, disabled: bool) -> bool {
    draw_button(painter, input, rect, text, disabled);
    button_clicked(input, rect, disabled)
}

pub fn draw_button(painter: &Painter, input: &FrameInput, rect: Rect, text: &str, disabled: bool) {
    let rect = pixel_rect(rect);
    let colors = PlanColors::for_state(widget_state(input, rect, disabled));
    draw_frame(painter, rect, colors);
    draw_text_centered(painter, rect, text, colors.text);
}

/// Filled rect with a 1px outline.
pub fn draw_frame(painter: &Painter, rect: Rect, colors: StateColors) {
    painter.rect_filled(rect, 0.0, colors.inside);
    painter.rect_stroke(rect, 0.0, Stroke::new(1.0, colors.outline));
}

/// Draw text with its top-left corner at `pos`.
pub fn draw_text(painter: &Painter, pos: Pos2, text: &str, color: Color32, scale: f32) {
    let galley = painter.layout_job(text_job(text, color, scale));
    painter.galley(pos.round(), galley, color);
}

pub fn draw_text_centered(painter: &Painter, rect: Rect, text: &str, color: Color32) {
    let galley = painter.layout_job(text_job(text, color, 1.0));
    let pos = Align2::CENTER_CENTER.anchor_size(rect.center(), galley.size()).min;
    painter.galley(pos.round(), galley, color);
}

/// Plain GUI label in the default text color.
pub fn label(painter: &Painter, pos: Pos2, text: &str) {
    draw_text(painter, pos, text, PlanColors::DEFAULT.text, 1.0);
}

/// Square end buttons of a spinner or progress bar.
fn end_buttons(rect: Rect) -> (Rect, Rect) {
    let side = vec2(rect.height(), rect.height());
    (
        Rect::from_min_size(rect.min, side),
        Rect::from_min_size(Pos2::new(rect.max.x - side.x, rect.min.y), side),
    )
}

/// Space between the end buttons.
fn middle(rect: Rect) -> Rect {
    Rect::from_min_max(
        Pos2::new(rect.min.x + rect.height(), rect.min.y),
        Pos2::new(rect.max.x - rect.height(), rect.max.y),
    )
}

// ---------------------------------------------------------------
// Checkbox
// ---------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Checkbox {
    pub checked: bool,
}

impl Checkbox {
    pub fn new(checked: bool) -> Self {
        Self { checked }
    }

    /// Toggle on a left press over the box. Returns true when toggled.
    pub fn update(&mut self, input: &FrameInput, rect: Rect) -> bool {
        if input.left.pressed && pixel_rect(rect).contains(input.mouse) {
            self.checked = !self.checked;
            true
        } else {
            false
        }
    }

    pub fn draw(&self, painter: &Painter, input: &FrameInput, rect: Rect) {
        let rect = pixel_rect(rect);
        let colors = PlanColors::for_state(widget_state(input, rect, false));
        painter.rect_stroke(rect, 0.0, Stroke::new(1.0, colors.outline));
        if self.checked {
            painter.rect_filled(rect.shrink(3.0), 0.0, colors.outline);
        }
    }

    pub fn show(&mut self, painter: &Painter, input: &FrameInput, rect: Rect) -> bool {
        let changed = self.update(input, rect);
        self.draw(painter, input, rect);
        changed
    }
}

// ---------------------------------------------------------------
// Spinner
// ---------------------------------------------------------------

/// A choice between a fixed list of options, stepped with end buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spinner {
    pub options: Vec<String>,
    pub current: usize,
}

impl Spinner {
    pub fn new<S: Into<String>>(options: impl IntoIterator<Item = S>) -> Self {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            current: 0,
        }
    }

    pub fn choice(&self) -> &str {
        self.options.get(self.current).map(String::as_str).unwrap_or("")
    }

    /// Select `index`, wrapped into range.
    pub fn set_current(&mut self, index: usize) {
        if !self.options.is_empty() {
            self.current = index % self.options.len();
        }
    }

    pub fn update(&mut self, input: &FrameInput, rect: Rect) -> bool {
        let len = self.options.len();
        if len == 0 {
            return false;
        }
        let (prev, next) = end_buttons(rect);
        if button_clicked(input, prev, false) {
            self.current = (self.current + len - 1) % len;
            true
        } else if button_clicked(input, next, false) {
            self.current = (self.current + 1) % len;
            true
        } else {
            false
        }
    }

    pub fn draw(&self, painter: &Painter, input: &FrameInput, rect: Rect) {
        let (prev, next) = end_buttons(rect);
        draw_button(painter, input, prev, "<", false);
        draw_button(painter, input, next, ">", false);
        let center = pixel_rect(middle(rect));
        draw_frame(painter, center, PlanColors::DEFAULT);
        draw_text_centered(painter, center, self.choice(), PlanColors::DEFAULT.text);
    }

    pub fn show(&mut self, painter: &Painter, input: &FrameInput, rect: Rect) -> bool {
        let changed = self.update(input, rect);
        self.draw(painter, input, rect);
        changed
    }
}

// ---------------------------------------------------------------
// Progress bar
// ---------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressBar {
    pub percentage: i32,
}

impl ProgressBar {
    pub fn new(percentage: i32) -> Self {
        Self { percentage: percentage.clamp(0, 100) }
    }

    pub fn set(&mut self, percentage: i32) {
        self.percentage = percentage.clamp(0, 100);
    }

    pub fn update(&mut self, input: &FrameInput, rect: Rect) -> bool {
        let (minus, plus) = end_buttons(rect);
        let before = self.percentage;
        if button_clicked(input, minus, false) {
            self.set(self.percentage - PROGRESS_STEP);
        } else if button_clicked(input, plus, false) {
            self.set(self.percentage + PROGRESS_STEP);
        }
        self.percentage != before
    }

    pub fn draw(&self, painter: &Painter, input: &FrameInput, rect: Rect) {
        let (minus, plus) = end_buttons(rect);
        draw_button(painter, input, minus, "-", false);
        draw_button(painter, input, plus, "+", false);

        let bar = pixel_rect(middle(rect));
        draw_frame(painter, bar, PlanColors::DEFAULT);
        let inner = bar.shrink(2.0);
        let fill = Rect::from_min_size(
            inner.min,
            vec2(inner.width() * self.percentage as f32 / 100.0, inner.height()),
        );
        let color = if self.percentage == 100 { PlanColors::COMPLETE } else { PlanColors::PROGRESS };
        painter.rect_filled(pixel_rect(fill), 0.0, color);
        draw_text_centered(painter, bar, &format!("{}%", self.percentage), PlanColors::DEFAULT.text);
    }

    pub fn show(&mut self, painter: &Painter, input: &FrameInput, rect: Rect) -> bool {
        let changed = self.update(input, rect);
        self.draw(painter, input, rect);
        changed
    }
}

// ---------------------------------------------------------------
// Text box
// ---------------------------------------------------------------

/// Editable text that grows with its contents.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub text: String,
    pub focused: bool,
    pub allow_newlines: bool,
    pub min_size: Vec2,
    pub max_size: Vec2,
    backspace_timer: i32,
    rect: Rect,
}

impl TextBox {
    pub fn new(allow_newlines: bool, min_size: Vec2, max_size: Vec2) -> Self {
        Self {
            text: String::new(),
            focused: false,
            allow_newlines,
            min_size,
            max_size,
            backspace_timer: 0,
            rect: Rect::from_min_size(Pos2::ZERO, min_size),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Rect as of the last update.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn update<M: TextMeasure + ?Sized>(&mut self, input: &FrameInput, origin: Pos2, measure: &M) {
        self.layout(origin, measure);

        if input.left.pressed {
            self.focused = self.rect.contains(input.mouse);
        }

        if self.focused {
            self.edit(input);
            self.layout(origin, measure);
        } else {
            self.backspace_timer = 0;
        }
    }

    fn edit(&mut self, input: &FrameInput) {
        self.text.push_str(&input.typed);

        if self.allow_newlines && input.key_pressed(Key::Enter) {
            self.text.push('\n');
        }

        if input.key_pressed(Key::Backspace) {
            self.text.pop();
        }
        if input.key_down(Key::Backspace) {
            self.backspace_timer += 1;
            if self.backspace_timer >= BACKSPACE_REPEAT_FRAMES {
                self.text.pop();
            }
        } else {
            self.backspace_timer = 0;
        }
    }

    fn layout<M: TextMeasure + ?Sized>(&mut self, origin: Pos2, measure: &M) {
        let size = (measure.measure_text(&self.text) + TEXT_PADDING).clamp(self.min_size, self.max_size);
        self.rect = pixel_rect(Rect::from_min_size(origin, size));
    }

    pub fn draw(&self, painter: &Painter, input: &FrameInput) {
        let colors = if self.focused {
            PlanColors::CLICKED
        } else {
            PlanColors::for_state(widget_state(input, self.rect, false))
        };
        draw_frame(painter, self.rect, colors);

        let mut shown = self.text.clone();
        if self.focused && caret_visible(input.time) {
            shown.push('|');
        }
        let clipped = painter.with_clip_rect(self.rect.intersect(painter.clip_rect()));
        draw_text(&clipped, self.rect.min + TEXT_PADDING / 2.0, &shown, colors.text, 1.0);
    }

    pub fn show<M: TextMeasure + ?Sized>(
        &mut self,
        painter: &Painter,
        input: &FrameInput,
        origin: Pos2,
        measure: &M,
    ) {
        self.update(input, origin, measure);
        self.draw(painter, input);
    }
}

/// The caret shows during the first half of every wall-clock second.
pub fn caret_visible(time: f64) -> bool {
    time.rem_euclid(1.0) < 0.5
}
