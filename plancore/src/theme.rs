//! MasterPlan theme - flat grey GUI palette
//!
//! Every widget draws itself in one of four states. Each state has an
//! outline, an inside fill and a text color.

use egui::text::{LayoutJob, TextFormat};
use egui::{Color32, FontFamily, FontId, Rect, Rounding, Stroke, Style, TextStyle, Vec2, Visuals};

/// Point size of all board and GUI text.
pub const FONT_SIZE: f32 = 10.0;

/// Extra horizontal spacing between glyphs.
pub const LETTER_SPACING: f32 = 3.0;

/// Visual state of a widget on this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetState {
    Default,
    /// Hovered.
    Highlighted,
    /// Held down while hovered.
    Clicked,
    Disabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateColors {
    pub outline: Color32,
    pub inside: Color32,
    pub text: Color32,
}

pub struct PlanColors;

impl PlanColors {
    pub const BACKGROUND: Color32 = Color32::from_rgb(245, 245, 245);
    pub const NOTE: Color32 = Color32::from_rgb(102, 191, 255);
    pub const COMPLETE: Color32 = Color32::from_rgb(0, 228, 48);
    pub const PROGRESS: Color32 = Color32::from_rgb(151, 232, 255);
    pub const SELECTION: Color32 = Color32::from_rgba_premultiplied(18, 44, 56, 64);

    pub const DEFAULT: StateColors = StateColors {
        outline: Color32::from_rgb(131, 131, 131),
        inside: Color32::from_rgb(201, 201, 201),
        text: Color32::from_rgb(104, 104, 104),
    };
    pub const HIGHLIGHTED: StateColors = StateColors {
        outline: Color32::from_rgb(91, 178, 217),
        inside: Color32::from_rgb(201, 239, 254),
        text: Color32::from_rgb(108, 155, 188),
    };
    pub const CLICKED: StateColors = StateColors {
        outline: Color32::from_rgb(4, 146, 199),
        inside: Color32::from_rgb(151, 232, 255),
        text: Color32::from_rgb(54, 139, 175),
    };
    pub const DISABLED: StateColors = StateColors {
        outline: Color32::from_rgb(181, 193, 194),
        inside: Color32::from_rgb(230, 233, 233),
        text: Color32::from_rgb(174, 183, 184),
    };

    pub fn for_state(state: WidgetState) -> StateColors {
        match state {
            WidgetState::Default => Self::DEFAULT,
            WidgetState::Highlighted => Self::HIGHLIGHTED,
            WidgetState::Clicked => Self::CLICKED,
            WidgetState::Disabled => Self::DISABLED,
        }
    }
}

/// Theme configuration applied once at startup.
pub struct PlanTheme {
    pub font_size: f32,
    pub item_spacing: f32,
}

impl Default for PlanTheme {
    fn default() -> Self {
        Self {
            font_size: FONT_SIZE,
            item_spacing: 4.0,
        }
    }
}

impl PlanTheme {
    /// Apply the theme to an egui context
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = Style::default();

        style.text_styles = [
            (TextStyle::Small, FontId::new(self.font_size, FontFamily::Proportional)),
            (TextStyle::Body, FontId::new(self.font_size, FontFamily::Proportional)),
            (TextStyle::Button, FontId::new(self.font_size, FontFamily::Proportional)),
            (TextStyle::Heading, FontId::new(self.font_size * 2.0, FontFamily::Proportional)),
            (TextStyle::Monospace, FontId::new(self.font_size, FontFamily::Monospace)),
        ]
        .into();

        let mut visuals = Visuals::light();
        visuals.panel_fill = PlanColors::BACKGROUND;
        visuals.window_fill = PlanColors::BACKGROUND;
        visuals.window_rounding = Rounding::ZERO;
        visuals.menu_rounding = Rounding::ZERO;
        visuals.window_stroke = Stroke::new(1.0, PlanColors::DEFAULT.outline);
        visuals.window_shadow = egui::epaint::Shadow::NONE;
        visuals.popup_shadow = egui::epaint::Shadow::NONE;
        style.visuals = visuals;

        style.spacing.item_spacing = egui::vec2(self.item_spacing, self.item_spacing);

        ctx.set_style(style);
    }
}

/// Lay out `text` in the board font, scaled by `scale`.
pub fn text_job(text: &str, color: Color32, scale: f32) -> LayoutJob {
    let mut job = LayoutJob::default();
    job.append(
        text,
        0.0,
        TextFormat {
            font_id: FontId::proportional(FONT_SIZE * scale),
            extra_letter_spacing: LETTER_SPACING * scale,
            color,
            ..Default::default()
        },
    );
    job
}

/// Snap a rect to whole pixels.
pub fn pixel_rect(rect: Rect) -> Rect {
    Rect::from_min_size(rect.min.round(), rect.size().round())
}

/// Measures text in the board font at scale 1.
pub trait TextMeasure {
    fn measure_text(&self, text: &str) -> Vec2;
}

impl TextMeasure for egui::Context {
    fn measure_text(&self, text: &str) -> Vec2 {
        self.fonts(|f| f.layout_job(text_job(text, Color32::BLACK, 1.0)).size())
    }
}
