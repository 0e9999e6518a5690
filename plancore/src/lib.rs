//! plancore - shared library for the MasterPlan board

pub mod animation;
pub mod input;
pub mod repaint;
pub mod safety;
pub mod theme;
pub mod widgets;

pub use input::FrameInput;
pub use repaint::RepaintController;
pub use theme::{PlanTheme, TextMeasure};

/// Round each component of `v` to the nearest multiple of `grid`.
pub fn snap_to_grid(v: egui::Vec2, grid: f32) -> egui::Vec2 {
    if grid <= 0.0 {
        return v;
    }
    egui::vec2((v.x / grid).round() * grid, (v.y / grid).round() * grid)
}
