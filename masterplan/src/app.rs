//! MasterPlan application shell
//!
//! Owns the project and runs the per-frame loop: sample input, update the
//! board, draw the world and GUI layers, then save if anything happened.
//! The board always sees a 960×540 screen; spare window space on either
//! axis is letterboxed.

use crate::platform::{EguiPlatform, Platform};
use crate::project::Project;
use egui::{Color32, Context, Id, Key, LayerId, Order, Pos2, Rect, Vec2};
use plancore::repaint::RepaintController;
use plancore::theme::PlanColors;
use plancore::FrameInput;
use std::path::PathBuf;

/// Logical screen the board is laid out for.
pub const SCREEN_SIZE: Vec2 = Vec2::new(960.0, 540.0);

/// Window size F4 switches to.
pub const LARGE_WINDOW_SIZE: Vec2 = Vec2::new(1920.0, 1080.0);

/// Project file used when none is given.
pub const DEFAULT_PROJECT_FILE: &str = "project.mstr";

/// Project file from the first argument, then `MASTERPLAN_PROJECT`, then
/// [`DEFAULT_PROJECT_FILE`] in the working directory.
pub fn project_path() -> PathBuf {
    std::env::args()
        .nth(1)
        .or_else(|| std::env::var("MASTERPLAN_PROJECT").ok())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_PROJECT_FILE))
}

/// Zoom factor that fits the logical screen inside the window.
pub fn fit_zoom_factor(physical: Vec2, native_ppp: f32) -> f32 {
    let scale = (physical.x / SCREEN_SIZE.x).min(physical.y / SCREEN_SIZE.y);
    scale / native_ppp
}

/// The logical screen, centered in `window` on whole points.
pub fn letterbox(window: Rect) -> Rect {
    let margin = ((window.size() - SCREEN_SIZE) / 2.0).max(Vec2::ZERO).floor();
    Rect::from_min_size(window.min + margin, SCREEN_SIZE)
}

pub struct MasterPlanApp {
    project: Project,
    repaint: RepaintController,
    /// Last mouse position in window space.
    prev_mouse: Pos2,
}

impl MasterPlanApp {
    pub fn new(cc: &eframe::CreationContext<'_>, project_path: PathBuf) -> Self {
        cc.egui_ctx.options_mut(|o| o.zoom_with_keyboard = false);
        let mut platform = EguiPlatform::new(&cc.egui_ctx);
        let project = Project::load(project_path, &mut platform);
        log::info!("project file {}", project.file_path().display());

        Self {
            project,
            repaint: RepaintController::new(),
            prev_mouse: Pos2::ZERO,
        }
    }

    /// Keep the logical screen filling the window at any size.
    fn fit_screen(&self, ctx: &Context) {
        let native = ctx.native_pixels_per_point().unwrap_or(1.0);
        let physical = ctx.screen_rect().size() * ctx.pixels_per_point();
        let zoom = fit_zoom_factor(physical, native);
        if zoom > 0.0 && (zoom - ctx.zoom_factor()).abs() > 1e-3 {
            ctx.set_zoom_factor(zoom);
        }
    }

    fn window_keys(&self, input: &FrameInput, platform: &mut dyn Platform) {
        if input.key_pressed(Key::F1) {
            platform.resize_window(SCREEN_SIZE);
        }
        if input.key_pressed(Key::F4) {
            platform.resize_window(LARGE_WINDOW_SIZE);
        }
    }
}

impl eframe::App for MasterPlanApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.fit_screen(ctx);
        let viewport = letterbox(ctx.screen_rect());

        let raw = FrameInput::capture(ctx, self.prev_mouse);
        self.prev_mouse = raw.mouse;
        let input = raw.in_viewport(viewport);
        let mut platform = EguiPlatform::new(ctx);

        self.window_keys(&input, &mut platform);
        self.project.update(&input, &mut platform);

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(Color32::BLACK))
            .show(ctx, |ui| {
                ui.painter().rect_filled(viewport, 0.0, PlanColors::BACKGROUND);
            });

        let screen = Rect::from_min_size(Pos2::ZERO, SCREEN_SIZE);
        let world_layer = LayerId::new(Order::Middle, Id::new("masterplan_world"));
        let gui_layer = LayerId::new(Order::Foreground, Id::new("masterplan_gui"));

        let world = ctx.layer_painter(world_layer).with_clip_rect(screen);
        self.project.draw_world(&world, &input);
        let gui = ctx.layer_painter(gui_layer).with_clip_rect(screen);
        self.project.draw_gui(&gui, &input, &mut platform);

        for layer in [world_layer, gui_layer] {
            ctx.translate_layer(layer, viewport.min.to_vec2());
        }

        if input.any_input() && !self.project.task_open {
            self.project.save();
        }

        self.repaint.set_continuous(self.project.is_animating());
        self.repaint.end_frame(ctx);
    }
}
