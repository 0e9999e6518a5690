//! MasterPlan - a visual planning board of grid-snapped task cards

mod app;
mod camera;
mod document;
mod message;
mod platform;
mod project;
mod task;
mod timescale;

use app::MasterPlanApp;
use eframe::NativeOptions;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let project_path = app::project_path();

    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([app::SCREEN_SIZE.x, app::SCREEN_SIZE.y])
        .with_title("MasterPlan")
        .with_drag_and_drop(true);

    let options = NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native("MasterPlan", options, Box::new(move |cc| {
        plancore::PlanTheme::default().apply(&cc.egui_ctx);
        Box::new(MasterPlanApp::new(cc, project_path))
    }))
}
