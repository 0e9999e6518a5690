//! World/screen mapping for the board

use egui::{Pos2, Rect, Vec2};

/// Zoom factor for each zoom level.
pub const ZOOM_LEVELS: [f32; 3] = [0.5, 1.0, 2.0];

/// Zoom level a fresh board starts at.
pub const DEFAULT_ZOOM_LEVEL: usize = 1;

/// Stored zoom level meaning "never saved before".
pub const FIRST_RUN_ZOOM_LEVEL: i32 = -99;

/// Maps world coordinates to the logical screen.
///
/// `target` is the world point shown at the screen center, `offset` the
/// rounded pan it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub offset: Vec2,
    pub target: Pos2,
    pub zoom: f32,
    pub screen: Vec2,
}

impl Camera {
    pub fn new(pan: Vec2, zoom: f32, screen: Vec2) -> Self {
        let offset = pan.round();
        Self {
            offset,
            target: (screen / 2.0 - offset).to_pos2(),
            zoom,
            screen,
        }
    }

    pub fn screen_center(&self) -> Pos2 {
        (self.screen / 2.0).to_pos2()
    }

    pub fn screen_to_world(&self, p: Pos2) -> Pos2 {
        self.target + (p - self.screen_center()) / self.zoom
    }

    pub fn world_to_screen(&self, p: Pos2) -> Pos2 {
        self.screen_center() + (p - self.target) * self.zoom
    }

    pub fn world_rect_to_screen(&self, r: Rect) -> Rect {
        Rect::from_min_max(self.world_to_screen(r.min), self.world_to_screen(r.max))
    }

    /// Screen x of a world x, as the time-scale ruler computes it.
    pub fn world_x_to_screen(&self, x: f32) -> f32 {
        x * self.zoom - self.target.x * self.zoom + self.screen.x / 2.0
    }
}

/// Clamp a stored zoom level into the zoom table. The first-run sentinel
/// and any other out-of-range value fall back to the default level.
pub fn zoom_level_from_stored(stored: i32) -> usize {
    if stored == FIRST_RUN_ZOOM_LEVEL {
        DEFAULT_ZOOM_LEVEL
    } else {
        stored.clamp(0, ZOOM_LEVELS.len() as i32 - 1) as usize
    }
}

/// Step a zoom level by `delta`, clamped to the table.
pub fn step_zoom_level(level: usize, delta: i32) -> usize {
    (level as i32 + delta).clamp(0, ZOOM_LEVELS.len() as i32 - 1) as usize
}
