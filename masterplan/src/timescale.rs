//! Time-scale ruler
//!
//! Anchors grid columns to wall-clock time. World x = 0 is "now"; each grid
//! cell to the right is one hour, one day or one week later depending on
//! the rate. The ruler marks local midnight today and tomorrow.

use crate::camera::Camera;
use chrono::{NaiveDateTime, NaiveTime};
use egui::{pos2, Painter, Rect, Shape, Stroke};
use plancore::theme::PlanColors;
use plancore::widgets::draw_text;

/// Height of the ruler band at the top of the screen.
pub const HEADER_HEIGHT: f32 = 16.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeScaleRate {
    #[default]
    Off,
    PerDay,
    PerWeek,
    PerMonth,
}

impl TimeScaleRate {
    pub const ALL: [TimeScaleRate; 4] = [Self::Off, Self::PerDay, Self::PerWeek, Self::PerMonth];

    pub fn index(self) -> i32 {
        self as i32
    }

    /// Stored index to rate. Anything unknown turns the ruler off.
    pub fn from_index(index: i32) -> Self {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(Self::Off)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self as usize + 1) % Self::ALL.len()]
    }

    /// Seconds of wall-clock time covered by one grid cell.
    pub fn seconds_per_cell(self) -> Option<f64> {
        match self {
            Self::Off => None,
            Self::PerDay => Some(60.0 * 60.0),
            Self::PerWeek => Some(24.0 * 60.0 * 60.0),
            Self::PerMonth => Some(7.0 * 24.0 * 60.0 * 60.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub world_x: f32,
    pub label: String,
}

/// Midnight markers for today and tomorrow, relative to `now`.
pub fn markers(rate: TimeScaleRate, now: NaiveDateTime, grid_size: f32) -> Vec<Marker> {
    let Some(seconds) = rate.seconds_per_cell() else {
        return Vec::new();
    };
    let today = now.date();
    [Some(today), today.succ_opt()]
        .into_iter()
        .flatten()
        .map(|date| {
            let midnight = date.and_time(NaiveTime::MIN);
            let cells = (midnight - now).num_seconds() as f64 / seconds;
            Marker {
                world_x: (cells * grid_size as f64) as f32,
                label: midnight.format("%A, %-m/%-d/%Y").to_string(),
            }
        })
        .collect()
}

pub fn draw_ruler(painter: &Painter, camera: &Camera, markers: &[Marker]) {
    let band = Rect::from_min_size(pos2(0.0, 0.0), egui::vec2(camera.screen.x, HEADER_HEIGHT));
    painter.rect_filled(band, 0.0, PlanColors::DEFAULT.inside);
    painter.line_segment(
        [band.left_bottom(), band.right_bottom()],
        Stroke::new(1.0, PlanColors::DEFAULT.outline),
    );

    for marker in markers {
        let x = camera.world_x_to_screen(marker.world_x).round();
        painter.add(Shape::convex_polygon(
            vec![pos2(x - 4.0, HEADER_HEIGHT / 2.0), pos2(x + 4.0, HEADER_HEIGHT / 2.0), pos2(x, HEADER_HEIGHT)],
            PlanColors::CLICKED.outline,
            Stroke::NONE,
        ));
        draw_text(painter, pos2(x + 6.0, 2.0), &marker.label, PlanColors::DEFAULT.text, 1.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn test_rate_cycle_and_index() {
        assert_eq!(TimeScaleRate::Off.next(), TimeScaleRate::PerDay);
        assert_eq!(TimeScaleRate::PerMonth.next(), TimeScaleRate::Off);
        assert_eq!(TimeScaleRate::from_index(2), TimeScaleRate::PerWeek);
        assert_eq!(TimeScaleRate::from_index(9), TimeScaleRate::Off);
        assert_eq!(TimeScaleRate::from_index(-1), TimeScaleRate::Off);
        assert_eq!(TimeScaleRate::PerMonth.index(), 3);
    }

    #[test]
    fn test_off_has_no_markers() {
        assert!(markers(TimeScaleRate::Off, at(2024, 1, 2, 6), 16.0).is_empty());
    }

    #[test]
    fn test_per_day_hour_per_cell() {
        let m = markers(TimeScaleRate::PerDay, at(2024, 1, 2, 6), 16.0);
        assert_eq!(m.len(), 2);
        assert_eq!(m[0].world_x, -6.0 * 16.0);
        assert_eq!(m[0].label, "Tuesday, 1/2/2024");
        assert_eq!(m[1].world_x, 18.0 * 16.0);
        assert_eq!(m[1].label, "Wednesday, 1/3/2024");
    }

    #[test]
    fn test_per_week_and_month() {
        let now = at(2024, 1, 2, 12);
        let week = markers(TimeScaleRate::PerWeek, now, 16.0);
        assert_eq!(week[0].world_x, -8.0);
        assert_eq!(week[1].world_x, 8.0);
        let month = markers(TimeScaleRate::PerMonth, now, 14.0);
        assert!((month[1].world_x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_month_rollover_label() {
        let m = markers(TimeScaleRate::PerDay, at(2023, 12, 31, 23), 16.0);
        assert_eq!(m[1].label, "Monday, 1/1/2024");
    }
}
