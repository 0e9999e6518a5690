//! Per-frame easing
//!
//! Nothing on the board is tweened over a fixed duration.  Animated values
//! (camera zoom, card positions) move a fixed fraction of the remaining
//! distance every frame, so they settle on their own after a target change.

use egui::{Color32, Pos2};

/// Fraction of the remaining distance covered per frame.
pub const EASE_RATE: f32 = 0.2;

/// Move `current` a fraction `rate` of the way to `target`.
pub fn ease_toward(current: f32, target: f32, rate: f32) -> f32 {
    lerp(current, target, rate)
}

/// Component-wise [`ease_toward`] for points.
pub fn ease_pos(current: Pos2, target: Pos2, rate: f32) -> Pos2 {
    Pos2::new(
        ease_toward(current.x, target.x, rate),
        ease_toward(current.y, target.y, rate),
    )
}

/// True when `a` and `b` are within `tolerance` on both axes.
pub fn settled(a: Pos2, b: Pos2, tolerance: f32) -> bool {
    (a.x - b.x).abs() <= tolerance && (a.y - b.y).abs() <= tolerance
}

/// Sine pulse in `[-amplitude, amplitude]`, one cycle per second.
pub fn pulse(time: f64, phase: f32, amplitude: f32) -> f32 {
    ((time * std::f64::consts::TAU) as f32 + phase).sin() * amplitude
}

/// Add `amount` to the RGB channels, clamped to `[0, 255]`. Alpha is kept.
pub fn brighten(color: Color32, amount: f32) -> Color32 {
    let ch = |c: u8| (c as f32 + amount).clamp(0.0, 255.0) as u8;
    Color32::from_rgba_unmultiplied(ch(color.r()), ch(color.g()), ch(color.b()), color.a())
}

/// Linear interpolation between two values
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    #[test]
    fn test_ease_converges() {
        let mut v = 0.0;
        for _ in 0..60 {
            v = ease_toward(v, 2.0, EASE_RATE);
        }
        assert!((v - 2.0).abs() < 1e-3);
    }

    #[test]
    fn test_ease_step() {
        assert_eq!(ease_toward(1.0, 2.0, 0.2), 1.2);
        assert_eq!(ease_pos(pos2(0.0, 10.0), pos2(10.0, 0.0), 0.5), pos2(5.0, 5.0));
    }

    #[test]
    fn test_settled() {
        assert!(settled(pos2(0.0, 0.0), pos2(1.0, -1.0), 1.0));
        assert!(!settled(pos2(0.0, 0.0), pos2(1.5, 0.0), 1.0));
    }

    #[test]
    fn test_pulse_bounds() {
        for i in 0..100 {
            let p = pulse(i as f64 * 0.013, 0.7, 40.0);
            assert!((-40.0..=40.0).contains(&p));
        }
    }

    #[test]
    fn test_brighten_clamps() {
        let c = brighten(Color32::from_rgb(5, 128, 250), -10.0);
        assert_eq!((c.r(), c.g(), c.b()), (0, 118, 240));
        let c = brighten(Color32::from_rgb(5, 128, 250), 10.0);
        assert_eq!((c.r(), c.g(), c.b()), (15, 138, 255));
    }
}
