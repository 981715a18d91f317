//! Time-driven motion
//!
//! Every animated quantity is a pure function of the effect's animation
//! time, a sum of slow sines. Nothing is integrated, so there is no drift.

use glam::{Vec2, Vec3};

/// Longest frame step fed into the animation clock, in seconds
pub const MAX_FRAME_DT: f64 = 1.0 / 30.0;

/// Cube spin in radians per animation second
pub const CUBE_SPIN_RATE: f32 = 0.35;

/// Animation time accumulator
///
/// Advances by `dt * speed`, with `dt` clamped to [`MAX_FRAME_DT`] so a tab
/// that was throttled or parked resumes where it left off instead of jumping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AnimationClock {
    time: f64,
    last_ms: Option<f64>,
}

impl AnimationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animation time in seconds
    pub fn time(&self) -> f32 {
        self.time as f32
    }

    /// Advance to `now_ms` at `speed` and return the new animation time
    pub fn advance(&mut self, now_ms: f64, speed: f32) -> f32 {
        if let Some(last) = self.last_ms {
            let dt = ((now_ms - last) / 1000.0).clamp(0.0, MAX_FRAME_DT);
            self.time += dt * speed.max(0.0) as f64;
        }
        self.last_ms = Some(now_ms);
        self.time()
    }

    /// Forget the last timestamp; the next advance starts a fresh step
    pub fn pause(&mut self) {
        self.last_ms = None;
    }
}

/// Animated quantities at one instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSample {
    /// Scene rotation (x, y, z) in radians
    pub rotation: Vec3,
    /// Line group offset
    pub drift: Vec2,
    /// Cloud sun position offset
    pub sun_offset: f32,
    /// Cube (tilt about x, spin about y) in radians
    pub cube: Vec2,
}

impl MotionSample {
    pub fn at(t: f32) -> Self {
        Self {
            rotation: scene_rotation(t),
            drift: line_drift(t),
            sun_offset: sun_offset(t),
            cube: Vec2::new(cube_tilt(t), t * CUBE_SPIN_RATE),
        }
    }
}

pub fn scene_rotation(t: f32) -> Vec3 {
    Vec3::new(
        (t * 0.07).sin() * 0.05 + (t * 0.03).cos() * 0.03,
        (t * 0.05).sin() * 0.1 + (t * 0.02).sin() * 0.05,
        (t * 0.01).sin() * 0.01,
    )
}

pub fn line_drift(t: f32) -> Vec2 {
    Vec2::new(
        (t * 0.11).sin() * 0.2,
        (t * 0.3).sin() * 0.3 + (t * 0.17).sin() * 0.15,
    )
}

/// Scale of node `index` at time `t`
pub fn node_pulse(t: f32, index: usize) -> f32 {
    let i = index as f32;
    0.95 + 0.05 * (t * 0.5 + i * 0.11).sin() + 0.03 * (t * 0.23 + i * 0.3).sin()
}

pub fn sun_offset(t: f32) -> f32 {
    0.2 + (t * 0.03).sin() * 0.02
}

pub fn cube_tilt(t: f32) -> f32 {
    0.35 + (t * 0.4).sin() * 0.12
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_first_advance_is_zero() {
        let mut clock = AnimationClock::new();
        assert_eq!(clock.advance(5000.0, 1.0), 0.0);
    }

    #[test]
    fn test_clock_scales_by_speed() {
        let mut clock = AnimationClock::new();
        clock.advance(0.0, 0.5);
        let t = clock.advance(20.0, 0.5);
        assert!((t - 0.01).abs() < 1e-6);
    }

    #[test]
    fn test_clock_clamps_long_frames() {
        let mut clock = AnimationClock::new();
        clock.advance(0.0, 1.0);
        let t = clock.advance(60_000.0, 1.0);
        assert!((t as f64 - MAX_FRAME_DT).abs() < 1e-6);
    }

    #[test]
    fn test_clock_ignores_backwards_time() {
        let mut clock = AnimationClock::new();
        clock.advance(100.0, 1.0);
        assert_eq!(clock.advance(50.0, 1.0), 0.0);
    }

    #[test]
    fn test_clock_zero_speed_holds() {
        let mut clock = AnimationClock::new();
        clock.advance(0.0, 1.0);
        clock.advance(16.0, 1.0);
        let held = clock.time();
        clock.advance(32.0, 0.0);
        assert_eq!(clock.time(), held);
    }

    #[test]
    fn test_clock_pause_restarts_step() {
        let mut clock = AnimationClock::new();
        clock.advance(0.0, 1.0);
        clock.advance(16.0, 1.0);
        let before = clock.time();
        clock.pause();
        assert_eq!(clock.advance(10_000.0, 1.0), before);
    }

    #[test]
    fn test_motion_bounded() {
        for step in 0..2000 {
            let t = step as f32 * 0.37;
            let m = MotionSample::at(t);
            assert!(m.rotation.x.abs() <= 0.08 + 1e-6);
            assert!(m.rotation.y.abs() <= 0.15 + 1e-6);
            assert!(m.drift.y.abs() <= 0.45 + 1e-6);
            assert!((m.sun_offset - 0.2).abs() <= 0.02 + 1e-6);
            assert!((0.229..=0.471).contains(&m.cube.x));
            let pulse = node_pulse(t, step);
            assert!((0.869..=1.031).contains(&pulse));
        }
    }

    #[test]
    fn test_motion_at_zero() {
        let m = MotionSample::at(0.0);
        assert!((m.rotation.x - 0.03).abs() < 1e-6);
        assert_eq!(m.rotation.y, 0.0);
        assert_eq!(m.sun_offset, 0.2);
        assert_eq!(m.cube, Vec2::new(0.35, 0.0));
    }
}
