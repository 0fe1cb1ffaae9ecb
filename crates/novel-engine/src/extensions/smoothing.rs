//! Interpolation helpers for frame-driven motion.

use glam::Vec2;

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

#[inline]
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a * (1.0 - t) + b * t
}

/// Move `current` toward `target` by `min(1, dt * rate)` of the remaining
/// distance. Long frames land exactly on the target.
#[inline]
pub fn smooth_toward(current: Vec2, target: Vec2, dt: f32, rate: f32) -> Vec2 {
    let k = (dt * rate).clamp(0.0, 1.0);
    lerp_vec2(current, target, k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_hits_endpoints() {
        assert_eq!(lerp(0.2, 0.02, 0.0), 0.2);
        assert_eq!(lerp(0.2, 0.02, 1.0), 0.02);
        assert_eq!(lerp_vec2(Vec2::new(0.3, -0.7), Vec2::new(0.02, 0.9), 1.0), Vec2::new(0.02, 0.9));
    }

    #[test]
    fn smooth_toward_caps_at_target() {
        let p = smooth_toward(Vec2::ZERO, Vec2::new(10.0, 0.0), 1.0, 8.0);
        assert_eq!(p, Vec2::new(10.0, 0.0));
        let q = smooth_toward(Vec2::ZERO, Vec2::new(10.0, 0.0), 0.05, 8.0);
        assert!((q.x - 4.0).abs() < 1e-5);
    }

    #[test]
    fn zero_frame_does_not_move() {
        let p = Vec2::new(0.5, -0.25);
        assert_eq!(smooth_toward(p, Vec2::ONE, 0.0, 8.0), p);
    }
}
