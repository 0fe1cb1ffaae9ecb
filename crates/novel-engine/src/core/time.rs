/// Variable-step frame clock.
/// Scenes animate with real elapsed time; long stalls (tab switches, breakpoints)
/// are clamped so a single frame can't skip a whole text reveal.
pub struct FrameClock {
    max_dt: f32,
    elapsed: f64,
    frames: u64,
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        Self {
            max_dt,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Register a frame of `frame_dt` seconds. Returns the delta scenes should use.
    pub fn advance(&mut self, frame_dt: f32) -> f32 {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, self.max_dt)
        } else {
            0.0
        };
        self.elapsed += dt as f64;
        self.frames += 1;
        dt
    }

    /// Total clamped time since creation, in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn max_dt(&self) -> f32 {
        self.max_dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_normal_frames_through() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.advance(0.016), 0.016);
        assert_eq!(clock.frames(), 1);
    }

    #[test]
    fn clamps_long_stalls() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.advance(3.0), 0.1);
        assert!((clock.elapsed() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn rejects_negative_and_nan() {
        let mut clock = FrameClock::new(0.1);
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.advance(f32::NAN), 0.0);
        assert_eq!(clock.elapsed(), 0.0);
    }
}
