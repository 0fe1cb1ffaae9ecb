//! Per-character text reveal.
//!
//! The reveal interval is derived from a 0..100 speed: 0.2s per character at
//! speed 0 down to 0.02s at speed 100. The accumulator resets to zero whenever a
//! character is emitted; leftover time is not carried into the next character.

use crate::extensions::smoothing::lerp;

/// Seconds per character at speed 0.
pub const SLOWEST_INTERVAL: f32 = 0.2;
/// Seconds per character at speed 100.
pub const FASTEST_INTERVAL: f32 = 0.02;

/// Seconds per character for a speed in 0..=100 (clamped).
pub fn interval_for_speed(speed: f32) -> f32 {
    let t = speed.clamp(0.0, 100.0) / 100.0;
    lerp(SLOWEST_INTERVAL, FASTEST_INTERVAL, t)
}

/// Reveal lifecycle of the current line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RevealState {
    #[default]
    Idle,
    Revealing,
    Completed,
}

/// Notification produced by [`TextReveal::update`] and [`TextReveal::skip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEvent {
    /// One more character became visible.
    Advanced,
    /// The whole line is visible. Emitted exactly once per line.
    Completed,
}

#[derive(Debug, Clone)]
pub struct TextReveal {
    target: Vec<char>,
    visible: String,
    shown: usize,
    timer: f32,
    speed: f32,
    state: RevealState,
}

impl TextReveal {
    pub fn new(speed: f32) -> Self {
        Self {
            target: Vec::new(),
            visible: String::new(),
            shown: 0,
            timer: 0.0,
            speed: speed.clamp(0.0, 100.0),
            state: RevealState::Idle,
        }
    }

    /// Begin revealing `text` from an empty line.
    pub fn start(&mut self, text: &str) {
        self.target = text.chars().collect();
        self.visible.clear();
        self.shown = 0;
        self.timer = 0.0;
        self.state = RevealState::Revealing;
    }

    /// Advance by one frame. Emits at most one event per call.
    pub fn update(&mut self, dt: f32) -> Option<RevealEvent> {
        if self.state != RevealState::Revealing {
            return None;
        }
        self.timer += dt;
        if self.timer < self.interval() {
            return None;
        }
        self.timer = 0.0;
        if let Some(&c) = self.target.get(self.shown) {
            self.visible.push(c);
            self.shown += 1;
            Some(RevealEvent::Advanced)
        } else {
            self.state = RevealState::Completed;
            Some(RevealEvent::Completed)
        }
    }

    /// Jump to the full line. Only acts while revealing.
    pub fn skip(&mut self) -> Option<RevealEvent> {
        if self.state != RevealState::Revealing {
            return None;
        }
        self.visible = self.target.iter().collect();
        self.shown = self.target.len();
        self.state = RevealState::Completed;
        Some(RevealEvent::Completed)
    }

    pub fn reset(&mut self) {
        self.target.clear();
        self.visible.clear();
        self.shown = 0;
        self.timer = 0.0;
        self.state = RevealState::Idle;
    }

    /// Takes effect on the next scheduling decision.
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(0.0, 100.0);
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn interval(&self) -> f32 {
        interval_for_speed(self.speed)
    }

    pub fn is_playing(&self) -> bool {
        self.state == RevealState::Revealing
    }

    pub fn can_proceed(&self) -> bool {
        self.state == RevealState::Completed
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn visible_text(&self) -> &str {
        &self.visible
    }

    pub fn shown_chars(&self) -> usize {
        self.shown
    }
}

impl Default for TextReveal {
    fn default() -> Self {
        Self::new(80.0)
    }
}
