/// Handle to a scheduled one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

/// One-shot countdown timers owned by a scene, advanced by frame time.
/// Scenes clear them on dispose.
pub struct Timers {
    entries: Vec<(TimerId, f32)>,
    next: u32,
}

impl Timers {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next: 1,
        }
    }

    /// Schedule a timer firing after `delay` seconds.
    pub fn after(&mut self, delay: f32) -> TimerId {
        let id = TimerId(self.next);
        self.next += 1;
        self.entries.push((id, delay.max(0.0)));
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or never existed.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(t, _)| *t != id);
        self.entries.len() != before
    }

    /// Advance every timer by `dt`. Returns the timers that fired, in schedule order.
    pub fn tick(&mut self, dt: f32) -> Vec<TimerId> {
        let mut fired = Vec::new();
        self.entries.retain_mut(|(id, remaining)| {
            *remaining -= dt;
            if *remaining <= 0.0 {
                fired.push(*id);
                false
            } else {
                true
            }
        });
        fired
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.entries.iter().any(|(t, _)| *t == id)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Timers {
    fn default() -> Self {
        Self::new()
    }
}
