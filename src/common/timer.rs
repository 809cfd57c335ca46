//! Countdown used for fire rate, immunity windows and spawn periods.
//!
//! Unlike `bevy::time::Timer` this never re-arms itself: once it hits zero it
//! stays ready until someone calls `reset`. That is what makes "at most one
//! action per period" hold no matter how many ticks pass in between.

/// Remaining seconds until ready. Never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    /// A cooldown that is ready right away.
    #[inline]
    pub fn ready() -> Self {
        Self::default()
    }

    /// A cooldown that becomes ready after `period` seconds.
    #[inline]
    pub fn armed(period: f32) -> Self {
        let mut c = Self::default();
        c.reset(period);
        c
    }

    #[inline]
    pub fn tick(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    #[inline]
    pub fn reset(&mut self, period: f32) {
        self.remaining = period.max(0.0);
    }

    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ready_cooldown_stays_ready_until_reset() {
        let mut c = Cooldown::ready();
        assert!(c.is_ready());
        c.tick(10.0);
        assert!(c.is_ready());
        assert_eq!(c.remaining(), 0.0);

        c.reset(0.5);
        assert!(!c.is_ready());
    }

    #[test]
    fn becomes_ready_exactly_when_elapsed_reaches_period() {
        let mut c = Cooldown::armed(1.0);

        // Quarter seconds are exact in f32, so no rounding slop here.
        for _ in 0..3 {
            c.tick(0.25);
            assert!(!c.is_ready());
        }
        c.tick(0.25);
        assert!(c.is_ready());
    }

    #[test]
    fn variable_dt_accumulates() {
        let mut c = Cooldown::armed(1.0);
        c.tick(0.125);
        c.tick(0.5);
        assert!(!c.is_ready());
        assert!((c.remaining() - 0.375).abs() < 1e-6);
        c.tick(0.75);
        assert!(c.is_ready());
        assert_eq!(c.remaining(), 0.0);
    }

    #[test]
    fn negative_inputs_are_clamped() {
        let mut c = Cooldown::armed(-3.0);
        assert!(c.is_ready());

        c.reset(1.0);
        c.tick(-5.0);
        assert_eq!(c.remaining(), 1.0);
    }

    #[test]
    fn fires_once_per_reset() {
        // Count not-ready -> ready edges without any reset in between.
        let mut c = Cooldown::armed(0.5);
        let mut edges = 0;
        let mut was_ready = c.is_ready();

        for _ in 0..20 {
            c.tick(0.25);
            if c.is_ready() && !was_ready {
                edges += 1;
            }
            was_ready = c.is_ready();
        }

        assert_eq!(edges, 1);
    }
}
