//! Deadline-driven timers.
//!
//! Every state machine in the player owns its timers as plain deadlines and is
//! advanced with `tick(now)`. Nothing sleeps and nothing fires from another
//! thread, so cancelling or re-arming a timer can never let a stale callback run.

use std::time::{Duration, Instant};

/// One-shot timer. Arming an armed timer replaces its deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    pub const fn idle() -> Self {
        Self { deadline: None }
    }

    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.deadline = Some(now + delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Disarms the timer and returns `true` once its deadline has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// A flag that stays raised for a fixed window after being armed.
///
/// Used for the short input-suppression windows after fullscreen and rotation
/// transitions, after a seek drag ends, and after a classified double tap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransitionGuard {
    until: Option<Instant>,
}

impl TransitionGuard {
    pub fn arm(&mut self, now: Instant, window: Duration) {
        self.until = Some(now + window);
    }

    pub fn clear(&mut self) {
        self.until = None;
    }

    pub fn is_active(&self, now: Instant) -> bool {
        matches!(self.until, Some(until) if now < until)
    }

    /// When the guard drops, if it is still raised at `now`.
    pub fn expires_at(&self, now: Instant) -> Option<Instant> {
        self.until.filter(|until| now < *until)
    }
}

/// Earliest of a set of optional deadlines.
pub fn earliest<I>(deadlines: I) -> Option<Instant>
where
    I: IntoIterator<Item = Option<Instant>>,
{
    deadlines.into_iter().flatten().min()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn timer_fires_once_after_deadline() {
        let t0 = Instant::now();
        let mut timer = Timer::idle();
        timer.arm(t0, ms(300));

        assert!(!timer.fire_if_due(t0 + ms(299)));
        assert!(timer.fire_if_due(t0 + ms(300)));
        assert!(!timer.fire_if_due(t0 + ms(900)));
        assert!(!timer.is_armed());
    }

    #[test]
    fn rearming_pushes_the_deadline_back() {
        let t0 = Instant::now();
        let mut timer = Timer::idle();
        timer.arm(t0, ms(300));
        timer.arm(t0 + ms(200), ms(300));

        assert!(!timer.fire_if_due(t0 + ms(400)));
        assert!(timer.fire_if_due(t0 + ms(500)));
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let t0 = Instant::now();
        let mut timer = Timer::idle();
        timer.arm(t0, ms(10));
        timer.cancel();
        assert!(!timer.fire_if_due(t0 + ms(1_000)));
    }

    #[test]
    fn guard_is_active_only_inside_its_window() {
        let t0 = Instant::now();
        let mut guard = TransitionGuard::default();
        assert!(!guard.is_active(t0));

        guard.arm(t0, ms(400));
        assert!(guard.is_active(t0 + ms(399)));
        assert!(!guard.is_active(t0 + ms(400)));
        assert_eq!(guard.expires_at(t0 + ms(400)), None);
    }

    #[test]
    fn earliest_skips_idle_timers() {
        let t0 = Instant::now();
        let picked = earliest([None, Some(t0 + ms(50)), Some(t0 + ms(20)), None]);
        assert_eq!(picked, Some(t0 + ms(20)));
        assert_eq!(earliest([None, None]), None);
    }
}
