//! Single/double tap disambiguation for the mobile side zones.
//!
//! Each zone runs a small state machine:
//!
//! ```text
//! Idle --tap--> PendingSingle --300ms--> Idle (single fired)
//!                     |
//!                     +--second tap within 350ms / 40px--> Idle (double fired)
//! ```
//!
//! The timer belongs to the zone, so a double tap cancels exactly the single
//! tap it upgrades and nothing else.

use std::time::{Duration, Instant};

use egui::{Pos2, Rect};

use crate::config::{GestureSettings, Timings};
use crate::timer::{earliest, Timer, TransitionGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapZone {
    /// Rewind side
    Left,
    /// Forward side
    Right,
}

impl TapZone {
    fn index(self) -> usize {
        match self {
            TapZone::Left => 0,
            TapZone::Right => 1,
        }
    }

    /// Which side zone, if any, contains `pos`. Each zone spans `fraction` of the width.
    pub fn at(area: Rect, pos: Pos2, fraction: f32) -> Option<Self> {
        if !area.contains(pos) {
            return None;
        }
        let zone_width = area.width() * fraction;
        if pos.x < area.left() + zone_width {
            Some(TapZone::Left)
        } else if pos.x > area.right() - zone_width {
            Some(TapZone::Right)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Second tap on the same side: seek immediately
    Double(TapZone),
    /// First tap: a single tap fires later unless upgraded
    PendingSingle(TapZone),
    /// Dropped because a transition is animating
    Ignored,
}

#[derive(Debug, Clone, Copy, Default)]
struct ZoneState {
    last_tap: Option<Instant>,
    single_tap: Timer,
}

#[derive(Debug, Clone)]
pub struct TapClassifier {
    double_tap_window: Duration,
    single_tap_delay: Duration,
    double_reset: Duration,
    max_distance: f32,

    zones: [ZoneState; 2],
    /// Position of the previous tap, shared by both zones
    last_pos: Option<Pos2>,
    last_tap_was_double: TransitionGuard,
    last_tap_at: Option<Instant>,
}

impl TapClassifier {
    pub fn new(timings: &Timings, gestures: &GestureSettings) -> Self {
        Self {
            double_tap_window: timings.double_tap_window,
            single_tap_delay: timings.single_tap_delay,
            double_reset: timings.last_tap_double_reset,
            max_distance: gestures.double_tap_distance,
            zones: [ZoneState::default(); 2],
            last_pos: None,
            last_tap_was_double: TransitionGuard::default(),
            last_tap_at: None,
        }
    }

    /// Classify a touch end inside `zone`.
    ///
    /// While `transitioning`, single taps are dropped without touching the
    /// history, but a deliberate double tap still goes through.
    pub fn tap(&mut self, zone: TapZone, pos: Pos2, now: Instant, transitioning: bool) -> TapOutcome {
        let is_double = self.is_double(zone, pos, now);
        if transitioning && !is_double {
            tracing::debug!(?zone, "tap ignored during transition");
            return TapOutcome::Ignored;
        }

        let state = &mut self.zones[zone.index()];
        let outcome = if is_double {
            state.single_tap.cancel();
            self.last_tap_was_double.arm(now, self.double_reset);
            TapOutcome::Double(zone)
        } else {
            state.single_tap.arm(now, self.single_tap_delay);
            TapOutcome::PendingSingle(zone)
        };

        self.zones[zone.index()].last_tap = Some(now);
        self.last_pos = Some(pos);
        self.last_tap_at = Some(now);
        tracing::debug!(?outcome, "tap classified");
        outcome
    }

    /// Zones whose pending single tap is due, in zone order.
    pub fn poll_single_taps(&mut self, now: Instant) -> Vec<TapZone> {
        [TapZone::Left, TapZone::Right]
            .into_iter()
            .filter(|zone| self.zones[zone.index()].single_tap.fire_if_due(now))
            .collect()
    }

    pub fn has_pending_single(&self, zone: TapZone) -> bool {
        self.zones[zone.index()].single_tap.is_armed()
    }

    /// A double tap was classified within the last reset window.
    pub fn last_tap_was_double(&self, now: Instant) -> bool {
        self.last_tap_was_double.is_active(now)
    }

    /// Any zone tap landed within the double-tap window.
    pub fn recent_tap(&self, now: Instant) -> bool {
        matches!(self.last_tap_at, Some(at) if now.saturating_duration_since(at) < self.double_tap_window)
    }

    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        earliest([
            self.zones[0].single_tap.deadline(),
            self.zones[1].single_tap.deadline(),
            self.last_tap_was_double.expires_at(now),
        ])
    }

    /// Forget all history and cancel pending taps.
    pub fn reset(&mut self) {
        self.zones = [ZoneState::default(); 2];
        self.last_pos = None;
        self.last_tap_was_double.clear();
        self.last_tap_at = None;
    }

    fn is_double(&self, zone: TapZone, pos: Pos2, now: Instant) -> bool {
        let (Some(last_tap), Some(last_pos)) = (self.zones[zone.index()].last_tap, self.last_pos) else {
            return false;
        };
        let dt = now.saturating_duration_since(last_tap);
        !dt.is_zero()
            && dt < self.double_tap_window
            && (pos.x - last_pos.x).abs() < self.max_distance
            && (pos.y - last_pos.y).abs() < self.max_distance
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Vec2;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn classifier() -> TapClassifier {
        TapClassifier::new(&Timings::default(), &GestureSettings::default())
    }

    #[test]
    fn two_quick_taps_make_one_double() {
        let t0 = Instant::now();
        let mut taps = classifier();
        let p = Pos2::new(50.0, 300.0);

        assert_eq!(taps.tap(TapZone::Left, p, t0, false), TapOutcome::PendingSingle(TapZone::Left));
        assert_eq!(
            taps.tap(TapZone::Left, p + Vec2::new(10.0, -5.0), t0 + ms(200), false),
            TapOutcome::Double(TapZone::Left)
        );
        // The upgraded single tap never fires.
        assert!(taps.poll_single_taps(t0 + ms(1_000)).is_empty());
        assert!(taps.last_tap_was_double(t0 + ms(500)));
        assert!(!taps.last_tap_was_double(t0 + ms(600)));
    }

    #[test]
    fn slow_taps_are_two_singles() {
        let t0 = Instant::now();
        let mut taps = classifier();
        let p = Pos2::new(350.0, 300.0);

        assert_eq!(taps.tap(TapZone::Right, p, t0, false), TapOutcome::PendingSingle(TapZone::Right));
        assert_eq!(taps.poll_single_taps(t0 + ms(299)), vec![]);
        assert_eq!(taps.poll_single_taps(t0 + ms(300)), vec![TapZone::Right]);

        assert_eq!(
            taps.tap(TapZone::Right, p, t0 + ms(400), false),
            TapOutcome::PendingSingle(TapZone::Right)
        );
        assert_eq!(taps.poll_single_taps(t0 + ms(700)), vec![TapZone::Right]);
    }

    #[test]
    fn distance_and_side_break_a_double() {
        let t0 = Instant::now();
        let mut taps = classifier();
        taps.tap(TapZone::Left, Pos2::new(10.0, 10.0), t0, false);
        assert_eq!(
            taps.tap(TapZone::Left, Pos2::new(60.0, 10.0), t0 + ms(100), false),
            TapOutcome::PendingSingle(TapZone::Left)
        );
        assert_eq!(
            taps.tap(TapZone::Right, Pos2::new(60.0, 10.0), t0 + ms(150), false),
            TapOutcome::PendingSingle(TapZone::Right)
        );
    }

    #[test]
    fn transitions_drop_singles_but_allow_doubles() {
        let t0 = Instant::now();
        let mut taps = classifier();
        let p = Pos2::new(20.0, 20.0);

        assert_eq!(taps.tap(TapZone::Left, p, t0, true), TapOutcome::Ignored);
        assert!(!taps.has_pending_single(TapZone::Left));

        taps.tap(TapZone::Left, p, t0 + ms(10), false);
        assert_eq!(taps.tap(TapZone::Left, p, t0 + ms(100), true), TapOutcome::Double(TapZone::Left));
    }

    #[test]
    fn recent_tap_window() {
        let t0 = Instant::now();
        let mut taps = classifier();
        assert!(!taps.recent_tap(t0));
        taps.tap(TapZone::Right, Pos2::ZERO, t0, false);
        assert!(taps.recent_tap(t0 + ms(349)));
        assert!(!taps.recent_tap(t0 + ms(350)));
    }

    #[test]
    fn zones_cover_the_outer_quarters() {
        let area = Rect::from_min_size(Pos2::ZERO, Vec2::new(400.0, 200.0));
        assert_eq!(TapZone::at(area, Pos2::new(50.0, 100.0), 0.25), Some(TapZone::Left));
        assert_eq!(TapZone::at(area, Pos2::new(200.0, 100.0), 0.25), None);
        assert_eq!(TapZone::at(area, Pos2::new(380.0, 100.0), 0.25), Some(TapZone::Right));
        assert_eq!(TapZone::at(area, Pos2::new(380.0, 300.0), 0.25), None);
    }

    #[test]
    fn reset_cancels_pending_taps() {
        let t0 = Instant::now();
        let mut taps = classifier();
        taps.tap(TapZone::Left, Pos2::ZERO, t0, false);
        taps.reset();
        assert_eq!(taps.next_deadline(t0), None);
        assert!(taps.poll_single_taps(t0 + ms(500)).is_empty());
    }
}
