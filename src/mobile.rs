//! Visibility of the mobile chrome (title badge, centre button, seek strip).
//!
//! Unlike the desktop fade there is no hover: the chrome hides a fixed time
//! after the last interaction and is re-shown by taps.

use std::time::{Duration, Instant};

use crate::timer::Timer;

#[derive(Debug, Clone)]
pub struct MobileChrome {
    visible: bool,
    hide_after: Duration,
    hide_timer: Timer,
}

impl MobileChrome {
    pub fn new(hide_after: Duration) -> Self {
        Self {
            visible: true,
            hide_after,
            hide_timer: Timer::idle(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show and restart the hide countdown.
    pub fn show(&mut self, now: Instant) {
        self.visible = true;
        self.schedule_hide(now);
    }

    pub fn hide(&mut self) {
        self.visible = false;
        self.hide_timer.cancel();
    }

    /// Flip visibility; showing arms the countdown, hiding clears it.
    pub fn toggle(&mut self, now: Instant) -> bool {
        if self.visible {
            self.hide();
        } else {
            self.show(now);
        }
        self.visible
    }

    /// Show without a countdown, e.g. while a finger is on the seek strip.
    pub fn keep_visible(&mut self) {
        self.visible = true;
        self.hide_timer.cancel();
    }

    pub fn schedule_hide(&mut self, now: Instant) {
        self.hide_timer.arm(now, self.hide_after);
    }

    /// Back to visible after a layout or fullscreen change. Only mobile
    /// fullscreen auto-hides.
    pub fn reset_for(&mut self, fullscreen: bool, mobile: bool, now: Instant) {
        self.visible = true;
        if fullscreen && mobile {
            self.schedule_hide(now);
        } else {
            self.hide_timer.cancel();
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if self.hide_timer.fire_if_due(now) {
            self.visible = false;
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.hide_timer.deadline()
    }
}
