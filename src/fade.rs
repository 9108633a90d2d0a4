//! Auto-hide logic for the desktop controls.
//!
//! Two booleans drive the fade: `hovered` (recent pointer activity) and
//! `fade_out` (the controls are in their fade-out phase). The timers only run
//! when the inputs they depend on change, mirroring the way the controls react
//! to hover and fullscreen transitions rather than to every pointer event.

use std::time::{Duration, Instant};

use crate::config::Timings;
use crate::timer::{earliest, Timer};

pub struct FadeController {
    hover_reset: Duration,
    fade_delay: Duration,
    fade_duration: Duration,
    mouse_leave_hide: Duration,
    shortcut_active_for: Duration,

    fullscreen: bool,
    hovered: bool,
    fade_out: bool,
    /// Pointer is (or recently was) over the player
    show_ui: bool,
    /// Pointer moved since the controls last faded; the cursor stays visible while set
    pointer_moved: bool,
    shortcut_active: bool,

    hover_timer: Timer,
    fade_timer: Timer,
    fade_reset_timer: Timer,
    hide_timer: Timer,
    shortcut_timer: Timer,
}

impl FadeController {
    pub fn new(timings: &Timings, now: Instant) -> Self {
        let mut fade = Self {
            hover_reset: timings.fullscreen_hover_reset,
            fade_delay: timings.fade_delay,
            fade_duration: timings.fade_duration,
            mouse_leave_hide: timings.mouse_leave_hide,
            shortcut_active_for: timings.shortcut_active,
            fullscreen: false,
            hovered: false,
            fade_out: false,
            show_ui: true,
            pointer_moved: true,
            shortcut_active: false,
            hover_timer: Timer::idle(),
            fade_timer: Timer::idle(),
            fade_reset_timer: Timer::idle(),
            hide_timer: Timer::idle(),
            shortcut_timer: Timer::idle(),
        };
        fade.reevaluate(now);
        fade
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub fn fade_out(&self) -> bool {
        self.fade_out
    }

    pub fn show_ui(&self) -> bool {
        self.show_ui
    }

    pub fn shortcut_active(&self) -> bool {
        self.shortcut_active
    }

    /// Controls stay mounted while shown, while fading, and whenever playback is paused.
    pub fn controls_visible(&self, playing: bool) -> bool {
        self.show_ui || self.fade_out || !playing
    }

    /// Controls are fully opaque (and interactive) only outside the fade-out phase.
    pub fn controls_opaque(&self) -> bool {
        self.show_ui && !self.fade_out
    }

    /// Hover-based visibility of the desktop controls bar.
    pub fn ui_visible(&self, playing: bool) -> bool {
        if self.fullscreen {
            self.hovered && !self.fade_out
        } else {
            self.hovered || !playing
        }
    }

    /// Whether the desktop controls bar is drawn at all this frame.
    pub fn bar_shown(&self, playing: bool) -> bool {
        self.show_ui && self.ui_visible(playing) && self.controls_visible(playing)
    }

    /// Fullscreen hides the cursor until the pointer moves again.
    pub fn cursor_hidden(&self) -> bool {
        self.fullscreen && (!self.pointer_moved || self.fade_out || !self.show_ui)
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool, now: Instant) {
        if self.fullscreen == fullscreen {
            return;
        }
        self.fullscreen = fullscreen;
        self.reevaluate(now);
        self.sync_pointer_moved();
    }

    pub fn set_hovered(&mut self, hovered: bool, now: Instant) {
        if self.hovered == hovered {
            return;
        }
        self.hovered = hovered;
        self.reevaluate(now);
    }

    pub fn pointer_entered(&mut self) {
        self.hide_timer.cancel();
        self.set_show_ui(true);
    }

    pub fn pointer_left(&mut self, now: Instant) {
        self.hide_timer.arm(now, self.mouse_leave_hide);
    }

    pub fn pointer_moved(&mut self, now: Instant) {
        self.pointer_moved = true;
        self.set_hovered(true, now);
    }

    /// Raise the short-lived shortcut feedback flag.
    pub fn flash_shortcut(&mut self, now: Instant) {
        self.shortcut_active = true;
        self.shortcut_timer.arm(now, self.shortcut_active_for);
    }

    pub fn tick(&mut self, now: Instant) {
        // Hover reset first: it re-arms the fade timer it would otherwise race with.
        if self.hover_timer.fire_if_due(now) {
            self.set_hovered(false, now);
        }
        if self.fade_timer.fire_if_due(now) {
            self.set_fade_out(true, now);
        }
        if self.fade_reset_timer.fire_if_due(now) {
            self.set_fade_out(false, now);
        }
        if self.hide_timer.fire_if_due(now) {
            self.set_show_ui(false);
        }
        if self.shortcut_timer.fire_if_due(now) {
            self.shortcut_active = false;
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        earliest([
            self.hover_timer.deadline(),
            self.fade_timer.deadline(),
            self.fade_reset_timer.deadline(),
            self.hide_timer.deadline(),
            self.shortcut_timer.deadline(),
        ])
    }

    fn reevaluate(&mut self, now: Instant) {
        if self.fullscreen && self.hovered {
            self.hover_timer.arm(now, self.hover_reset);
        } else {
            self.hover_timer.cancel();
        }

        self.set_fade_out(false, now);
        if !self.fullscreen && self.hovered {
            self.fade_timer.cancel();
        } else {
            self.fade_timer.arm(now, self.fade_delay);
        }
    }

    fn set_fade_out(&mut self, fade_out: bool, now: Instant) {
        if self.fade_out == fade_out {
            return;
        }
        self.fade_out = fade_out;
        if fade_out {
            self.fade_reset_timer.arm(now, self.fade_duration);
        } else {
            self.fade_reset_timer.cancel();
        }
        self.sync_pointer_moved();
    }

    fn set_show_ui(&mut self, show_ui: bool) {
        if self.show_ui == show_ui {
            return;
        }
        self.show_ui = show_ui;
        self.sync_pointer_moved();
    }

    fn sync_pointer_moved(&mut self) {
        if !self.fullscreen {
            self.pointer_moved = true;
        } else if self.fade_out || !self.show_ui {
            self.pointer_moved = false;
        }
    }
}
