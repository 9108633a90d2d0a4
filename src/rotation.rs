//! Quarter-turn rotation of the mobile fullscreen container.
//!
//! The renderer lays the player out in a *local* frame whose width and height
//! are the screen's height and width, then turns it by ±90° about the screen
//! centre. `RotatedFrame` converts between the two coordinate systems.

use std::f32::consts::FRAC_PI_2;
use std::time::{Duration, Instant};

use egui::{Pos2, Rect, Vec2};

use crate::timer::TransitionGuard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rotation {
    /// +90°: the top of the picture faces the right edge of the screen
    #[default]
    Clockwise,
    /// -90°: the top of the picture faces the left edge of the screen
    CounterClockwise,
}

impl Rotation {
    pub fn degrees(self) -> i32 {
        match self {
            Rotation::Clockwise => 90,
            Rotation::CounterClockwise => -90,
        }
    }

    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees {
            90 => Some(Rotation::Clockwise),
            -90 => Some(Rotation::CounterClockwise),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Rotation::Clockwise => Rotation::CounterClockwise,
            Rotation::CounterClockwise => Rotation::Clockwise,
        }
    }

    /// Angle in radians for egui's clockwise-positive convention.
    pub fn angle(self) -> f32 {
        match self {
            Rotation::Clockwise => FRAC_PI_2,
            Rotation::CounterClockwise => -FRAC_PI_2,
        }
    }
}

/// Current rotation plus the guard raised while the turn animates.
#[derive(Debug, Clone)]
pub struct RotationState {
    rotation: Rotation,
    guard: TransitionGuard,
    guard_window: Duration,
}

impl RotationState {
    pub fn new(guard_window: Duration) -> Self {
        Self {
            rotation: Rotation::default(),
            guard: TransitionGuard::default(),
            guard_window,
        }
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Swap direction and raise the transition guard.
    pub fn toggle(&mut self, now: Instant) -> Rotation {
        self.rotation = self.rotation.toggled();
        self.guard.arm(now, self.guard_window);
        tracing::debug!(degrees = self.rotation.degrees(), "rotation toggled");
        self.rotation
    }

    pub fn is_transitioning(&self, now: Instant) -> bool {
        self.guard.is_active(now)
    }

    pub fn guard_expires_at(&self, now: Instant) -> Option<Instant> {
        self.guard.expires_at(now)
    }
}

/// Maps between a rotated local frame and the screen rectangle it fills.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotatedFrame {
    screen: Rect,
    rotation: Rotation,
}

impl RotatedFrame {
    pub fn new(screen: Rect, rotation: Rotation) -> Self {
        Self { screen, rotation }
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    /// Size of the local frame: the screen with its axes swapped.
    pub fn local_size(&self) -> Vec2 {
        Vec2::new(self.screen.height(), self.screen.width())
    }

    pub fn local_rect(&self) -> Rect {
        Rect::from_min_size(Pos2::ZERO, self.local_size())
    }

    pub fn to_screen(&self, local: Pos2) -> Pos2 {
        let d = local - self.local_rect().center();
        let offset = match self.rotation {
            Rotation::Clockwise => Vec2::new(-d.y, d.x),
            Rotation::CounterClockwise => Vec2::new(d.y, -d.x),
        };
        self.screen.center() + offset
    }

    pub fn to_local(&self, screen: Pos2) -> Pos2 {
        let s = screen - self.screen.center();
        let d = match self.rotation {
            Rotation::Clockwise => Vec2::new(s.y, -s.x),
            Rotation::CounterClockwise => Vec2::new(-s.y, s.x),
        };
        self.local_rect().center() + d
    }

    /// Screen-space bounding box of a local rectangle.
    pub fn rect_to_screen(&self, local: Rect) -> Rect {
        Rect::from_two_pos(self.to_screen(local.min), self.to_screen(local.max))
    }
}
