//! Volume bar: horizontal drag plus mouse-wheel notches.

use egui::Pos2;

use crate::drag::{BarGeometry, DragTracker};
use crate::shortcuts::round_to;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VolumeBarEvent {
    Drag(bool),
    /// New volume in `[0, 1]`, rounded to two decimals
    Volume(f64),
}

/// One wheel notch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelNotch {
    Up,
    Down,
}

impl WheelNotch {
    /// egui reports positive `y` when scrolling up.
    pub fn from_scroll_delta(delta_y: f32) -> Option<Self> {
        if delta_y > 0.0 {
            Some(WheelNotch::Up)
        } else if delta_y < 0.0 {
            Some(WheelNotch::Down)
        } else {
            None
        }
    }
}

/// Volume after one wheel notch, clamped to `[0, 1]`.
pub fn wheel_step(volume: f64, notch: WheelNotch, step: f64) -> f64 {
    let delta = match notch {
        WheelNotch::Up => step,
        WheelNotch::Down => -step,
    };
    round_to(volume + delta, 2).clamp(0.0, 1.0)
}

#[derive(Debug, Clone, Default)]
pub struct VolumeBar {
    drag: DragTracker,
}

impl VolumeBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn pointer_down(&mut self, rect: egui::Rect, pos: Pos2) -> Vec<VolumeBarEvent> {
        let ratio = BarGeometry::horizontal(rect).ratio_at(pos);
        let mut events = Vec::with_capacity(2);
        if self.drag.press(ratio) {
            events.push(VolumeBarEvent::Drag(true));
        }
        events.push(VolumeBarEvent::Volume(ratio_to_volume(ratio)));
        events
    }

    pub fn pointer_move(&mut self, rect: egui::Rect, pos: Pos2) -> Option<VolumeBarEvent> {
        let ratio = BarGeometry::horizontal(rect).ratio_at(pos);
        self.drag
            .move_to(ratio)
            .then(|| VolumeBarEvent::Volume(ratio_to_volume(ratio)))
    }

    pub fn pointer_up(&mut self) -> Option<VolumeBarEvent> {
        self.drag.release().map(|_| VolumeBarEvent::Drag(false))
    }
}

fn ratio_to_volume(ratio: f32) -> f64 {
    round_to(f64::from(ratio), 2).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{Rect, Vec2};

    fn rect() -> Rect {
        Rect::from_min_size(Pos2::new(0.0, 0.0), Vec2::new(80.0, 6.0))
    }

    #[test]
    fn drag_sets_volume_from_the_pointer() {
        let mut bar = VolumeBar::new();
        assert_eq!(
            bar.pointer_down(rect(), Pos2::new(20.0, 3.0)),
            vec![VolumeBarEvent::Drag(true), VolumeBarEvent::Volume(0.25)]
        );
        assert_eq!(
            bar.pointer_move(rect(), Pos2::new(200.0, 3.0)),
            Some(VolumeBarEvent::Volume(1.0))
        );
        assert_eq!(bar.pointer_up(), Some(VolumeBarEvent::Drag(false)));
        assert_eq!(bar.pointer_up(), None);
        assert_eq!(bar.pointer_move(rect(), Pos2::new(40.0, 3.0)), None);
    }

    #[test]
    fn values_round_to_two_decimals() {
        let mut bar = VolumeBar::new();
        let events = bar.pointer_down(rect(), Pos2::new(26.7, 3.0));
        assert_eq!(events[1], VolumeBarEvent::Volume(0.33));
    }

    #[test]
    fn wheel_notches_step_and_clamp() {
        assert_eq!(wheel_step(0.5, WheelNotch::Up, 0.1), 0.6);
        assert_eq!(wheel_step(0.95, WheelNotch::Up, 0.1), 1.0);
        assert_eq!(wheel_step(0.05, WheelNotch::Down, 0.1), 0.0);
        assert_eq!(wheel_step(0.7, WheelNotch::Down, 0.1), 0.6);
    }

    #[test]
    fn scroll_direction() {
        assert_eq!(WheelNotch::from_scroll_delta(12.0), Some(WheelNotch::Up));
        assert_eq!(WheelNotch::from_scroll_delta(-1.0), Some(WheelNotch::Down));
        assert_eq!(WheelNotch::from_scroll_delta(0.0), None);
    }
}
