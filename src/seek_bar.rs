//! Seek bar state: drag handling and the optimistic seek intent.
//!
//! While the user scrubs, the bar shows its own intent instead of the media's
//! playhead, which keeps arriving asynchronously and would make the thumb
//! jitter. After release the intent is held until the playhead converges on
//! it, so the thumb does not snap back to the old position while the seek is
//! still in flight.

use egui::Pos2;

use crate::drag::{BarGeometry, DragTracker};

/// How close the playhead must get before a committed intent is dropped.
pub const INTENT_TOLERANCE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekBarEvent {
    /// `true` when a drag starts, `false` when it ends or is cancelled
    Drag(bool),
    /// Committed seek target in seconds
    Seek(f64),
}

#[derive(Debug, Clone, Default)]
pub struct SeekBar {
    drag: DragTracker,
    /// Target time in seconds, held from the first press until the playhead catches up
    intent: Option<f64>,
}

impl SeekBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_active()
    }

    pub fn intent(&self) -> Option<f64> {
        self.intent
    }

    /// The time the thumb and labels should show.
    pub fn display_time(&self, current_time: f64) -> f64 {
        self.intent.unwrap_or(current_time)
    }

    /// Begin a drag at `pos`.
    pub fn pointer_down(&mut self, geometry: BarGeometry, pos: Pos2, duration: f64) -> Vec<SeekBarEvent> {
        let ratio = geometry.ratio_at(pos);
        let started = self.drag.press(ratio);
        self.intent = Some(ratio_to_time(ratio, duration));
        if started {
            tracing::debug!(ratio, "seek drag started");
            vec![SeekBarEvent::Drag(true)]
        } else {
            Vec::new()
        }
    }

    /// Follow the pointer anywhere on screen while a drag is active.
    pub fn pointer_move(&mut self, geometry: BarGeometry, pos: Pos2, duration: f64) {
        let ratio = geometry.ratio_at(pos);
        if self.drag.move_to(ratio) {
            self.intent = Some(ratio_to_time(ratio, duration));
        }
    }

    /// Finish the drag: exactly one seek (when the duration is known), then the drag end.
    pub fn pointer_up(&mut self, duration: f64) -> Vec<SeekBarEvent> {
        let Some(ratio) = self.drag.release() else {
            return Vec::new();
        };
        let mut events = Vec::with_capacity(2);
        if duration > 0.0 {
            let target = ratio_to_time(ratio, duration);
            self.intent = Some(target);
            tracing::debug!(target, "seek committed");
            events.push(SeekBarEvent::Seek(target));
        } else {
            self.intent = None;
        }
        events.push(SeekBarEvent::Drag(false));
        events
    }

    /// A cancelled drag (touch cancel, focus loss) commits like a release.
    pub fn cancel(&mut self, duration: f64) -> Vec<SeekBarEvent> {
        self.pointer_up(duration)
    }

    /// Feed the latest playhead. Clears a committed intent once it has converged.
    pub fn observe_time(&mut self, current_time: f64) {
        if self.drag.is_active() {
            return;
        }
        if let Some(intent) = self.intent {
            if (current_time - intent).abs() < INTENT_TOLERANCE {
                self.intent = None;
            }
        }
    }

    /// Forget a committed intent whose seek was rejected, so the thumb falls
    /// back to the playhead.
    pub fn drop_intent(&mut self) {
        if !self.drag.is_active() {
            self.intent = None;
        }
    }

    /// Drop any intent, e.g. when a new source is loaded.
    pub fn reset(&mut self) {
        self.drag = DragTracker::default();
        self.intent = None;
    }
}

fn ratio_to_time(ratio: f32, duration: f64) -> f64 {
    f64::from(ratio) * duration.max(0.0)
}
