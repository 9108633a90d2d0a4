//! Pointer geometry and the drag protocol shared by the seek and volume bars.

use egui::{Pos2, Rect};

use crate::rotation::Rotation;

/// Where a bar sits on screen and how it is oriented.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarGeometry {
    pub rect: Rect,
    pub rotation: Option<Rotation>,
}

impl BarGeometry {
    pub fn horizontal(rect: Rect) -> Self {
        Self { rect, rotation: None }
    }

    pub fn rotated(rect: Rect, rotation: Rotation) -> Self {
        Self {
            rect,
            rotation: Some(rotation),
        }
    }

    pub fn ratio_at(&self, pos: Pos2) -> f32 {
        pointer_ratio(self.rect, pos, self.rotation)
    }
}

/// Project a pointer onto a bar and return its position along it in `[0, 1]`.
///
/// The horizontal axis is used unless a rotation is given and the bar's
/// on-screen box is taller than wide. In that case the vertical axis is used,
/// inverted for a -90° turn so that "later" stays in the viewer's reading
/// direction.
pub fn pointer_ratio(rect: Rect, pos: Pos2, rotation: Option<Rotation>) -> f32 {
    let vertical = rotation.is_some() && rect.height() > rect.width();
    let (offset, extent) = if vertical {
        (pos.y - rect.top(), rect.height())
    } else {
        (pos.x - rect.left(), rect.width())
    };
    if extent <= 0.0 || !offset.is_finite() {
        return 0.0;
    }
    let ratio = (offset / extent).clamp(0.0, 1.0);
    match rotation {
        Some(Rotation::CounterClockwise) if vertical => 1.0 - ratio,
        _ => ratio,
    }
}

/// Tracks one drag gesture and its latest ratio.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragTracker {
    ratio: Option<f32>,
}

impl DragTracker {
    pub fn is_active(&self) -> bool {
        self.ratio.is_some()
    }

    pub fn ratio(&self) -> Option<f32> {
        self.ratio
    }

    /// Start a drag. Returns `false` if one was already running, in which case
    /// the ratio is only updated.
    pub fn press(&mut self, ratio: f32) -> bool {
        let started = self.ratio.is_none();
        self.ratio = Some(ratio);
        started
    }

    /// Follow the pointer. Ignored outside a drag.
    pub fn move_to(&mut self, ratio: f32) -> bool {
        match self.ratio.as_mut() {
            Some(current) => {
                *current = ratio;
                true
            }
            None => false,
        }
    }

    /// End the drag and return its final ratio.
    pub fn release(&mut self) -> Option<f32> {
        self.ratio.take()
    }
}
