//! Painter-drawn icons, bars and the loading spinner.
//!
//! No icon font is bundled, so every glyph is built from shapes. Glyphs are
//! laid out in a unit box around their centre and take an angle, which lets
//! the rotated mobile layout reuse them unchanged.

use std::f32::consts::{FRAC_PI_2, PI, TAU};
use std::sync::Arc;

use egui::emath::Rot2;
use egui::epaint::TextShape;
use egui::{vec2, Color32, FontId, Galley, Id, Painter, Pos2, Rect, Response, Sense, Shape, Stroke, Ui, Vec2};

use animatrix_player::player::OverlayIcon;
use animatrix_player::rotation::Rotation;

pub const ACCENT: Color32 = Color32::from_rgb(229, 57, 53);

pub fn white(alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(255, 255, 255, alpha)
}

pub fn black(alpha: u8) -> Color32 {
    Color32::from_rgba_unmultiplied(0, 0, 0, alpha)
}

/// Maps glyph-local coordinates (unit box, y down) onto the screen.
#[derive(Clone, Copy)]
pub struct Glyph {
    center: Pos2,
    size: f32,
    rot: Rot2,
}

impl Glyph {
    pub fn new(center: Pos2, size: f32, angle: f32) -> Self {
        Self {
            center,
            size,
            rot: Rot2::from_angle(angle),
        }
    }

    pub fn upright(center: Pos2, size: f32) -> Self {
        Self::new(center, size, 0.0)
    }

    fn at(&self, x: f32, y: f32) -> Pos2 {
        self.center + self.rot * vec2(x * self.size, y * self.size)
    }

    fn quad(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> Vec<Pos2> {
        vec![self.at(x0, y0), self.at(x1, y0), self.at(x1, y1), self.at(x0, y1)]
    }

    fn arc(&self, radius: f32, from: f32, to: f32) -> Vec<Pos2> {
        let segments = 20;
        (0..=segments)
            .map(|i| {
                let a = from + (to - from) * i as f32 / segments as f32;
                self.at(radius * a.cos(), radius * a.sin())
            })
            .collect()
    }

    fn stroke_width(&self) -> f32 {
        (self.size * 0.09).max(1.5)
    }
}

pub fn play_icon(painter: &Painter, glyph: Glyph, color: Color32) {
    let points = vec![glyph.at(-0.3, -0.4), glyph.at(0.42, 0.0), glyph.at(-0.3, 0.4)];
    painter.add(Shape::convex_polygon(points, color, Stroke::NONE));
}

pub fn pause_icon(painter: &Painter, glyph: Glyph, color: Color32) {
    painter.add(Shape::convex_polygon(glyph.quad(-0.3, -0.4, -0.08, 0.4), color, Stroke::NONE));
    painter.add(Shape::convex_polygon(glyph.quad(0.08, -0.4, 0.3, 0.4), color, Stroke::NONE));
}

/// Circular arrow with the step in seconds written inside.
pub fn skip_icon(painter: &Painter, glyph: Glyph, forward: bool, seconds: u32, color: Color32) {
    let stroke = Stroke::new(glyph.stroke_width(), color);
    let radius = 0.42;
    // Open at the top, the arrowhead sits on the open end.
    let (from, to) = if forward {
        (-FRAC_PI_2 + 0.5, -FRAC_PI_2 + TAU - 0.9)
    } else {
        (-FRAC_PI_2 - 0.5, -FRAC_PI_2 - TAU + 0.9)
    };
    painter.add(Shape::line(glyph.arc(radius, from, to), stroke));

    let tip_x = radius * to.cos();
    let tip_y = radius * to.sin();
    let dir = if forward { 1.0 } else { -1.0 };
    let head = vec![
        glyph.at(tip_x + 0.18 * dir, tip_y),
        glyph.at(tip_x - 0.02 * dir, tip_y - 0.14),
        glyph.at(tip_x - 0.02 * dir, tip_y + 0.14),
    ];
    painter.add(Shape::convex_polygon(head, color, Stroke::NONE));

    rotated_text(
        painter,
        glyph.center,
        &seconds.to_string(),
        FontId::proportional(glyph.size * 0.32),
        color,
        glyph.rot.angle(),
    );
}

/// Speaker with zero, one or two waves, or a cross when silent.
pub fn volume_icon(painter: &Painter, glyph: Glyph, volume: f64, color: Color32) {
    painter.add(Shape::convex_polygon(glyph.quad(-0.42, -0.13, -0.24, 0.13), color, Stroke::NONE));
    let cone = vec![
        glyph.at(-0.24, -0.13),
        glyph.at(0.0, -0.36),
        glyph.at(0.0, 0.36),
        glyph.at(-0.24, 0.13),
    ];
    painter.add(Shape::convex_polygon(cone, color, Stroke::NONE));

    let stroke = Stroke::new(glyph.stroke_width(), color);
    if volume <= 0.0 {
        painter.line_segment([glyph.at(0.14, -0.16), glyph.at(0.42, 0.16)], stroke);
        painter.line_segment([glyph.at(0.14, 0.16), glyph.at(0.42, -0.16)], stroke);
        return;
    }
    painter.add(Shape::line(glyph.arc(0.2, -0.8, 0.8), stroke));
    if volume >= 0.5 {
        painter.add(Shape::line(glyph.arc(0.38, -0.85, 0.85), stroke));
    }
}

/// Four corner brackets; `exit` points them inward.
pub fn fullscreen_icon(painter: &Painter, glyph: Glyph, exit: bool, color: Color32) {
    let stroke = Stroke::new(glyph.stroke_width(), color);
    let (outer, inner) = (0.4, 0.16);
    for (sx, sy) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
        let corner = if exit {
            glyph.at(sx * inner, sy * inner)
        } else {
            glyph.at(sx * outer, sy * outer)
        };
        let (along_x, along_y) = if exit {
            (glyph.at(sx * outer, sy * inner), glyph.at(sx * inner, sy * outer))
        } else {
            (glyph.at(sx * inner, sy * outer), glyph.at(sx * outer, sy * inner))
        };
        painter.add(Shape::line(vec![along_x, corner, along_y], stroke));
    }
}

pub fn rotate_icon(painter: &Painter, glyph: Glyph, color: Color32) {
    let stroke = Stroke::new(glyph.stroke_width(), color);
    let end = PI * 1.5;
    painter.add(Shape::line(glyph.arc(0.36, 0.0, end), stroke));
    let tip = (0.36 * end.cos(), 0.36 * end.sin());
    let head = vec![
        glyph.at(tip.0 + 0.16, tip.1),
        glyph.at(tip.0 - 0.04, tip.1 - 0.14),
        glyph.at(tip.0 - 0.04, tip.1 + 0.14),
    ];
    painter.add(Shape::convex_polygon(head, color, Stroke::NONE));
}

/// Two chevrons, used by the double-tap side overlays.
pub fn double_chevron(painter: &Painter, glyph: Glyph, forward: bool, color: Color32) {
    let stroke = Stroke::new(glyph.stroke_width() * 1.4, color);
    let dir = if forward { 1.0 } else { -1.0 };
    for offset in [-0.18, 0.18] {
        let x = offset * dir;
        painter.add(Shape::line(
            vec![
                glyph.at(x - 0.14 * dir, -0.3),
                glyph.at(x + 0.14 * dir, 0.0),
                glyph.at(x - 0.14 * dir, 0.3),
            ],
            stroke,
        ));
    }
}

pub fn overlay_icon(painter: &Painter, glyph: Glyph, icon: OverlayIcon, volume: f64, color: Color32) {
    match icon {
        OverlayIcon::Play => play_icon(painter, glyph, color),
        OverlayIcon::Pause => pause_icon(painter, glyph, color),
        OverlayIcon::Replay10 => skip_icon(painter, glyph, false, 10, color),
        OverlayIcon::Forward10 => skip_icon(painter, glyph, true, 10, color),
        OverlayIcon::Replay30 => skip_icon(painter, glyph, false, 30, color),
        OverlayIcon::Forward30 => skip_icon(painter, glyph, true, 30, color),
        OverlayIcon::VolumeUp | OverlayIcon::VolumeDown => volume_icon(painter, glyph, volume.max(0.01), color),
        OverlayIcon::VolumeMute => volume_icon(painter, glyph, 0.0, color),
    }
}

/// Text centred on `center`, turned by `angle`.
pub fn rotated_text(painter: &Painter, center: Pos2, text: &str, font: FontId, color: Color32, angle: f32) {
    let galley: Arc<Galley> = painter.layout_no_wrap(text.to_owned(), font, color);
    let half = galley.size() / 2.0;
    let pos = center - Rot2::from_angle(angle) * half;
    painter.add(TextShape::new(pos, galley, color).with_angle(angle));
}

/// Which way a bar fills on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarAxis {
    LeftToRight,
    TopToBottom,
    BottomToTop,
}

impl BarAxis {
    pub fn for_rotation(rotation: Option<Rotation>) -> Self {
        match rotation {
            None => BarAxis::LeftToRight,
            Some(Rotation::Clockwise) => BarAxis::TopToBottom,
            Some(Rotation::CounterClockwise) => BarAxis::BottomToTop,
        }
    }

    fn split(self, rect: Rect, fraction: f32) -> (Rect, Pos2) {
        match self {
            BarAxis::LeftToRight => {
                let x = rect.left() + rect.width() * fraction;
                (
                    Rect::from_min_max(rect.min, egui::pos2(x, rect.bottom())),
                    egui::pos2(x, rect.center().y),
                )
            }
            BarAxis::TopToBottom => {
                let y = rect.top() + rect.height() * fraction;
                (
                    Rect::from_min_max(rect.min, egui::pos2(rect.right(), y)),
                    egui::pos2(rect.center().x, y),
                )
            }
            BarAxis::BottomToTop => {
                let y = rect.bottom() - rect.height() * fraction;
                (
                    Rect::from_min_max(egui::pos2(rect.left(), y), rect.max),
                    egui::pos2(rect.center().x, y),
                )
            }
        }
    }
}

/// Track, filled portion and an optional knob.
pub fn progress_bar(painter: &Painter, rect: Rect, fraction: f32, axis: BarAxis, fill: Color32, knob: bool) {
    let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
    let thickness = rect.width().min(rect.height());
    let rounding = thickness / 2.0;
    painter.rect_filled(rect, rounding, white(60));
    let (filled, head) = axis.split(rect, fraction);
    painter.rect_filled(filled, rounding, fill);
    if knob {
        painter.circle_filled(head, thickness * 1.6 + 2.0, fill);
    }
}

/// Ring plus a rotating arc, repainted continuously while shown.
pub fn spinner(painter: &Painter, center: Pos2, radius: f32, time: f64) {
    let stroke_width = (radius / 6.0).max(2.0);
    painter.circle_stroke(center, radius, Stroke::new(stroke_width, white(60)));

    let start = (time * 4.0 % std::f64::consts::TAU) as f32;
    let glyph = Glyph::upright(center, 1.0);
    painter.add(Shape::line(
        glyph.arc(radius, start, start + PI * 0.6),
        Stroke::new(stroke_width, Color32::WHITE),
    ));
}

/// An invisible hit area with the usual hover and press highlight.
pub fn icon_button(ui: &mut Ui, rect: Rect, id: Id) -> Response {
    let response = ui.interact(rect, id, Sense::click());
    if ui.is_rect_visible(rect) {
        let bg = if response.is_pointer_button_down_on() {
            white(40)
        } else if response.hovered() {
            white(20)
        } else {
            Color32::TRANSPARENT
        };
        ui.painter().rect_filled(rect, 4.0, bg);
    }
    response
}

/// Filled disc behind a centred control.
pub fn disc(painter: &Painter, center: Pos2, radius: f32, alpha: u8) {
    painter.circle_filled(center, radius, black(alpha));
}

pub fn square(center: Pos2, side: f32) -> Rect {
    Rect::from_center_size(center, Vec2::splat(side))
}
