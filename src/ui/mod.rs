//! egui rendering of the player.
//!
//! `PlayerView` owns presentation state only: the video texture, hover
//! bookkeeping and the geometry of a drag in progress. Every decision is made
//! by `VideoPlayer`; the two layouts differ in composition, not in logic.

mod desktop;
mod mobile;
pub mod widgets;

use std::time::Instant;

use egui::{pos2, vec2, Color32, FontId, Painter, Pos2, Rect, Ui};

use animatrix_player::drag::BarGeometry;
use animatrix_player::media::MediaElement;
use animatrix_player::player::{ActionOverlay, VideoPlayer};
use animatrix_player::Config;

use widgets::Glyph;

/// Aspect ratio assumed until the video reports its size.
const FALLBACK_ASPECT: f32 = 16.0 / 9.0;
const MIN_PLAYER_HEIGHT: f32 = 240.0;

pub struct PlayerView {
    texture: Option<egui::TextureHandle>,
    texture_options: egui::TextureOptions,
    background: Color32,
    /// Pointer was inside the player last frame
    hovering: bool,
    last_pointer: Option<Pos2>,
    /// Bar the current seek drag started on
    seek_geometry: Option<BarGeometry>,
    /// Bar the current volume drag started on
    volume_rect: Option<Rect>,
}

impl PlayerView {
    pub fn new(config: &Config) -> Self {
        let [r, g, b] = config.background_rgb;
        Self {
            texture: None,
            texture_options: config.texture_filter.to_egui_options(),
            background: Color32::from_rgb(r, g, b),
            hovering: false,
            last_pointer: None,
            seek_geometry: None,
            volume_rect: None,
        }
    }

    /// Drop the last frame of the previous source.
    pub fn clear_texture(&mut self) {
        self.texture = None;
    }

    /// Upload the newest decoded frame, reusing the texture when the size is unchanged.
    pub fn upload_frame<M: MediaElement>(&mut self, ctx: &egui::Context, player: &mut VideoPlayer<M>) {
        let Some(frame) = player.media_mut().take_frame() else {
            return;
        };
        let image = egui::ColorImage::from_rgba_unmultiplied(frame.size(), &frame.pixels);
        match self.texture.as_mut() {
            Some(texture) if texture.size() == frame.size() => texture.set(image, self.texture_options),
            _ => self.texture = Some(ctx.load_texture("video-frame", image, self.texture_options)),
        }
    }

    pub fn show<M: MediaElement>(&mut self, ui: &mut Ui, player: &mut VideoPlayer<M>, now: Instant) {
        self.continue_drags(ui.ctx(), player, now);
        if player.layout().is_mobile() {
            mobile::show(self, ui, player, now);
        } else {
            desktop::show(self, ui, player, now);
        }
    }

    /// Drags keep tracking the pointer outside the bar they started on,
    /// like document-level listeners. Losing window focus cancels.
    fn continue_drags<M: MediaElement>(&mut self, ctx: &egui::Context, player: &mut VideoPlayer<M>, now: Instant) {
        let (down, pos, focused) = ctx.input(|i| (i.pointer.primary_down(), i.pointer.latest_pos(), i.focused));

        if player.is_seeking() {
            if !focused {
                player.seek_bar_cancel(now);
            } else if down {
                if let (Some(geometry), Some(pos)) = (self.seek_geometry, pos) {
                    player.seek_bar_pointer_move(geometry, pos);
                }
            } else {
                player.seek_bar_pointer_up(now);
            }
        }
        if !player.is_seeking() {
            self.seek_geometry = None;
        }

        if let Some(rect) = self.volume_rect {
            match pos {
                Some(pos) if down && focused => player.volume_bar_pointer_move(rect, pos),
                _ => {
                    player.volume_bar_pointer_up();
                    self.volume_rect = None;
                }
            }
        }
    }

    /// Start a seek drag if the primary button went down on `response` this frame.
    fn begin_seek_drag<M: MediaElement>(
        &mut self,
        ui: &Ui,
        response: &egui::Response,
        geometry: BarGeometry,
        player: &mut VideoPlayer<M>,
        now: Instant,
    ) {
        if player.is_seeking() || !response.contains_pointer() {
            return;
        }
        if !ui.input(|i| i.pointer.primary_pressed()) {
            return;
        }
        if let Some(pos) = response.interact_pointer_pos().or(response.hover_pos()) {
            player.seek_bar_pointer_down(geometry, pos, now);
            if player.is_seeking() {
                self.seek_geometry = Some(geometry);
            }
        }
    }

    fn paint_video(&self, painter: &Painter, container: Rect, aspect: Option<f32>) {
        painter.rect_filled(container, 0.0, Color32::BLACK);
        if let Some(texture) = &self.texture {
            let uv = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));
            painter.image(texture.id(), fit_video(container, aspect), uv, Color32::WHITE);
        }
    }

    fn texture(&self) -> Option<&egui::TextureHandle> {
        self.texture.as_ref()
    }

    /// Track enter, leave and movement of the pointer over `rect`.
    fn track_hover<M: MediaElement>(&mut self, ctx: &egui::Context, rect: Rect, player: &mut VideoPlayer<M>, now: Instant) {
        let pos = ctx.input(|i| i.pointer.hover_pos());
        let inside = pos.is_some_and(|p| rect.contains(p));
        if inside != self.hovering {
            self.hovering = inside;
            if inside {
                player.pointer_entered();
            } else {
                player.pointer_left(now);
            }
        }
        if inside && pos != self.last_pointer {
            player.pointer_moved(now);
        }
        self.last_pointer = pos;
    }
}

/// The player box inside the window: the whole area in fullscreen,
/// otherwise full width at the video's aspect ratio.
fn player_rect(area: Rect, aspect: Option<f32>, fullscreen: bool) -> Rect {
    if fullscreen {
        return area;
    }
    let aspect = aspect.unwrap_or(FALLBACK_ASPECT);
    let height = (area.width() / aspect).max(MIN_PLAYER_HEIGHT).min(area.height());
    Rect::from_center_size(area.center(), vec2(area.width(), height))
}

/// Letterbox the video inside `container`.
fn fit_video(container: Rect, aspect: Option<f32>) -> Rect {
    let aspect = aspect.unwrap_or(FALLBACK_ASPECT);
    let size = if container.width() / container.height() > aspect {
        vec2(container.height() * aspect, container.height())
    } else {
        vec2(container.width(), container.width() / aspect)
    };
    Rect::from_center_size(container.center(), size)
}

fn paint_spinner(ui: &Ui, rect: Rect) {
    ui.painter().rect_filled(rect, 0.0, widgets::black(100));
    let time = ui.input(|i| i.time);
    widgets::spinner(ui.painter(), rect.center(), 24.0, time);
    ui.ctx().request_repaint();
}

/// Centre indicator for keyboard actions: icon, text or both.
fn paint_action_overlay(painter: &Painter, rect: Rect, overlay: &ActionOverlay, volume: f64) {
    let text = overlay.text().filter(|t| !t.is_empty());
    if overlay.icon().is_none() && text.is_none() {
        return;
    }
    let center = rect.center();
    painter.rect_filled(widgets::square(center, 96.0), 16.0, widgets::black(150));

    let icon_center = if text.is_some() && overlay.icon().is_some() {
        center - vec2(0.0, 12.0)
    } else {
        center
    };
    if let Some(icon) = overlay.icon() {
        widgets::overlay_icon(painter, Glyph::upright(icon_center, 44.0), icon, volume, Color32::WHITE);
    }
    if let Some(text) = text {
        let text_center = if overlay.icon().is_some() {
            center + vec2(0.0, 30.0)
        } else {
            center
        };
        painter.text(
            text_center,
            egui::Align2::CENTER_CENTER,
            text,
            FontId::proportional(18.0),
            Color32::WHITE,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn player_rect_follows_aspect_ratio() {
        let area = Rect::from_min_size(Pos2::ZERO, vec2(1280.0, 1000.0));
        let rect = player_rect(area, Some(2.0), false);
        assert_eq!(rect.size(), vec2(1280.0, 640.0));
        assert_eq!(rect.center(), area.center());
    }

    #[test]
    fn player_rect_has_a_minimum_height() {
        let area = Rect::from_min_size(Pos2::ZERO, vec2(320.0, 800.0));
        assert_eq!(player_rect(area, None, false).height(), MIN_PLAYER_HEIGHT);
    }

    #[test]
    fn fullscreen_player_fills_the_area() {
        let area = Rect::from_min_size(Pos2::ZERO, vec2(1920.0, 1080.0));
        assert_eq!(player_rect(area, Some(4.0 / 3.0), true), area);
    }

    #[test]
    fn video_is_letterboxed() {
        let container = Rect::from_min_size(Pos2::ZERO, vec2(1000.0, 1000.0));
        let video = fit_video(container, Some(2.0));
        assert_eq!(video.size(), vec2(1000.0, 500.0));
        assert_eq!(video.center(), container.center());
    }
}
