//! Mobile composition: side tap zones, the centre button, the seek strip and,
//! in fullscreen, a rotated container with rotate and exit buttons.
//!
//! Everything is laid out in the local frame of a [`Stage`] and mapped to the
//! screen at the end, so the upright and rotated layouts share one code path.

use std::time::Instant;

use egui::{pos2, vec2, Align2, Color32, FontId, Id, Pos2, Rect, Sense, Ui, Vec2};

use animatrix_player::drag::BarGeometry;
use animatrix_player::format::format_time_label;
use animatrix_player::gesture::TapZone;
use animatrix_player::media::MediaElement;
use animatrix_player::player::VideoPlayer;
use animatrix_player::rotation::{RotatedFrame, Rotation};

use super::widgets::{self, BarAxis, Glyph};
use super::{fit_video, paint_action_overlay, paint_spinner, player_rect, PlayerView};

const SIDE_OVERLAY_FULLSCREEN: f32 = 140.0;
const SIDE_OVERLAY: f32 = 64.0;
const SEEK_STRIP_FULLSCREEN: f32 = 72.0;
const SEEK_STRIP: f32 = 28.0;
const CENTER_BUTTON: f32 = 64.0;
const CORNER_BUTTON: f32 = 44.0;

/// The local frame the chrome is laid out in.
#[derive(Debug, Clone, Copy)]
enum Stage {
    Upright(Rect),
    Rotated(RotatedFrame),
}

impl Stage {
    fn local_rect(&self) -> Rect {
        match self {
            Stage::Upright(rect) => *rect,
            Stage::Rotated(frame) => frame.local_rect(),
        }
    }

    fn screen_rect(&self) -> Rect {
        match self {
            Stage::Upright(rect) => *rect,
            Stage::Rotated(frame) => frame.rect_to_screen(frame.local_rect()),
        }
    }

    fn to_screen(&self, local: Pos2) -> Pos2 {
        match self {
            Stage::Upright(_) => local,
            Stage::Rotated(frame) => frame.to_screen(local),
        }
    }

    fn to_local(&self, screen: Pos2) -> Pos2 {
        match self {
            Stage::Upright(_) => screen,
            Stage::Rotated(frame) => frame.to_local(screen),
        }
    }

    fn rect_to_screen(&self, local: Rect) -> Rect {
        match self {
            Stage::Upright(_) => local,
            Stage::Rotated(frame) => frame.rect_to_screen(local),
        }
    }

    fn rotation(&self) -> Option<Rotation> {
        match self {
            Stage::Upright(_) => None,
            Stage::Rotated(frame) => Some(frame.rotation()),
        }
    }

    fn angle(&self) -> f32 {
        self.rotation().map_or(0.0, Rotation::angle)
    }

    fn glyph(&self, local_center: Pos2, size: f32) -> Glyph {
        Glyph::new(self.to_screen(local_center), size, self.angle())
    }

    fn bar_geometry(&self, local_track: Rect) -> BarGeometry {
        let rect = self.rect_to_screen(local_track);
        match self.rotation() {
            Some(rotation) => BarGeometry::rotated(rect, rotation),
            None => BarGeometry::horizontal(rect),
        }
    }

    /// Text anchored in local coordinates.
    fn text(&self, ui: &Ui, local_anchor: Pos2, align: Align2, text: &str, size: f32) {
        let font = FontId::proportional(size);
        let galley_size = ui.painter().layout_no_wrap(text.to_owned(), font.clone(), Color32::WHITE).size();
        let local = align.anchor_size(local_anchor, galley_size);
        widgets::rotated_text(
            ui.painter(),
            self.to_screen(local.center()),
            text,
            font,
            Color32::WHITE,
            self.angle(),
        );
    }
}

/// Local rectangles of the chrome, computed once per frame.
struct ChromeLayout {
    center_button: Rect,
    rotate: Option<Rect>,
    fullscreen: Rect,
    seek_track: Rect,
    seek_hit: Rect,
}

impl ChromeLayout {
    fn new(local: Rect, fullscreen: bool) -> Self {
        let fullscreen_button = Rect::from_center_size(
            pos2(local.right() - 30.0, local.bottom() - 30.0),
            Vec2::splat(CORNER_BUTTON),
        );
        let track = Rect::from_min_max(
            pos2(local.left() + 16.0, local.bottom() - 32.0),
            pos2(fullscreen_button.left() - 12.0, local.bottom() - 28.0),
        );
        let strip = if fullscreen { SEEK_STRIP_FULLSCREEN } else { SEEK_STRIP };
        Self {
            center_button: widgets::square(local.center(), CENTER_BUTTON),
            rotate: fullscreen.then(|| {
                Rect::from_center_size(pos2(local.right() - 30.0, local.top() + 30.0), Vec2::splat(CORNER_BUTTON))
            }),
            fullscreen: fullscreen_button,
            seek_track: track,
            seek_hit: Rect::from_center_size(track.center(), vec2(track.width(), strip)),
        }
    }

    fn interactive(&self) -> impl Iterator<Item = Rect> + '_ {
        [Some(self.center_button), self.rotate, Some(self.fullscreen), Some(self.seek_hit)]
            .into_iter()
            .flatten()
    }
}

pub(super) fn show<M: MediaElement>(view: &mut PlayerView, ui: &mut Ui, player: &mut VideoPlayer<M>, now: Instant) {
    let area = ui.max_rect();
    ui.painter().rect_filled(area, 0.0, view.background);

    let state = *player.state();
    let fullscreen = player.is_fullscreen();
    let rect = player_rect(area, state.aspect_ratio, fullscreen);
    let stage = if fullscreen {
        Stage::Rotated(RotatedFrame::new(rect, player.rotation()))
    } else {
        Stage::Upright(rect)
    };

    paint_video(view, ui, stage, state.aspect_ratio);
    let surface = ui.interact(stage.screen_rect(), Id::new("mobile_surface"), Sense::click());

    if !state.is_ready {
        paint_spinner(ui, stage.screen_rect());
    }
    paint_side_overlay(ui, stage, player, fullscreen);
    if let Some(overlay) = player.centred_overlay() {
        paint_action_overlay(ui.painter(), stage.screen_rect(), overlay, state.volume);
    }

    let layout = ChromeLayout::new(stage.local_rect(), fullscreen);
    if player.mobile_chrome_visible() || player.is_seeking() {
        chrome(view, ui, stage, &layout, player, now);
    }

    if surface.clicked() {
        if let Some(pos) = surface.interact_pointer_pos() {
            surface_tap(stage, &layout, pos, player, now);
        }
    }
}

fn surface_tap<M: MediaElement>(
    stage: Stage,
    layout: &ChromeLayout,
    pos: Pos2,
    player: &mut VideoPlayer<M>,
    now: Instant,
) {
    let local = stage.to_local(pos);
    let on_interactive = player.mobile_chrome_visible() && layout.interactive().any(|r| r.contains(local));
    let fraction = player.config().gestures.tap_zone_fraction;

    match TapZone::at(stage.local_rect(), local, fraction) {
        Some(zone) if !on_interactive => {
            player.zone_tap(zone, local, now);
        }
        _ if player.is_fullscreen() => {
            player.rotated_container_tap(on_interactive, now);
        }
        _ => {}
    }
}

fn paint_video(view: &PlayerView, ui: &Ui, stage: Stage, aspect: Option<f32>) {
    match stage {
        Stage::Upright(rect) => view.paint_video(ui.painter(), rect, aspect),
        Stage::Rotated(frame) => {
            ui.painter().rect_filled(stage.screen_rect(), 0.0, Color32::BLACK);
            if let Some(texture) = view.texture() {
                let local = fit_video(frame.local_rect(), aspect);
                let center = frame.to_screen(local.center());
                egui::Image::from_texture((texture.id(), texture.size_vec2()))
                    .rotate(frame.rotation().angle(), Vec2::splat(0.5))
                    .paint_at(ui, Rect::from_center_size(center, local.size()));
            }
        }
    }
}

fn paint_side_overlay<M: MediaElement>(ui: &Ui, stage: Stage, player: &VideoPlayer<M>, fullscreen: bool) {
    let Some(zone) = player.overlay().side() else {
        return;
    };
    let local = stage.local_rect();
    let x = match zone {
        TapZone::Left => local.left() + local.width() * 0.125,
        TapZone::Right => local.right() - local.width() * 0.125,
    };
    let size = if fullscreen { SIDE_OVERLAY_FULLSCREEN } else { SIDE_OVERLAY };
    let center = pos2(x, local.center().y);
    widgets::disc(ui.painter(), stage.to_screen(center), size / 2.0, 110);
    widgets::double_chevron(
        ui.painter(),
        stage.glyph(center, size * 0.45),
        zone == TapZone::Right,
        Color32::WHITE,
    );
}

fn chrome<M: MediaElement>(
    view: &mut PlayerView,
    ui: &mut Ui,
    stage: Stage,
    layout: &ChromeLayout,
    player: &mut VideoPlayer<M>,
    now: Instant,
) {
    let local = stage.local_rect();
    let fullscreen = player.is_fullscreen();

    if fullscreen {
        if let Some(badge) = player.props().badge() {
            stage.text(ui, local.left_top() + vec2(16.0, 16.0), Align2::LEFT_TOP, &badge, 16.0);
        }
    }

    if let Some(rotate) = layout.rotate {
        let response = widgets::icon_button(ui, stage.rect_to_screen(rotate), Id::new("rotate"));
        widgets::rotate_icon(ui.painter(), stage.glyph(rotate.center(), 24.0), Color32::WHITE);
        if response.clicked() {
            player.toggle_rotation(now);
        }
    }

    let center = layout.center_button;
    let response = ui.interact(stage.rect_to_screen(center), Id::new("center_button"), Sense::click());
    widgets::disc(ui.painter(), stage.to_screen(center.center()), CENTER_BUTTON / 2.0, 140);
    let glyph = stage.glyph(center.center(), 30.0);
    if player.state().playing {
        widgets::pause_icon(ui.painter(), glyph, Color32::WHITE);
    } else {
        widgets::play_icon(ui.painter(), glyph, Color32::WHITE);
    }
    if response.clicked() {
        player.center_button_click(now);
    }

    seek_strip(view, ui, stage, layout, player, now);

    let response = widgets::icon_button(ui, stage.rect_to_screen(layout.fullscreen), Id::new("mobile_fullscreen"));
    widgets::fullscreen_icon(
        ui.painter(),
        stage.glyph(layout.fullscreen.center(), 22.0),
        fullscreen,
        Color32::WHITE,
    );
    if response.clicked() {
        player.toggle_fullscreen(now);
    }
}

fn seek_strip<M: MediaElement>(
    view: &mut PlayerView,
    ui: &mut Ui,
    stage: Stage,
    layout: &ChromeLayout,
    player: &mut VideoPlayer<M>,
    now: Instant,
) {
    let response = ui.interact(
        stage.rect_to_screen(layout.seek_hit),
        Id::new("mobile_seek"),
        Sense::click_and_drag(),
    );
    view.begin_seek_drag(ui, &response, stage.bar_geometry(layout.seek_track), player, now);

    let duration = player.state().duration;
    let display = player.display_time();
    let fraction = if duration > 0.0 { (display / duration) as f32 } else { 0.0 };
    widgets::progress_bar(
        ui.painter(),
        stage.rect_to_screen(layout.seek_track),
        fraction,
        BarAxis::for_rotation(stage.rotation()),
        widgets::ACCENT,
        true,
    );

    let show_hours = duration >= 3600.0;
    let track = layout.seek_track;
    stage.text(
        ui,
        track.left_top() - vec2(0.0, 10.0),
        Align2::LEFT_BOTTOM,
        &format_time_label(display, show_hours),
        13.0,
    );
    stage.text(
        ui,
        track.right_top() - vec2(0.0, 10.0),
        Align2::RIGHT_BOTTOM,
        &format_time_label(duration, show_hours),
        13.0,
    );
}
