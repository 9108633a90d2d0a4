//! Desktop and tablet composition: the video, a click-to-play surface and the
//! hover-revealed controls bar along the bottom edge.

use std::time::Instant;

use egui::{pos2, vec2, Align2, Color32, FontId, Id, Rect, RichText, Sense, Ui};

use animatrix_player::drag::BarGeometry;
use animatrix_player::format::{format_rate, format_time_label};
use animatrix_player::media::MediaElement;
use animatrix_player::player::{LayoutMode, VideoPlayer};

use super::widgets::{self, BarAxis, Glyph};
use super::{paint_action_overlay, paint_spinner, player_rect, PlayerView};

pub const PLAYBACK_RATES: [f64; 6] = [0.5, 0.75, 1.0, 1.25, 1.5, 2.0];

const BAR_HEIGHT: f32 = 76.0;
const BUTTON: f32 = 36.0;
const VOLUME_BAR_WIDTH: f32 = 84.0;
const SKIPS: [(f64, bool, u32); 4] = [(-30.0, false, 30), (-10.0, false, 10), (10.0, true, 10), (30.0, true, 30)];

pub(super) fn show<M: MediaElement>(view: &mut PlayerView, ui: &mut Ui, player: &mut VideoPlayer<M>, now: Instant) {
    let area = ui.max_rect();
    ui.painter().rect_filled(area, 0.0, view.background);

    let state = *player.state();
    let rect = player_rect(area, state.aspect_ratio, player.is_fullscreen());
    view.paint_video(ui.painter(), rect, state.aspect_ratio);
    view.track_hover(ui.ctx(), rect, player, now);

    let surface = ui.interact(rect, Id::new("player_surface"), Sense::click());

    if !state.is_ready {
        paint_spinner(ui, rect);
    }
    if let Some(overlay) = player.centred_overlay() {
        paint_action_overlay(ui.painter(), rect, overlay, state.volume);
    }

    let bar_rect = Rect::from_min_max(pos2(rect.left(), rect.bottom() - BAR_HEIGHT), rect.max);
    let bar_shown = player.fade().bar_shown(state.playing);
    if bar_shown {
        controls_bar(view, ui.ctx(), bar_rect, player, now);
    }

    if surface.clicked() {
        let on_controls = bar_shown && surface.interact_pointer_pos().is_some_and(|p| bar_rect.contains(p));
        player.player_click(on_controls, now);
    }
}

fn controls_bar<M: MediaElement>(
    view: &mut PlayerView,
    ctx: &egui::Context,
    bar_rect: Rect,
    player: &mut VideoPlayer<M>,
    now: Instant,
) {
    let fade = player.fade();
    // Controls take input only while fully shown.
    let active = fade.controls_opaque();
    let fade_secs = if fade.fade_out() {
        player.config().timings.fade_duration.as_secs_f32()
    } else {
        0.2
    };
    let opacity = ctx.animate_bool_with_time(Id::new("controls_opacity"), active, fade_secs);

    egui::Area::new(Id::new("controls_bar"))
        .fixed_pos(bar_rect.min)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_opacity(opacity);
            let _ = ui.allocate_rect(bar_rect, Sense::hover());
            ui.painter().rect_filled(bar_rect, 0.0, widgets::black(170));

            seek_row(view, ui, bar_rect, player, active, now);

            let cy = bar_rect.top() + 50.0;
            let mut x = bar_rect.left() + 12.0;
            let mut next_button = |width: f32| {
                let r = Rect::from_center_size(pos2(x + width / 2.0, cy), vec2(width, BUTTON));
                x += width + 4.0;
                r
            };

            let play_rect = next_button(BUTTON);
            let playing = player.state().playing;
            if widgets::icon_button(ui, play_rect, Id::new("play_pause")).clicked() && active {
                player.toggle_play();
            }
            let glyph = Glyph::upright(play_rect.center(), 20.0);
            if playing {
                widgets::pause_icon(ui.painter(), glyph, Color32::WHITE);
            } else {
                widgets::play_icon(ui.painter(), glyph, Color32::WHITE);
            }

            for (delta, forward, seconds) in SKIPS {
                let skip_rect = next_button(BUTTON);
                if widgets::icon_button(ui, skip_rect, Id::new(("skip", seconds, forward))).clicked() && active {
                    player.seek_relative(delta, now);
                }
                widgets::skip_icon(
                    ui.painter(),
                    Glyph::upright(skip_rect.center(), 24.0),
                    forward,
                    seconds,
                    Color32::WHITE,
                );
            }

            if player.layout() == LayoutMode::Desktop {
                let mute_rect = next_button(BUTTON);
                let group = Rect::from_min_max(
                    mute_rect.min,
                    pos2(mute_rect.right() + VOLUME_BAR_WIDTH + 12.0, mute_rect.bottom()),
                );
                let expanded = ui.rect_contains_pointer(group) || view.volume_rect.is_some();
                volume_group(view, ui, mute_rect, group, expanded, player, active);
                if expanded {
                    next_button(VOLUME_BAR_WIDTH + 8.0);
                }
            }

            let state = player.state();
            let label = format!(
                "{} / {}",
                format_time_label(player.display_time(), false),
                format_time_label(state.duration, false)
            );
            ui.painter().text(
                pos2(x + 8.0, cy),
                Align2::LEFT_CENTER,
                label,
                FontId::monospace(14.0),
                Color32::WHITE,
            );

            let fullscreen_rect = widgets::square(pos2(bar_rect.right() - 12.0 - BUTTON / 2.0, cy), BUTTON);
            if widgets::icon_button(ui, fullscreen_rect, Id::new("fullscreen")).clicked() && active {
                player.toggle_fullscreen(now);
            }
            widgets::fullscreen_icon(
                ui.painter(),
                Glyph::upright(fullscreen_rect.center(), 20.0),
                player.is_fullscreen(),
                Color32::WHITE,
            );

            let rate_rect = Rect::from_center_size(fullscreen_rect.center() - vec2(BUTTON + 28.0, 0.0), vec2(60.0, BUTTON));
            rate_menu(ui, rate_rect, player, active);
        });
}

fn seek_row<M: MediaElement>(
    view: &mut PlayerView,
    ui: &mut Ui,
    bar_rect: Rect,
    player: &mut VideoPlayer<M>,
    active: bool,
    now: Instant,
) {
    let track = Rect::from_min_max(
        pos2(bar_rect.left() + 16.0, bar_rect.top() + 14.0),
        pos2(bar_rect.right() - 16.0, bar_rect.top() + 18.0),
    );
    let response = ui.interact(track.expand2(vec2(0.0, 8.0)), Id::new("seek_bar"), Sense::click_and_drag());
    if active {
        view.begin_seek_drag(ui, &response, BarGeometry::horizontal(track), player, now);
    }

    let duration = player.state().duration;
    let fraction = if duration > 0.0 {
        (player.display_time() / duration) as f32
    } else {
        0.0
    };
    let knob = response.hovered() || player.is_seeking();
    widgets::progress_bar(ui.painter(), track, fraction, BarAxis::LeftToRight, widgets::ACCENT, knob);
}

fn volume_group<M: MediaElement>(
    view: &mut PlayerView,
    ui: &mut Ui,
    mute_rect: Rect,
    group: Rect,
    expanded: bool,
    player: &mut VideoPlayer<M>,
    active: bool,
) {
    if widgets::icon_button(ui, mute_rect, Id::new("mute")).clicked() && active {
        player.toggle_mute();
    }
    widgets::volume_icon(
        ui.painter(),
        Glyph::upright(mute_rect.center(), 22.0),
        player.state().volume,
        Color32::WHITE,
    );

    if active && ui.rect_contains_pointer(group) {
        let scroll = ui.input(|i| i.raw_scroll_delta.y);
        if scroll != 0.0 {
            player.volume_wheel(scroll);
        }
    }

    if !expanded {
        return;
    }
    let track = Rect::from_min_size(
        pos2(mute_rect.right() + 8.0, mute_rect.center().y - 2.0),
        vec2(VOLUME_BAR_WIDTH, 4.0),
    );
    let response = ui.interact(track.expand2(vec2(0.0, 10.0)), Id::new("volume_bar"), Sense::click_and_drag());
    if active && view.volume_rect.is_none() && response.contains_pointer() && ui.input(|i| i.pointer.primary_pressed()) {
        if let Some(pos) = response.interact_pointer_pos().or(response.hover_pos()) {
            player.volume_bar_pointer_down(track, pos);
            view.volume_rect = Some(track);
        }
    }
    widgets::progress_bar(
        ui.painter(),
        track,
        player.state().volume as f32,
        BarAxis::LeftToRight,
        Color32::WHITE,
        true,
    );
}

fn rate_menu<M: MediaElement>(ui: &mut Ui, rect: Rect, player: &mut VideoPlayer<M>, active: bool) {
    let current = player.state().playback_rate;
    ui.allocate_new_ui(egui::UiBuilder::new().max_rect(rect), |ui| {
        ui.add_enabled_ui(active, |ui| {
            ui.menu_button(RichText::new(format_rate(current)).color(Color32::WHITE), |ui| {
                for rate in PLAYBACK_RATES {
                    let selected = (rate - current).abs() < f64::EPSILON;
                    if ui.selectable_label(selected, format_rate(rate)).clicked() {
                        player.set_playback_rate(rate);
                        ui.close_menu();
                    }
                }
            });
        });
    });
}
