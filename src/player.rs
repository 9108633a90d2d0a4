//! Playback orchestrator.
//!
//! `VideoPlayer` owns the media element and every piece of control state.
//! Renderers read derived state from it and report user intent back through
//! its methods; nothing else touches the element. All methods that can start
//! or observe a timer take the current `Instant`, and `tick` must be called
//! once per frame to fire expired deadlines.

use std::time::{Duration, Instant};

use egui::Pos2;

use crate::config::{Config, ShortcutSteps, Timings};
use crate::drag::BarGeometry;
use crate::fade::FadeController;
use crate::format::{format_rate, format_volume_percent};
use crate::fullscreen::FullscreenController;
use crate::gesture::{TapClassifier, TapOutcome, TapZone};
use crate::media::{MediaElement, MediaEvent};
use crate::mobile::MobileChrome;
use crate::rotation::{Rotation, RotationState};
use crate::seek_bar::{SeekBar, SeekBarEvent};
use crate::shortcuts::{self, KeyPress, Shortcut, ShortcutContext};
use crate::timer::{earliest, Timer, TransitionGuard};
use crate::volume_bar::{wheel_step, VolumeBar, VolumeBarEvent, WheelNotch};
use crate::volume_store::PersistedVolume;

/// What the caller hands the player for one media source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerProps {
    pub url: String,
    pub autoplay: bool,
    /// Position in seconds to resume from once the media is ready
    pub initial_seek: Option<f64>,
    pub title: Option<String>,
    pub season: Option<String>,
    /// Enter fullscreen on mount. Only honoured in the mobile layout.
    pub start_fullscreen: bool,
}

impl PlayerProps {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// `"{season} / {title}"`, or just the title.
    pub fn badge(&self) -> Option<String> {
        match (&self.season, &self.title) {
            (Some(season), Some(title)) => Some(format!("{} / {}", season, title)),
            (None, Some(title)) => Some(title.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EndedOptions {
    /// Playback ended in mobile fullscreen; the next episode should stay fullscreen
    pub keep_fullscreen: bool,
}

/// Notifications for whoever embeds the player.
pub trait PlayerObserver {
    fn on_ended(&mut self, _options: EndedOptions) {}

    /// Called at a fixed interval with the element's own clock.
    fn on_time_update(&mut self, _seconds: f64) {}
}

pub struct NoopObserver;

impl PlayerObserver for NoopObserver {}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    pub playing: bool,
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
    pub playback_rate: f64,
    pub is_ready: bool,
    /// Width over height of the natural video size
    pub aspect_ratio: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Unready,
    ReadyPaused,
    ReadyPlaying,
    /// Terminal until a new source is loaded
    Ended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Mobile,
    /// Desktop controls without the volume bar
    Tablet,
    Desktop,
}

impl LayoutMode {
    pub fn from_width(width: f32, config: &Config) -> Self {
        if width <= config.mobile_breakpoint {
            LayoutMode::Mobile
        } else if width <= config.tablet_breakpoint {
            LayoutMode::Tablet
        } else {
            LayoutMode::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == LayoutMode::Mobile
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayIcon {
    Play,
    Pause,
    Replay10,
    Forward10,
    Replay30,
    Forward30,
    VolumeUp,
    VolumeDown,
    VolumeMute,
}

/// Transient feedback drawn over the video.
#[derive(Debug, Clone)]
pub struct ActionOverlay {
    icon: Option<OverlayIcon>,
    text: Option<String>,
    side: Option<TapZone>,
    lifetime: Duration,
    timer: Timer,
    side_timer: Timer,
}

impl ActionOverlay {
    fn new(lifetime: Duration) -> Self {
        Self {
            icon: None,
            text: None,
            side: None,
            lifetime,
            timer: Timer::idle(),
            side_timer: Timer::idle(),
        }
    }

    pub fn icon(&self) -> Option<OverlayIcon> {
        self.icon
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn side(&self) -> Option<TapZone> {
        self.side
    }

    fn show(&mut self, icon: Option<OverlayIcon>, text: Option<String>, now: Instant) {
        if icon.is_none() && text.is_none() {
            return;
        }
        self.icon = icon;
        self.text = text;
        self.timer.arm(now, self.lifetime);
    }

    fn show_side(&mut self, zone: TapZone, now: Instant) {
        self.icon = None;
        self.text = None;
        self.timer.cancel();
        self.side = Some(zone);
        self.side_timer.arm(now, self.lifetime);
    }

    fn clear(&mut self) {
        self.icon = None;
        self.text = None;
        self.side = None;
        self.timer.cancel();
        self.side_timer.cancel();
    }

    fn tick(&mut self, now: Instant) {
        if self.timer.fire_if_due(now) {
            self.icon = None;
            self.text = None;
        }
        if self.side_timer.fire_if_due(now) {
            self.side = None;
        }
    }

    fn next_deadline(&self) -> Option<Instant> {
        earliest([self.timer.deadline(), self.side_timer.deadline()])
    }
}

pub struct VideoPlayer<M: MediaElement> {
    media: M,
    props: PlayerProps,
    observer: Box<dyn PlayerObserver>,

    timings: Timings,
    steps: ShortcutSteps,
    config: Config,

    state: PlaybackState,
    ended: bool,
    /// The one seek to apply at readiness: `initial_seek`, or a seek requested before then
    deferred_seek: Option<f64>,
    has_seeked: bool,

    volume: PersistedVolume,
    fullscreen: FullscreenController,
    fullscreen_guard: TransitionGuard,
    rotation: RotationState,
    fade: FadeController,
    seek_bar: SeekBar,
    volume_bar: VolumeBar,
    taps: TapClassifier,
    chrome: MobileChrome,
    overlay: ActionOverlay,

    seek_drag_end: TransitionGuard,
    suppress_click: TransitionGuard,
    time_update: Timer,

    layout: LayoutMode,
    layout_known: bool,
}

impl<M: MediaElement> VideoPlayer<M> {
    pub fn new(
        media: M,
        props: PlayerProps,
        config: Config,
        volume: PersistedVolume,
        observer: Box<dyn PlayerObserver>,
        now: Instant,
    ) -> Self {
        let timings = config.timings;
        let mut player = Self {
            media,
            observer,
            steps: config.shortcuts,
            state: PlaybackState {
                playing: props.autoplay,
                current_time: 0.0,
                duration: 0.0,
                volume: volume.volume(),
                playback_rate: 1.0,
                is_ready: false,
                aspect_ratio: None,
            },
            ended: false,
            deferred_seek: None,
            has_seeked: false,
            volume,
            fullscreen: FullscreenController::new(),
            fullscreen_guard: TransitionGuard::default(),
            rotation: RotationState::new(timings.rotation_guard),
            fade: FadeController::new(&timings, now),
            seek_bar: SeekBar::new(),
            volume_bar: VolumeBar::new(),
            taps: TapClassifier::new(&timings, &config.gestures),
            chrome: MobileChrome::new(timings.mobile_hide),
            overlay: ActionOverlay::new(timings.action_overlay),
            seek_drag_end: TransitionGuard::default(),
            suppress_click: TransitionGuard::default(),
            time_update: Timer::idle(),
            layout: LayoutMode::Desktop,
            layout_known: false,
            props: PlayerProps::default(),
            timings,
            config,
        };
        player.media.set_volume(player.state.volume);
        player.media.set_playback_rate(player.state.playback_rate);
        player.time_update.arm(now, player.timings.time_update_interval);
        player.mount(props, now);
        player
    }

    /// Switch to another source in place. Fullscreen, rotation and volume
    /// carry over; all per-source state starts over.
    pub fn replace_source(&mut self, props: PlayerProps, now: Instant) {
        self.mount(props, now);
        if self.layout_known {
            self.maybe_start_fullscreen(now);
        }
    }

    fn mount(&mut self, props: PlayerProps, now: Instant) {
        tracing::info!(url = %props.url, autoplay = props.autoplay, "loading media");
        self.state.is_ready = false;
        self.state.current_time = 0.0;
        self.state.duration = 0.0;
        self.state.playing = props.autoplay;
        self.ended = false;
        self.deferred_seek = props.initial_seek.filter(|t| t.is_finite() && *t >= 0.0);
        self.has_seeked = false;
        self.seek_bar.reset();
        self.taps.reset();
        self.overlay.clear();
        self.suppress_click.clear();
        self.seek_drag_end.clear();
        self.chrome.reset_for(self.is_fullscreen(), self.layout.is_mobile(), now);

        if let Err(err) = self.media.load(&props.url) {
            tracing::warn!("failed to load {}: {}", props.url, err);
        }
        self.media.set_playing(self.state.playing);
        self.props = props;
    }

    /// Drain and apply the element's notifications.
    pub fn handle_media_events(&mut self) {
        for event in self.media.poll_events() {
            match event {
                MediaEvent::Ready => self.on_ready(),
                MediaEvent::Duration(duration) => {
                    if duration.is_finite() && duration >= 0.0 {
                        self.state.duration = duration;
                    }
                }
                MediaEvent::Progress(seconds) => {
                    if seconds.is_finite() {
                        self.state.current_time = self.clamp_time(seconds);
                        self.seek_bar.observe_time(self.state.current_time);
                    }
                }
                MediaEvent::Play => {
                    if !self.ended {
                        self.state.playing = true;
                    }
                }
                MediaEvent::Pause => self.state.playing = false,
                MediaEvent::Ended => self.on_ended(),
                MediaEvent::Error(message) => {
                    tracing::warn!("media error: {}", message);
                }
            }
        }
    }

    fn on_ready(&mut self) {
        if !self.state.is_ready {
            tracing::info!(duration = self.state.duration, "media ready");
        }
        self.state.is_ready = true;
        if let Some((width, height)) = self.media.internal_dimensions() {
            if width > 0 && height > 0 {
                self.state.aspect_ratio = Some(width as f32 / height as f32);
            }
        }

        if self.has_seeked {
            return;
        }
        self.has_seeked = true;
        if let Some(requested) = self.deferred_seek.take() {
            let target = if self.state.duration > 0.0 {
                requested.min(self.state.duration)
            } else {
                requested
            };
            tracing::info!(target, "applying deferred seek");
            self.media.seek_to(target);
        }
    }

    fn on_ended(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;
        self.state.playing = false;
        let options = EndedOptions {
            keep_fullscreen: self.is_fullscreen() && self.layout.is_mobile(),
        };
        tracing::info!(keep_fullscreen = options.keep_fullscreen, "playback ended");
        self.observer.on_ended(options);
    }

    /// Absolute seek. Returns the applied (or deferred) target.
    pub fn seek_to(&mut self, seconds: f64, now: Instant) -> Option<f64> {
        if self.rotation.is_transitioning(now) {
            tracing::debug!(seconds, "seek suppressed during rotation");
            return None;
        }
        if !seconds.is_finite() || self.ended {
            return None;
        }
        let target = self.clamp_time(seconds);
        if !self.state.is_ready {
            tracing::debug!(target, "seek deferred until ready");
            self.deferred_seek = Some(target);
            return Some(target);
        }
        self.media.seek_to(target);
        Some(target)
    }

    /// Seek relative to the element's own playhead.
    pub fn seek_relative(&mut self, delta: f64, now: Instant) -> Option<f64> {
        if self.rotation.is_transitioning(now) {
            tracing::debug!(delta, "relative seek suppressed during rotation");
            return None;
        }
        let base = self.media.current_time();
        let max = if self.state.duration > 0.0 {
            self.state.duration
        } else {
            base
        };
        let next = (base + delta).min(max).max(0.0);
        self.seek_to(next, now)
    }

    pub fn toggle_play(&mut self) -> bool {
        let playing = !self.state.playing;
        self.set_playing(playing);
        self.state.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        if self.ended {
            tracing::debug!("play toggle ignored after end of stream");
            return;
        }
        self.state.playing = playing;
        self.media.set_playing(playing);
    }

    pub fn set_volume(&mut self, volume: f64) -> f64 {
        let applied = self.volume.set(volume);
        self.apply_volume(applied);
        applied
    }

    pub fn toggle_mute(&mut self) -> f64 {
        let applied = self.volume.toggle_mute();
        self.apply_volume(applied);
        applied
    }

    fn apply_volume(&mut self, volume: f64) {
        self.state.volume = volume;
        self.media.set_volume(volume);
    }

    pub fn set_playback_rate(&mut self, rate: f64) -> f64 {
        let rate = if rate.is_finite() {
            rate.clamp(self.steps.rate_min, self.steps.rate_max)
        } else {
            self.state.playback_rate
        };
        self.state.playback_rate = rate;
        self.media.set_playback_rate(rate);
        rate
    }

    /// Request the opposite fullscreen state and open the transition guard.
    pub fn toggle_fullscreen(&mut self, now: Instant) {
        if !self.state.is_ready && self.deferred_seek.is_none() {
            self.deferred_seek = Some(self.media.current_time().max(0.0));
        }
        self.fullscreen_guard.arm(now, self.timings.fullscreen_guard);
        self.fullscreen.toggle();
    }

    /// The request to forward to the window, consumed on read.
    pub fn take_fullscreen_request(&mut self) -> Option<bool> {
        self.fullscreen.take_request()
    }

    /// Report the window's actual fullscreen state.
    pub fn sync_fullscreen(&mut self, actual: bool, now: Instant) {
        if self.fullscreen.sync(actual) {
            self.fade.set_fullscreen(actual, now);
            self.chrome.reset_for(actual, self.layout.is_mobile(), now);
        }
    }

    pub fn toggle_rotation(&mut self, now: Instant) -> Rotation {
        let rotation = self.rotation.toggle(now);
        self.suppress_click.arm(now, self.timings.suppress_click);
        self.chrome.show(now);
        rotation
    }

    /// Click on the player surface. Returns `true` if playback was toggled.
    pub fn player_click(&mut self, on_controls: bool, now: Instant) -> bool {
        let suppressed = self.fullscreen_guard.is_active(now)
            || self.rotation.is_transitioning(now)
            || self.seek_drag_end.is_active(now)
            || self.suppress_click.is_active(now)
            || self.taps.last_tap_was_double(now)
            || self.layout.is_mobile()
            || on_controls;
        if suppressed {
            tracing::debug!("player click suppressed");
            return false;
        }
        if self.ended {
            return false;
        }
        self.toggle_play();
        true
    }

    /// The mobile centre button. Ignored right after a side-zone tap.
    pub fn center_button_click(&mut self, now: Instant) -> bool {
        if self.taps.recent_tap(now) {
            tracing::debug!("centre button ignored after zone tap");
            return false;
        }
        self.toggle_play();
        self.chrome.show(now);
        true
    }

    /// Touch end inside a side zone (mobile only).
    pub fn zone_tap(&mut self, zone: TapZone, pos: Pos2, now: Instant) -> TapOutcome {
        if !self.layout.is_mobile() {
            return TapOutcome::Ignored;
        }
        let transitioning = self.fullscreen_guard.is_active(now) || self.rotation.is_transitioning(now);
        let outcome = self.taps.tap(zone, pos, now, transitioning);
        if let TapOutcome::Double(zone) = outcome {
            let delta = match zone {
                TapZone::Left => -self.steps.seek_step,
                TapZone::Right => self.steps.seek_step,
            };
            self.seek_relative(delta, now);
            self.overlay.show_side(zone, now);
        }
        outcome
    }

    /// Touch end on the rotated container outside any control or zone.
    pub fn rotated_container_tap(&mut self, on_interactive: bool, now: Instant) -> bool {
        if !self.layout.is_mobile()
            || self.rotation.is_transitioning(now)
            || self.taps.last_tap_was_double(now)
            || on_interactive
        {
            return false;
        }
        self.chrome.toggle(now);
        self.suppress_click.arm(now, self.timings.suppress_click);
        true
    }

    pub fn seek_bar_pointer_down(&mut self, geometry: BarGeometry, pos: Pos2, now: Instant) {
        if self.fullscreen_guard.is_active(now) || self.rotation.is_transitioning(now) {
            tracing::debug!("seek drag ignored during transition");
            return;
        }
        if self.ended {
            return;
        }
        let events = self.seek_bar.pointer_down(geometry, pos, self.state.duration);
        self.apply_seek_bar_events(events, now);
    }

    pub fn seek_bar_pointer_move(&mut self, geometry: BarGeometry, pos: Pos2) {
        self.seek_bar.pointer_move(geometry, pos, self.state.duration);
    }

    pub fn seek_bar_pointer_up(&mut self, now: Instant) {
        let events = self.seek_bar.pointer_up(self.state.duration);
        self.apply_seek_bar_events(events, now);
    }

    pub fn seek_bar_cancel(&mut self, now: Instant) {
        let events = self.seek_bar.cancel(self.state.duration);
        self.apply_seek_bar_events(events, now);
    }

    fn apply_seek_bar_events(&mut self, events: Vec<SeekBarEvent>, now: Instant) {
        for event in events {
            match event {
                SeekBarEvent::Drag(true) => {
                    if self.layout.is_mobile() {
                        self.chrome.keep_visible();
                    }
                }
                SeekBarEvent::Drag(false) => {
                    self.seek_drag_end.arm(now, self.timings.seek_drag_click_guard);
                    if self.layout.is_mobile() {
                        self.chrome.schedule_hide(now);
                        self.suppress_click.arm(now, self.timings.suppress_click);
                    }
                }
                SeekBarEvent::Seek(target) => {
                    if self.seek_to(target, now).is_none() {
                        self.seek_bar.drop_intent();
                    }
                }
            }
        }
    }

    pub fn volume_bar_pointer_down(&mut self, rect: egui::Rect, pos: Pos2) {
        let events = self.volume_bar.pointer_down(rect, pos);
        for event in events {
            self.apply_volume_bar_event(event);
        }
    }

    pub fn volume_bar_pointer_move(&mut self, rect: egui::Rect, pos: Pos2) {
        if let Some(event) = self.volume_bar.pointer_move(rect, pos) {
            self.apply_volume_bar_event(event);
        }
    }

    pub fn volume_bar_pointer_up(&mut self) {
        if let Some(event) = self.volume_bar.pointer_up() {
            self.apply_volume_bar_event(event);
        }
    }

    fn apply_volume_bar_event(&mut self, event: VolumeBarEvent) {
        match event {
            VolumeBarEvent::Volume(volume) => {
                self.set_volume(volume);
            }
            VolumeBarEvent::Drag(dragging) => tracing::debug!(dragging, "volume drag"),
        }
    }

    /// Scroll over the volume control.
    pub fn volume_wheel(&mut self, scroll_delta_y: f32) -> Option<f64> {
        let notch = WheelNotch::from_scroll_delta(scroll_delta_y)?;
        let volume = wheel_step(self.state.volume, notch, self.steps.wheel_volume_step);
        Some(self.set_volume(volume))
    }

    pub fn pointer_entered(&mut self) {
        self.fade.pointer_entered();
    }

    pub fn pointer_left(&mut self, now: Instant) {
        self.fade.pointer_left(now);
    }

    pub fn pointer_moved(&mut self, now: Instant) {
        self.fade.pointer_moved(now);
    }

    /// Handle one key press. Returns the action taken, if any.
    pub fn keyboard(&mut self, press: &KeyPress, text_input_focused: bool, now: Instant) -> Option<Shortcut> {
        let ctx = ShortcutContext {
            duration: self.state.duration,
            text_input_focused,
        };
        let shortcut = shortcuts::dispatch(press, &ctx, &self.steps)?;
        tracing::debug!(?shortcut, "shortcut");

        match shortcut {
            Shortcut::Seek(delta) => {
                self.seek_relative(delta, now);
                let large = delta.abs() >= self.steps.seek_step_large;
                let icon = match (delta < 0.0, large) {
                    (true, false) => OverlayIcon::Replay10,
                    (true, true) => OverlayIcon::Replay30,
                    (false, false) => OverlayIcon::Forward10,
                    (false, true) => OverlayIcon::Forward30,
                };
                self.overlay.show(Some(icon), None, now);
            }
            Shortcut::TogglePlay => {
                if !self.ended {
                    let playing = self.toggle_play();
                    let icon = if playing {
                        OverlayIcon::Play
                    } else {
                        OverlayIcon::Pause
                    };
                    self.overlay.show(Some(icon), None, now);
                }
            }
            Shortcut::ToggleFullscreen => self.toggle_fullscreen(now),
            Shortcut::Volume(delta) => {
                let volume = self.set_volume(shortcuts::step_volume(self.state.volume, delta));
                let icon = if delta > 0.0 {
                    OverlayIcon::VolumeUp
                } else {
                    OverlayIcon::VolumeDown
                };
                self.overlay.show(Some(icon), Some(format_volume_percent(volume)), now);
            }
            Shortcut::JumpToFraction(fraction) => {
                self.seek_to(fraction * self.state.duration, now);
            }
            Shortcut::Rate(delta) => {
                let rate = shortcuts::step_rate(
                    self.state.playback_rate,
                    delta,
                    self.steps.rate_min,
                    self.steps.rate_max,
                );
                let rate = self.set_playback_rate(rate);
                self.overlay.show(None, Some(format_rate(rate)), now);
            }
            Shortcut::ToggleMute => {
                let volume = self.toggle_mute();
                if volume == 0.0 {
                    self.overlay.show(Some(OverlayIcon::VolumeMute), Some(String::new()), now);
                } else {
                    self.overlay
                        .show(Some(OverlayIcon::VolumeUp), Some(format_volume_percent(volume)), now);
                }
            }
        }
        self.fade.flash_shortcut(now);
        Some(shortcut)
    }

    /// Re-derive the layout from the viewport width.
    pub fn set_viewport_width(&mut self, width: f32, now: Instant) {
        let layout = LayoutMode::from_width(width, &self.config);
        let first = !self.layout_known;
        self.layout_known = true;
        if layout != self.layout {
            tracing::debug!(?layout, width, "layout changed");
            let was_mobile = self.layout.is_mobile();
            self.layout = layout;
            if was_mobile != layout.is_mobile() {
                self.chrome.reset_for(self.is_fullscreen(), layout.is_mobile(), now);
            }
        }
        if first {
            self.maybe_start_fullscreen(now);
        }
    }

    fn maybe_start_fullscreen(&mut self, now: Instant) {
        if self.props.start_fullscreen && self.layout.is_mobile() && !self.is_fullscreen() {
            tracing::info!("entering fullscreen on start");
            self.toggle_fullscreen(now);
        }
    }

    /// Fire every expired deadline.
    pub fn tick(&mut self, now: Instant) {
        self.fade.tick(now);
        self.chrome.tick(now);
        self.overlay.tick(now);
        for zone in self.taps.poll_single_taps(now) {
            tracing::debug!(?zone, "single tap");
            self.chrome.toggle(now);
            self.suppress_click.arm(now, self.timings.suppress_click);
        }
        if self.time_update.fire_if_due(now) {
            let seconds = self.media.current_time();
            self.observer.on_time_update(seconds);
            self.time_update.arm(now, self.timings.time_update_interval);
        }
    }

    /// When `tick` next has work to do.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        earliest([
            self.fade.next_deadline(),
            self.chrome.next_deadline(),
            self.overlay.next_deadline(),
            self.taps.next_deadline(now),
            self.time_update.deadline(),
            self.fullscreen_guard.expires_at(now),
            self.rotation.guard_expires_at(now),
        ])
    }

    fn clamp_time(&self, seconds: f64) -> f64 {
        if self.state.duration > 0.0 {
            seconds.clamp(0.0, self.state.duration)
        } else {
            seconds.max(0.0)
        }
    }

    pub fn state(&self) -> &PlaybackState {
        &self.state
    }

    pub fn phase(&self) -> PlaybackPhase {
        if self.ended {
            PlaybackPhase::Ended
        } else if !self.state.is_ready {
            PlaybackPhase::Unready
        } else if self.state.playing {
            PlaybackPhase::ReadyPlaying
        } else {
            PlaybackPhase::ReadyPaused
        }
    }

    pub fn props(&self) -> &PlayerProps {
        &self.props
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn layout(&self) -> LayoutMode {
        self.layout
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen.is_fullscreen()
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation.rotation()
    }

    pub fn fade(&self) -> &FadeController {
        &self.fade
    }

    pub fn overlay(&self) -> &ActionOverlay {
        &self.overlay
    }

    /// The overlay to draw centred on the player. Mobile fullscreen only
    /// shows the side-anchored double-tap overlays.
    pub fn centred_overlay(&self) -> Option<&ActionOverlay> {
        if self.layout.is_mobile() && self.is_fullscreen() {
            None
        } else {
            Some(&self.overlay)
        }
    }

    pub fn mobile_chrome_visible(&self) -> bool {
        self.chrome.is_visible()
    }

    /// The playhead to draw: the seek intent while one is held.
    pub fn display_time(&self) -> f64 {
        self.seek_bar.display_time(self.state.current_time)
    }

    pub fn is_seeking(&self) -> bool {
        self.seek_bar.is_dragging()
    }

    pub fn is_muted(&self) -> bool {
        self.volume.is_muted()
    }

    pub fn cursor_hidden(&self) -> bool {
        self.fade.cursor_hidden()
    }

    pub fn is_transitioning(&self, now: Instant) -> bool {
        self.fullscreen_guard.is_active(now) || self.rotation.is_transitioning(now)
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_breakpoints() {
        let config = Config::default();
        assert_eq!(LayoutMode::from_width(600.0, &config), LayoutMode::Mobile);
        assert_eq!(LayoutMode::from_width(601.0, &config), LayoutMode::Tablet);
        assert_eq!(LayoutMode::from_width(1024.0, &config), LayoutMode::Tablet);
        assert_eq!(LayoutMode::from_width(1280.0, &config), LayoutMode::Desktop);
    }

    #[test]
    fn badge_combines_season_and_title() {
        let mut props = PlayerProps::new("file:///a.mkv");
        assert_eq!(props.badge(), None);
        props.title = Some("Episode 3".into());
        assert_eq!(props.badge().as_deref(), Some("Episode 3"));
        props.season = Some("Season 1".into());
        assert_eq!(props.badge().as_deref(), Some("Season 1 / Episode 3"));
    }

    #[test]
    fn overlay_side_replaces_the_generic_indicator() {
        let t0 = Instant::now();
        let mut overlay = ActionOverlay::new(Duration::from_millis(900));
        overlay.show(Some(OverlayIcon::VolumeUp), Some("85%".into()), t0);
        overlay.show_side(TapZone::Left, t0);
        assert_eq!(overlay.icon(), None);
        assert_eq!(overlay.side(), Some(TapZone::Left));

        overlay.tick(t0 + Duration::from_millis(900));
        assert_eq!(overlay.side(), None);
        assert_eq!(overlay.next_deadline(), None);
    }

    #[test]
    fn empty_overlay_is_not_shown() {
        let t0 = Instant::now();
        let mut overlay = ActionOverlay::new(Duration::from_millis(900));
        overlay.show(None, None, t0);
        assert_eq!(overlay.next_deadline(), None);
    }
}
