//! Animatrix video player
//! Built with Rust + egui (eframe) + GStreamer

#![windows_subsystem = "windows"]

mod gst_media;
mod ui;

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};

use eframe::egui;
use tracing_subscriber::EnvFilter;

use animatrix_player::fullscreen::ScopedCursor;
use animatrix_player::shortcuts::KeyPress;
use animatrix_player::{
    Config, EndedOptions, FileStore, KeyValueStore, MemoryStore, PersistedVolume, PlayerObserver, PlayerProps,
    VideoPlayer,
};

use gst_media::GstMedia;
use ui::PlayerView;

#[cfg(feature = "mimalloc-allocator")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

const USAGE: &str = "usage: animatrix-player <file-or-url>... [--start SECONDS] [--autoplay] \
[--title TITLE] [--season SEASON] [--fullscreen]\n       animatrix-player --reset-config";

/// Longest a paused player waits between repaints, so seeks while paused show up.
const PAUSED_REPAINT: Duration = Duration::from_millis(250);

/// Parsed command line
#[derive(Debug, Default, PartialEq)]
struct LaunchOptions {
    urls: Vec<String>,
    start: Option<f64>,
    autoplay: bool,
    title: Option<String>,
    season: Option<String>,
    fullscreen: bool,
    /// Rewrite config.ini with the defaults and exit
    reset_config: bool,
}

impl LaunchOptions {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self, String> {
        let mut args = args.into_iter();
        let mut options = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--start" => {
                    let value = args.next().ok_or("--start needs a value")?;
                    let start = value
                        .parse::<f64>()
                        .ok()
                        .filter(|s| s.is_finite() && *s >= 0.0)
                        .ok_or_else(|| format!("invalid --start value: {value}"))?;
                    options.start = Some(start);
                }
                "--autoplay" => options.autoplay = true,
                "--fullscreen" => options.fullscreen = true,
                "--reset-config" => options.reset_config = true,
                "--title" => options.title = Some(args.next().ok_or("--title needs a value")?),
                "--season" => options.season = Some(args.next().ok_or("--season needs a value")?),
                other if other.starts_with("--") => return Err(format!("unknown option {other}")),
                _ => options.urls.push(arg),
            }
        }
        if options.urls.is_empty() && !options.reset_config {
            return Err("no media given".to_owned());
        }
        Ok(options)
    }

    /// One `PlayerProps` per source. Only the first resumes from `--start`;
    /// the rest are episodes that follow automatically.
    fn into_queue(self, config: &Config) -> VecDeque<PlayerProps> {
        let mut queue = VecDeque::with_capacity(self.urls.len());
        for (index, url) in self.urls.into_iter().enumerate() {
            let first = index == 0;
            let title = if first {
                self.title.clone().or_else(|| episode_title(&url))
            } else {
                episode_title(&url)
            };
            queue.push_back(PlayerProps {
                autoplay: if first { self.autoplay || config.autoplay } else { true },
                initial_seek: if first { self.start } else { None },
                title,
                season: self.season.clone(),
                start_fullscreen: self.fullscreen || config.start_fullscreen,
                url,
            });
        }
        queue
    }
}

/// File stem of the last path segment.
fn episode_title(url: &str) -> Option<String> {
    let name = url.trim_end_matches('/').rsplit(['/', '\\']).next()?;
    let stem = name.rsplit_once('.').map_or(name, |(stem, _)| stem);
    (!stem.is_empty()).then(|| stem.to_owned())
}

/// Player notifications, picked up by the app after each frame.
#[derive(Debug, Default)]
struct Inbox {
    ended: Option<EndedOptions>,
    position: f64,
}

struct InboxObserver(Rc<RefCell<Inbox>>);

impl PlayerObserver for InboxObserver {
    fn on_ended(&mut self, options: EndedOptions) {
        self.0.borrow_mut().ended = Some(options);
    }

    fn on_time_update(&mut self, seconds: f64) {
        tracing::trace!(seconds, "time update");
        self.0.borrow_mut().position = seconds;
    }
}

/// Application state
struct PlayerApp {
    player: VideoPlayer<GstMedia>,
    view: PlayerView,
    /// Episodes still to play
    queue: VecDeque<PlayerProps>,
    inbox: Rc<RefCell<Inbox>>,
    cursor: ScopedCursor<egui::Context>,
    clear_color: [f32; 4],
}

impl PlayerApp {
    fn new(
        _cc: &eframe::CreationContext<'_>,
        media: GstMedia,
        config: Config,
        mut queue: VecDeque<PlayerProps>,
    ) -> Self {
        let store: Box<dyn KeyValueStore> = match FileStore::in_data_dir() {
            Ok(store) => {
                tracing::debug!(path = %store.path().display(), "volume store");
                Box::new(store)
            }
            Err(err) => {
                tracing::warn!("volume will not persist: {}", err);
                Box::new(MemoryStore::new())
            }
        };
        let volume = PersistedVolume::load(store, config.default_volume);

        let inbox = Rc::new(RefCell::new(Inbox::default()));
        let observer = Box::new(InboxObserver(Rc::clone(&inbox)));
        let first = queue.pop_front().unwrap_or_default();
        let view = PlayerView::new(&config);
        let [r, g, b] = config.background_rgb;
        let clear_color = egui::Color32::from_rgb(r, g, b).to_normalized_gamma_f32();
        let player = VideoPlayer::new(media, first, config, volume, observer, Instant::now());

        Self {
            player,
            view,
            queue,
            inbox,
            cursor: ScopedCursor::default(),
            clear_color,
        }
    }

    /// Forward key presses to the shortcut dispatcher.
    fn handle_input(&mut self, ctx: &egui::Context, now: Instant) {
        let text_input_focused = ctx.wants_keyboard_input();
        let presses: Vec<KeyPress> = ctx.input(|input| {
            input
                .events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => KeyPress::from_egui(*key, *modifiers),
                    _ => None,
                })
                .collect()
        });
        for press in presses {
            self.player.keyboard(&press, text_input_focused, now);
        }
    }

    /// Move on to the next episode, if any.
    fn advance(&mut self, ended: EndedOptions, now: Instant) {
        let Some(mut next) = self.queue.pop_front() else {
            tracing::info!("end of queue");
            return;
        };
        next.autoplay = true;
        next.start_fullscreen |= ended.keep_fullscreen;
        tracing::info!(url = %next.url, remaining = self.queue.len(), "next episode");
        self.view.clear_texture();
        self.player.replace_source(next, now);
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        let state = self.player.state();
        if state.playing || !state.is_ready || self.player.is_seeking() {
            ctx.request_repaint();
            return;
        }
        let wait = self
            .player
            .next_deadline(now)
            .map_or(PAUSED_REPAINT, |deadline| deadline.saturating_duration_since(now))
            .min(PAUSED_REPAINT);
        ctx.request_repaint_after(wait);
    }
}

impl eframe::App for PlayerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        self.player.set_viewport_width(ctx.screen_rect().width(), now);
        let actual_fullscreen = ctx.input(|i| i.viewport().fullscreen).unwrap_or(false);
        self.player.sync_fullscreen(actual_fullscreen, now);

        self.player.handle_media_events();
        self.player.tick(now);
        let ended = self.inbox.borrow_mut().ended.take();
        if let Some(options) = ended {
            self.advance(options, now);
        }

        self.handle_input(ctx, now);
        self.view.upload_frame(ctx, &mut self.player);

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.view.show(ui, &mut self.player, now));

        if let Some(fullscreen) = self.player.take_fullscreen_request() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(fullscreen));
        }
        self.cursor.set_hidden(self.player.cursor_hidden(), || ctx.clone());

        self.schedule_repaint(ctx, now);
    }

    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        self.clear_color
    }
}

impl Drop for PlayerApp {
    fn drop(&mut self) {
        self.cursor.release();
        tracing::info!(position = self.inbox.borrow().position, "player closed");
    }
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("animatrix_player=info")),
        )
        .init();

    let launch = match LaunchOptions::parse(std::env::args().skip(1)) {
        Ok(launch) => launch,
        Err(message) => {
            eprintln!("{message}\n{USAGE}");
            std::process::exit(2);
        }
    };

    if launch.reset_config {
        match Config::default().save() {
            Ok(path) => println!("wrote default configuration to {}", path.display()),
            Err(err) => {
                tracing::error!("could not reset configuration: {}", err);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let config = Config::load();
    let queue = launch.into_queue(&config);

    let media = match GstMedia::new() {
        Ok(media) => media,
        Err(err) => {
            tracing::error!("{}", err);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Animatrix Player")
            .with_icon(build_fallback_icon())
            .with_min_inner_size([320.0, 240.0])
            .with_inner_size([1280.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Animatrix Player",
        options,
        Box::new(move |cc| Ok(Box::new(PlayerApp::new(cc, media, config, queue)))),
    )
}

fn build_fallback_icon() -> egui::IconData {
    let w: usize = 64;
    let h: usize = 64;
    let mut rgba = vec![0u8; w * h * 4];

    let set_px = |rgba: &mut [u8], x: usize, y: usize, r: u8, g: u8, b: u8, a: u8| {
        let idx = (y * w + x) * 4;
        rgba[idx] = r;
        rgba[idx + 1] = g;
        rgba[idx + 2] = b;
        rgba[idx + 3] = a;
    };

    // Screen outline with a play triangle in the middle.
    for y in 0..h {
        for x in 0..w {
            let fx = x as f32 + 0.5;
            let fy = y as f32 + 0.5;
            let border = 6.0;
            let left = border;
            let right = (w as f32) - border;
            let top = border + 6.0;
            let bottom = (h as f32) - border - 6.0;

            let on_border = (fx >= left && fx <= right && (fy - top).abs() < 1.4)
                || (fx >= left && fx <= right && (fy - bottom).abs() < 1.4)
                || (fy >= top && fy <= bottom && (fx - left).abs() < 1.4)
                || (fy >= top && fy <= bottom && (fx - right).abs() < 1.4);

            let cy = (top + bottom) / 2.0;
            let tri_left = 26.0;
            let tri_right = 42.0;
            let half_height = (tri_right - fx).max(0.0) * 0.6;
            let in_play = fx >= tri_left && fx <= tri_right && (fy - cy).abs() <= half_height;

            if in_play {
                set_px(&mut rgba, x, y, 229, 57, 53, 255);
            } else if on_border {
                set_px(&mut rgba, x, y, 255, 255, 255, 235);
            }
        }
    }

    egui::IconData {
        rgba,
        width: w as u32,
        height: h as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_sources_and_flags() {
        let launch = LaunchOptions::parse(args(&[
            "ep1.mkv",
            "--start",
            "42.5",
            "--autoplay",
            "--title",
            "Pilot",
            "ep2.mkv",
        ]))
        .unwrap();
        assert_eq!(launch.urls, vec!["ep1.mkv", "ep2.mkv"]);
        assert_eq!(launch.start, Some(42.5));
        assert!(launch.autoplay);
        assert_eq!(launch.title.as_deref(), Some("Pilot"));
        assert!(!launch.fullscreen);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(LaunchOptions::parse(args(&[])).is_err());
        assert!(LaunchOptions::parse(args(&["a.mkv", "--start", "soon"])).is_err());
        assert!(LaunchOptions::parse(args(&["a.mkv", "--start", "-3"])).is_err());
        assert!(LaunchOptions::parse(args(&["a.mkv", "--loop"])).is_err());
        assert!(LaunchOptions::parse(args(&["a.mkv", "--title"])).is_err());
    }

    #[test]
    fn reset_config_needs_no_media() {
        let launch = LaunchOptions::parse(args(&["--reset-config"])).unwrap();
        assert!(launch.reset_config);
        assert!(launch.urls.is_empty());
    }

    #[test]
    fn only_the_first_episode_resumes() {
        let launch = LaunchOptions::parse(args(&["/v/ep1.mkv", "/v/ep2.mkv", "--start", "90"])).unwrap();
        let queue = launch.into_queue(&Config::default());
        assert_eq!(queue[0].initial_seek, Some(90.0));
        assert!(!queue[0].autoplay);
        assert_eq!(queue[1].initial_seek, None);
        assert!(queue[1].autoplay);
        assert_eq!(queue[1].title.as_deref(), Some("ep2"));
    }

    #[test]
    fn episode_title_uses_the_file_stem() {
        assert_eq!(episode_title("https://cdn.example/show/s01e02.mp4").as_deref(), Some("s01e02"));
        assert_eq!(episode_title("C:\\videos\\movie.mkv").as_deref(), Some("movie"));
        assert_eq!(episode_title("/"), None);
    }

    #[test]
    fn fallback_icon_has_pixels() {
        let icon = build_fallback_icon();
        assert_eq!(icon.rgba.len(), 64 * 64 * 4);
        assert!(icon.rgba.chunks(4).any(|px| px[3] > 0));
    }
}
