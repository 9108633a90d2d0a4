//! Configuration module for player timings, gesture thresholds and shortcut steps.
//! Settings live in an INI file in the platform config directory and are created
//! from the embedded template on first run.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_CONFIG_INI: &str = include_str!("../config.ini");

/// Texture filtering mode for video frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFilter {
    /// Nearest neighbor - sharp pixels, no smoothing
    Nearest,
    /// Linear (bilinear) - smooth interpolation between pixels
    Linear,
}

impl TextureFilter {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "nearest" | "point" | "nn" | "sharp" => Some(Self::Nearest),
            "linear" | "bilinear" | "smooth" => Some(Self::Linear),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nearest => "nearest",
            Self::Linear => "linear",
        }
    }

    /// Convert to egui TextureOptions
    pub fn to_egui_options(&self) -> egui::TextureOptions {
        match self {
            Self::Nearest => egui::TextureOptions::NEAREST,
            Self::Linear => egui::TextureOptions::LINEAR,
        }
    }
}

/// Every delay the player's state machines use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Fullscreen: how long `hovered` survives without a fresh hover
    pub fullscreen_hover_reset: Duration,
    /// Delay before the controls start fading out
    pub fade_delay: Duration,
    /// How long the fade-out phase lasts before the controls hide
    pub fade_duration: Duration,
    /// Desktop: hide the UI this long after the pointer leaves the player
    pub mouse_leave_hide: Duration,
    /// Mobile: hide the chrome after this much inactivity
    pub mobile_hide: Duration,
    /// Lifetime of the action overlay and the side double-tap overlay
    pub action_overlay: Duration,
    /// Lifetime of the shortcut-active flag
    pub shortcut_active: Duration,
    /// Input is ignored this long after a rotation toggle
    pub rotation_guard: Duration,
    /// Input is ignored this long after a fullscreen toggle
    pub fullscreen_guard: Duration,
    /// Click-to-play is ignored this long after a touch gesture
    pub suppress_click: Duration,
    /// Maximum gap between the taps of a double tap
    pub double_tap_window: Duration,
    /// Delay before a lone tap counts as a single tap
    pub single_tap_delay: Duration,
    /// How long a classified double tap blocks clicks and container taps
    pub last_tap_double_reset: Duration,
    /// Click-to-play is ignored this long after a seek drag ends
    pub seek_drag_click_guard: Duration,
    /// Interval of the low-frequency time update callback
    pub time_update_interval: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            fullscreen_hover_reset: Duration::from_millis(5_000),
            fade_delay: Duration::from_millis(5_000),
            fade_duration: Duration::from_millis(800),
            mouse_leave_hide: Duration::from_millis(3_000),
            mobile_hide: Duration::from_millis(3_000),
            action_overlay: Duration::from_millis(900),
            shortcut_active: Duration::from_millis(100),
            rotation_guard: Duration::from_millis(400),
            fullscreen_guard: Duration::from_millis(700),
            suppress_click: Duration::from_millis(350),
            double_tap_window: Duration::from_millis(350),
            single_tap_delay: Duration::from_millis(300),
            last_tap_double_reset: Duration::from_millis(400),
            seek_drag_click_guard: Duration::from_millis(50),
            time_update_interval: Duration::from_millis(1_000),
        }
    }
}

/// Step sizes used by the keyboard shortcuts and the volume wheel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortcutSteps {
    /// Arrow keys and double taps, in seconds
    pub seek_step: f64,
    /// `j` / `l`, in seconds
    pub seek_step_large: f64,
    /// Arrow up/down
    pub volume_step: f64,
    /// Shift + `<` / `>`
    pub rate_step: f64,
    pub rate_min: f64,
    pub rate_max: f64,
    /// One mouse wheel notch over the volume bar
    pub wheel_volume_step: f64,
}

impl Default for ShortcutSteps {
    fn default() -> Self {
        Self {
            seek_step: 10.0,
            seek_step_large: 30.0,
            volume_step: 0.05,
            rate_step: 0.1,
            rate_min: 0.3,
            rate_max: 2.0,
            wheel_volume_step: 0.1,
        }
    }
}

/// Touch gesture thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSettings {
    /// Maximum distance in points between the taps of a double tap (per axis)
    pub double_tap_distance: f32,
    /// Width of each double-tap zone as a fraction of the player width
    pub tap_zone_fraction: f32,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            double_tap_distance: 40.0,
            tap_zone_fraction: 0.25,
        }
    }
}

/// Application configuration loaded from INI file
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Volume used when nothing has been persisted yet (0.0 to 1.0)
    pub default_volume: f64,
    /// Start playing as soon as the media is loaded
    pub autoplay: bool,
    /// Enter fullscreen on start (mobile layout only)
    pub start_fullscreen: bool,
    /// Viewport widths up to this use the mobile layout (points)
    pub mobile_breakpoint: f32,
    /// Viewport widths up to this hide the volume control (points)
    pub tablet_breakpoint: f32,
    /// Background color as RGB (0-255)
    pub background_rgb: [u8; 3],
    /// GPU texture filtering for video frames
    pub texture_filter: TextureFilter,
    pub timings: Timings,
    pub shortcuts: ShortcutSteps,
    pub gestures: GestureSettings,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_volume: 0.8,
            autoplay: false,
            start_fullscreen: false,
            mobile_breakpoint: 600.0,
            tablet_breakpoint: 1024.0,
            background_rgb: [0, 0, 0],
            texture_filter: TextureFilter::Linear,
            timings: Timings::default(),
            shortcuts: ShortcutSteps::default(),
            gestures: GestureSettings::default(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    Player,
    Timing,
    Gestures,
    Shortcuts,
}

impl Config {
    /// Get the configuration directory, creating it if needed.
    /// Falls back to the working directory when the platform has no home.
    fn config_dir() -> PathBuf {
        let config_dir = directories::ProjectDirs::from("dev", "animatrix", "animatrix-player")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));

        let _ = fs::create_dir_all(&config_dir);

        config_dir
    }

    /// Get settings file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.ini")
    }

    /// Load configuration from INI file
    pub fn load() -> Self {
        let config_path = Self::config_path();

        if !config_path.exists() {
            if let Err(err) = fs::write(&config_path, DEFAULT_CONFIG_INI) {
                tracing::warn!(
                    "could not create {}: {}; using defaults",
                    config_path.display(),
                    err
                );
                return Self::parse_ini(DEFAULT_CONFIG_INI);
            }
            tracing::info!("created default configuration at {}", config_path.display());
        }

        match fs::read_to_string(&config_path) {
            Ok(content) => Self::parse_ini(&content),
            Err(err) => {
                tracing::warn!("could not read {}: {}", config_path.display(), err);
                Self::parse_ini(DEFAULT_CONFIG_INI)
            }
        }
    }

    /// Parse INI content into Config. Unknown keys and invalid values are ignored.
    pub fn parse_ini(content: &str) -> Self {
        let mut config = Config::default();
        let mut section = Section::None;

        for line in content.lines() {
            let line = line.trim();

            // Skip empty lines and comments
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') && line.ends_with(']') {
                let name = &line[1..line.len() - 1];
                section = if name.eq_ignore_ascii_case("player") || name.eq_ignore_ascii_case("settings") {
                    Section::Player
                } else if name.eq_ignore_ascii_case("timing") || name.eq_ignore_ascii_case("timings") {
                    Section::Timing
                } else if name.eq_ignore_ascii_case("gestures") || name.eq_ignore_ascii_case("touch") {
                    Section::Gestures
                } else if name.eq_ignore_ascii_case("shortcuts") {
                    Section::Shortcuts
                } else {
                    Section::None
                };
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim().to_lowercase();
            let value = value.trim();

            match section {
                Section::Player => config.apply_player_key(&key, value),
                Section::Timing => config.apply_timing_key(&key, value),
                Section::Gestures => config.apply_gesture_key(&key, value),
                Section::Shortcuts => config.apply_shortcut_key(&key, value),
                Section::None => {}
            }
        }

        config
    }

    fn apply_player_key(&mut self, key: &str, value: &str) {
        match key {
            "default_volume" | "volume" => {
                if let Ok(v) = value.parse::<f64>() {
                    if v.is_finite() {
                        self.default_volume = v.clamp(0.0, 1.0);
                    }
                }
            }
            "autoplay" | "auto_play" => {
                if let Some(v) = parse_bool(value) {
                    self.autoplay = v;
                }
            }
            "start_fullscreen" => {
                if let Some(v) = parse_bool(value) {
                    self.start_fullscreen = v;
                }
            }
            "mobile_breakpoint" => {
                if let Ok(v) = value.parse::<f32>() {
                    self.mobile_breakpoint = v.clamp(0.0, 4096.0);
                }
            }
            "tablet_breakpoint" => {
                if let Ok(v) = value.parse::<f32>() {
                    self.tablet_breakpoint = v.clamp(0.0, 8192.0);
                }
            }
            "background_rgb" => {
                if let Some(rgb) = parse_rgb_triplet(value) {
                    self.background_rgb = rgb;
                }
            }
            "texture_filter" | "video_filter" => {
                if let Some(filter) = TextureFilter::from_str(value) {
                    self.texture_filter = filter;
                }
            }
            _ => {}
        }
    }

    fn apply_timing_key(&mut self, key: &str, value: &str) {
        let Some(ms) = parse_millis(value) else {
            return;
        };
        let t = &mut self.timings;
        let slot = match key {
            "fullscreen_hover_reset" => &mut t.fullscreen_hover_reset,
            "fade_delay" => &mut t.fade_delay,
            "fade_duration" => &mut t.fade_duration,
            "mouse_leave_hide" => &mut t.mouse_leave_hide,
            "mobile_hide" => &mut t.mobile_hide,
            "action_overlay" => &mut t.action_overlay,
            "shortcut_active" => &mut t.shortcut_active,
            "rotation_guard" => &mut t.rotation_guard,
            "fullscreen_guard" => &mut t.fullscreen_guard,
            "suppress_click" => &mut t.suppress_click,
            "double_tap_window" => &mut t.double_tap_window,
            "single_tap_delay" => &mut t.single_tap_delay,
            "last_tap_double_reset" => &mut t.last_tap_double_reset,
            "seek_drag_click_guard" => &mut t.seek_drag_click_guard,
            "time_update_interval" => &mut t.time_update_interval,
            _ => return,
        };
        *slot = ms;
    }

    fn apply_gesture_key(&mut self, key: &str, value: &str) {
        let Ok(v) = value.parse::<f32>() else {
            return;
        };
        match key {
            "double_tap_distance" => self.gestures.double_tap_distance = v.clamp(1.0, 400.0),
            "tap_zone_fraction" => self.gestures.tap_zone_fraction = v.clamp(0.05, 0.5),
            _ => {}
        }
    }

    fn apply_shortcut_key(&mut self, key: &str, value: &str) {
        let Ok(v) = value.parse::<f64>() else {
            return;
        };
        if !v.is_finite() {
            return;
        }
        let s = &mut self.shortcuts;
        match key {
            "seek_step" => s.seek_step = v.clamp(1.0, 600.0),
            "seek_step_large" => s.seek_step_large = v.clamp(1.0, 3_600.0),
            "volume_step" => s.volume_step = v.clamp(0.01, 0.5),
            "rate_step" => s.rate_step = v.clamp(0.05, 1.0),
            "rate_min" => s.rate_min = v.clamp(0.1, 1.0),
            "rate_max" => s.rate_max = v.clamp(1.0, 4.0),
            "wheel_volume_step" => s.wheel_volume_step = v.clamp(0.01, 0.5),
            _ => {}
        }
    }

    /// Save configuration to the INI file in the config directory.
    pub fn save(&self) -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> std::io::Result<()> {
        fs::write(path, self.to_ini())?;
        tracing::info!("saved configuration to {}", path.display());
        Ok(())
    }

    /// Render the configuration as commented INI text.
    pub fn to_ini(&self) -> String {
        let mut content = String::new();

        content.push_str("; Animatrix Player Configuration\n\n");

        content.push_str("[Player]\n");
        content.push_str("; Volume used until one has been saved (0.0 - 1.0)\n");
        content.push_str(&format!("default_volume = {}\n", self.default_volume));
        content.push_str("; Start playback as soon as the video is loaded (true/false)\n");
        content.push_str(&format!("autoplay = {}\n", bool_str(self.autoplay)));
        content.push_str("; Enter fullscreen on start; only honoured by the mobile layout (true/false)\n");
        content.push_str(&format!("start_fullscreen = {}\n", bool_str(self.start_fullscreen)));
        content.push_str("; Window widths (points) at or below which the mobile / tablet layouts apply\n");
        content.push_str(&format!("mobile_breakpoint = {}\n", self.mobile_breakpoint));
        content.push_str(&format!("tablet_breakpoint = {}\n", self.tablet_breakpoint));
        content.push_str("; Background color (RGB 0-255)\n");
        content.push_str(&format!(
            "background_rgb = {}, {}, {}\n",
            self.background_rgb[0], self.background_rgb[1], self.background_rgb[2]
        ));
        content.push_str("; Video texture filter: linear or nearest\n");
        content.push_str(&format!("texture_filter = {}\n\n", self.texture_filter.as_str()));

        let t = &self.timings;
        content.push_str("[Timing]\n");
        content.push_str("; All values in milliseconds\n");
        for (name, value) in [
            ("fullscreen_hover_reset", t.fullscreen_hover_reset),
            ("fade_delay", t.fade_delay),
            ("fade_duration", t.fade_duration),
            ("mouse_leave_hide", t.mouse_leave_hide),
            ("mobile_hide", t.mobile_hide),
            ("action_overlay", t.action_overlay),
            ("shortcut_active", t.shortcut_active),
            ("rotation_guard", t.rotation_guard),
            ("fullscreen_guard", t.fullscreen_guard),
            ("suppress_click", t.suppress_click),
            ("double_tap_window", t.double_tap_window),
            ("single_tap_delay", t.single_tap_delay),
            ("last_tap_double_reset", t.last_tap_double_reset),
            ("seek_drag_click_guard", t.seek_drag_click_guard),
            ("time_update_interval", t.time_update_interval),
        ] {
            content.push_str(&format!("{} = {}\n", name, value.as_millis()));
        }
        content.push('\n');

        content.push_str("[Gestures]\n");
        content.push_str("; Maximum distance between the two taps of a double tap (points)\n");
        content.push_str(&format!(
            "double_tap_distance = {}\n",
            self.gestures.double_tap_distance
        ));
        content.push_str("; Width of the left/right double-tap zones as a fraction of the player\n");
        content.push_str(&format!(
            "tap_zone_fraction = {}\n\n",
            self.gestures.tap_zone_fraction
        ));

        let s = &self.shortcuts;
        content.push_str("[Shortcuts]\n");
        content.push_str("; Seek steps in seconds (arrow keys / j and l)\n");
        content.push_str(&format!("seek_step = {}\n", s.seek_step));
        content.push_str(&format!("seek_step_large = {}\n", s.seek_step_large));
        content.push_str("; Volume step for arrow up/down and for one wheel notch\n");
        content.push_str(&format!("volume_step = {}\n", s.volume_step));
        content.push_str(&format!("wheel_volume_step = {}\n", s.wheel_volume_step));
        content.push_str("; Playback rate step and limits (shift + < / >)\n");
        content.push_str(&format!("rate_step = {}\n", s.rate_step));
        content.push_str(&format!("rate_min = {}\n", s.rate_min));
        content.push_str(&format!("rate_max = {}\n", s.rate_max));

        content
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn parse_millis(value: &str) -> Option<Duration> {
    let ms = value.trim().parse::<u64>().ok()?;
    Some(Duration::from_millis(ms.min(60_000)))
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

fn parse_rgb_triplet(value: &str) -> Option<[u8; 3]> {
    let parts: Vec<&str> = value
        .split(',')
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect();
    if parts.len() != 3 {
        return None;
    }
    let r = parts[0].parse::<u8>().ok()?;
    let g = parts[1].parse::<u8>().ok()?;
    let b = parts[2].parse::<u8>().ok()?;
    Some([r, g, b])
}
