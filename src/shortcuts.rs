//! Keyboard shortcuts.
//!
//! `dispatch` is a pure mapping from one key press to at most one action,
//! evaluated in a fixed priority order where the first match wins. Applying
//! the action is left to the orchestrator.

use crate::config::ShortcutSteps;

/// The keys the player reacts to, independent of the windowing toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Space,
    /// A printable character as typed, e.g. `'j'`, `'5'`, `','` or `'<'`
    Char(char),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
    pub meta: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            shift: false,
            alt: false,
            ctrl: false,
            meta: false,
        }
    }

    pub fn shifted(key: Key) -> Self {
        Self {
            shift: true,
            ..Self::plain(key)
        }
    }

    /// Translate an egui key event. Keys without a shortcut yield `None`.
    pub fn from_egui(key: egui::Key, modifiers: egui::Modifiers) -> Option<Self> {
        use egui::Key as K;
        let key = match key {
            K::ArrowLeft => Key::ArrowLeft,
            K::ArrowRight => Key::ArrowRight,
            K::ArrowUp => Key::ArrowUp,
            K::ArrowDown => Key::ArrowDown,
            K::Space => Key::Space,
            K::J => Key::Char('j'),
            K::K => Key::Char('k'),
            K::L => Key::Char('l'),
            K::F => Key::Char('f'),
            K::M => Key::Char('m'),
            K::Comma => Key::Char(','),
            K::Period => Key::Char('.'),
            K::Num0 => Key::Char('0'),
            K::Num1 => Key::Char('1'),
            K::Num2 => Key::Char('2'),
            K::Num3 => Key::Char('3'),
            K::Num4 => Key::Char('4'),
            K::Num5 => Key::Char('5'),
            K::Num6 => Key::Char('6'),
            K::Num7 => Key::Char('7'),
            K::Num8 => Key::Char('8'),
            K::Num9 => Key::Char('9'),
            _ => return None,
        };
        Some(Self {
            key,
            shift: modifiers.shift,
            alt: modifiers.alt,
            ctrl: modifiers.ctrl,
            meta: modifiers.mac_cmd,
        })
    }

    fn char_is(&self, expected: char) -> bool {
        matches!(self.key, Key::Char(c) if c.eq_ignore_ascii_case(&expected))
    }
}

/// What the dispatcher needs to know about the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortcutContext {
    /// Known media duration in seconds, 0 before readiness
    pub duration: f64,
    /// A text field has keyboard focus
    pub text_input_focused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shortcut {
    /// Relative seek in seconds
    Seek(f64),
    TogglePlay,
    ToggleFullscreen,
    /// Volume change, applied with [`step_volume`]
    Volume(f64),
    /// Absolute seek to a fraction of the duration
    JumpToFraction(f64),
    /// Playback rate change, applied with [`step_rate`]
    Rate(f64),
    ToggleMute,
}

/// Map a key press to an action.
pub fn dispatch(press: &KeyPress, ctx: &ShortcutContext, steps: &ShortcutSteps) -> Option<Shortcut> {
    if press.alt || press.ctrl || press.meta || ctx.text_input_focused {
        return None;
    }

    let shortcut = match press.key {
        Key::ArrowLeft => Shortcut::Seek(-steps.seek_step),
        Key::ArrowRight => Shortcut::Seek(steps.seek_step),
        _ if press.char_is('j') => Shortcut::Seek(-steps.seek_step_large),
        _ if press.char_is('l') => Shortcut::Seek(steps.seek_step_large),
        Key::Space => Shortcut::TogglePlay,
        _ if press.char_is('k') => Shortcut::TogglePlay,
        _ if press.char_is('f') => Shortcut::ToggleFullscreen,
        Key::ArrowUp => Shortcut::Volume(steps.volume_step),
        Key::ArrowDown => Shortcut::Volume(-steps.volume_step),
        Key::Char(c) if c.is_ascii_digit() && ctx.duration > 0.0 => {
            let decile = c.to_digit(10).unwrap_or(0);
            Shortcut::JumpToFraction(f64::from(decile) / 10.0)
        }
        Key::Char('<' | ',') if press.shift => Shortcut::Rate(-steps.rate_step),
        Key::Char('>' | '.') if press.shift => Shortcut::Rate(steps.rate_step),
        _ if press.char_is('m') => Shortcut::ToggleMute,
        _ => return None,
    };
    Some(shortcut)
}

/// Round to a fixed number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Volume after a step: rounded to two decimals, clamped to `[0, 1]`.
pub fn step_volume(volume: f64, delta: f64) -> f64 {
    round_to(volume + delta, 2).clamp(0.0, 1.0)
}

/// Playback rate after a step: rounded to one decimal, clamped to `[min, max]`.
pub fn step_rate(rate: f64, delta: f64, min: f64, max: f64) -> f64 {
    round_to(rate + delta, 1).clamp(min, max)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(duration: f64) -> ShortcutContext {
        ShortcutContext {
            duration,
            text_input_focused: false,
        }
    }

    fn run(press: KeyPress, duration: f64) -> Option<Shortcut> {
        dispatch(&press, &ctx(duration), &ShortcutSteps::default())
    }

    #[test]
    fn seek_keys() {
        assert_eq!(run(KeyPress::plain(Key::ArrowLeft), 0.0), Some(Shortcut::Seek(-10.0)));
        assert_eq!(run(KeyPress::plain(Key::ArrowRight), 0.0), Some(Shortcut::Seek(10.0)));
        assert_eq!(run(KeyPress::plain(Key::Char('j')), 0.0), Some(Shortcut::Seek(-30.0)));
        assert_eq!(run(KeyPress::plain(Key::Char('L')), 0.0), Some(Shortcut::Seek(30.0)));
    }

    #[test]
    fn play_fullscreen_and_mute_keys() {
        assert_eq!(run(KeyPress::plain(Key::Space), 0.0), Some(Shortcut::TogglePlay));
        assert_eq!(run(KeyPress::plain(Key::Char('k')), 0.0), Some(Shortcut::TogglePlay));
        assert_eq!(run(KeyPress::plain(Key::Char('F')), 0.0), Some(Shortcut::ToggleFullscreen));
        assert_eq!(run(KeyPress::plain(Key::Char('m')), 0.0), Some(Shortcut::ToggleMute));
    }

    #[test]
    fn digits_need_a_known_duration() {
        assert_eq!(run(KeyPress::plain(Key::Char('5')), 0.0), None);
        assert_eq!(
            run(KeyPress::plain(Key::Char('5')), 600.0),
            Some(Shortcut::JumpToFraction(0.5))
        );
        assert_eq!(
            run(KeyPress::plain(Key::Char('0')), 600.0),
            Some(Shortcut::JumpToFraction(0.0))
        );
    }

    #[test]
    fn rate_keys_require_shift() {
        assert_eq!(run(KeyPress::plain(Key::Char(',')), 10.0), None);
        assert_eq!(run(KeyPress::shifted(Key::Char(',')), 10.0), Some(Shortcut::Rate(-0.1)));
        assert_eq!(run(KeyPress::shifted(Key::Char('<')), 10.0), Some(Shortcut::Rate(-0.1)));
        assert_eq!(run(KeyPress::shifted(Key::Char('>')), 10.0), Some(Shortcut::Rate(0.1)));
        assert_eq!(run(KeyPress::shifted(Key::Char('.')), 10.0), Some(Shortcut::Rate(0.1)));
    }

    #[test]
    fn modifiers_and_focus_disable_everything() {
        let mut press = KeyPress::plain(Key::Space);
        press.ctrl = true;
        assert_eq!(run(press, 10.0), None);

        let mut press = KeyPress::plain(Key::ArrowLeft);
        press.meta = true;
        assert_eq!(run(press, 10.0), None);

        let focused = ShortcutContext {
            duration: 10.0,
            text_input_focused: true,
        };
        assert_eq!(
            dispatch(&KeyPress::plain(Key::Space), &focused, &ShortcutSteps::default()),
            None
        );
    }

    #[test]
    fn unbound_keys_are_ignored() {
        assert_eq!(run(KeyPress::plain(Key::Char('x')), 10.0), None);
    }

    #[test]
    fn volume_steps_round_and_clamp() {
        assert_eq!(step_volume(0.8, 0.05), 0.85);
        assert_eq!(step_volume(0.97, 0.05), 1.0);
        assert_eq!(step_volume(0.95, 0.05), 1.0);
        assert_eq!(step_volume(0.02, -0.05), 0.0);
        assert_eq!(step_volume(0.1 + 0.2, 0.0), 0.3);
    }

    #[test]
    fn rate_steps_round_and_clamp() {
        assert_eq!(step_rate(1.0, 0.1, 0.3, 2.0), 1.1);
        assert_eq!(step_rate(1.25, 0.1, 0.3, 2.0), 1.4);
        assert_eq!(step_rate(2.0, 0.1, 0.3, 2.0), 2.0);
        assert_eq!(step_rate(0.3, -0.1, 0.3, 2.0), 0.3);
    }

    #[test]
    fn egui_keys_translate() {
        let shift = egui::Modifiers {
            shift: true,
            ..Default::default()
        };
        let press = KeyPress::from_egui(egui::Key::Period, shift).unwrap();
        assert_eq!(press, KeyPress::shifted(Key::Char('.')));
        assert_eq!(KeyPress::from_egui(egui::Key::Q, egui::Modifiers::NONE), None);
    }
}
