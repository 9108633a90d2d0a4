mod common;

use animatrix_player::player::OverlayIcon;
use animatrix_player::shortcuts::{Key, KeyPress, Shortcut};
use common::Harness;

fn press(h: &mut Harness, key: Key) -> Option<Shortcut> {
    let now = h.at(0);
    h.player.keyboard(&KeyPress::plain(key), false, now)
}

#[test]
fn arrow_up_raises_volume_by_five_percent() {
    let mut h = Harness::default_source();
    assert_eq!(h.player.state().volume, 0.8);

    assert_eq!(press(&mut h, Key::ArrowUp), Some(Shortcut::Volume(0.05)));
    assert_eq!(h.player.state().volume, 0.85);
    assert_eq!(h.media().volumes.last(), Some(&0.85));
    assert_eq!(h.player.overlay().icon(), Some(OverlayIcon::VolumeUp));
    assert_eq!(h.player.overlay().text(), Some("85%"));
}

#[test]
fn arrow_up_clamps_at_full_volume() {
    let mut h = Harness::default_source();
    h.player.set_volume(0.97);
    press(&mut h, Key::ArrowUp);
    assert_eq!(h.player.state().volume, 1.0);
    press(&mut h, Key::ArrowUp);
    assert_eq!(h.player.state().volume, 1.0);
}

#[test]
fn arrow_down_lowers_volume() {
    let mut h = Harness::default_source();
    press(&mut h, Key::ArrowDown);
    assert_eq!(h.player.state().volume, 0.75);
    assert_eq!(h.player.overlay().icon(), Some(OverlayIcon::VolumeDown));
}

#[test]
fn digits_jump_to_a_tenth_of_the_duration() {
    let mut h = Harness::default_source();
    h.ready(600.0);
    assert_eq!(press(&mut h, Key::Char('5')), Some(Shortcut::JumpToFraction(0.5)));
    press(&mut h, Key::Char('0'));
    assert_eq!(h.media().seeks, vec![300.0, 0.0]);
}

#[test]
fn digits_do_nothing_without_a_duration() {
    let mut h = Harness::default_source();
    assert_eq!(press(&mut h, Key::Char('5')), None);
    assert!(h.media().seeks.is_empty());
}

#[test]
fn arrows_seek_through_the_clamp() {
    let mut h = Harness::default_source();
    h.ready(600.0);
    h.player.media_mut().position = 5.0;
    press(&mut h, Key::ArrowLeft);
    h.player.media_mut().position = 595.0;
    press(&mut h, Key::Char('l'));
    assert_eq!(h.media().seeks, vec![0.0, 600.0]);
    assert_eq!(h.player.overlay().icon(), Some(OverlayIcon::Forward30));
}

#[test]
fn shortcuts_are_ignored_while_typing() {
    let mut h = Harness::default_source();
    let now = h.at(0);
    assert_eq!(h.player.keyboard(&KeyPress::plain(Key::ArrowUp), true, now), None);
    assert_eq!(h.player.state().volume, 0.8);
}

#[test]
fn modifier_chords_are_left_to_the_system() {
    let mut h = Harness::default_source();
    let now = h.at(0);
    let chord = KeyPress {
        ctrl: true,
        ..KeyPress::plain(Key::Char('f'))
    };
    assert_eq!(h.player.keyboard(&chord, false, now), None);
    assert_eq!(h.player.take_fullscreen_request(), None);
}

#[test]
fn space_toggles_playback_with_feedback() {
    let mut h = Harness::default_source();
    h.ready(600.0);
    press(&mut h, Key::Space);
    assert!(h.player.state().playing);
    assert_eq!(h.player.overlay().icon(), Some(OverlayIcon::Play));

    press(&mut h, Key::Char('k'));
    assert!(!h.player.state().playing);
    assert_eq!(h.player.overlay().icon(), Some(OverlayIcon::Pause));
    assert_eq!(h.media().playing.last(), Some(&false));
}

#[test]
fn f_requests_fullscreen() {
    let mut h = Harness::default_source();
    press(&mut h, Key::Char('f'));
    assert_eq!(h.player.take_fullscreen_request(), Some(true));
    assert_eq!(h.player.take_fullscreen_request(), None);
}

#[test]
fn shifted_brackets_step_the_rate() {
    let mut h = Harness::default_source();
    let now = h.at(0);
    h.player.keyboard(&KeyPress::shifted(Key::Char('.')), false, now);
    assert_eq!(h.player.state().playback_rate, 1.1);
    assert_eq!(h.player.overlay().text(), Some("1.10x"));
    assert_eq!(h.player.overlay().icon(), None);

    h.player.set_playback_rate(0.3);
    h.player.keyboard(&KeyPress::shifted(Key::Char(',')), false, now);
    assert_eq!(h.player.state().playback_rate, 0.3);
}

#[test]
fn m_mutes_and_restores() {
    let mut h = Harness::default_source();
    press(&mut h, Key::Char('m'));
    assert_eq!(h.player.state().volume, 0.0);
    assert!(h.player.is_muted());
    assert_eq!(h.player.overlay().icon(), Some(OverlayIcon::VolumeMute));

    press(&mut h, Key::Char('m'));
    assert_eq!(h.player.state().volume, 0.8);
    assert_eq!(h.player.overlay().text(), Some("80%"));
}

#[test]
fn shortcuts_flash_the_controls() {
    let mut h = Harness::default_source();
    press(&mut h, Key::ArrowUp);
    assert!(h.player.fade().shortcut_active());
    h.player.tick(h.at(150));
    assert!(!h.player.fade().shortcut_active());
}

#[test]
fn mobile_fullscreen_has_no_centred_overlay() {
    let mut h = Harness::default_source();
    h.mobile();
    h.player.sync_fullscreen(true, h.at(0));
    press(&mut h, Key::ArrowUp);
    assert_eq!(h.player.overlay().text(), Some("85%"));
    assert!(h.player.centred_overlay().is_none());

    h.player.sync_fullscreen(false, h.at(10));
    assert_eq!(h.player.centred_overlay().map(|o| o.text()), Some(Some("85%")));
}
