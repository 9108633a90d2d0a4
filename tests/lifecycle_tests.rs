mod common;

use animatrix_player::rotation::Rotation;
use animatrix_player::{EndedOptions, LayoutMode, MediaEvent, PlaybackPhase, PlayerProps};
use common::Harness;

#[test]
fn phases_follow_the_element() {
    let mut h = Harness::default_source();
    assert_eq!(h.player.phase(), PlaybackPhase::Unready);

    h.ready(600.0);
    assert_eq!(h.player.phase(), PlaybackPhase::ReadyPaused);

    h.emit([MediaEvent::Play]);
    assert_eq!(h.player.phase(), PlaybackPhase::ReadyPlaying);

    h.emit([MediaEvent::Pause]);
    assert_eq!(h.player.phase(), PlaybackPhase::ReadyPaused);
}

#[test]
fn autoplay_starts_the_element() {
    let mut props = PlayerProps::new("file:///show/episode-01.mkv");
    props.autoplay = true;
    let h = Harness::new(props);
    assert!(h.player.state().playing);
    assert_eq!(h.media().playing, vec![true]);
}

#[test]
fn ended_is_reported_once_and_is_terminal() {
    let mut h = Harness::default_source();
    h.desktop();
    h.ready(600.0);
    h.emit([MediaEvent::Play, MediaEvent::Ended, MediaEvent::Ended]);

    assert_eq!(h.player.phase(), PlaybackPhase::Ended);
    assert_eq!(h.recorded.borrow().ended, vec![EndedOptions { keep_fullscreen: false }]);

    assert!(!h.player.toggle_play());
    assert_eq!(h.player.seek_to(10.0, h.at(0)), None);
    assert!(!h.player.player_click(false, h.at(5_000)));
    h.emit([MediaEvent::Play]);
    assert_eq!(h.player.phase(), PlaybackPhase::Ended);
}

#[test]
fn ending_in_mobile_fullscreen_keeps_fullscreen() {
    let mut h = Harness::default_source();
    h.mobile();
    h.ready(600.0);
    h.player.toggle_fullscreen(h.at(0));
    assert_eq!(h.player.take_fullscreen_request(), Some(true));
    h.player.sync_fullscreen(true, h.at(50));

    h.emit([MediaEvent::Ended]);
    assert_eq!(h.recorded.borrow().ended, vec![EndedOptions { keep_fullscreen: true }]);
}

#[test]
fn next_source_is_loaded_in_place() {
    let mut h = Harness::default_source();
    h.mobile();
    h.ready(600.0);
    h.player.toggle_fullscreen(h.at(0));
    assert_eq!(h.player.take_fullscreen_request(), Some(true));
    h.player.sync_fullscreen(true, h.at(50));
    h.player.toggle_rotation(h.at(1_000));
    h.player.set_volume(0.4);
    h.emit([MediaEvent::Ended]);

    let mut next = PlayerProps::new("file:///show/episode-02.mkv");
    next.autoplay = true;
    next.initial_seek = Some(12.0);
    next.start_fullscreen = true;
    h.player.replace_source(next, h.at(2_000));

    assert_eq!(
        h.media().loads,
        vec!["file:///show/episode-01.mkv", "file:///show/episode-02.mkv"]
    );
    assert_eq!(h.player.phase(), PlaybackPhase::Unready);
    assert_eq!(h.player.state().duration, 0.0);
    assert!(h.player.state().playing);
    assert!(h.player.is_fullscreen());
    assert_eq!(h.player.take_fullscreen_request(), None);
    assert_eq!(h.player.rotation(), Rotation::CounterClockwise);
    assert_eq!(h.player.state().volume, 0.4);

    h.ready(1_400.0);
    assert_eq!(h.media().seeks, vec![12.0]);
    assert_eq!(h.player.props().url, "file:///show/episode-02.mkv");
}

#[test]
fn time_updates_fire_once_a_second() {
    let mut h = Harness::default_source();
    h.ready(600.0);
    h.player.media_mut().position = 4.0;

    h.player.tick(h.at(999));
    assert!(h.recorded.borrow().time_updates.is_empty());
    h.player.tick(h.at(1_000));
    h.player.tick(h.at(1_500));
    h.player.media_mut().position = 5.0;
    h.player.tick(h.at(2_000));
    assert_eq!(h.recorded.borrow().time_updates, vec![4.0, 5.0]);
}

#[test]
fn start_fullscreen_applies_only_to_the_mobile_layout() {
    let mut props = PlayerProps::new("file:///show/episode-01.mkv");
    props.start_fullscreen = true;

    let mut desktop = Harness::new(props.clone());
    desktop.desktop();
    assert_eq!(desktop.player.layout(), LayoutMode::Desktop);
    assert_eq!(desktop.player.take_fullscreen_request(), None);

    let mut mobile = Harness::new(props);
    mobile.mobile();
    assert_eq!(mobile.player.take_fullscreen_request(), Some(true));

    // Later resizes do not re-enter fullscreen.
    mobile.player.sync_fullscreen(false, mobile.at(100));
    mobile.player.set_viewport_width(420.0, mobile.at(200));
    assert_eq!(mobile.player.take_fullscreen_request(), None);
}

#[test]
fn mobile_fullscreen_chrome_hides_after_three_seconds() {
    let mut h = Harness::default_source();
    h.mobile();
    h.player.sync_fullscreen(true, h.at(0));
    assert!(h.player.mobile_chrome_visible());

    h.player.tick(h.at(2_999));
    assert!(h.player.mobile_chrome_visible());
    h.player.tick(h.at(3_000));
    assert!(!h.player.mobile_chrome_visible());

    // Leaving fullscreen brings it back for good.
    h.player.sync_fullscreen(false, h.at(4_000));
    h.player.tick(h.at(60_000));
    assert!(h.player.mobile_chrome_visible());
}

#[test]
fn playback_rate_is_clamped() {
    let mut h = Harness::default_source();
    assert_eq!(h.player.set_playback_rate(5.0), 2.0);
    assert_eq!(h.player.set_playback_rate(0.1), 0.3);
    assert_eq!(h.player.set_playback_rate(f64::NAN), 0.3);
    assert_eq!(h.media().rates, vec![1.0, 2.0, 0.3, 0.3]);
}

#[test]
fn next_deadline_tracks_pending_timers() {
    let mut h = Harness::default_source();
    assert_eq!(h.player.next_deadline(h.at(0)), Some(h.at(1_000)));

    h.player.toggle_fullscreen(h.at(0));
    assert_eq!(h.player.next_deadline(h.at(0)), Some(h.at(700)));
}
