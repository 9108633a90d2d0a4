#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use animatrix_player::media::Result;
use animatrix_player::{
    Config, EndedOptions, MediaElement, MediaEvent, MemoryStore, PersistedVolume, PlayerObserver, PlayerProps,
    VideoPlayer,
};

/// A media element that records every command and replays queued events.
#[derive(Debug, Default)]
pub struct ScriptedMedia {
    pub loads: Vec<String>,
    pub seeks: Vec<f64>,
    pub playing: Vec<bool>,
    pub volumes: Vec<f64>,
    pub rates: Vec<f64>,
    pub queued: Vec<MediaEvent>,
    pub position: f64,
    pub dimensions: Option<(u32, u32)>,
}

impl MediaElement for ScriptedMedia {
    fn load(&mut self, url: &str) -> Result<()> {
        self.loads.push(url.to_owned());
        self.queued.clear();
        self.position = 0.0;
        Ok(())
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing.push(playing);
    }

    fn seek_to(&mut self, seconds: f64) {
        self.seeks.push(seconds);
        self.position = seconds;
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn internal_dimensions(&self) -> Option<(u32, u32)> {
        self.dimensions
    }

    fn set_volume(&mut self, volume: f64) {
        self.volumes.push(volume);
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rates.push(rate);
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        std::mem::take(&mut self.queued)
    }
}

#[derive(Debug, Default)]
pub struct Recorded {
    pub ended: Vec<EndedOptions>,
    pub time_updates: Vec<f64>,
}

pub struct RecordingObserver(pub Rc<RefCell<Recorded>>);

impl PlayerObserver for RecordingObserver {
    fn on_ended(&mut self, options: EndedOptions) {
        self.0.borrow_mut().ended.push(options);
    }

    fn on_time_update(&mut self, seconds: f64) {
        self.0.borrow_mut().time_updates.push(seconds);
    }
}

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

pub struct Harness {
    pub player: VideoPlayer<ScriptedMedia>,
    pub recorded: Rc<RefCell<Recorded>>,
    pub t0: Instant,
}

impl Harness {
    pub fn new(props: PlayerProps) -> Self {
        Self::with_config(props, Config::default())
    }

    pub fn with_config(props: PlayerProps, config: Config) -> Self {
        let recorded = Rc::new(RefCell::new(Recorded::default()));
        let volume = PersistedVolume::load(Box::new(MemoryStore::new()), config.default_volume);
        let t0 = Instant::now();
        let player = VideoPlayer::new(
            ScriptedMedia::default(),
            props,
            config,
            volume,
            Box::new(RecordingObserver(Rc::clone(&recorded))),
            t0,
        );
        Self { player, recorded, t0 }
    }

    pub fn default_source() -> Self {
        Self::new(PlayerProps::new("file:///show/episode-01.mkv"))
    }

    pub fn at(&self, millis: u64) -> Instant {
        self.t0 + ms(millis)
    }

    pub fn media(&self) -> &ScriptedMedia {
        self.player.media()
    }

    /// Queue events and let the player drain them.
    pub fn emit(&mut self, events: impl IntoIterator<Item = MediaEvent>) {
        self.player.media_mut().queued.extend(events);
        self.player.handle_media_events();
    }

    pub fn ready(&mut self, duration: f64) {
        self.emit([MediaEvent::Duration(duration), MediaEvent::Ready]);
    }

    pub fn desktop(&mut self) {
        self.player.set_viewport_width(1280.0, self.t0);
    }

    pub fn mobile(&mut self) {
        self.player.set_viewport_width(400.0, self.t0);
    }
}
