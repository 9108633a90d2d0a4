//! The media element seam.
//!
//! The orchestrator is the only owner of a `MediaElement`. Commands are
//! imperative and fire-and-forget; everything the element has to say comes
//! back as `MediaEvent`s drained once per frame.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MediaError {
    #[error("failed to initialise media backend: {0}")]
    Init(String),

    #[error("pipeline error: {0}")]
    Pipeline(String),

    #[error("state change failed: {0}")]
    StateChange(String),

    #[error("seek error: {0}")]
    Seek(String),

    #[error("backend error: {0}")]
    Backend(String),
}

pub type Result<T> = std::result::Result<T, MediaError>;

/// Notifications from the element, in the order they happened.
#[derive(Debug, Clone, PartialEq)]
pub enum MediaEvent {
    /// Enough is loaded to report dimensions and accept seeks
    Ready,
    /// Duration in seconds became known or changed
    Duration(f64),
    /// Playhead position in seconds
    Progress(f64),
    Play,
    Pause,
    Ended,
    Error(String),
}

/// One decoded picture, tightly packed RGBA.
#[derive(Debug, Clone)]
pub struct VideoFrame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl VideoFrame {
    pub fn size(&self) -> [usize; 2] {
        [self.width as usize, self.height as usize]
    }
}

/// An opaque, imperatively controlled media player.
pub trait MediaElement {
    /// Replace the current source. The element starts unready and paused.
    fn load(&mut self, url: &str) -> Result<()>;

    fn set_playing(&mut self, playing: bool);

    /// Absolute seek in seconds.
    fn seek_to(&mut self, seconds: f64);

    /// The element's own clock, read directly rather than from the last progress event.
    fn current_time(&self) -> f64;

    /// Natural video size once known.
    fn internal_dimensions(&self) -> Option<(u32, u32)>;

    fn set_volume(&mut self, volume: f64);

    fn set_playback_rate(&mut self, rate: f64);

    /// Drain pending notifications.
    fn poll_events(&mut self) -> Vec<MediaEvent>;

    /// Latest decoded frame, if a new one arrived since the last call.
    fn take_frame(&mut self) -> Option<VideoFrame> {
        None
    }
}
