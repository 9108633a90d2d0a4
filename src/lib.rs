//! Animatrix player control surface.
//!
//! Everything here is toolkit-agnostic state: the playback orchestrator and
//! the timers, gestures and bars it is built from. Rendering and the media
//! backend live in the binary.

pub mod config;
pub mod drag;
pub mod fade;
pub mod format;
pub mod fullscreen;
pub mod gesture;
pub mod media;
pub mod mobile;
pub mod player;
pub mod rotation;
pub mod seek_bar;
pub mod shortcuts;
pub mod timer;
pub mod volume_bar;
pub mod volume_store;

pub use config::Config;
pub use media::{MediaElement, MediaError, MediaEvent, VideoFrame};
pub use player::{
    EndedOptions, LayoutMode, NoopObserver, PlaybackPhase, PlaybackState, PlayerObserver,
    PlayerProps, VideoPlayer,
};
pub use volume_store::{FileStore, KeyValueStore, MemoryStore, PersistedVolume};
