//! GStreamer `playbin` backend for the player.
//!
//! Frames arrive on a streaming thread through an RGBA appsink and are parked
//! in a single-slot mailbox; the UI thread takes the newest one each frame.
//! Bus messages are drained without blocking from `poll_events`.

use std::sync::Arc;

use gstreamer as gst;
use gstreamer::prelude::*;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;
use parking_lot::Mutex;

use animatrix_player::media::{MediaElement, MediaError, MediaEvent, Result, VideoFrame};

pub struct GstMedia {
    playbin: gst::Element,
    /// Newest decoded frame, replaced by the streaming thread
    frame_slot: Arc<Mutex<Option<VideoFrame>>>,
    dimensions: Arc<Mutex<Option<(u32, u32)>>>,
    pending: Vec<MediaEvent>,
    ready: bool,
    rate: f64,
    last_position: f64,
}

impl GstMedia {
    pub fn new() -> Result<Self> {
        gst::init().map_err(|e| MediaError::Init(format!("GStreamer init failed: {e}")))?;

        let frame_slot = Arc::new(Mutex::new(None));
        let dimensions = Arc::new(Mutex::new(None));

        let appsink = gst_app::AppSink::builder()
            .caps(
                &gst_video::VideoCapsBuilder::new()
                    .format(gst_video::VideoFormat::Rgba)
                    .build(),
            )
            .max_buffers(1)
            .drop(true)
            .build();

        // The preroll frame arrives before readiness, so the natural size is
        // known by the time `Ready` is reported.
        let preroll_store = FrameStore::new(&frame_slot, &dimensions);
        let sample_store = FrameStore::new(&frame_slot, &dimensions);
        appsink.set_callbacks(
            gst_app::AppSinkCallbacks::builder()
                .new_preroll(move |sink| {
                    let sample = sink.pull_preroll().map_err(|_| gst::FlowError::Eos)?;
                    preroll_store.put(&sample);
                    Ok(gst::FlowSuccess::Ok)
                })
                .new_sample(move |sink| {
                    let sample = sink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
                    sample_store.put(&sample);
                    Ok(gst::FlowSuccess::Ok)
                })
                .build(),
        );

        let playbin = gst::ElementFactory::make("playbin")
            .property("video-sink", &appsink)
            .build()
            .map_err(|e| MediaError::Init(format!("Failed to create playbin: {e}")))?;

        Ok(Self {
            playbin,
            frame_slot,
            dimensions,
            pending: Vec::new(),
            ready: false,
            rate: 1.0,
            last_position: 0.0,
        })
    }

    fn set_state(&self, state: gst::State) -> Result<()> {
        self.playbin
            .set_state(state)
            .map(|_| ())
            .map_err(|e| MediaError::StateChange(format!("{state:?}: {e}")))
    }

    fn query_duration(&self) -> Option<f64> {
        self.playbin
            .query_duration::<gst::ClockTime>()
            .map(|d| d.nseconds() as f64 / 1e9)
    }

    fn apply_rate(&self) -> Result<()> {
        let position = self
            .playbin
            .query_position::<gst::ClockTime>()
            .unwrap_or(gst::ClockTime::ZERO);
        self.segment_seek(position)
            .map_err(|e| MediaError::Seek(format!("rate change failed: {e}")))
    }

    /// Flushing, accurate seek at the current rate. Every seek carries
    /// `self.rate`, since a new segment otherwise starts over at 1.0x.
    fn segment_seek(&self, position: gst::ClockTime) -> std::result::Result<(), gst::glib::BoolError> {
        self.playbin.seek(
            self.rate,
            gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE,
            gst::SeekType::Set,
            Some(position),
            gst::SeekType::None,
            gst::ClockTime::NONE,
        )
    }

    fn handle_message(&mut self, msg: &gst::Message) {
        match msg.view() {
            gst::MessageView::AsyncDone(_) => {
                if self.ready {
                    return;
                }
                self.ready = true;
                if let Some(duration) = self.query_duration() {
                    self.pending.push(MediaEvent::Duration(duration));
                }
                self.pending.push(MediaEvent::Ready);
                if (self.rate - 1.0).abs() > f64::EPSILON {
                    if let Err(err) = self.apply_rate() {
                        tracing::warn!("{}", err);
                    }
                }
            }
            gst::MessageView::DurationChanged(_) => {
                if let Some(duration) = self.query_duration() {
                    self.pending.push(MediaEvent::Duration(duration));
                }
            }
            gst::MessageView::Eos(_) => self.pending.push(MediaEvent::Ended),
            gst::MessageView::Error(err) => {
                let message = format!("{} ({:?})", err.error(), err.debug());
                tracing::error!("pipeline error: {}", message);
                self.pending.push(MediaEvent::Error(message));
            }
            gst::MessageView::StateChanged(change) => {
                if msg.src() != Some(self.playbin.upcast_ref::<gst::Object>()) {
                    return;
                }
                match (change.old(), change.current()) {
                    (_, gst::State::Playing) => self.pending.push(MediaEvent::Play),
                    (gst::State::Playing, gst::State::Paused) => self.pending.push(MediaEvent::Pause),
                    _ => {}
                }
            }
            _ => {}
        }
    }
}

impl MediaElement for GstMedia {
    fn load(&mut self, url: &str) -> Result<()> {
        self.set_state(gst::State::Null)?;
        self.pending.clear();
        self.ready = false;
        self.last_position = 0.0;
        *self.frame_slot.lock() = None;
        *self.dimensions.lock() = None;

        let uri = if url.contains("://") {
            url.to_owned()
        } else {
            gst::glib::filename_to_uri(url, None)
                .map_err(|e| MediaError::Pipeline(format!("invalid path {url}: {e}")))?
                .to_string()
        };
        self.playbin.set_property("uri", uri.as_str());
        tracing::debug!(%uri, "playbin source set");
        self.set_state(gst::State::Paused)
    }

    fn set_playing(&mut self, playing: bool) {
        let state = if playing {
            gst::State::Playing
        } else {
            gst::State::Paused
        };
        if let Err(err) = self.set_state(state) {
            tracing::warn!("{}", err);
        }
    }

    fn seek_to(&mut self, seconds: f64) {
        match self.segment_seek(clock_time(seconds)) {
            Ok(()) => self.last_position = seconds,
            Err(e) => tracing::warn!("seek to {:.2}s failed: {}", seconds, e),
        }
    }

    fn current_time(&self) -> f64 {
        self.playbin
            .query_position::<gst::ClockTime>()
            .map(|t| t.nseconds() as f64 / 1e9)
            .unwrap_or(self.last_position)
    }

    fn internal_dimensions(&self) -> Option<(u32, u32)> {
        *self.dimensions.lock()
    }

    fn set_volume(&mut self, volume: f64) {
        self.playbin.set_property("volume", volume.clamp(0.0, 1.0));
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.rate = rate;
        if self.ready {
            if let Err(err) = self.apply_rate() {
                tracing::warn!("{}", err);
            }
        }
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        if let Some(bus) = self.playbin.bus() {
            while let Some(msg) = bus.pop() {
                self.handle_message(&msg);
            }
        }
        if self.ready {
            let position = self.current_time();
            self.last_position = position;
            self.pending.push(MediaEvent::Progress(position));
        }
        std::mem::take(&mut self.pending)
    }

    fn take_frame(&mut self) -> Option<VideoFrame> {
        self.frame_slot.lock().take()
    }
}

impl Drop for GstMedia {
    fn drop(&mut self) {
        let _ = self.playbin.set_state(gst::State::Null);
    }
}

/// Streaming-thread side of the frame mailbox.
struct FrameStore {
    slot: Arc<Mutex<Option<VideoFrame>>>,
    dimensions: Arc<Mutex<Option<(u32, u32)>>>,
}

impl FrameStore {
    fn new(slot: &Arc<Mutex<Option<VideoFrame>>>, dimensions: &Arc<Mutex<Option<(u32, u32)>>>) -> Self {
        Self {
            slot: Arc::clone(slot),
            dimensions: Arc::clone(dimensions),
        }
    }

    fn put(&self, sample: &gst::Sample) {
        if let Some(frame) = sample_to_frame(sample) {
            *self.dimensions.lock() = Some((frame.width, frame.height));
            *self.slot.lock() = Some(frame);
        }
    }
}

/// Copy an RGBA sample into a tightly packed frame, dropping row padding.
fn sample_to_frame(sample: &gst::Sample) -> Option<VideoFrame> {
    let caps = sample.caps()?;
    let info = gst_video::VideoInfo::from_caps(caps).ok()?;
    let buffer = sample.buffer()?;
    let map = buffer.map_readable().ok()?;

    let width = info.width();
    let height = info.height();
    let stride = usize::try_from(*info.stride().first()?).ok()?;
    let row = width as usize * 4;
    let data = map.as_slice();

    let mut pixels = Vec::with_capacity(row * height as usize);
    for y in 0..height as usize {
        let start = y * stride;
        pixels.extend_from_slice(data.get(start..start + row)?);
    }
    Some(VideoFrame {
        width,
        height,
        pixels,
    })
}

fn clock_time(seconds: f64) -> gst::ClockTime {
    let nanos = if seconds.is_finite() { seconds.max(0.0) * 1e9 } else { 0.0 };
    gst::ClockTime::from_nseconds(nanos.round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seek_positions_are_whole_nanoseconds() {
        assert_eq!(clock_time(12.5), gst::ClockTime::from_mseconds(12_500));
        assert_eq!(clock_time(0.1), gst::ClockTime::from_nseconds(100_000_000));
    }

    #[test]
    fn invalid_seek_positions_start_at_zero() {
        assert_eq!(clock_time(-3.0), gst::ClockTime::ZERO);
        assert_eq!(clock_time(f64::NAN), gst::ClockTime::ZERO);
    }
}
