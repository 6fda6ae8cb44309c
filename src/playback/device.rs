//! Sequencing device interface

use crate::error::MelodyError;
use crate::timeline::Timeline;

/// Called by the device, on its own thread, when the track has played out.
pub type EndOfTrackCallback = Box<dyn FnMut() + Send + 'static>;

/// A device that plays a whole timeline by itself.
///
/// [`PlaybackScheduler`](super::PlaybackScheduler) drives it in this order:
/// `open`, `on_end_of_track`, `load_timeline`, `start`, and finally `close`
/// once end-of-track has been consumed (or earlier, to stop playback).
pub trait SequencingDevice {
    /// Acquire the underlying resource. Failing here must leave the device closed.
    fn open(&mut self) -> Result<(), MelodyError>;

    /// Release the resource and stop any playback in flight.
    ///
    /// Must not block on the device's own playback thread, since the
    /// end-of-track path may run there.
    fn close(&mut self);

    fn load_timeline(&mut self, timeline: Timeline) -> Result<(), MelodyError>;

    /// Begin playback and return without waiting for it.
    fn start(&mut self) -> Result<(), MelodyError>;

    /// Install the end-of-track observer, replacing any previous one.
    fn on_end_of_track(&mut self, callback: EndOfTrackCallback);
}
