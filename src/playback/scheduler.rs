//! Playback scheduler
//!
//! Owns the sequencing device and the enabled state of the play control.

use rtrb::{Consumer, RingBuffer};
use tracing::{debug, error, info, warn};

use super::device::SequencingDevice;
use crate::error::MelodyError;
use crate::timeline::Timeline;

/// Slots in each playback's completion queue. One message is expected.
const COMPLETION_QUEUE_SIZE: usize = 4;

/// Identifies one call to [`PlaybackScheduler::play`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlaybackId(u64);

/// End-of-track message sent from the device thread to the interactive loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndOfTrack {
    pub playback: PlaybackId,
}

/// A playback that has started and not yet been released.
struct Pending {
    id: PlaybackId,
    completion: Consumer<EndOfTrack>,
}

pub struct PlaybackScheduler<D: SequencingDevice> {
    device: D,
    play_enabled: bool,
    next_id: u64,
    pending: Option<Pending>,
}

impl<D: SequencingDevice> PlaybackScheduler<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            play_enabled: true,
            next_id: 0,
            pending: None,
        }
    }

    /// Whether the play control should accept a click.
    pub fn play_enabled(&self) -> bool {
        self.play_enabled
    }

    /// Whether a playback is waiting for its end-of-track to be consumed.
    pub fn is_playing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    /// Hand `timeline` to the device and start it.
    ///
    /// Returns as soon as the device has started. On any failure the device is
    /// closed again, the error is returned and the play control is left as it
    /// was.
    ///
    /// # Errors
    /// - [`MelodyError::PlaybackInProgress`] if the previous playback has not been released
    /// - Whatever the device reports from `open`, `load_timeline` or `start`
    pub fn play(&mut self, timeline: Timeline) -> Result<PlaybackId, MelodyError> {
        if self.pending.is_some() {
            warn!("play requested while a playback is still pending");
            return Err(MelodyError::PlaybackInProgress);
        }

        let id = PlaybackId(self.next_id);
        let events = timeline.len();

        if let Err(e) = self.device.open() {
            error!(error = %e, "failed to open sequencing device");
            return Err(e);
        }

        let (mut producer, consumer) = RingBuffer::new(COMPLETION_QUEUE_SIZE);
        let mut signalled = false;
        self.device.on_end_of_track(Box::new(move || {
            if !signalled {
                signalled = producer.push(EndOfTrack { playback: id }).is_ok();
            }
        }));

        if let Err(e) = load_and_start(&mut self.device, timeline) {
            error!(error = %e, "failed to start playback");
            self.device.close();
            return Err(e);
        }

        self.next_id += 1;
        self.play_enabled = false;
        self.pending = Some(Pending {
            id,
            completion: consumer,
        });
        info!(playback = id.0, events, "playback started");
        Ok(id)
    }

    /// Consume the end-of-track message, if it has arrived.
    ///
    /// Call this from the interactive loop. The first message for the pending
    /// playback closes the device and re-enables the play control; it is
    /// returned exactly once. Later calls return `None` until the next `play`.
    pub fn poll(&mut self) -> Option<EndOfTrack> {
        let pending = self.pending.as_mut()?;
        let message = pending.completion.pop().ok()?;

        while pending.completion.pop().is_ok() {
            debug!(playback = message.playback.0, "ignored repeated end-of-track");
        }

        self.pending = None;
        self.device.close();
        self.play_enabled = true;
        info!(playback = message.playback.0, "playback finished");
        Some(message)
    }

    /// Stop the pending playback by closing the device.
    ///
    /// Returns false if nothing was playing. No end-of-track is reported for a
    /// stopped playback.
    pub fn stop(&mut self) -> bool {
        match self.pending.take() {
            Some(pending) => {
                self.device.close();
                self.play_enabled = true;
                info!(playback = pending.id.0, "playback stopped");
                true
            }
            None => false,
        }
    }
}

impl<D: SequencingDevice> Drop for PlaybackScheduler<D> {
    fn drop(&mut self) {
        if self.pending.is_some() {
            self.device.close();
        }
    }
}

fn load_and_start<D>(device: &mut D, timeline: Timeline) -> Result<(), MelodyError>
where
    D: SequencingDevice,
{
    device.load_timeline(timeline)?;
    device.start()
}
