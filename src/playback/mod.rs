//! # Playback Module
//!
//! Play a [`Timeline`](crate::timeline::Timeline) on an external sequencing
//! device without blocking the interactive loop.
//!
//! ## Threads
//! - The interactive thread calls [`PlaybackScheduler::play`], which acquires the
//!   device, starts it and returns at once with the play control disabled.
//! - The device plays on its own thread and reports end-of-track through a
//!   callback. The callback only pushes an [`EndOfTrack`] message onto a
//!   lock-free SPSC queue.
//! - The interactive thread calls [`PlaybackScheduler::poll`] from its loop. The
//!   first message releases the device and re-enables the play control;
//!   repeated notifications are ignored.
//!
//! ## Example
//! ```rust
//! use melody::playback::PlaybackScheduler;
//! # use melody::playback::{EndOfTrackCallback, SequencingDevice};
//! # use melody::timeline::Timeline;
//! # use melody::MelodyError;
//! # #[derive(Default)]
//! # struct Instant(Option<EndOfTrackCallback>);
//! # impl SequencingDevice for Instant {
//! #     fn open(&mut self) -> Result<(), MelodyError> { Ok(()) }
//! #     fn close(&mut self) {}
//! #     fn load_timeline(&mut self, _: Timeline) -> Result<(), MelodyError> { Ok(()) }
//! #     fn start(&mut self) -> Result<(), MelodyError> {
//! #         if let Some(cb) = self.0.as_mut() { cb(); }
//! #         Ok(())
//! #     }
//! #     fn on_end_of_track(&mut self, cb: EndOfTrackCallback) { self.0 = Some(cb); }
//! # }
//!
//! let mut scheduler = PlaybackScheduler::new(Instant::default());
//! let timeline = melody::compile("4c5 4e5 2g5", &melody::Config::default());
//!
//! scheduler.play(timeline)?;
//! assert!(!scheduler.play_enabled());
//!
//! // Interactive loop
//! while scheduler.poll().is_none() {}
//! assert!(scheduler.play_enabled());
//! # Ok::<(), MelodyError>(())
//! ```
//!
//! ## Sub-modules
//! - `device` - SequencingDevice trait
//! - `scheduler` - PlaybackScheduler

mod device;
mod scheduler;

#[cfg(test)]
mod tests;

pub use device::{EndOfTrackCallback, SequencingDevice};
pub use scheduler::{EndOfTrack, PlaybackId, PlaybackScheduler};
