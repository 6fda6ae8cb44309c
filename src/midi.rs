//! MIDI output devices
//!
//! [`MidiOutSequencer`] and [`MidiOutChannel`] send to a hardware or virtual
//! MIDI output port through midir. The sequencer plays a whole timeline on a
//! worker thread; the channel sounds keyboard notes immediately.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use midir::{MidiOutput, MidiOutputConnection};
use tracing::{debug, info, warn};

use crate::error::MelodyError;
use crate::keyboard::SynthesizerChannel;
use crate::playback::{EndOfTrackCallback, SequencingDevice};
use crate::timeline::{channel_message, EventKind, Timeline};

const CLIENT_NAME: &str = "melody";

/// Longest single sleep on the worker thread, so `close` is noticed quickly.
const STOP_POLL_INTERVAL: Duration = Duration::from_millis(5);

const CONTROL_CHANGE_STATUS: u8 = 0xB0;
const ALL_NOTES_OFF: u8 = 123;

fn new_output() -> Result<MidiOutput, MelodyError> {
    MidiOutput::new(CLIENT_NAME).map_err(|e| MelodyError::DeviceUnavailable(e.to_string()))
}

/// Names of the available MIDI output ports.
pub fn output_ports() -> Result<Vec<String>, MelodyError> {
    let output = new_output()?;
    Ok(output
        .ports()
        .iter()
        .map(|port| output.port_name(port).unwrap_or_else(|_| "Unknown".to_string()))
        .collect())
}

/// Connect to the first output port whose name contains `port`, or the first
/// port at all when `port` is `None`.
fn connect(
    port: Option<&str>,
    connection_name: &str,
) -> Result<MidiOutputConnection, MelodyError> {
    let output = new_output()?;

    let selected = output.ports().into_iter().find(|candidate| match port {
        Some(wanted) => output
            .port_name(candidate)
            .map(|name| name.contains(wanted))
            .unwrap_or(false),
        None => true,
    });
    let selected = selected.ok_or_else(|| {
        MelodyError::DeviceUnavailable(match port {
            Some(wanted) => format!("no MIDI output port matching '{}'", wanted),
            None => "no MIDI output ports".to_string(),
        })
    })?;

    let name = output
        .port_name(&selected)
        .unwrap_or_else(|_| "Unknown".to_string());
    let connection = output
        .connect(&selected, connection_name)
        .map_err(|e| MelodyError::DeviceUnavailable(e.to_string()))?;
    info!(port = %name, "MIDI output connected");
    Ok(connection)
}

fn send(connection: &mut MidiOutputConnection, message: &[u8]) {
    if let Err(e) = connection.send(message) {
        warn!(error = %e, ?message, "MIDI send failed");
    }
}

/// Seconds per tick at `tempo` quarter notes per minute.
fn seconds_per_tick(tempo: u32, resolution: u32) -> f64 {
    60.0 / (f64::from(tempo.max(1)) * f64::from(resolution.max(1)))
}

/// Sleep until `deadline`. Returns false if `stop` was raised first.
fn sleep_until(deadline: Instant, stop: &AtomicBool) -> bool {
    loop {
        if stop.load(Ordering::Relaxed) {
            return false;
        }
        let now = Instant::now();
        if now >= deadline {
            return true;
        }
        thread::sleep((deadline - now).min(STOP_POLL_INTERVAL));
    }
}

/// Sequencer that plays a timeline on a MIDI output port.
pub struct MidiOutSequencer {
    port: Option<String>,
    tempo: u32,
    connection: Arc<Mutex<Option<MidiOutputConnection>>>,
    timeline: Option<Timeline>,
    callback: Option<EndOfTrackCallback>,
    stop: Arc<AtomicBool>,
    worker: Option<JoinHandle<()>>,
}

impl MidiOutSequencer {
    /// `port` selects the output by name substring; `tempo` is in quarter notes per minute.
    pub fn new(port: Option<String>, tempo: u32) -> Self {
        Self {
            port,
            tempo,
            connection: Arc::new(Mutex::new(None)),
            timeline: None,
            callback: None,
            stop: Arc::new(AtomicBool::new(false)),
            worker: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.connection
            .lock()
            .map(|connection| connection.is_some())
            .unwrap_or(false)
    }

    fn stop_worker(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(worker) = self.worker.take() {
            // Closing from the end-of-track path runs on the worker itself.
            if worker.thread().id() != thread::current().id() {
                join_worker(worker);
            }
        }
    }
}

/// Wait for a worker to finish. Returns false if it panicked.
fn join_worker(worker: JoinHandle<()>) -> bool {
    match worker.join() {
        Ok(()) => true,
        Err(_) => {
            warn!("sequencer worker panicked");
            false
        }
    }
}

impl SequencingDevice for MidiOutSequencer {
    fn open(&mut self) -> Result<(), MelodyError> {
        let mut slot = self
            .connection
            .lock()
            .map_err(|_| MelodyError::DeviceError("sequencer state poisoned".to_string()))?;
        if slot.is_none() {
            *slot = Some(connect(self.port.as_deref(), "melody-sequencer")?);
        }
        Ok(())
    }

    fn close(&mut self) {
        self.stop_worker();
        self.timeline = None;
        if let Ok(mut slot) = self.connection.lock() {
            if let Some(mut connection) = slot.take() {
                for channel in 0..16u8 {
                    send(&mut connection, &[CONTROL_CHANGE_STATUS | channel, ALL_NOTES_OFF, 0]);
                }
                connection.close();
                debug!("sequencer closed");
            }
        }
    }

    fn load_timeline(&mut self, timeline: Timeline) -> Result<(), MelodyError> {
        if !self.is_open() {
            return Err(MelodyError::DeviceError("sequencer is not open".to_string()));
        }
        self.timeline = Some(timeline);
        Ok(())
    }

    fn start(&mut self) -> Result<(), MelodyError> {
        let timeline = self
            .timeline
            .take()
            .ok_or_else(|| MelodyError::DeviceError("no timeline loaded".to_string()))?;
        self.stop_worker();

        let stop = Arc::new(AtomicBool::new(false));
        self.stop = Arc::clone(&stop);
        let connection = Arc::clone(&self.connection);
        let mut callback = self.callback.take();
        let tick = seconds_per_tick(self.tempo, timeline.resolution());

        let worker = thread::Builder::new()
            .name("melody-sequencer".to_string())
            .spawn(move || {
                let started = Instant::now();
                for event in timeline.events() {
                    let due = started + Duration::from_secs_f64(tick * event.tick as f64);
                    if !sleep_until(due, &stop) {
                        return;
                    }
                    if let Ok(mut slot) = connection.lock() {
                        if let Some(output) = slot.as_mut() {
                            send(output, &event.to_midi_bytes());
                        }
                    }
                }
                if let Some(callback) = callback.as_mut() {
                    callback();
                }
            })
            .map_err(|e| MelodyError::DeviceError(e.to_string()))?;

        self.worker = Some(worker);
        Ok(())
    }

    fn on_end_of_track(&mut self, callback: EndOfTrackCallback) {
        self.callback = Some(callback);
    }
}

impl Drop for MidiOutSequencer {
    fn drop(&mut self) {
        self.close();
    }
}

/// Destination for raw MIDI messages.
pub trait MidiSink {
    fn send_message(&mut self, message: &[u8]);
}

impl MidiSink for MidiOutputConnection {
    fn send_message(&mut self, message: &[u8]) {
        send(self, message);
    }
}

/// Live synthesizer channel on a MIDI output port.
pub struct MidiOutChannel<S = MidiOutputConnection> {
    sink: S,
    channel: u8,
}

impl MidiOutChannel {
    pub fn open(port: Option<&str>, channel: u8) -> Result<Self, MelodyError> {
        Ok(Self::with_sink(connect(port, "melody-keyboard")?, channel))
    }
}

impl<S: MidiSink> MidiOutChannel<S> {
    pub fn with_sink(sink: S, channel: u8) -> Self {
        Self {
            sink,
            channel: channel & 0x0F,
        }
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    /// Follow a change of the current channel.
    pub fn set_channel(&mut self, channel: u8) {
        self.channel = channel & 0x0F;
    }
}

impl<S: MidiSink> SynthesizerChannel for MidiOutChannel<S> {
    fn note_on(&mut self, pitch: u8, velocity: u8) {
        let message = channel_message(EventKind::On, self.channel, pitch, velocity);
        self.sink.send_message(&message);
    }

    fn note_off(&mut self, pitch: u8, velocity: u8) {
        let message = channel_message(EventKind::Off, self.channel, pitch, velocity);
        self.sink.send_message(&message);
    }
}
