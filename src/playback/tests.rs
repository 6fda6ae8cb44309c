use super::*;
use crate::channel::ChannelState;
use crate::error::MelodyError;
use crate::notation::parse;
use crate::timeline::{build, ChordTiming, Timeline};
use std::sync::{Arc, Mutex};
use std::thread;

/// Records calls and lets the test fire end-of-track from any thread.
#[derive(Default)]
struct FakeSequencer {
    calls: Vec<&'static str>,
    open: bool,
    loaded: Option<Timeline>,
    callback: Arc<Mutex<Option<EndOfTrackCallback>>>,
    fail_open: bool,
    fail_start: bool,
}

impl FakeSequencer {
    fn end_of_track(&self) -> impl Fn() + Send + 'static {
        let callback = Arc::clone(&self.callback);
        move || {
            if let Some(cb) = callback.lock().unwrap().as_mut() {
                cb();
            }
        }
    }
}

impl SequencingDevice for FakeSequencer {
    fn open(&mut self) -> Result<(), MelodyError> {
        self.calls.push("open");
        if self.fail_open {
            return Err(MelodyError::DeviceUnavailable("no sequencer".to_string()));
        }
        self.open = true;
        Ok(())
    }

    fn close(&mut self) {
        self.calls.push("close");
        self.open = false;
    }

    fn load_timeline(&mut self, timeline: Timeline) -> Result<(), MelodyError> {
        self.calls.push("load");
        self.loaded = Some(timeline);
        Ok(())
    }

    fn start(&mut self) -> Result<(), MelodyError> {
        self.calls.push("start");
        if self.fail_start {
            return Err(MelodyError::DeviceError("cannot start".to_string()));
        }
        Ok(())
    }

    fn on_end_of_track(&mut self, callback: EndOfTrackCallback) {
        self.calls.push("observe");
        *self.callback.lock().unwrap() = Some(callback);
    }
}

fn timeline(text: &str) -> Timeline {
    build(&parse(text), 10, &ChannelState::default(), ChordTiming::LastToken)
}

#[test]
fn test_play_acquires_in_order_and_disables_control() {
    let mut scheduler = PlaybackScheduler::new(FakeSequencer::default());
    assert!(scheduler.play_enabled());

    scheduler.play(timeline("4c5 4d5")).unwrap();

    assert!(!scheduler.play_enabled());
    assert!(scheduler.is_playing());
    assert_eq!(scheduler.device().calls, vec!["open", "observe", "load", "start"]);
    assert_eq!(scheduler.device().loaded.as_ref().map(Timeline::len), Some(4));
}

#[test]
fn test_poll_before_end_of_track_does_nothing() {
    let mut scheduler = PlaybackScheduler::new(FakeSequencer::default());
    scheduler.play(timeline("4c5")).unwrap();

    assert!(scheduler.poll().is_none());
    assert!(!scheduler.play_enabled());
    assert!(scheduler.device().open);
}

#[test]
fn test_end_of_track_releases_device_and_control() {
    let mut scheduler = PlaybackScheduler::new(FakeSequencer::default());
    let id = scheduler.play(timeline("4c5")).unwrap();

    scheduler.device().end_of_track()();
    let finished = scheduler.poll();

    assert_eq!(finished, Some(EndOfTrack { playback: id }));
    assert!(scheduler.play_enabled());
    assert!(!scheduler.is_playing());
    assert!(!scheduler.device().open);
}

#[test]
fn test_end_of_track_from_device_thread() {
    let mut scheduler = PlaybackScheduler::new(FakeSequencer::default());
    scheduler.play(timeline("4c5")).unwrap();

    let fire = scheduler.device().end_of_track();
    thread::spawn(fire).join().unwrap();

    assert!(scheduler.poll().is_some());
    assert!(scheduler.play_enabled());
}

#[test]
fn test_repeated_notifications_are_handled_once() {
    let mut scheduler = PlaybackScheduler::new(FakeSequencer::default());
    scheduler.play(timeline("4c5")).unwrap();

    let fire = scheduler.device().end_of_track();
    for _ in 0..10 {
        fire();
    }

    assert!(scheduler.poll().is_some());
    fire();
    assert!(scheduler.poll().is_none());

    let closes = scheduler.device().calls.iter().filter(|c| **c == "close").count();
    assert_eq!(closes, 1);
}

#[test]
fn test_open_failure_leaves_state_unchanged() {
    let device = FakeSequencer {
        fail_open: true,
        ..FakeSequencer::default()
    };
    let mut scheduler = PlaybackScheduler::new(device);

    let result = scheduler.play(timeline("4c5"));

    assert!(matches!(result, Err(MelodyError::DeviceUnavailable(_))));
    assert!(scheduler.play_enabled());
    assert!(!scheduler.is_playing());
    assert_eq!(scheduler.device().calls, vec!["open"]);
}

#[test]
fn test_start_failure_closes_device() {
    let device = FakeSequencer {
        fail_start: true,
        ..FakeSequencer::default()
    };
    let mut scheduler = PlaybackScheduler::new(device);

    let result = scheduler.play(timeline("4c5"));

    assert!(matches!(result, Err(MelodyError::DeviceError(_))));
    assert!(scheduler.play_enabled());
    assert!(!scheduler.device().open);
    assert_eq!(scheduler.device().calls.last(), Some(&"close"));
}

#[test]
fn test_play_while_pending_is_rejected() {
    let mut scheduler = PlaybackScheduler::new(FakeSequencer::default());
    scheduler.play(timeline("4c5")).unwrap();

    let result = scheduler.play(timeline("4d5"));

    assert!(matches!(result, Err(MelodyError::PlaybackInProgress)));
    assert_eq!(scheduler.device().calls.iter().filter(|c| **c == "open").count(), 1);
}

#[test]
fn test_play_again_after_completion() {
    let mut scheduler = PlaybackScheduler::new(FakeSequencer::default());
    let first = scheduler.play(timeline("4c5")).unwrap();
    let fire_first = scheduler.device().end_of_track();
    fire_first();
    scheduler.poll().unwrap();

    let second = scheduler.play(timeline("4d5")).unwrap();
    assert_ne!(first, second);

    fire_first();
    let finished = scheduler.poll().unwrap();
    assert_eq!(finished.playback, second);
}

#[test]
fn test_stop_releases_without_end_of_track() {
    let mut scheduler = PlaybackScheduler::new(FakeSequencer::default());
    scheduler.play(timeline("1c5")).unwrap();

    assert!(scheduler.stop());
    assert!(scheduler.play_enabled());
    assert!(!scheduler.device().open);
    assert!(!scheduler.stop());
    assert!(scheduler.poll().is_none());
}

#[test]
fn test_end_of_track_during_start() {
    // Empty timelines may end before start() returns.
    struct Immediate(FakeSequencer);
    impl SequencingDevice for Immediate {
        fn open(&mut self) -> Result<(), MelodyError> {
            self.0.open()
        }
        fn close(&mut self) {
            self.0.close()
        }
        fn load_timeline(&mut self, timeline: Timeline) -> Result<(), MelodyError> {
            self.0.load_timeline(timeline)
        }
        fn start(&mut self) -> Result<(), MelodyError> {
            self.0.start()?;
            self.0.end_of_track()();
            Ok(())
        }
        fn on_end_of_track(&mut self, callback: EndOfTrackCallback) {
            self.0.on_end_of_track(callback)
        }
    }

    let mut scheduler = PlaybackScheduler::new(Immediate(FakeSequencer::default()));
    scheduler.play(timeline("")).unwrap();
    assert!(!scheduler.play_enabled());
    assert!(scheduler.poll().is_some());
    assert!(scheduler.play_enabled());
}
