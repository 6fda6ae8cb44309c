//! Output channel parameters
//!
//! A [`ChannelState`] carries the playback parameters of one logical output
//! channel. The "current channel" is never global: callers pass the state they
//! want to the timeline builder and the keyboard controller.

use serde::Deserialize;

/// Number of channels on a General MIDI device.
pub const CHANNEL_COUNT: usize = 16;

/// Mid-range default for velocity, pressure, bend and reverb.
pub const DEFAULT_CONTROL_VALUE: u8 = 64;

/// Playback parameters of one logical output channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelState {
    /// Channel index (0-15).
    pub num: u8,
    pub velocity: u8,
    pub pressure: u8,
    pub bend: u8,
    pub reverb: u8,
}

impl Default for ChannelState {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ChannelState {
    /// A channel with every control at its mid-range default.
    pub fn new(num: u8) -> Self {
        Self {
            num,
            velocity: DEFAULT_CONTROL_VALUE,
            pressure: DEFAULT_CONTROL_VALUE,
            bend: DEFAULT_CONTROL_VALUE,
            reverb: DEFAULT_CONTROL_VALUE,
        }
    }

    pub fn set_velocity(&mut self, value: u8) {
        self.velocity = value.min(127);
    }

    pub fn set_pressure(&mut self, value: u8) {
        self.pressure = value.min(127);
    }

    pub fn set_bend(&mut self, value: u8) {
        self.bend = value.min(127);
    }

    pub fn set_reverb(&mut self, value: u8) {
        self.reverb = value.min(127);
    }
}

/// One [`ChannelState`] per device channel plus the index of the current one.
#[derive(Debug, Clone)]
pub struct ChannelBank {
    channels: Vec<ChannelState>,
    current: usize,
}

impl Default for ChannelBank {
    fn default() -> Self {
        Self::new(CHANNEL_COUNT)
    }
}

impl ChannelBank {
    /// Create `count` channels numbered from 0. The first one is current.
    pub fn new(count: usize) -> Self {
        let count = count.clamp(1, CHANNEL_COUNT);
        Self {
            channels: (0..count as u8).map(ChannelState::new).collect(),
            current: 0,
        }
    }

    /// Create a bank whose current channel starts from `template`.
    pub fn with_current(template: ChannelState) -> Self {
        let mut bank = Self::default();
        let index = usize::from(template.num).min(bank.channels.len() - 1);
        bank.channels[index] = ChannelState {
            num: index as u8,
            ..template
        };
        bank.current = index;
        bank
    }

    pub fn current(&self) -> &ChannelState {
        &self.channels[self.current]
    }

    pub fn current_mut(&mut self) -> &mut ChannelState {
        &mut self.channels[self.current]
    }

    /// Make channel `num` current. Returns false if the bank has no such channel.
    pub fn select(&mut self, num: usize) -> bool {
        if num < self.channels.len() {
            self.current = num;
            true
        } else {
            false
        }
    }

    pub fn get(&self, num: usize) -> Option<&ChannelState> {
        self.channels.get(num)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
