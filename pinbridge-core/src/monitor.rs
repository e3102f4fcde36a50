//! Monitoring state: which channels appear in status reports.

use pinbridge_proto::{
    config_payload, ChannelKind, ConfigEntries, ConfigEntry, ANALOG_CHANNEL_COUNT,
    DIGITAL_CHANNEL_COUNT,
};

/// Per-channel monitor flags for all digital and analog pins.
///
/// Fixed-size flag arrays rather than a dynamic set: the channel
/// universe is small and statically bounded, so lookups are O(1) and
/// nothing allocates. All flags start cleared; the only mutation path
/// is configuration commands. Out-of-range indices are ignored on write
/// and read as disabled, so no input can fault the bridge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MonitorState {
    digital: [bool; DIGITAL_CHANNEL_COUNT],
    analog: [bool; ANALOG_CHANNEL_COUNT],
}

impl MonitorState {
    /// All channels disabled.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            digital: [false; DIGITAL_CHANNEL_COUNT],
            analog: [false; ANALOG_CHANNEL_COUNT],
        }
    }

    /// Apply one parsed configuration pair.
    ///
    /// Out-of-range channels are dropped silently.
    #[inline]
    pub fn apply(&mut self, entry: ConfigEntry) {
        let index = entry.channel.index as usize;
        match entry.channel.kind {
            ChannelKind::Digital => {
                if index < DIGITAL_CHANNEL_COUNT {
                    self.digital[index] = entry.enable;
                }
            }
            ChannelKind::Analog => {
                if index < ANALOG_CHANNEL_COUNT {
                    self.analog[index] = entry.enable;
                }
            }
        }
    }

    /// Whether digital channel `index` is monitored (false out of range).
    #[inline]
    #[must_use]
    pub fn digital(&self, index: usize) -> bool {
        self.digital.get(index).copied().unwrap_or(false)
    }

    /// Whether analog channel `index` is monitored (false out of range).
    #[inline]
    #[must_use]
    pub fn analog(&self, index: usize) -> bool {
        self.analog.get(index).copied().unwrap_or(false)
    }

    /// Whether any channel at all is monitored.
    #[must_use]
    pub fn any_enabled(&self) -> bool {
        self.digital.iter().chain(self.analog.iter()).any(|&f| f)
    }
}

/// Apply a configuration command line to the monitor state.
///
/// `line` is the full trimmed host line including the `CFG:` prefix.
/// Valid pairs apply in textual order, so a later pair for the same
/// channel overrides an earlier one; malformed and out-of-range pairs
/// drop silently. Returns the number of well-formed pairs processed.
/// The caller emits the acknowledgement unconditionally, whatever the
/// count.
pub fn apply_config(state: &mut MonitorState, line: &[u8]) -> usize {
    let Some(payload) = config_payload(line) else {
        return 0;
    };

    let mut applied = 0;
    for entry in ConfigEntries::new(payload) {
        state.apply(entry);
        applied += 1;
    }
    applied
}
