//! Periodic status line construction.

use pinbridge_proto::{StatusWriter, ANALOG_CHANNEL_COUNT, DIGITAL_CHANNEL_COUNT};

use crate::monitor::MonitorState;
use crate::sampler::PinSampler;

/// Sample every monitored channel and serialize one status line into `buf`.
///
/// Entries appear in report order: enabled digital channels in ascending
/// index order, then enabled analog channels in ascending index order.
/// Returns the line length, or `None` when no channel is monitored - in
/// that case nothing must be transmitted, not even an empty line.
///
/// `buf` must hold [`pinbridge_proto::MAX_STATUS_LINE`] bytes.
pub fn write_status(
    state: &MonitorState,
    sampler: &mut impl PinSampler,
    buf: &mut [u8],
) -> Option<usize> {
    let mut writer = StatusWriter::new(buf);

    for index in 0..DIGITAL_CHANNEL_COUNT {
        if state.digital(index) {
            let index = index as u8;
            writer.digital(index, sampler.read_digital(index));
        }
    }

    for index in 0..ANALOG_CHANNEL_COUNT {
        if state.analog(index) {
            let index = index as u8;
            writer.analog(index, sampler.read_analog(index));
        }
    }

    writer.finish()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::monitor::apply_config;
    use pinbridge_proto::MAX_STATUS_LINE;

    /// Sampler returning a fixed pattern: digital pins read high on even
    /// indices, analog pins read `100 * index`.
    struct PatternSampler;

    impl PinSampler for PatternSampler {
        fn read_digital(&mut self, index: u8) -> bool {
            index % 2 == 0
        }

        fn read_analog(&mut self, index: u8) -> u16 {
            u16::from(index) * 100
        }
    }

    fn status_line(state: &MonitorState) -> Option<std::vec::Vec<u8>> {
        let mut buf = [0u8; MAX_STATUS_LINE];
        write_status(state, &mut PatternSampler, &mut buf).map(|len| buf[..len].to_vec())
    }

    #[test]
    fn test_no_channels_no_line() {
        assert_eq!(status_line(&MonitorState::new()), None);
    }

    #[test]
    fn test_digital_before_analog() {
        let mut state = MonitorState::new();
        apply_config(&mut state, b"CFG:A0=1,D3=1");
        let line = status_line(&state).unwrap();
        assert_eq!(line, b"STATUS:D3:0,A0:0\n");
    }

    #[test]
    fn test_ascending_index_order_within_groups() {
        let mut state = MonitorState::new();
        apply_config(&mut state, b"CFG:D7=1,D2=1,A4=1,A1=1");
        let line = status_line(&state).unwrap();
        assert_eq!(line, b"STATUS:D2:1,D7:0,A1:100,A4:400\n");
    }

    #[test]
    fn test_disabled_channels_absent() {
        let mut state = MonitorState::new();
        apply_config(&mut state, b"CFG:D0=1,D1=1,D1=0");
        let line = status_line(&state).unwrap();
        assert_eq!(line, b"STATUS:D0:1\n");
    }

    #[test]
    fn test_all_channels() {
        let mut state = MonitorState::new();
        for i in 0..DIGITAL_CHANNEL_COUNT {
            state.apply(pinbridge_proto::ConfigEntry {
                channel: pinbridge_proto::Channel::digital(i as u8),
                enable: true,
            });
        }
        for i in 0..ANALOG_CHANNEL_COUNT {
            state.apply(pinbridge_proto::ConfigEntry {
                channel: pinbridge_proto::Channel::analog(i as u8),
                enable: true,
            });
        }
        let line = status_line(&state).unwrap();
        assert!(line.starts_with(b"STATUS:D0:1,D1:0,"));
        assert!(line.ends_with(b"A4:400,A5:500\n"));
        assert!(line.len() <= MAX_STATUS_LINE);
    }
}
