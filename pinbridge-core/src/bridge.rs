//! The cooperative bridge loop.
//!
//! One [`Bridge::tick`] services the three concerns of the system in
//! fixed order: host input (configuration commands and passthrough
//! lines), device input (raw forwarding to the host), and the periodic
//! status report. No phase blocks; each consumes only data that has
//! already arrived and hands control back, so a single unbounded
//! `loop { bridge.tick() }` in the firmware entry point interleaves all
//! three without starving any of them.

use heapless::Vec;
use pinbridge_proto::{is_config_line, CONFIG_ACK, MAX_LINE_LENGTH, MAX_STATUS_LINE};

use crate::link::{Clock, DeviceLink, SerialLink};
use crate::monitor::{apply_config, MonitorState};
use crate::report::write_status;
use crate::sampler::PinSampler;

/// Tunables of the bridge loop.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeConfig {
    /// Minimum spacing between status reports, in milliseconds.
    pub report_interval_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            report_interval_ms: 100,
        }
    }
}

/// The bridge: monitor state plus the three-phase scheduling loop.
///
/// Owns all mutable state of the system - the monitor flags, the host
/// line accumulator, and the report timestamp - so there are no hidden
/// statics and the whole loop runs under test with synthetic links and
/// a hand-cranked clock.
pub struct Bridge<H, D, S, C> {
    host: H,
    device: D,
    sampler: S,
    clock: C,
    config: BridgeConfig,
    monitor: MonitorState,
    /// Host line accumulator; filled across ticks until a newline lands.
    line: Vec<u8, MAX_LINE_LENGTH>,
    /// Set when the current host line overflowed the accumulator; the
    /// rest of the line is discarded up to its newline.
    discarding: bool,
    last_report: u64,
}

impl<H, D, S, C> Bridge<H, D, S, C>
where
    H: SerialLink,
    D: DeviceLink,
    S: PinSampler,
    C: Clock,
{
    /// Create a bridge with all channels unmonitored.
    ///
    /// The report timer starts at the epoch, so the first report becomes
    /// due one interval after boot.
    pub fn new(host: H, device: D, sampler: S, clock: C, config: BridgeConfig) -> Self {
        Self {
            host,
            device,
            sampler,
            clock,
            config,
            monitor: MonitorState::new(),
            line: Vec::new(),
            discarding: false,
            last_report: 0,
        }
    }

    /// Run one iteration of the cooperative loop.
    pub fn tick(&mut self) {
        self.poll_host();
        self.poll_device();
        self.poll_report_timer();
    }

    /// Current monitor state (for inspection under test).
    #[must_use]
    pub fn monitor(&self) -> &MonitorState {
        &self.monitor
    }

    /// Get a mutable reference to the host link.
    ///
    /// Lets the embedding runtime reach the transport between ticks,
    /// e.g. to flush staged output or emit the startup banner.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Get a mutable reference to the device link.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Phase 1: drain buffered host bytes, dispatching completed lines.
    ///
    /// Bytes accumulate across ticks; a line is handled the moment its
    /// newline arrives. A line that outgrows the accumulator is dropped
    /// in its entirety - the remainder up to the newline is discarded so
    /// the next line starts clean.
    fn poll_host(&mut self) {
        while let Some(byte) = self.host.try_read() {
            if byte == b'\n' {
                if !self.discarding {
                    self.dispatch_line();
                }
                self.line.clear();
                self.discarding = false;
                continue;
            }

            if !self.discarding && self.line.push(byte).is_err() {
                self.discarding = true;
            }
        }
    }

    /// Handle one completed host line (newline already consumed).
    fn dispatch_line(&mut self) {
        // Strip a trailing CR left by CRLF line endings
        let mut end = self.line.len();
        if end > 0 && self.line[end - 1] == b'\r' {
            end -= 1;
        }
        let line = &self.line[..end];

        if is_config_line(line) {
            apply_config(&mut self.monitor, line);
            self.host.write_all(CONFIG_ACK);
            self.host.write_all(b"\n");
        } else if !line.is_empty() {
            // Passthrough: visible echo upstream, raw bytes downstream
            self.host.write_all(b"\n<- ");
            self.host.write_all(line);
            self.host.write_all(b"\n\n");
            self.device.write_all(line);
        }
        // Empty lines are dropped silently
    }

    /// Phase 2: claim the half-duplex device link, then forward whatever
    /// has arrived to the host verbatim.
    fn poll_device(&mut self) {
        self.device.listen();
        while let Some(byte) = self.device.try_read() {
            self.host.write_all(&[byte]);
        }
    }

    /// Phase 3: emit a status report once per interval.
    ///
    /// Skip-tolerant: a delayed loop fires as soon as the elapsed
    /// condition holds, with no catch-up for missed intervals. The
    /// timestamp resets whenever the interval elapses, whether or not a
    /// line was emitted.
    fn poll_report_timer(&mut self) {
        let now = self.clock.now_millis();
        if now.wrapping_sub(self.last_report) >= self.config.report_interval_ms {
            let mut buf = [0u8; MAX_STATUS_LINE];
            if let Some(len) = write_status(&self.monitor, &mut self.sampler, &mut buf) {
                self.host.write_all(&buf[..len]);
            }
            self.last_report = now;
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;
    use std::rc::Rc;
    use std::string::String;
    use std::vec;
    use std::vec::Vec;

    use super::*;

    /// Test double for a serial link: a queue of inbound bytes plus a
    /// transcript of everything written.
    #[derive(Default)]
    struct MockLink {
        inbound: VecDeque<u8>,
        outbound: Vec<u8>,
        listen_calls: usize,
    }

    impl MockLink {
        fn feed(&mut self, bytes: &[u8]) {
            self.inbound.extend(bytes);
        }
    }

    impl SerialLink for MockLink {
        fn try_read(&mut self) -> Option<u8> {
            self.inbound.pop_front()
        }

        fn write_all(&mut self, bytes: &[u8]) {
            self.outbound.extend_from_slice(bytes);
        }
    }

    impl DeviceLink for MockLink {
        fn listen(&mut self) {
            self.listen_calls += 1;
        }
    }

    /// Hand-cranked clock shared between the test and the bridge.
    #[derive(Clone, Default)]
    struct MockClock(Rc<Cell<u64>>);

    impl MockClock {
        fn advance(&self, ms: u64) {
            self.0.set(self.0.get() + ms);
        }
    }

    impl Clock for MockClock {
        fn now_millis(&self) -> u64 {
            self.0.get()
        }
    }

    /// Sampler with settable levels, recording which pins were read.
    #[derive(Clone, Default)]
    struct MockSampler {
        digital: Rc<RefCell<[bool; 14]>>,
        analog: Rc<RefCell<[u16; 6]>>,
    }

    impl PinSampler for MockSampler {
        fn read_digital(&mut self, index: u8) -> bool {
            self.digital.borrow()[index as usize]
        }

        fn read_analog(&mut self, index: u8) -> u16 {
            self.analog.borrow()[index as usize]
        }
    }

    type TestBridge = Bridge<MockLink, MockLink, MockSampler, MockClock>;

    fn bridge() -> (TestBridge, MockClock, MockSampler) {
        let clock = MockClock::default();
        let sampler = MockSampler::default();
        let bridge = Bridge::new(
            MockLink::default(),
            MockLink::default(),
            sampler.clone(),
            clock.clone(),
            BridgeConfig::default(),
        );
        (bridge, clock, sampler)
    }

    fn feed_host(bridge: &mut TestBridge, bytes: &[u8]) {
        bridge.host.feed(bytes);
    }

    fn host_output(bridge: &mut TestBridge) -> Vec<u8> {
        core::mem::take(&mut bridge.host.outbound)
    }

    #[test]
    fn test_config_line_acknowledged() {
        let (mut bridge, _clock, _sampler) = bridge();
        feed_host(&mut bridge, b"CFG:D2=1,A0=1\n");
        bridge.tick();

        assert_eq!(host_output(&mut bridge), b"CONFIG_UPDATED\n");
        assert!(bridge.monitor().digital(2));
        assert!(bridge.monitor().analog(0));
    }

    #[test]
    fn test_config_ack_even_for_garbage_pairs() {
        let (mut bridge, _clock, _sampler) = bridge();
        feed_host(&mut bridge, b"CFG:D99=1,A10=1\n");
        bridge.tick();

        assert_eq!(host_output(&mut bridge), b"CONFIG_UPDATED\n");
        assert!(!bridge.monitor().any_enabled());

        feed_host(&mut bridge, b"CFG:\n");
        bridge.tick();
        assert_eq!(host_output(&mut bridge), b"CONFIG_UPDATED\n");
    }

    #[test]
    fn test_passthrough_echo_and_forward() {
        let (mut bridge, _clock, _sampler) = bridge();
        feed_host(&mut bridge, b"hello\n");
        bridge.tick();

        // Blank line, marker line, blank line on the host side
        assert_eq!(host_output(&mut bridge), b"\n<- hello\n\n");
        // Raw trimmed bytes on the device side, no terminator
        assert_eq!(bridge.device.outbound, b"hello");
    }

    #[test]
    fn test_crlf_trimmed_before_dispatch() {
        let (mut bridge, _clock, _sampler) = bridge();
        feed_host(&mut bridge, b"hello\r\n");
        bridge.tick();

        assert_eq!(host_output(&mut bridge), b"\n<- hello\n\n");
        assert_eq!(bridge.device.outbound, b"hello");

        feed_host(&mut bridge, b"CFG:D2=1\r\n");
        bridge.tick();
        assert!(bridge.monitor().digital(2));
    }

    #[test]
    fn test_empty_line_dropped() {
        let (mut bridge, _clock, _sampler) = bridge();
        feed_host(&mut bridge, b"\n\r\n\n");
        bridge.tick();

        assert_eq!(host_output(&mut bridge), b"");
        assert_eq!(bridge.device.outbound, b"");
    }

    #[test]
    fn test_line_accumulates_across_ticks() {
        let (mut bridge, _clock, _sampler) = bridge();
        feed_host(&mut bridge, b"hel");
        bridge.tick();
        assert_eq!(host_output(&mut bridge), b"");

        feed_host(&mut bridge, b"lo\n");
        bridge.tick();
        assert_eq!(host_output(&mut bridge), b"\n<- hello\n\n");
    }

    #[test]
    fn test_overlong_line_discarded() {
        let (mut bridge, _clock, _sampler) = bridge();
        let long = vec![b'x'; MAX_LINE_LENGTH + 20];
        feed_host(&mut bridge, &long);
        feed_host(&mut bridge, b"\nCFG:D1=1\n");
        bridge.tick();

        // The oversized line vanished; the following line still works
        assert_eq!(host_output(&mut bridge), b"CONFIG_UPDATED\n");
        assert_eq!(bridge.device.outbound, b"");
        assert!(bridge.monitor().digital(1));
    }

    #[test]
    fn test_device_bytes_forwarded_verbatim() {
        let (mut bridge, _clock, _sampler) = bridge();
        bridge.device.feed(b"\x00raw bytes\xff");
        bridge.tick();

        assert_eq!(host_output(&mut bridge), b"\x00raw bytes\xff");
    }

    #[test]
    fn test_device_listen_called_every_tick() {
        let (mut bridge, _clock, _sampler) = bridge();
        for _ in 0..5 {
            bridge.tick();
        }
        assert_eq!(bridge.device.listen_calls, 5);
    }

    #[test]
    fn test_no_channels_means_no_status_lines() {
        let (mut bridge, clock, _sampler) = bridge();
        for _ in 0..50 {
            clock.advance(100);
            bridge.tick();
        }
        assert_eq!(host_output(&mut bridge), b"");
    }

    #[test]
    fn test_status_emitted_once_per_interval() {
        let (mut bridge, clock, sampler) = bridge();
        feed_host(&mut bridge, b"CFG:D3=1\n");
        bridge.tick();
        host_output(&mut bridge); // drop the ack
        sampler.digital.borrow_mut()[3] = true;

        // Not due yet
        clock.advance(99);
        bridge.tick();
        assert_eq!(host_output(&mut bridge), b"");

        // Due now; repeated ticks at the same instant emit nothing more
        clock.advance(1);
        bridge.tick();
        bridge.tick();
        bridge.tick();
        assert_eq!(host_output(&mut bridge), b"STATUS:D3:1\n");
    }

    #[test]
    fn test_status_ordering_digital_before_analog() {
        let (mut bridge, clock, sampler) = bridge();
        feed_host(&mut bridge, b"CFG:A0=1,D3=1\n");
        bridge.tick();
        host_output(&mut bridge);
        sampler.analog.borrow_mut()[0] = 512;

        for _ in 0..3 {
            clock.advance(100);
            bridge.tick();
        }
        let out = String::from_utf8(host_output(&mut bridge)).unwrap();
        for line in out.lines() {
            assert_eq!(line, "STATUS:D3:0,A0:512");
        }
        assert_eq!(out.lines().count(), 3);
    }

    #[test]
    fn test_reports_never_closer_than_interval() {
        let (mut bridge, clock, _sampler) = bridge();
        feed_host(&mut bridge, b"CFG:D0=1\n");
        bridge.tick();
        host_output(&mut bridge);

        let mut report_times = Vec::new();
        for step in 0..1000u64 {
            clock.advance(7); // deliberately not a divisor of 100
            bridge.tick();
            if !bridge.host.outbound.is_empty() {
                host_output(&mut bridge);
                report_times.push((step + 1) * 7);
            }
        }
        for pair in report_times.windows(2) {
            assert!(pair[1] - pair[0] >= 100);
        }
        assert!(report_times.len() > 1);
    }

    #[test]
    fn test_delayed_loop_fires_without_catch_up() {
        let (mut bridge, clock, _sampler) = bridge();
        feed_host(&mut bridge, b"CFG:D0=1\n");
        bridge.tick();
        host_output(&mut bridge);

        // Loop stalls for many intervals; exactly one report on resume
        clock.advance(1000);
        bridge.tick();
        assert_eq!(host_output(&mut bridge), b"STATUS:D0:0\n");

        bridge.tick();
        assert_eq!(host_output(&mut bridge), b"");
    }

    #[test]
    fn test_reconfiguration_changes_reports() {
        let (mut bridge, clock, _sampler) = bridge();
        feed_host(&mut bridge, b"CFG:D1=1\n");
        bridge.tick();
        host_output(&mut bridge);

        clock.advance(100);
        bridge.tick();
        assert_eq!(host_output(&mut bridge), b"STATUS:D1:0\n");

        feed_host(&mut bridge, b"CFG:D1=0,A2=1\n");
        clock.advance(100);
        bridge.tick();
        assert_eq!(host_output(&mut bridge), b"CONFIG_UPDATED\nSTATUS:A2:0\n");
    }

    #[test]
    fn test_phases_interleave_in_one_tick() {
        let (mut bridge, clock, _sampler) = bridge();
        feed_host(&mut bridge, b"CFG:D5=1\n");
        bridge.device.feed(b"dev");
        clock.advance(100);
        bridge.tick();

        // Fixed phase order: host dispatch, device drain, then report
        assert_eq!(
            host_output(&mut bridge),
            b"CONFIG_UPDATED\ndevSTATUS:D5:0\n"
        );
    }

    #[test]
    fn test_custom_interval_respected() {
        let clock = MockClock::default();
        let mut bridge = Bridge::new(
            MockLink::default(),
            MockLink::default(),
            MockSampler::default(),
            clock.clone(),
            BridgeConfig {
                report_interval_ms: 250,
            },
        );
        bridge.host.feed(b"CFG:A1=1\n");
        bridge.tick();
        core::mem::take(&mut bridge.host.outbound);

        clock.advance(249);
        bridge.tick();
        assert!(bridge.host.outbound.is_empty());

        clock.advance(1);
        bridge.tick();
        assert_eq!(bridge.host.outbound, b"STATUS:A1:0\n");
    }
}
