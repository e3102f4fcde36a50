//! Compile-time configuration of the bridge firmware.
//!
//! Pin assignments live with the peripheral wiring in `main.rs`, since
//! embassy's typed pins cannot usefully be plain integers here:
//!
//! - Host link: UART0 on GPIO 0 (TX) / GPIO 1 (RX)
//! - Device link: UART1 on GPIO 8 (TX) / GPIO 9 (RX)
//! - Analog channels A0-A3: ADC on GPIO 26-29 (the RP2040 has no more)

/// Baud rate of the host-facing UART.
pub const HOST_BAUD: u32 = 9600;

/// Baud rate of the device-facing UART.
pub const DEVICE_BAUD: u32 = 9600;

/// Spacing of periodic status reports, in milliseconds.
pub const REPORT_INTERVAL_MS: u64 = 100;

/// Informational greeting printed on the host link at boot.
pub const STARTUP_BANNER: &[u8] = b"UART pin bridge ready at 9600 bps\n";

/// Capacity of each inbound byte queue (RX task to bridge loop).
pub const RX_QUEUE_LEN: usize = 64;

/// Capacity of the per-link staged output buffer. Must hold the largest
/// burst a single tick can produce on one link (a status line plus an
/// echoed passthrough line).
pub const TX_BUFFER_LEN: usize = 256;
