//! UART pin bridge firmware for RP2040.
//!
//! This crate provides the embedded implementation of a bidirectional
//! serial bridge that relays bytes between a host-facing UART and a
//! device-facing UART while periodically reporting configured pin
//! readings upstream.

#![no_std]

// Re-export core types for convenience
pub use pinbridge_core::{
    Bridge, BridgeConfig, Clock, DeviceLink, MonitorState, PinSampler, SerialLink,
    ANALOG_CHANNEL_COUNT, DIGITAL_CHANNEL_COUNT,
};

pub mod config;
pub mod links;
pub mod sampler;

pub use links::{uart_rx_task, RxQueue, UartLink};
pub use sampler::RpPinSampler;

use embassy_time::Instant;

/// Millisecond uptime clock for the report timer.
pub struct UptimeClock;

impl Clock for UptimeClock {
    fn now_millis(&self) -> u64 {
        Instant::now().as_millis()
    }
}
