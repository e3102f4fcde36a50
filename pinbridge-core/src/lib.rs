//! Platform-agnostic core of the UART pin bridge.
//!
//! This crate provides the monitoring state, the hardware seams, and the
//! cooperative bridge loop without any platform-specific dependencies.
//! It can be used both in embedded `no_std` environments and on host for
//! testing.
//!
//! # Overview
//!
//! - [`monitor`]: which channels are included in status reports ([`MonitorState`])
//! - [`sampler`]: pin sampling seam ([`PinSampler`])
//! - [`report`]: periodic status line construction ([`write_status`])
//! - [`link`]: serial link and clock seams ([`SerialLink`], [`DeviceLink`], [`Clock`])
//! - [`bridge`]: the three-phase cooperative loop ([`Bridge`])
//!
//! # Architecture
//!
//! The bridge is a single logical thread of control: every call to
//! [`Bridge::tick`] services host input, device input, and the report
//! timer in fixed order, each phase bounded by the data already buffered.
//! All hardware access goes through the seam traits, so the whole loop
//! runs under test with synthetic byte queues and a hand-cranked clock.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod bridge;
pub mod link;
pub mod monitor;
pub mod report;
pub mod sampler;

// Re-export main types at crate root
pub use bridge::{Bridge, BridgeConfig};
pub use link::{Clock, DeviceLink, SerialLink};
pub use monitor::{apply_config, MonitorState};
pub use report::write_status;
pub use sampler::PinSampler;

// The wire protocol is part of the public surface
pub use pinbridge_proto::{
    Channel, ChannelKind, ConfigEntry, ANALOG_CHANNEL_COUNT, CONFIG_ACK, DIGITAL_CHANNEL_COUNT,
    MAX_LINE_LENGTH, MAX_STATUS_LINE,
};
