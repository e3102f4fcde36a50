//! Line protocol for the UART pin bridge.
//!
//! This crate defines the text protocol spoken on the host link without
//! any platform-specific dependencies. It can be used both in embedded
//! `no_std` environments and on host for testing.
//!
//! # Protocol
//!
//! All traffic is newline-terminated text lines.
//!
//! **Configuration command** (host to bridge):
//! ```text
//! CFG:<Tag><Index>=<Value>{,<Tag><Index>=<Value>}\n
//! ```
//! `Tag` is `D` (digital) or `A` (analog), `Index` a decimal pin number,
//! and a `Value` of exactly `1` enables monitoring of that channel. The
//! bridge answers every configuration command with the literal line
//! `CONFIG_UPDATED`.
//!
//! **Status report** (bridge to host, periodic):
//! ```text
//! STATUS:D<Index>:<0|1>{,<entry>},A<Index>:<raw>{,<entry>}\n
//! ```
//! Digital entries precede analog entries, each group in ascending index
//! order. No line is emitted while no channel is enabled.
//!
//! There is no checksum or framing: the protocol is best effort by
//! design, and malformed pairs are skipped rather than rejected.
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod config;
pub mod fmt;
pub mod status;
pub mod types;

// Re-export main types at crate root
pub use config::{config_payload, is_config_line, ConfigEntries, ConfigEntry, CONFIG_ACK, CONFIG_PREFIX};
pub use status::{StatusWriter, MAX_STATUS_LINE, STATUS_PREFIX};
pub use types::{Channel, ChannelKind, ANALOG_CHANNEL_COUNT, DIGITAL_CHANNEL_COUNT};

/// Maximum accepted length of an inbound host line (excluding newline).
pub const MAX_LINE_LENGTH: usize = 64;
