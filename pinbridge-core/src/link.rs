//! Serial link and clock seams.
//!
//! These traits abstract the two serial connections and the time source,
//! allowing different transports (hardware UART, emulated serial, test
//! byte queues) to be used interchangeably. All methods are non-blocking:
//! the bridge loop only ever consumes data that has already arrived.

/// A byte-oriented serial connection.
///
/// # `no_std` Compatibility
///
/// All implementations must be `#![no_std]` compatible with no heap
/// allocation.
pub trait SerialLink {
    /// Take the next buffered inbound byte, or `None` if nothing has
    /// arrived. Must never wait for more data.
    fn try_read(&mut self) -> Option<u8>;

    /// Queue `bytes` for transmission, best effort.
    ///
    /// The wire protocol has no delivery guarantees; implementations
    /// drop what they cannot buffer rather than block or fail.
    fn write_all(&mut self, bytes: &[u8]);
}

/// The secondary serial connection to the attached device.
///
/// Emulated serial transports are half-duplex and service a single
/// listener at a time, so the bridge explicitly claims the link before
/// each drain. With one device link this re-affirms the active listener;
/// with several it is what arbitrates between them.
pub trait DeviceLink: SerialLink {
    /// Become the exclusive listener on the shared receive path.
    ///
    /// Called once per loop iteration, immediately before draining.
    /// Transports whose receiver is always active need not override it.
    fn listen(&mut self) {}
}

/// Monotonic millisecond time source for the report timer.
pub trait Clock {
    /// Milliseconds since an arbitrary epoch, nondecreasing.
    fn now_millis(&self) -> u64;
}
