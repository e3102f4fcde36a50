//! Status line serialization.
//!
//! A status report is a single line listing the sampled value of every
//! monitored channel:
//!
//! ```text
//! STATUS:D2:1,D3:0,A0:512\n
//! ```
//!
//! Digital entries come first, then analog entries, each group in
//! ascending index order. The caller is responsible for that ordering;
//! this module only handles the byte layout.

use crate::fmt::{write_u16, write_u8};
use crate::types::{ANALOG_CHANNEL_COUNT, DIGITAL_CHANNEL_COUNT};

/// Prefix of every status report line.
pub const STATUS_PREFIX: &[u8] = b"STATUS:";

/// Maximum size of a serialized status line.
///
/// Breakdown: prefix(7) + 14 digital entries ("D13:1," = 6 each) + 6
/// analog entries ("A5:65535," = 9 each, last comma replaced by the
/// newline). 7 + 84 + 54 + 1 = 146; rounded up for safety margin.
pub const MAX_STATUS_LINE: usize =
    STATUS_PREFIX.len() + DIGITAL_CHANNEL_COUNT * 6 + ANALOG_CHANNEL_COUNT * 9 + 8;

/// Incremental serializer for one status line.
///
/// Writes directly into a caller-provided buffer. The `STATUS:` prefix
/// is only committed once the first entry is pushed, so a writer that is
/// finished without entries yields no output at all - the protocol never
/// emits an empty report.
///
/// # Example
///
/// ```
/// use pinbridge_proto::StatusWriter;
///
/// let mut buf = [0u8; pinbridge_proto::MAX_STATUS_LINE];
/// let mut w = StatusWriter::new(&mut buf);
/// w.digital(2, true);
/// w.analog(0, 512);
/// let len = w.finish().unwrap();
/// assert_eq!(&buf[..len], b"STATUS:D2:1,A0:512\n");
/// ```
pub struct StatusWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
    entries: usize,
}

impl<'a> StatusWriter<'a> {
    /// Create a writer over `buf`, which must hold [`MAX_STATUS_LINE`] bytes.
    ///
    /// # Panics
    ///
    /// Entry methods panic if the buffer is smaller than [`MAX_STATUS_LINE`].
    #[must_use]
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0, entries: 0 }
    }

    /// Append a digital entry: `D<index>:<0|1>`.
    pub fn digital(&mut self, index: u8, level: bool) {
        self.begin_entry(b'D', index);
        self.write_byte(if level { b'1' } else { b'0' });
    }

    /// Append an analog entry: `A<index>:<raw>`.
    pub fn analog(&mut self, index: u8, raw: u16) {
        self.begin_entry(b'A', index);
        self.pos += write_u16(&mut self.buf[self.pos..], raw);
    }

    /// Terminate the line with a newline.
    ///
    /// Returns the total line length, or `None` if no entry was pushed
    /// (in which case the buffer contents are unspecified and nothing
    /// should be transmitted).
    #[must_use]
    pub fn finish(mut self) -> Option<usize> {
        if self.entries == 0 {
            return None;
        }
        self.write_byte(b'\n');
        Some(self.pos)
    }

    /// Write the prefix (first entry only), separator, tag, and index.
    fn begin_entry(&mut self, tag: u8, index: u8) {
        if self.entries == 0 {
            self.write_slice(STATUS_PREFIX);
        } else {
            self.write_byte(b',');
        }
        self.entries += 1;

        self.write_byte(tag);
        self.pos += write_u8(&mut self.buf[self.pos..], index);
        self.write_byte(b':');
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) {
        self.buf[self.pos] = byte;
        self.pos += 1;
    }

    #[inline]
    fn write_slice(&mut self, bytes: &[u8]) {
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
    }
}
