//! Core channel types: ChannelKind, Channel.

/// Number of digital channels addressable by the protocol (D0..D13).
pub const DIGITAL_CHANNEL_COUNT: usize = 14;

/// Number of analog channels addressable by the protocol (A0..A5).
pub const ANALOG_CHANNEL_COUNT: usize = 6;

/// Kind of a monitorable pin: digital level or analog reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelKind {
    /// Digital pin, sampled as a 0/1 level (`D` tag).
    Digital,
    /// Analog pin, sampled as a raw ADC reading (`A` tag).
    Analog,
}

impl ChannelKind {
    /// The protocol tag letter for this kind.
    #[inline]
    #[must_use]
    pub const fn tag(self) -> u8 {
        match self {
            ChannelKind::Digital => b'D',
            ChannelKind::Analog => b'A',
        }
    }

    /// Map a protocol tag letter back to a kind.
    #[inline]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            b'D' => Some(ChannelKind::Digital),
            b'A' => Some(ChannelKind::Analog),
            _ => None,
        }
    }
}

/// A channel identifier as it appears on the wire: kind tag plus index.
///
/// Parsing validates the identifier *grammar* only. Range checking is the
/// monitor state's job, so an out-of-range but well-formed identifier
/// such as `D99` still parses here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Channel {
    pub kind: ChannelKind,
    pub index: u8,
}

impl Channel {
    #[must_use]
    pub const fn new(kind: ChannelKind, index: u8) -> Self {
        Self { kind, index }
    }

    #[must_use]
    pub const fn digital(index: u8) -> Self {
        Self::new(ChannelKind::Digital, index)
    }

    #[must_use]
    pub const fn analog(index: u8) -> Self {
        Self::new(ChannelKind::Analog, index)
    }

    /// Parse a channel identifier: one tag letter followed by decimal
    /// digits and nothing else.
    ///
    /// Returns `None` for an unknown tag, a missing index, a non-digit
    /// character in the index, or an index that does not fit in `u8`
    /// (no protocol channel index comes close to 255).
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        let (&tag, digits) = bytes.split_first()?;
        let kind = ChannelKind::from_tag(tag)?;

        if digits.is_empty() {
            return None;
        }

        let mut index: u16 = 0;
        for &b in digits {
            if !b.is_ascii_digit() {
                return None;
            }
            index = index.checked_mul(10)?.checked_add((b - b'0') as u16)?;
            if index > u8::MAX as u16 {
                return None;
            }
        }

        Some(Self::new(kind, index as u8))
    }

    /// Whether this channel's index is within the addressable range for
    /// its kind.
    #[inline]
    #[must_use]
    pub const fn in_range(self) -> bool {
        match self.kind {
            ChannelKind::Digital => (self.index as usize) < DIGITAL_CHANNEL_COUNT,
            ChannelKind::Analog => (self.index as usize) < ANALOG_CHANNEL_COUNT,
        }
    }
}
