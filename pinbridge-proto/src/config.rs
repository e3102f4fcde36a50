//! Configuration command parsing.
//!
//! A configuration command selects which channels are included in the
//! periodic status reports:
//!
//! ```text
//! CFG:D2=1,D3=0,A0=1\n
//! ```
//!
//! Parsing is deliberately forgiving: a malformed pair never fails the
//! command, it is skipped and the remaining pairs still apply. The
//! bridge acknowledges every command with [`CONFIG_ACK`] regardless of
//! how many pairs were usable.

use crate::types::Channel;

/// Prefix that marks a host line as a configuration command.
pub const CONFIG_PREFIX: &[u8] = b"CFG:";

/// Acknowledgement line sent after every configuration command.
pub const CONFIG_ACK: &[u8] = b"CONFIG_UPDATED";

/// One parsed configuration pair: a channel and its new monitor flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[must_use]
pub struct ConfigEntry {
    pub channel: Channel,
    pub enable: bool,
}

/// Check whether a (trimmed) host line is a configuration command.
#[inline]
#[must_use]
pub fn is_config_line(line: &[u8]) -> bool {
    line.starts_with(CONFIG_PREFIX)
}

/// Strip the configuration prefix, returning the pair list payload.
#[inline]
#[must_use]
pub fn config_payload(line: &[u8]) -> Option<&[u8]> {
    line.strip_prefix(CONFIG_PREFIX)
}

/// Iterator over the valid pairs of a configuration payload.
///
/// The payload splits on `,` into pair tokens; each token splits on the
/// first `=` into a channel identifier and a value. Tokens with no `=`
/// or a malformed channel identifier are skipped silently. The value is
/// parsed as a leading decimal integer (optional sign, digits up to the
/// first non-digit; no digits yields 0) and only an exact `1` enables.
///
/// Pairs are yielded in textual order, so later pairs for the same
/// channel override earlier ones when applied sequentially.
#[derive(Debug, Clone)]
pub struct ConfigEntries<'a> {
    rest: Option<&'a [u8]>,
}

impl<'a> ConfigEntries<'a> {
    /// Iterate the pairs of a config payload (the part after `CFG:`).
    #[must_use]
    pub fn new(payload: &'a [u8]) -> Self {
        Self { rest: Some(payload) }
    }
}

impl<'a> Iterator for ConfigEntries<'a> {
    type Item = ConfigEntry;

    fn next(&mut self) -> Option<ConfigEntry> {
        loop {
            let rest = self.rest?;

            let (token, remainder) = match rest.iter().position(|&b| b == b',') {
                Some(comma) => (&rest[..comma], Some(&rest[comma + 1..])),
                None => (rest, None),
            };
            self.rest = remainder;

            if let Some(entry) = parse_pair(token) {
                return Some(entry);
            }
            // Malformed pair: skip and continue with the next token
        }
    }
}

/// Parse a single `<Tag><Index>=<Value>` token, or `None` if malformed.
fn parse_pair(token: &[u8]) -> Option<ConfigEntry> {
    let eq = token.iter().position(|&b| b == b'=')?;
    let channel = Channel::parse(&token[..eq])?;
    let enable = parse_value(&token[eq + 1..]) == 1;
    Some(ConfigEntry { channel, enable })
}

/// Parse the value side of a pair as a leading decimal integer.
///
/// Mirrors the lenient integer conversion of the wire peers: an optional
/// sign, then digits up to the first non-digit; no digits parses as 0.
fn parse_value(bytes: &[u8]) -> i32 {
    let (negative, digits) = match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    };

    let mut value: i32 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            break;
        }
        value = value
            .saturating_mul(10)
            .saturating_add((b - b'0') as i32);
    }

    if negative {
        -value
    } else {
        value
    }
}
