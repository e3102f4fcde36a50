//! No-std compatible number formatting utilities for line serialization.
//!
//! These functions write decimal numbers directly to byte buffers without
//! requiring heap allocation or the standard library.

/// Write a u8 as an unsigned decimal string.
///
/// Returns the number of bytes written (1-3 bytes).
///
/// # Panics
///
/// Panics if `buf.len() < 3` (max size: "255").
#[inline]
pub fn write_u8(buf: &mut [u8], value: u8) -> usize {
    debug_assert!(buf.len() >= 3, "buffer too small for u8");
    write_u16(buf, value as u16)
}

/// Write a u16 as an unsigned decimal string.
///
/// Returns the number of bytes written (1-5 bytes).
///
/// # Panics
///
/// Panics if `buf` is too small for the decimal digits of `value`
/// (worst case 5 bytes, "65535").
#[inline]
pub fn write_u16(buf: &mut [u8], value: u16) -> usize {
    if value == 0 {
        buf[0] = b'0';
        return 1;
    }

    // Write digits in reverse order to temporary buffer
    let mut temp = [0u8; 5];
    let mut n = value;
    let mut len = 0;
    while n > 0 {
        temp[len] = b'0' + (n % 10) as u8;
        n /= 10;
        len += 1;
    }

    // Copy digits in correct order
    for i in (0..len).rev() {
        buf[len - 1 - i] = temp[i];
    }

    len
}
