//! Decoding of `\uXXXX` escapes.
//!
//! [`UnicodeEscapeBuffer`] accumulates exactly four ASCII hexadecimal digits
//! into a UTF-16 code unit. [`combine_surrogates`] then turns one or two code
//! units into a `char`, since a `\uXXXX` escape outside the BMP is written as
//! a surrogate pair.
//!
//! # Errors
//!
//! - Feeding a non-hexadecimal character returns
//!   [`SyntaxError::InvalidUnicodeEscapeChar`].
//! - A lone or mismatched surrogate returns
//!   [`SyntaxError::InvalidUnicodeEscapeSequence`].

use super::error::SyntaxError;

#[derive(Debug)]
/// Accumulates up to four hexadecimal digits into a UTF-16 code unit.
pub(crate) struct UnicodeEscapeBuffer {
    acc: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub(crate) fn new() -> Self {
        Self { acc: 0, len: 0 }
    }

    pub(crate) fn reset(&mut self) {
        self.acc = 0;
        self.len = 0;
    }

    #[inline]
    fn hex_val(c: char) -> Option<u16> {
        c.to_digit(16).and_then(|d| u16::try_from(d).ok())
    }

    /// Feeds one hex digit.
    ///
    /// Returns `Ok(None)` until the fourth digit arrives, then the decoded
    /// code unit; the buffer resets itself after a complete unit.
    pub(crate) fn feed(&mut self, c: char) -> Result<Option<u16>, SyntaxError> {
        let d = Self::hex_val(c).ok_or(SyntaxError::InvalidUnicodeEscapeChar(c))?;

        if self.len >= 4 {
            unreachable!();
        }

        self.acc = (self.acc << 4) | d;
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        let unit = self.acc;
        self.reset();
        Ok(Some(unit))
    }
}

pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Decodes a BMP code unit, or a high surrogate followed by a low surrogate.
pub(crate) fn combine_surrogates(high: u16, low: Option<u16>) -> Result<char, SyntaxError> {
    let code = match low {
        None => u32::from(high),
        Some(low) if is_high_surrogate(high) && is_low_surrogate(low) => {
            0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
        }
        Some(low) => return Err(SyntaxError::InvalidUnicodeEscapeSequence(u32::from(low))),
    };
    char::from_u32(code).ok_or(SyntaxError::InvalidUnicodeEscapeSequence(code))
}
