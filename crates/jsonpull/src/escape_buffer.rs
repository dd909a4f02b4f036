//! Decoding of `\uXXXX` escapes.
//!
//! Each escape carries one UTF-16 code unit. The [`UnicodeEscapeBuffer`]
//! collects the four hexadecimal digits of a unit, and [`Utf16Pair`] joins a
//! high surrogate with the low surrogate that must follow it.
use alloc::string::String;

use crate::error::DecodeError;

/// Buffer for accumulating the four hexadecimal digits of one `\u` escape.
#[derive(Debug, Default)]
pub(crate) struct UnicodeEscapeBuffer {
    digits: [char; 4],
    len: u8,
}

impl UnicodeEscapeBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds one character of the escape.
    ///
    /// - `Ok(None)` while fewer than four digits have been seen.
    /// - `Ok(Some(unit))` on the fourth digit; the buffer is then empty again.
    /// - `Err` if `c` is not an ASCII hex digit. The error reports the digits
    ///   collected so far together with the offending character.
    pub fn feed(&mut self, c: char) -> Result<Option<u16>, DecodeError> {
        let len = usize::from(self.len);
        self.digits[len] = c;
        if !c.is_ascii_hexdigit() {
            let seen: String = self.digits[..=len].iter().collect();
            self.len = 0;
            return Err(DecodeError::InvalidUnicodeEscape(seen));
        }
        self.len += 1;

        if self.len < 4 {
            return Ok(None);
        }

        self.len = 0;
        let unit = self
            .digits
            .iter()
            .fold(0u16, |acc, d| (acc << 4) | hex_value(*d));
        Ok(Some(unit))
    }
}

#[inline]
fn hex_value(d: char) -> u16 {
    // Callers only pass ASCII hex digits.
    d.to_digit(16).and_then(|v| u16::try_from(v).ok()).unwrap_or(0)
}

#[inline]
pub(crate) fn is_high_surrogate(unit: u16) -> bool {
    (0xD800..=0xDBFF).contains(&unit)
}

#[inline]
pub(crate) fn is_low_surrogate(unit: u16) -> bool {
    (0xDC00..=0xDFFF).contains(&unit)
}

/// Outcome of feeding one UTF-16 unit into a [`Utf16Pair`].
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Unit {
    /// A complete scalar value.
    Char(char),
    /// A high surrogate; a low surrogate escape must come next.
    NeedLow,
}

/// Joins surrogate pairs spread over two consecutive `\u` escapes.
#[derive(Debug, Default)]
pub(crate) struct Utf16Pair {
    high: Option<u16>,
}

impl Utf16Pair {
    /// Returns `true` while a high surrogate is waiting for its partner.
    pub fn awaiting_low(&self) -> bool {
        self.high.is_some()
    }

    /// The waiting high surrogate, if any, leaving the pair empty.
    pub fn take_high(&mut self) -> Option<u16> {
        self.high.take()
    }

    pub fn feed(&mut self, unit: u16) -> Result<Unit, DecodeError> {
        match self.high.take() {
            Some(high) if is_low_surrogate(unit) => {
                let scalar =
                    0x10000 + ((u32::from(high) - 0xD800) << 10) + (u32::from(unit) - 0xDC00);
                char::from_u32(scalar)
                    .map(Unit::Char)
                    .ok_or(DecodeError::LoneSurrogate(high))
            }
            Some(high) => Err(DecodeError::LoneSurrogate(high)),
            None if is_high_surrogate(unit) => {
                self.high = Some(unit);
                Ok(Unit::NeedLow)
            }
            None if is_low_surrogate(unit) => Err(DecodeError::LoneSurrogate(unit)),
            None => char::from_u32(u32::from(unit))
                .map(Unit::Char)
                .ok_or(DecodeError::LoneSurrogate(unit)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit(hex: &str) -> Result<Option<u16>, DecodeError> {
        let mut buf = UnicodeEscapeBuffer::new();
        let mut out = None;
        for ch in hex.chars() {
            out = buf.feed(ch)?;
        }
        Ok(out)
    }

    #[test]
    fn basic_decoding() {
        let mut buf = UnicodeEscapeBuffer::new();
        assert_eq!(buf.feed('0').unwrap(), None);
        assert_eq!(buf.feed('0').unwrap(), None);
        assert_eq!(buf.feed('4').unwrap(), None);
        assert_eq!(buf.feed('1').unwrap(), Some(0x41));
    }

    #[test]
    fn mixed_case_hex() {
        assert_eq!(unit("AbCd").unwrap(), Some(0xABCD));
    }

    #[test]
    fn invalid_hex_error_reports_digits() {
        assert_eq!(
            unit("00G"),
            Err(DecodeError::InvalidUnicodeEscape("00G".into()))
        );
    }

    #[test]
    fn surrogate_pair_joins() {
        let mut pair = Utf16Pair::default();
        assert_eq!(pair.feed(0xD834).unwrap(), Unit::NeedLow);
        assert!(pair.awaiting_low());
        assert_eq!(pair.feed(0xDD1E).unwrap(), Unit::Char('𝄞'));
        assert!(!pair.awaiting_low());
    }

    #[test]
    fn lone_low_surrogate_rejected() {
        let mut pair = Utf16Pair::default();
        assert_eq!(pair.feed(0xDC00), Err(DecodeError::LoneSurrogate(0xDC00)));
    }

    #[test]
    fn high_surrogate_followed_by_bmp_rejected() {
        let mut pair = Utf16Pair::default();
        pair.feed(0xD800).unwrap();
        assert_eq!(pair.feed(0x0041), Err(DecodeError::LoneSurrogate(0xD800)));
    }
}
