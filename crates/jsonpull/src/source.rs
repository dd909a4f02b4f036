//! Character sources feeding the decoder.
//!
//! A [`CharSource`] hands out one character per call and reports end of input
//! with `Ok(None)`. Sources are pulled lazily: the decoder never asks for more
//! than it needs to finish the value it is working on, plus at most one
//! character of lookahead after a number.

use core::str::Chars;
use std::io::{BufRead, ErrorKind};

use crate::error::SourceError;

/// A blocking, forward-only supply of characters.
pub trait CharSource {
    /// Returns the next character, or `Ok(None)` once the input is exhausted.
    ///
    /// # Errors
    ///
    /// Returns a [`SourceError`] if the underlying input cannot be read or
    /// decoded.
    fn next_char(&mut self) -> Result<Option<char>, SourceError>;
}

impl<S: CharSource + ?Sized> CharSource for &mut S {
    #[inline]
    fn next_char(&mut self) -> Result<Option<char>, SourceError> {
        (**self).next_char()
    }
}

/// Source over a borrowed string slice.
#[derive(Debug, Clone)]
pub struct StrSource<'a> {
    chars: Chars<'a>,
}

impl<'a> StrSource<'a> {
    /// Reads `text` from the start.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self {
            chars: text.chars(),
        }
    }
}

impl CharSource for StrSource<'_> {
    #[inline]
    fn next_char(&mut self) -> Result<Option<char>, SourceError> {
        Ok(self.chars.next())
    }
}

/// Source over any iterator of characters.
#[derive(Debug, Clone)]
pub struct IterSource<I> {
    iter: I,
}

impl<I: Iterator<Item = char>> IterSource<I> {
    /// Wraps `iter`.
    pub fn new(iter: I) -> Self {
        Self { iter }
    }
}

impl<I: Iterator<Item = char>> CharSource for IterSource<I> {
    #[inline]
    fn next_char(&mut self) -> Result<Option<char>, SourceError> {
        Ok(self.iter.next())
    }
}

/// Source decoding UTF-8 from a buffered reader, one scalar value at a time.
///
/// Bytes are pulled from the reader only as characters are requested, so a
/// reader attached to a pipe or socket blocks exactly when the decoder needs
/// more input.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    /// Wraps `reader`; nothing is read until the first character is requested.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Returns the wrapped reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn next_byte(&mut self) -> Result<Option<u8>, SourceError> {
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(err.into()),
            };
            let Some(&byte) = buf.first() else {
                return Ok(None);
            };
            self.reader.consume(1);
            return Ok(Some(byte));
        }
    }
}

/// Length of the UTF-8 sequence introduced by `lead`, or `None` if `lead`
/// cannot start a sequence.
fn utf8_width(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7F => Some(1),
        0xC2..=0xDF => Some(2),
        0xE0..=0xEF => Some(3),
        0xF0..=0xF4 => Some(4),
        _ => None,
    }
}

impl<R: BufRead> CharSource for ReaderSource<R> {
    fn next_char(&mut self) -> Result<Option<char>, SourceError> {
        let Some(lead) = self.next_byte()? else {
            return Ok(None);
        };
        let width = utf8_width(lead).ok_or(SourceError::InvalidUtf8)?;
        if width == 1 {
            return Ok(Some(char::from(lead)));
        }

        let mut bytes = [lead, 0, 0, 0];
        for slot in &mut bytes[1..width] {
            // A sequence cut short by end of input is malformed, not a clean end.
            *slot = self.next_byte()?.ok_or(SourceError::InvalidUtf8)?;
        }

        match bstr::decode_utf8(&bytes[..width]) {
            (Some(ch), size) if size == width => Ok(Some(ch)),
            _ => Err(SourceError::InvalidUtf8),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec, vec::Vec};

    use super::*;

    fn drain<S: CharSource>(mut source: S) -> Result<String, SourceError> {
        let mut out = String::new();
        while let Some(ch) = source.next_char()? {
            out.push(ch);
        }
        Ok(out)
    }

    #[test]
    fn str_source_yields_all_chars() {
        assert_eq!(drain(StrSource::new("aé😀")).unwrap(), "aé😀");
    }

    #[test]
    fn reader_source_decodes_multibyte() {
        let input = "x→😀\n".as_bytes();
        assert_eq!(drain(ReaderSource::new(input)).unwrap(), "x→😀\n");
    }

    #[test]
    fn reader_source_rejects_invalid_lead_byte() {
        let input: Vec<u8> = vec![b'"', 0xFF, b'"'];
        let mut source = ReaderSource::new(input.as_slice());
        assert_eq!(source.next_char(), Ok(Some('"')));
        assert_eq!(source.next_char(), Err(SourceError::InvalidUtf8));
    }

    #[test]
    fn reader_source_rejects_truncated_sequence() {
        let input: Vec<u8> = vec![0xE2, 0x86];
        assert_eq!(
            drain(ReaderSource::new(input.as_slice())),
            Err(SourceError::InvalidUtf8)
        );
    }

    #[test]
    fn reader_source_rejects_encoded_surrogate() {
        // U+D800 encoded directly as UTF-8 (CESU style)
        let input: Vec<u8> = vec![0xED, 0xA0, 0x80];
        assert_eq!(
            drain(ReaderSource::new(input.as_slice())),
            Err(SourceError::InvalidUtf8)
        );
    }

    #[test]
    fn iter_source_wraps_iterators() {
        let source = IterSource::new("abc".chars().rev());
        assert_eq!(drain(source).unwrap(), "cba");
    }
}
