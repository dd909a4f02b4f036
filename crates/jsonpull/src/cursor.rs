use crate::{
    error::{DecodeError, ParseError},
    source::CharSource,
};

/// A character source with a single-character pushback slot.
///
/// The slot holds the one character that has been read from the source but
/// not yet consumed by the parser. Every parsing step leaves it either empty
/// or holding exactly the character that ended the previous token.
#[derive(Debug)]
pub(crate) struct Cursor<S> {
    source: S,
    pending: Option<char>,
}

#[inline]
pub(crate) fn is_whitespace(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

impl<S: CharSource> Cursor<S> {
    pub(crate) fn new(source: S) -> Self {
        Self {
            source,
            pending: None,
        }
    }

    /// Returns the next character without consuming it.
    #[inline]
    pub(crate) fn peek(&mut self) -> Result<Option<char>, ParseError> {
        if self.pending.is_none() {
            self.pending = self.source.next_char()?;
        }
        Ok(self.pending)
    }

    /// Consumes the peeked character.
    #[inline]
    pub(crate) fn bump(&mut self) {
        debug_assert!(self.pending.is_some(), "bump without a peeked character");
        self.pending = None;
    }

    /// Consumes and returns the next character, `Ok(None)` at end of input.
    #[inline]
    pub(crate) fn next_char(&mut self) -> Result<Option<char>, ParseError> {
        match self.pending.take() {
            Some(ch) => Ok(Some(ch)),
            None => Ok(self.source.next_char()?),
        }
    }

    /// Like [`Cursor::next_char`], but end of input is an error.
    #[inline]
    pub(crate) fn next_char_or_eof(&mut self) -> Result<char, ParseError> {
        self.next_char()?.ok_or(ParseError::UnexpectedEndOfInput)
    }

    /// Discards whitespace and peeks at the first other character.
    ///
    /// `Ok(None)` means the source ran dry while skipping.
    pub(crate) fn skip_whitespace(&mut self) -> Result<Option<char>, ParseError> {
        loop {
            match self.peek()? {
                Some(ch) if is_whitespace(ch) => self.bump(),
                other => return Ok(other),
            }
        }
    }

    /// Like [`Cursor::skip_whitespace`], for positions where a token must follow.
    #[inline]
    pub(crate) fn require_non_whitespace(&mut self) -> Result<char, ParseError> {
        self.skip_whitespace()?
            .ok_or(ParseError::UnexpectedEndOfInput)
    }

    /// Reads exactly `literal.len()` characters and compares them to `literal`.
    ///
    /// Running out of input counts as a mismatch.
    pub(crate) fn expect_literal(&mut self, literal: &'static str) -> Result<(), ParseError> {
        for expected in literal.chars() {
            match self.next_char()? {
                Some(ch) if ch == expected => {}
                _ => return Err(DecodeError::ExpectedLiteral(literal).into()),
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::StrSource;

    fn cursor(text: &str) -> Cursor<StrSource<'_>> {
        Cursor::new(StrSource::new(text))
    }

    #[test]
    fn peek_does_not_consume() {
        let mut c = cursor("ab");
        assert_eq!(c.peek().unwrap(), Some('a'));
        assert_eq!(c.peek().unwrap(), Some('a'));
        c.bump();
        assert_eq!(c.next_char().unwrap(), Some('b'));
        assert_eq!(c.next_char().unwrap(), None);
    }

    #[test]
    fn skip_whitespace_stops_at_token() {
        let mut c = cursor(" \t\r\n x");
        assert_eq!(c.skip_whitespace().unwrap(), Some('x'));
        assert_eq!(c.next_char().unwrap(), Some('x'));
    }

    #[test]
    fn skip_whitespace_reports_exhaustion() {
        let mut c = cursor("   ");
        assert_eq!(c.skip_whitespace().unwrap(), None);
        assert_eq!(
            cursor("\n").require_non_whitespace(),
            Err(ParseError::UnexpectedEndOfInput)
        );
    }

    #[test]
    fn unicode_whitespace_is_not_skipped() {
        let mut c = cursor("\u{00A0}1");
        assert_eq!(c.skip_whitespace().unwrap(), Some('\u{00A0}'));
    }

    #[test]
    fn expect_literal_matches_and_mismatches() {
        let mut c = cursor("rue,");
        c.expect_literal("rue").unwrap();
        assert_eq!(c.next_char().unwrap(), Some(','));

        assert_eq!(
            cursor("ru").expect_literal("rue"),
            Err(DecodeError::ExpectedLiteral("rue").into())
        );
        assert_eq!(
            cursor("rux").expect_literal("rue"),
            Err(DecodeError::ExpectedLiteral("rue").into())
        );
    }
}
