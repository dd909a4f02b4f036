//! Recursive-descent value parser.
//!
//! The parser pulls characters through a [`Cursor`] and builds one complete
//! [`Value`] per call. Nothing is buffered between values except the single
//! character of lookahead a number leaves behind.
//!
//! Flattening is handled by selecting a [`Level`] for the outermost call:
//! at [`Level::FlattenTop`] a `,` continues the stream and `]` ends it, at
//! [`Level::Normal`] both are ordinary syntax errors. Nested values are always
//! parsed at `Normal`.
pub(crate) mod numbers;
pub(crate) mod strings;

use alloc::vec::Vec;

use crate::{
    cursor::Cursor,
    error::{DecodeError, ParseError},
    options::DecoderOptions,
    source::CharSource,
    value::Value,
};

/// Parsing state for one recursion level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Level {
    /// Inside a value, or at the top of an unflattened stream.
    Normal,
    /// Directly inside the innermost flattened wrapper array.
    FlattenTop {
        /// No element has been yielded yet.
        first: bool,
    },
}

#[derive(Debug)]
pub(crate) struct ValueParser<S> {
    pub(crate) cursor: Cursor<S>,
    options: DecoderOptions,
}

impl<S: CharSource> ValueParser<S> {
    pub(crate) fn new(source: S, options: DecoderOptions) -> Self {
        Self {
            cursor: Cursor::new(source),
            options,
        }
    }

    pub(crate) fn options(&self) -> &DecoderOptions {
        &self.options
    }

    /// Consumes the `flatten_depth` opening brackets of the wrapper.
    pub(crate) fn open_wrapper(&mut self) -> Result<(), ParseError> {
        for _ in 0..self.options.flatten_depth {
            match self.cursor.next_char()? {
                Some('[') => {}
                Some(found) => {
                    return Err(DecodeError::Expected {
                        expected: "'[' opening the flattened wrapper",
                        found,
                    }
                    .into());
                }
                None => return Err(ParseError::UnexpectedEndOfInput),
            }
        }
        Ok(())
    }

    /// Parses the value introduced by `ch`, the cursor's peeked character.
    ///
    /// Returns `Ok(None)` when a flattened stream has been closed.
    pub(crate) fn parse_value(
        &mut self,
        ch: char,
        level: Level,
        depth: usize,
    ) -> Result<Option<Value>, ParseError> {
        match (level, ch) {
            (Level::Normal, _) => self.parse_element(ch, depth).map(Some),
            (Level::FlattenTop { first: true }, ',') => Err(DecodeError::Expected {
                expected: "a value",
                found: ch,
            }
            .into()),
            (Level::FlattenTop { first: false }, ',') => {
                self.cursor.bump();
                let next = self.cursor.require_non_whitespace()?;
                self.parse_element(next, depth).map(Some)
            }
            (Level::FlattenTop { .. }, ']') => {
                self.cursor.bump();
                self.close_wrapper()?;
                Ok(None)
            }
            (Level::FlattenTop { first: true }, _) => self.parse_element(ch, depth).map(Some),
            (Level::FlattenTop { first: false }, found) => Err(DecodeError::Expected {
                expected: "',' or ']'",
                found,
            }
            .into()),
        }
    }

    /// Verifies the remaining `flatten_depth - 1` closing brackets.
    fn close_wrapper(&mut self) -> Result<(), ParseError> {
        let depth = self.options.flatten_depth;
        for _ in 1..depth {
            if self.cursor.next_char()? != Some(']') {
                return Err(DecodeError::FlattenClose { depth }.into());
            }
        }
        Ok(())
    }

    fn parse_element(&mut self, ch: char, depth: usize) -> Result<Value, ParseError> {
        match ch {
            '{' => {
                self.cursor.bump();
                self.parse_object(self.enter(depth)?)
            }
            '[' => {
                self.cursor.bump();
                self.parse_array(self.enter(depth)?)
            }
            't' => self.parse_literal("rue", Value::Boolean(true)),
            'f' => self.parse_literal("alse", Value::Boolean(false)),
            'n' => self.parse_literal("ull", Value::Null),
            '"' => {
                self.cursor.bump();
                strings::lex_string(&mut self.cursor).map(Value::String)
            }
            '-' | '0'..='9' => Ok(numbers::lex_number(&mut self.cursor)?.into_value()?),
            other => Err(DecodeError::UnknownCharacter(other).into()),
        }
    }

    fn enter(&self, depth: usize) -> Result<usize, ParseError> {
        let depth = depth + 1;
        if depth > self.options.max_depth {
            return Err(ParseError::NestingTooDeep {
                max_depth: self.options.max_depth,
            });
        }
        Ok(depth)
    }

    fn parse_literal(&mut self, rest: &'static str, value: Value) -> Result<Value, ParseError> {
        self.cursor.bump();
        self.cursor.expect_literal(rest)?;
        Ok(value)
    }

    fn parse_object(&mut self, depth: usize) -> Result<Value, ParseError> {
        let mut pairs = Vec::new();
        loop {
            let mut ch = self.cursor.require_non_whitespace()?;
            if ch == '}' {
                self.cursor.bump();
                return Ok((self.options.object_pairs_hook)(pairs)?);
            }

            if !pairs.is_empty() {
                if ch != ',' {
                    return Err(expected("',' or '}'", ch));
                }
                self.cursor.bump();
                ch = self.cursor.require_non_whitespace()?;
            }

            if ch != '"' {
                return Err(expected("'\"' starting an object key", ch));
            }
            self.cursor.bump();
            let key = strings::lex_string(&mut self.cursor)?;

            let ch = self.cursor.require_non_whitespace()?;
            if ch != ':' {
                return Err(expected("':'", ch));
            }
            self.cursor.bump();

            let ch = self.cursor.require_non_whitespace()?;
            let value = self.parse_element(ch, depth)?;
            pairs.push((key, value));
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<Value, ParseError> {
        let mut items = Vec::new();
        loop {
            let mut ch = self.cursor.require_non_whitespace()?;
            if ch == ']' {
                self.cursor.bump();
                return Ok(Value::Array(items));
            }

            if !items.is_empty() {
                if ch != ',' {
                    return Err(expected("',' or ']'", ch));
                }
                self.cursor.bump();
                ch = self.cursor.require_non_whitespace()?;
            }

            items.push(self.parse_element(ch, depth)?);
        }
    }
}

fn expected(expected: &'static str, found: char) -> ParseError {
    DecodeError::Expected { expected, found }.into()
}
