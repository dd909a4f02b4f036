use alloc::string::String;

use thiserror::Error;

/// Errors that end a decoding stream.
///
/// Every error is terminal: once a [`StreamingValues`](crate::StreamingValues)
/// iterator yields one, it yields nothing further.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// The source ran out while more input was structurally required.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// Malformed syntax.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
    /// Containers were nested deeper than [`DecoderOptions::max_depth`].
    ///
    /// [`DecoderOptions::max_depth`]: crate::DecoderOptions::max_depth
    #[error("nesting exceeds the maximum depth of {max_depth}")]
    NestingTooDeep {
        /// The configured limit.
        max_depth: usize,
    },
    /// The character source itself failed.
    #[error("source error: {0}")]
    Source(#[from] SourceError),
}

/// Malformed-syntax errors, each naming what was expected and what was found.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// A character that cannot start a value.
    #[error("unknown character {0:?}")]
    UnknownCharacter(char),
    /// A structural character other than the one the grammar requires.
    #[error("expected {expected}, got {found:?}")]
    Expected {
        /// Description of the acceptable characters.
        expected: &'static str,
        /// The character actually read.
        found: char,
    },
    /// `true`, `false`, or `null` misspelt or cut short; holds the missing rest.
    #[error("expected {0:?}")]
    ExpectedLiteral(&'static str),
    /// A number literal missing a required digit.
    #[error("expected a digit, got {0:?}")]
    ExpectedDigit(char),
    /// A `\` followed by a character with no escape meaning.
    #[error("bad escape character {0:?}")]
    BadEscape(char),
    /// A `\u` escape whose four characters are not all hex digits.
    #[error("expected 4 hex digits in unicode escape, got {0:?}")]
    InvalidUnicodeEscape(String),
    /// A `\u` surrogate escape without its partner.
    #[error("unpaired surrogate \\u{0:04X} in unicode escape")]
    LoneSurrogate(u16),
    /// An unescaped character below U+0020 inside a string.
    #[error("unexpected control character {0:?} in string")]
    UnexpectedControlCharacter(char),
    /// A number whose integer part starts with `0` followed by a digit.
    #[error("digits follow a leading zero")]
    LeadingZero,
    /// A float literal too large for `f64`.
    #[error("number {0} is out of range")]
    NumberOutOfRange(String),
    /// The closing brackets of a flattened wrapper did not match its opening.
    #[error("expected {depth} closing brackets to end the flattened stream")]
    FlattenClose {
        /// The configured flatten depth.
        depth: usize,
    },
    /// Raised by [`factory::reject_duplicates`](crate::factory::reject_duplicates).
    #[error("duplicate object key {0:?}")]
    DuplicateKey(String),
}

/// Failures reported by a [`CharSource`](crate::CharSource).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SourceError {
    /// The reader produced bytes that are not UTF-8.
    #[error("input is not valid UTF-8")]
    InvalidUtf8,
    /// The reader failed; the error is flattened so that it stays `Clone`.
    #[error("i/o error ({kind:?}): {message}")]
    Io {
        /// Kind of the underlying error.
        kind: std::io::ErrorKind,
        /// Its rendered message.
        message: String,
    },
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            kind: err.kind(),
            message: alloc::string::ToString::to_string(&err),
        }
    }
}

impl ParseError {
    /// Returns `true` for [`ParseError::UnexpectedEndOfInput`].
    #[must_use]
    pub fn is_eof(&self) -> bool {
        matches!(self, Self::UnexpectedEndOfInput)
    }
}
