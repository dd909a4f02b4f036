use alloc::string::String;

use crate::{
    cursor::Cursor,
    error::{DecodeError, ParseError},
    source::CharSource,
    value::Value,
};

/// Lexical class of a number literal: the text decides between integer and
/// float, never the magnitude.
#[derive(Debug, PartialEq)]
pub(crate) enum NumberLexeme {
    /// No `.` and no exponent.
    Integer(String),
    /// Has `.` or an exponent.
    Float(String),
}

impl NumberLexeme {
    /// Converts the literal to a value.
    ///
    /// Integers that do not fit `i64` keep their exact text as
    /// [`Value::BigInt`]. A float literal whose magnitude overflows `f64` is
    /// rejected.
    pub(crate) fn into_value(self) -> Result<Value, DecodeError> {
        match self {
            NumberLexeme::Integer(text) => match text.parse::<i64>() {
                Ok(n) => Ok(Value::Int(n)),
                Err(_) => Ok(Value::BigInt(text)),
            },
            NumberLexeme::Float(text) => parse_finite(text),
        }
    }
}

fn parse_finite(text: String) -> Result<Value, DecodeError> {
    match text.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Value::Float(n)),
        _ => Err(DecodeError::NumberOutOfRange(text)),
    }
}

/// Lexes a number whose first character (`-` or a digit) is the cursor's
/// peeked character.
///
/// Numbers have no terminator, so the character after the literal is read
/// and left in the cursor's pushback slot for the caller.
pub(crate) fn lex_number<S: CharSource>(
    cursor: &mut Cursor<S>,
) -> Result<NumberLexeme, ParseError> {
    let mut text = String::new();

    let mut ch = cursor.next_char_or_eof()?;
    if ch == '-' {
        text.push(ch);
        ch = cursor.next_char_or_eof()?;
    }
    if !ch.is_ascii_digit() {
        return Err(DecodeError::ExpectedDigit(ch).into());
    }
    text.push(ch);

    let more = take_digits(cursor, &mut text)?;
    if ch == '0' && more > 0 {
        return Err(DecodeError::LeadingZero.into());
    }

    let mut is_float = false;

    if cursor.peek()? == Some('.') {
        cursor.bump();
        text.push('.');
        require_digits(cursor, &mut text)?;
        is_float = true;
    }

    if let Some(e @ ('e' | 'E')) = cursor.peek()? {
        cursor.bump();
        text.push(e);
        if let Some(sign @ ('+' | '-')) = cursor.peek()? {
            cursor.bump();
            text.push(sign);
        }
        require_digits(cursor, &mut text)?;
        is_float = true;
    }

    Ok(if is_float {
        NumberLexeme::Float(text)
    } else {
        NumberLexeme::Integer(text)
    })
}

/// Consumes digits while they last; returns how many were taken.
fn take_digits<S: CharSource>(
    cursor: &mut Cursor<S>,
    text: &mut String,
) -> Result<usize, ParseError> {
    let mut count = 0;
    loop {
        match cursor.peek()? {
            Some(d) if d.is_ascii_digit() => {
                cursor.bump();
                text.push(d);
                count += 1;
            }
            _ => return Ok(count),
        }
    }
}

/// Like [`take_digits`], but at least one digit is mandatory.
fn require_digits<S: CharSource>(
    cursor: &mut Cursor<S>,
    text: &mut String,
) -> Result<(), ParseError> {
    let d = cursor.next_char_or_eof()?;
    if !d.is_ascii_digit() {
        return Err(DecodeError::ExpectedDigit(d).into());
    }
    text.push(d);
    take_digits(cursor, text)?;
    Ok(())
}
