use alloc::string::String;

use crate::{
    cursor::Cursor,
    error::{DecodeError, ParseError},
    escape_buffer::{Unit, UnicodeEscapeBuffer, Utf16Pair},
    source::CharSource,
};

/// Lexes a string literal body. The opening quote has already been consumed;
/// the closing quote is consumed and not returned.
pub(crate) fn lex_string<S: CharSource>(cursor: &mut Cursor<S>) -> Result<String, ParseError> {
    let mut out = String::new();
    let mut escape = UnicodeEscapeBuffer::new();
    let mut pair = Utf16Pair::default();

    loop {
        let ch = cursor.next_char_or_eof()?;
        if pair.awaiting_low() && ch != '\\' {
            return Err(unpaired(&mut pair));
        }

        match ch {
            '"' => return Ok(out),
            '\\' => {
                let esc = cursor.next_char_or_eof()?;
                if pair.awaiting_low() && esc != 'u' {
                    return Err(unpaired(&mut pair));
                }
                match esc {
                    '"' => out.push('"'),
                    '\\' => out.push('\\'),
                    '/' => out.push('/'),
                    'b' => out.push('\u{0008}'),
                    'f' => out.push('\u{000C}'),
                    'n' => out.push('\n'),
                    'r' => out.push('\r'),
                    't' => out.push('\t'),
                    'u' => {
                        let unit = lex_unit(cursor, &mut escape)?;
                        if let Unit::Char(c) = pair.feed(unit)? {
                            out.push(c);
                        }
                    }
                    other => return Err(DecodeError::BadEscape(other).into()),
                }
            }
            c if u32::from(c) <= 0x1F => {
                return Err(DecodeError::UnexpectedControlCharacter(c).into());
            }
            c => out.push(c),
        }
    }
}

/// Reads the four hex digits following `\u`.
fn lex_unit<S: CharSource>(
    cursor: &mut Cursor<S>,
    escape: &mut UnicodeEscapeBuffer,
) -> Result<u16, ParseError> {
    loop {
        let ch = cursor.next_char_or_eof()?;
        if let Some(unit) = escape.feed(ch)? {
            return Ok(unit);
        }
    }
}

fn unpaired(pair: &mut Utf16Pair) -> ParseError {
    DecodeError::LoneSurrogate(pair.take_high().unwrap_or_default()).into()
}
