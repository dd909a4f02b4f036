

use alloc::vec::Vec;

use crate::{DecoderOptions, ParseError, Value, parse_str};

/// Drains a stream, stopping at the first error.
pub(crate) fn collect(text: &str, options: DecoderOptions) -> Result<Vec<Value>, ParseError> {
    parse_str(text, options).collect()
}

/// Drains a stream, keeping the values yielded before an error as well as the
/// error itself.
pub(crate) fn collect_partial(text: &str, options: DecoderOptions) -> (Vec<Value>, Option<ParseError>) {
    let mut values = Vec::new();
    for item in parse_str(text, options) {
        match item {
            Ok(value) => values.push(value),
            Err(err) => return (values, Some(err)),
        }
    }
    (values, None)
}

pub(crate) fn flatten(depth: usize) -> DecoderOptions {
    DecoderOptions {
        flatten_depth: depth,
        ..Default::default()
    }
}
