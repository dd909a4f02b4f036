//! A pull-based, incremental JSON stream decoder.
//!
//! `jsonpull` reads characters from a [`CharSource`] on demand and yields one
//! complete [`Value`] per top-level JSON value, without first loading the
//! whole input into memory.
//!
//! ```rust
//! use jsonpull::{DecoderOptions, Value};
//!
//! let values: Vec<Value> = jsonpull::parse_str(r#"1 "two" [3]"#, DecoderOptions::default())
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(values[0], Value::Int(1));
//! assert_eq!(values[2].to_string(), "[3]");
//! ```
//!
//! With [`DecoderOptions::flatten_depth`] set, the elements of a wrapper
//! array are streamed individually and the wrapper itself is never built:
//!
//! ```rust
//! use jsonpull::DecoderOptions;
//!
//! let options = DecoderOptions { flatten_depth: 2, ..Default::default() };
//! let values: Vec<String> = jsonpull::parse_str("[[1, 2, 3]]", options)
//!     .map(|v| v.unwrap().to_string())
//!     .collect();
//! assert_eq!(values, ["1", "2", "3"]);
//! ```

extern crate alloc;

mod cursor;
mod error;
mod escape_buffer;
pub mod factory;
mod options;
mod parser;
mod source;
mod streaming_values;
mod value;

#[cfg(feature = "conformance")]
pub mod conformance;

#[cfg(test)]
mod tests;

use std::io::BufRead;

pub use error::{DecodeError, ParseError, SourceError};
pub use factory::ObjectPairsHook;
pub use options::{DEFAULT_MAX_DEPTH, DecoderOptions};
pub use source::{CharSource, IterSource, ReaderSource, StrSource};
pub use streaming_values::StreamingValues;
pub use value::{Array, Map, Value};

/// Decodes a stream of top-level values from `source`.
///
/// The returned iterator pulls characters lazily; nothing is read until the
/// first call to `next`.
pub fn parse_stream<S: CharSource>(source: S, options: DecoderOptions) -> StreamingValues<S> {
    StreamingValues::new(source, options)
}

/// Decodes the values contained in `text`.
pub fn parse_str(text: &str, options: DecoderOptions) -> StreamingValues<StrSource<'_>> {
    parse_stream(StrSource::new(text), options)
}

/// Decodes UTF-8 text read incrementally from `reader`.
pub fn parse_reader<R: BufRead>(
    reader: R,
    options: DecoderOptions,
) -> StreamingValues<ReaderSource<R>> {
    parse_stream(ReaderSource::new(reader), options)
}
