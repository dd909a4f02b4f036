#![expect(missing_docs)]

use std::io::{self, BufRead, BufReader, Cursor, Read};

use jsonpull::{
    CharSource, DecoderOptions, ParseError, ReaderSource, SourceError, Value, parse_reader,
    parse_stream,
};

/// Reads one byte per call, so every multi-byte character spans reads.
struct ByteAtATime<R>(R);

impl<R: Read> Read for ByteAtATime<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let len = buf.len().min(1);
        self.0.read(&mut buf[..len])
    }
}

/// Fails with the given error kind once the inner reader is exhausted.
struct FailingAfter<R> {
    inner: R,
    kind: io::ErrorKind,
}

impl<R: Read> Read for FailingAfter<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.inner.read(buf)? {
            0 => Err(io::Error::new(self.kind, "connection reset")),
            n => Ok(n),
        }
    }
}

/// Interrupts every other read.
struct Interrupting<R> {
    inner: R,
    interrupt: bool,
}

impl<R: Read> Read for Interrupting<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            return Err(io::ErrorKind::Interrupted.into());
        }
        self.inner.read(buf)
    }
}

fn rendered<R: BufRead>(reader: R, options: DecoderOptions) -> Vec<String> {
    parse_reader(reader, options)
        .map(|v| v.unwrap().to_string())
        .collect()
}

#[test]
fn multibyte_characters_across_reads() {
    let text = r#"{"grüße": "日本語 😀"} ["→"]"#;
    let reader = BufReader::with_capacity(1, ByteAtATime(text.as_bytes()));
    assert_eq!(
        rendered(reader, DecoderOptions::default()),
        [r#"{"grüße":"日本語 😀"}"#, r#"["→"]"#]
    );
}

#[test]
fn flattened_stream_from_reader() {
    let text = "[[1, 2],\n [3]]";
    let options = DecoderOptions {
        flatten_depth: 1,
        ..Default::default()
    };
    assert_eq!(
        rendered(Cursor::new(text), options),
        ["[1,2]", "[3]"]
    );
}

#[test]
fn io_error_ends_stream() {
    let reader = BufReader::new(FailingAfter {
        inner: "[1] [2".as_bytes(),
        kind: io::ErrorKind::ConnectionReset,
    });
    let mut stream = parse_reader(reader, DecoderOptions::default());
    assert_eq!(stream.next(), Some(Ok(Value::Array(vec![Value::Int(1)]))));
    match stream.next() {
        Some(Err(ParseError::Source(SourceError::Io { kind, .. }))) => {
            assert_eq!(kind, io::ErrorKind::ConnectionReset);
        }
        other => panic!("expected an i/o error, got {other:?}"),
    }
    assert_eq!(stream.next(), None);
}

#[test]
fn interrupted_reads_are_retried() {
    let reader = BufReader::with_capacity(
        2,
        Interrupting {
            inner: r#"{"a": [true, null]}"#.as_bytes(),
            interrupt: false,
        },
    );
    assert_eq!(
        rendered(reader, DecoderOptions::default()),
        [r#"{"a":[true,null]}"#]
    );
}

#[test]
fn reader_is_not_drained_past_the_value() {
    let mut source = ReaderSource::new(Cursor::new("[1] rest"));
    let first = parse_stream(&mut source, DecoderOptions::default())
        .next()
        .unwrap()
        .unwrap();
    assert_eq!(first.to_string(), "[1]");

    let mut remaining = String::new();
    while let Some(ch) = source.next_char().unwrap() {
        remaining.push(ch);
    }
    assert_eq!(remaining, " rest");
}

#[test]
fn invalid_utf8_is_a_source_error() {
    let bytes: &[u8] = b"[1, \"\xf0\x9f\x98\"]";
    let mut stream = parse_reader(bytes, DecoderOptions::default());
    assert_eq!(
        stream.next(),
        Some(Err(ParseError::Source(SourceError::InvalidUtf8)))
    );
}
