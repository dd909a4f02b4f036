use tracing::{debug, trace, warn};

use crate::{
    error::ParseError,
    options::DecoderOptions,
    parser::{Level, ValueParser},
    source::CharSource,
    value::Value,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Flatten wrapper not yet opened.
    Start,
    Values,
    Done,
    Failed,
}

/// Lazy sequence of top-level values pulled from a [`CharSource`].
///
/// Created by [`parse_stream`](crate::parse_stream). Each call to
/// [`Iterator::next`] reads just enough input to complete one value. The
/// iterator is fused: after the stream ends, or after the first error, it
/// only returns `None`.
#[derive(Debug)]
pub struct StreamingValues<S> {
    parser: ValueParser<S>,
    state: State,
    yielded: usize,
}

impl<S: CharSource> StreamingValues<S> {
    pub(crate) fn new(source: S, options: DecoderOptions) -> Self {
        debug!(
            flatten_depth = options.flatten_depth,
            max_depth = options.max_depth,
            "starting value stream"
        );
        Self {
            parser: ValueParser::new(source, options),
            state: State::Start,
            yielded: 0,
        }
    }

    /// Number of values yielded so far.
    #[must_use]
    pub fn values_yielded(&self) -> usize {
        self.yielded
    }

    fn flattening(&self) -> bool {
        self.parser.options().flatten_depth > 0
    }

    fn level(&self) -> Level {
        if self.flattening() {
            Level::FlattenTop {
                first: self.yielded == 0,
            }
        } else {
            Level::Normal
        }
    }

    fn pull(&mut self) -> Result<Option<Value>, ParseError> {
        if self.state == State::Start {
            self.parser.open_wrapper()?;
            self.state = State::Values;
        }

        let Some(ch) = self.parser.cursor.skip_whitespace()? else {
            // Between values end of input is a clean stop, unless a
            // flattened wrapper is still open.
            return if self.flattening() {
                Err(ParseError::UnexpectedEndOfInput)
            } else {
                Ok(None)
            };
        };

        self.parser.parse_value(ch, self.level(), 0)
    }
}

impl<S: CharSource> Iterator for StreamingValues<S> {
    type Item = Result<Value, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if matches!(self.state, State::Done | State::Failed) {
            return None;
        }

        match self.pull() {
            Ok(Some(value)) => {
                trace!(index = self.yielded, %value, "yielding value");
                self.yielded += 1;
                Some(Ok(value))
            }
            Ok(None) => {
                debug!(values = self.yielded, "value stream finished");
                self.state = State::Done;
                None
            }
            Err(err) => {
                warn!(values = self.yielded, error = %err, "value stream failed");
                self.state = State::Failed;
                Some(Err(err))
            }
        }
    }
}

impl<S: CharSource> core::iter::FusedIterator for StreamingValues<S> {}
