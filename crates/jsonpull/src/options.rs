use crate::factory::{self, ObjectPairsHook};

/// Default for [`DecoderOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Configuration options for the stream decoder.
///
/// # Examples
///
/// ```rust
/// use jsonpull::{DecoderOptions, factory};
///
/// let options = DecoderOptions {
///     flatten_depth: 1,
///     object_pairs_hook: factory::reject_duplicates,
///     ..Default::default()
/// };
/// let values: Vec<_> = jsonpull::parse_str("[1, 2]", options)
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(values.len(), 2);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DecoderOptions {
    /// Converts the ordered members of each object into a value.
    ///
    /// # Default
    ///
    /// [`factory::last_wins`]
    pub object_pairs_hook: ObjectPairsHook,

    /// Number of wrapper arrays to flatten.
    ///
    /// With `flatten_depth = N > 0` the input must open with exactly `N` `[`
    /// characters. The elements of the innermost wrapper are yielded one at a
    /// time, separated by commas, and `N` `]` characters end the stream.
    ///
    /// ```json
    /// [[1, {"a": 2}, [3]]]
    /// ```
    ///
    /// With `flatten_depth = 2` this yields `1`, `{"a":2}`, and `[3]`.
    ///
    /// # Default
    ///
    /// `0` (off): the input is a whitespace-separated sequence of values.
    pub flatten_depth: usize,

    /// Deepest container nesting accepted inside one yielded value. Flattened
    /// wrapper arrays do not count.
    ///
    /// # Default
    ///
    /// [`DEFAULT_MAX_DEPTH`]
    pub max_depth: usize,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            object_pairs_hook: factory::last_wins,
            flatten_depth: 0,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
