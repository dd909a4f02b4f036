//! Object construction.
//!
//! The parser collects the members of every object as an ordered list of
//! `(key, value)` pairs, duplicates included, and hands that list to an
//! [`ObjectPairsHook`]. The hook decides what an object becomes.
use alloc::{string::String, vec, vec::Vec};

use crate::{
    error::DecodeError,
    value::{Map, Value},
};

/// Converts the ordered members of one object into its final representation.
pub type ObjectPairsHook = fn(Vec<(String, Value)>) -> Result<Value, DecodeError>;

/// Builds an ordered map; a repeated key overwrites the earlier value but
/// keeps the position of its first appearance.
///
/// This is the default hook.
///
/// # Errors
///
/// Never fails.
pub fn last_wins(pairs: Vec<(String, Value)>) -> Result<Value, DecodeError> {
    let mut map = Map::with_capacity(pairs.len());
    for (key, value) in pairs {
        map.insert(key, value);
    }
    Ok(Value::Object(map))
}

/// Builds an ordered map keeping the first value seen for each key.
///
/// # Errors
///
/// Never fails.
pub fn first_wins(pairs: Vec<(String, Value)>) -> Result<Value, DecodeError> {
    let mut map = Map::with_capacity(pairs.len());
    for (key, value) in pairs {
        map.entry(key).or_insert(value);
    }
    Ok(Value::Object(map))
}

/// Keeps every member, duplicates included, as an array of `[key, value]`
/// arrays in source order.
///
/// # Errors
///
/// Never fails.
pub fn pairs_list(pairs: Vec<(String, Value)>) -> Result<Value, DecodeError> {
    Ok(Value::Array(
        pairs
            .into_iter()
            .map(|(key, value)| Value::Array(vec![Value::String(key), value]))
            .collect(),
    ))
}

/// Builds an ordered map, failing on the first repeated key.
///
/// # Errors
///
/// Returns [`DecodeError::DuplicateKey`] naming the repeated key.
pub fn reject_duplicates(pairs: Vec<(String, Value)>) -> Result<Value, DecodeError> {
    let mut map = Map::with_capacity(pairs.len());
    for (key, value) in pairs {
        if map.contains_key(&key) {
            return Err(DecodeError::DuplicateKey(key));
        }
        map.insert(key, value);
    }
    Ok(Value::Object(map))
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    fn pairs() -> Vec<(String, Value)> {
        vec![
            ("a".into(), Value::Int(1)),
            ("b".into(), Value::Int(2)),
            ("a".into(), Value::Int(3)),
        ]
    }

    #[test]
    fn last_wins_keeps_first_position() {
        assert_eq!(last_wins(pairs()).unwrap().to_string(), r#"{"a":3,"b":2}"#);
    }

    #[test]
    fn first_wins_ignores_later_values() {
        assert_eq!(first_wins(pairs()).unwrap().to_string(), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn pairs_list_keeps_duplicates() {
        assert_eq!(
            pairs_list(pairs()).unwrap().to_string(),
            r#"[["a",1],["b",2],["a",3]]"#
        );
    }

    #[test]
    fn reject_duplicates_names_key() {
        assert_eq!(
            reject_duplicates(pairs()),
            Err(DecodeError::DuplicateKey("a".into()))
        );
        assert!(reject_duplicates(pairs()[..2].to_vec()).is_ok());
    }
}
