//! JSON value types and utilities.
//!
//! This module defines the [`Value`] enum produced by the decoder and the
//! compact JSON rendering used by the command-line front end and the
//! conformance harness.
//!
use alloc::{string::String, vec::Vec};

use indexmap::IndexMap;

/// Insertion-ordered object representation.
pub type Map = IndexMap<String, Value>;
/// Array representation.
pub type Array = Vec<Value>;

/// A decoded JSON value.
///
/// Numbers keep the distinction the source text makes: a literal without a
/// fraction or exponent is an [`Int`](Value::Int), or a
/// [`BigInt`](Value::BigInt) when it does not fit `i64`; anything else is a
/// [`Float`](Value::Float).
///
/// # Examples
///
/// ```
/// use jsonpull::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::String("value".into()));
/// map.insert("n".to_string(), Value::Int(3));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value","n":3}"#);
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// `null`.
    #[default]
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// Integer literal that fits `i64`.
    Int(i64),
    /// Integer literal outside the `i64` range, as its exact decimal text.
    BigInt(String),
    /// Number literal with a fraction or an exponent.
    Float(f64),
    /// String with escapes resolved.
    String(String),
    /// Array of values.
    Array(Array),
    /// Object, as built by the configured pairs hook.
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.into())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is an [`Int`](Value::Int), a
    /// [`BigInt`](Value::BigInt) or a [`Float`](Value::Float).
    ///
    /// # Examples
    ///
    /// ```
    /// use jsonpull::Value;
    ///
    /// assert!(Value::Int(42).is_number());
    /// assert!(Value::Float(4.2).is_number());
    /// assert!(!Value::Null.is_number());
    /// ```
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Int(..) | Self::BigInt(..) | Self::Float(..))
    }

    /// Returns the boolean, if the value is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if the value is an [`Int`](Value::Int).
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the numeric value as `f64`, rounding integers to the nearest
    /// float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(n) => Some(*n as f64),
            Self::BigInt(text) => text.parse().ok(),
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string slice, if the value is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the elements, if the value is an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        match self {
            Self::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the members, if the value is an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        match self {
            Self::Object(m) => Some(m),
            _ => None,
        }
    }
}

/// Escapes a string for inclusion in a JSON string literal.
///
/// Quotes, backslashes, and every control character (<= U+001F) are escaped;
/// everything else is written through unchanged.
pub(crate) fn write_escaped_string<W: core::fmt::Write>(src: &str, f: &mut W) -> core::fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            '\u{0008}' => f.write_str("\\b")?,
            '\u{000C}' => f.write_str("\\f")?,
            c if u32::from(c) <= 0x1F => write!(f, "\\u{:04x}", u32::from(c))?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Writes a float so that it reads back as a float.
///
/// `Debug` gives the shortest representation that round-trips and always
/// includes a `.` or an exponent.
pub(crate) fn write_float<W: core::fmt::Write>(n: f64, f: &mut W) -> core::fmt::Result {
    write!(f, "{n:?}")
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Int(n) => write!(f, "{n}"),
            Value::BigInt(text) => f.write_str(text),
            Value::Float(n) => write_float(*n, f),
            Value::String(s) => {
                f.write_str("\"")?;
                write_escaped_string(s, f)?;
                f.write_str("\"")
            }
            Value::Array(arr) => {
                f.write_str("[")?;
                let mut first = true;
                for v in arr {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in map {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    f.write_str("\"")?;
                    write_escaped_string(k, f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(any(test, feature = "serde"))]
impl serde::Serialize for Value {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::{SerializeMap, SerializeSeq};

        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            // serde has no arbitrary-precision integer; serde_json reads such
            // literals the same way.
            Value::BigInt(text) => match text.parse::<u64>() {
                Ok(n) => serializer.serialize_u64(n),
                Err(_) => serializer.serialize_f64(text.parse().unwrap_or(f64::NAN)),
            },
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for v in arr {
                    seq.serialize_element(v)?;
                }
                seq.end()
            }
            Value::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                for (k, v) in map {
                    out.serialize_entry(k, v)?;
                }
                out.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec};

    use super::*;

    #[test]
    fn display_distinguishes_ints_and_floats() {
        assert_eq!(Value::Int(3).to_string(), "3");
        assert_eq!(Value::Float(3.0).to_string(), "3.0");
        assert_eq!(Value::Float(300.0).to_string(), "300.0");
        assert_eq!(Value::Float(-0.5).to_string(), "-0.5");
        assert_eq!(Value::Float(1e300).to_string(), "1e300");
    }

    #[test]
    fn display_escapes_strings() {
        let v = Value::String("a\"b\\c\td\u{1}é".into());
        assert_eq!(v.to_string(), r#""a\"b\\c\td\u0001é""#);
    }

    #[test]
    fn display_keeps_key_order() {
        let mut map = Map::new();
        map.insert("z".into(), Value::Null);
        map.insert("a".into(), Value::Array(vec![Value::Boolean(true), Value::Int(-1)]));
        assert_eq!(Value::Object(map).to_string(), r#"{"z":null,"a":[true,-1]}"#);
    }

    #[test]
    fn accessors() {
        assert_eq!(Value::Int(2).as_f64(), Some(2.0));
        assert_eq!(Value::Float(2.5).as_i64(), None);
        assert_eq!(Value::from("x").as_str(), Some("x"));
        assert!(Value::default().is_null());
    }

    #[test]
    fn big_integers() {
        let v = Value::BigInt("-18446744073709551616".into());
        assert!(v.is_number());
        assert_eq!(v.to_string(), "-18446744073709551616");
        assert_eq!(v.as_i64(), None);
        assert_eq!(v.as_f64(), Some(-(2f64.powi(64))));

        let max = Value::BigInt("18446744073709551615".into());
        assert_eq!(serde_json::to_string(&max).unwrap(), "18446744073709551615");
    }

    #[test]
    fn serialize_matches_display() {
        let mut map = Map::new();
        map.insert("b".into(), Value::Float(1.5));
        map.insert("a".into(), Value::Int(7));
        let v = Value::Array(vec![Value::Object(map), Value::String("\n".into())]);
        assert_eq!(serde_json::to_string(&v).unwrap(), v.to_string());
    }
}
