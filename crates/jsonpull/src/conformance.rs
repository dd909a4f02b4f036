//! Fixture runner for JSONTestSuite-style test corpora.
//!
//! Fixture files are classified by the prefix of their name:
//!
//! - `y_`: the document is valid. The stream must yield exactly one value,
//!   equal to what the reference decoder (`serde_json`) reads from the same
//!   bytes. Integers beyond `u64` are compared by value, since the reference
//!   only has a float for them.
//! - `n_`: the document is invalid. Decoding must fail, unless the input
//!   holds no value at all or several values (a multi-value stream is not
//!   an error for this decoder). Exactly one value followed by a clean end is
//!   a failure.
//! - `i_`: implementation-defined. The reference decoder picks the rule: if
//!   it accepts the document the `y_` rule applies, otherwise the `n_` rule.
use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use tracing::{debug, info};

use crate::{DecoderOptions, Map, Value, parse_reader};

/// What a fixture expects of the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    /// `y_` fixtures.
    Valid,
    /// `n_` fixtures.
    Invalid,
    /// `i_` fixtures.
    ImplementationDefined,
}

impl Expectation {
    /// Classifies a fixture by its file name, `None` for unrelated files.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        if !name.ends_with(".json") {
            return None;
        }
        match name.get(..2)? {
            "y_" => Some(Self::Valid),
            "n_" => Some(Self::Invalid),
            "i_" => Some(Self::ImplementationDefined),
            _ => None,
        }
    }
}

/// Result of checking one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The decoder behaved as the fixture expects.
    Pass,
    /// The decoder did not; the message says how.
    NotPass(String),
}

impl Outcome {
    /// Returns `true` for [`Outcome::Pass`].
    #[must_use]
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass)
    }
}

/// Aggregated results of [`run_dir`].
#[derive(Debug, Default)]
pub struct Report {
    /// Fixtures that passed.
    pub passed: usize,
    /// Fixtures that did not pass, with the reason, in file name order.
    pub failures: Vec<(PathBuf, String)>,
}

impl Report {
    /// Total number of fixtures checked.
    #[must_use]
    pub fn total(&self) -> usize {
        self.passed + self.failures.len()
    }

    /// Returns `true` if every fixture passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Checks `document` against `expectation` with default decoder options.
#[must_use]
pub fn check_document(expectation: Expectation, document: &[u8]) -> Outcome {
    match expectation {
        Expectation::Valid => check_valid(document),
        Expectation::Invalid => check_invalid(document),
        Expectation::ImplementationDefined => {
            if serde_json::from_slice::<serde_json::Value>(document).is_ok() {
                check_valid(document)
            } else {
                check_invalid(document)
            }
        }
    }
}

fn check_valid(document: &[u8]) -> Outcome {
    let reference = match serde_json::from_slice::<serde_json::Value>(document) {
        Ok(reference) => from_reference(reference),
        Err(err) => return Outcome::NotPass(format!("reference decoder rejects document: {err}")),
    };

    let mut values = Vec::new();
    for value in parse_reader(document, DecoderOptions::default()) {
        match value {
            Ok(value) => values.push(value),
            Err(err) => return Outcome::NotPass(format!("unexpected error: {err}")),
        }
    }

    match values.as_slice() {
        [value] if agrees(value, &reference) => Outcome::Pass,
        [value] => Outcome::NotPass(format!("expected {reference} got {value}")),
        _ => Outcome::NotPass(format!("expected one value got {}", values.len())),
    }
}

fn check_invalid(document: &[u8]) -> Outcome {
    let mut good = 0usize;
    for value in parse_reader(document, DecoderOptions::default()) {
        match value {
            Ok(_) => {
                good += 1;
                if good > 1 {
                    return Outcome::Pass;
                }
            }
            Err(_) => return Outcome::Pass,
        }
    }

    if good == 1 {
        Outcome::NotPass("accepted a single value".into())
    } else {
        Outcome::Pass
    }
}

/// Converts the reference decoder's value. Integers above `i64::MAX` arrive
/// as `u64` and become [`Value::BigInt`]; larger ones arrive as floats.
fn from_reference(value: serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(b),
        serde_json::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::Int(i)
            } else if n.is_u64() {
                Value::BigInt(n.to_string())
            } else {
                n.as_f64().map_or(Value::Null, Value::Float)
            }
        }
        serde_json::Value::String(s) => Value::String(s),
        serde_json::Value::Array(items) => {
            Value::Array(items.into_iter().map(from_reference).collect())
        }
        serde_json::Value::Object(members) => Value::Object(
            members
                .into_iter()
                .map(|(key, value)| (key, from_reference(value)))
                .collect::<Map>(),
        ),
    }
}

/// Structural equality, except that a [`Value::BigInt`] matches a reference
/// float of the same value.
fn agrees(ours: &Value, reference: &Value) -> bool {
    match (ours, reference) {
        (Value::BigInt(_), Value::Float(f)) => ours.as_f64() == Some(*f),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| agrees(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b)
                    .all(|((ka, va), (kb, vb))| ka == kb && agrees(va, vb))
        }
        _ => ours == reference,
    }
}

/// Checks every fixture in `dir`, in file name order.
///
/// Files whose names carry no fixture prefix are skipped.
///
/// # Errors
///
/// Propagates failures to list the directory or read a fixture.
pub fn run_dir(dir: &Path) -> io::Result<Report> {
    let mut fixtures = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if let Some(expectation) = Expectation::from_file_name(&name) {
            fixtures.push((name, entry.path(), expectation));
        }
    }
    fixtures.sort_by(|a, b| a.0.cmp(&b.0));

    let mut report = Report::default();
    for (name, path, expectation) in fixtures {
        let document = fs::read(&path)?;
        match check_document(expectation, &document) {
            Outcome::Pass => {
                debug!(fixture = %name, "pass");
                report.passed += 1;
            }
            Outcome::NotPass(reason) => {
                debug!(fixture = %name, %reason, "not pass");
                report.failures.push((path, reason));
            }
        }
    }

    info!(
        passed = report.passed,
        failed = report.failures.len(),
        "conformance run finished"
    );
    Ok(report)
}
