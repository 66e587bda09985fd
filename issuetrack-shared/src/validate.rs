//! Field-level validation support.
//!
//! Validation never fails fast: every rule for a candidate entity runs, and
//! all violations are collected into a single field -> message map so callers
//! see everything that is wrong in one response. The map is keyed and ordered
//! by field name, which keeps output deterministic.

use std::collections::BTreeMap;
use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    /// Email address pattern (the WHATWG HTML5 `input[type=email]` pattern).
    pub static ref EMAIL_RX: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    )
    .expect("email pattern must compile");
}

/// Collects validation violations for one candidate entity.
///
/// # Example
///
/// ```
/// use issuetrack_shared::validate::Validator;
///
/// let mut v = Validator::new();
/// v.check(false, "name", "must be provided");
/// v.check(true, "email", "must be provided");
/// assert!(!v.valid());
///
/// let errors = v.into_errors();
/// assert_eq!(errors.get("name"), Some("must be provided"));
/// assert_eq!(errors.get("email"), None);
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    errors: BTreeMap<String, String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while no violation has been recorded.
    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records a violation for `key` unless one is already present.
    /// The first message recorded for a field wins.
    pub fn add_error(&mut self, key: &str, message: &str) {
        self.errors
            .entry(key.to_string())
            .or_insert_with(|| message.to_string());
    }

    /// Records a violation when `ok` is false.
    pub fn check(&mut self, ok: bool, key: &str, message: &str) {
        if !ok {
            self.add_error(key, message);
        }
    }

    /// Consumes the collector, yielding the aggregated violations.
    pub fn into_errors(self) -> ValidationErrors {
        ValidationErrors(self.errors)
    }
}

/// The aggregated field -> message map of a failed validation.
///
/// Iteration and display are ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, message)) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", key, message)?;
        }
        write!(f, ".")
    }
}
