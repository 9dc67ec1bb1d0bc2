//! Compiled matchers for single-condition evaluation.
//!
//! Each `CompiledMatcher` is built once when a query is compiled. At scan
//! time, `matches()` compares it against the canonical string form of a
//! [`Resolved`] value. Contains works value by value, so a fanned-out path
//! matches a keyword exactly when one of its values does.

use chrono::{DateTime, FixedOffset};
use serde_json::Value;
use udmhunt_parser::CompareOp;

use crate::event::{Resolved, canonical_value};
use crate::timestamp::{compare_instants, parse_timestamp};

/// A pre-compiled matcher for a single condition.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledMatcher {
    /// Exact, case-sensitive string equality.
    Exact(String),

    /// Case-insensitive substring containment. The needle is stored
    /// lowercased.
    Contains(String),

    /// Timestamp ordering against a bound parsed at compile time. A bound
    /// that failed to parse is kept as `None` and never matches.
    Timestamp {
        op: CompareOp,
        bound: Option<DateTime<FixedOffset>>,
    },
}

impl CompiledMatcher {
    pub fn exact(value: &str) -> Self {
        CompiledMatcher::Exact(value.to_string())
    }

    pub fn contains(keyword: &str) -> Self {
        CompiledMatcher::Contains(keyword.to_lowercase())
    }

    pub fn timestamp(op: CompareOp, bound: &str) -> Self {
        CompiledMatcher::Timestamp {
            op,
            bound: parse_timestamp(bound),
        }
    }

    /// Check this matcher against a resolved value.
    ///
    /// Absent and `null` values never match. Contains looks at each resolved
    /// value on its own, so a keyword hits a fanned-out path exactly when it
    /// would hit one of its values resolved singly.
    pub fn matches(&self, resolved: &Resolved) -> bool {
        match self {
            CompiledMatcher::Exact(expected) => resolved
                .canonical()
                .is_some_and(|text| text == *expected),
            CompiledMatcher::Contains(needle) => resolved
                .values()
                .into_iter()
                .any(|v| value_contains(v, needle)),
            CompiledMatcher::Timestamp { op, bound } => {
                let Some(bound) = bound else {
                    return false;
                };
                resolved
                    .canonical()
                    .and_then(|text| parse_timestamp(&text))
                    .is_some_and(|actual| compare_instants(&actual, bound, *op))
            }
        }
    }
}

/// Empty values (`0`, `""`, `false`, `[]`, `{}`, `null`) never contain a
/// keyword.
fn value_contains(value: &Value, needle: &str) -> bool {
    let empty = match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    };
    if empty {
        return false;
    }
    canonical_value(value).is_some_and(|text| text.to_lowercase().contains(needle))
}
