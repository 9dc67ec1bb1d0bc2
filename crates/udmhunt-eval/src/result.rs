//! Result types for hunt queries.

use serde::Serialize;
use serde_json::{Map, Value};

/// The projected fields of one matching event.
///
/// Keys are the requested field paths exactly as written, in request order.
/// Fields that did not resolve are `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Projection {
    fields: Map<String, Value>,
}

impl Projection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a projected value. A path requested twice keeps its first
    /// position; the value is the same either way.
    pub fn insert(&mut self, field: &str, value: Value) {
        self.fields.insert(field.to_string(), value);
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate over `(field, value)` pairs in request order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.fields)
    }
}

/// The outcome of running a hunt over an event collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    /// One projection per matching event, in input order.
    pub records: Vec<Projection>,
    /// Number of events examined.
    pub scanned: usize,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Projection> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a QueryResult {
    type Item = &'a Projection;
    type IntoIter = std::slice::Iter<'a, Projection>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
