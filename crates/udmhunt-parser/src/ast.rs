//! AST types for hunt queries: field paths, mandatory and optional
//! conditions, and the assembled query.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::{HuntParserError, Result};

// =============================================================================
// Field paths
// =============================================================================

/// A validated dot-delimited path into a nested event.
///
/// Every segment is a literal object key. There is no index syntax: arrays met
/// along the way are fanned out over all of their object elements at
/// resolution time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Split `path` on `.` and validate the segments.
    ///
    /// The empty string and paths with empty segments (`a..b`, `.a`, `a.`)
    /// are rejected.
    pub fn parse(path: &str) -> Result<Self> {
        if path.is_empty() {
            return Err(HuntParserError::MalformedPath(
                "field path is empty".to_string(),
            ));
        }

        let segments: Vec<String> = path.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(HuntParserError::MalformedPath(format!(
                "'{path}' contains an empty segment"
            )));
        }

        Ok(FieldPath {
            raw: path.to_string(),
            segments,
        })
    }

    /// The path exactly as it was written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

// =============================================================================
// Conditions
// =============================================================================

/// Ordering operator of a timestamp comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompareOp {
    Gt,
    Gte,
    Lt,
    Lte,
}

impl CompareOp {
    pub fn from_symbol(s: &str) -> Option<Self> {
        match s {
            ">" => Some(CompareOp::Gt),
            ">=" => Some(CompareOp::Gte),
            "<" => Some(CompareOp::Lt),
            "<=" => Some(CompareOp::Lte),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Gt => ">",
            CompareOp::Gte => ">=",
            CompareOp::Lt => "<",
            CompareOp::Lte => "<=",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Mandatory exact match: the resolved value's canonical string must equal
/// `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EqualityCondition {
    pub field: FieldPath,
    pub value: String,
}

/// Mandatory timestamp ordering: `resolved <op> value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompareCondition {
    pub field: FieldPath,
    pub op: CompareOp,
    pub value: String,
}

/// Optional case-insensitive substring match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainsCondition {
    pub field: FieldPath,
    pub keyword: String,
}

/// Either kind of mandatory condition, as produced by a `field<op>value` flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MandatoryCondition {
    Equals(EqualityCondition),
    Compare(CompareCondition),
}

impl fmt::Display for EqualityCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.field, self.value)
    }
}

impl fmt::Display for CompareCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.field, self.op, self.value)
    }
}

impl fmt::Display for ContainsCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}~{}", self.field, self.keyword)
    }
}

impl fmt::Display for MandatoryCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MandatoryCondition::Equals(c) => c.fmt(f),
            MandatoryCondition::Compare(c) => c.fmt(f),
        }
    }
}

// =============================================================================
// Query
// =============================================================================

/// A complete hunt: mandatory conditions (AND), optional contains conditions
/// (OR, skipped when empty) and the fields to project from every match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HuntQuery {
    pub title: Option<String>,
    pub equals: Vec<EqualityCondition>,
    pub compares: Vec<CompareCondition>,
    pub contains: Vec<ContainsCondition>,
    pub output: Vec<FieldPath>,
}

impl HuntQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Route a mandatory condition into the equality or comparison list.
    pub fn add_mandatory(&mut self, condition: MandatoryCondition) {
        match condition {
            MandatoryCondition::Equals(c) => self.equals.push(c),
            MandatoryCondition::Compare(c) => self.compares.push(c),
        }
    }

    /// Append every condition and output field of `other`.
    ///
    /// The title of `self` wins when both are set.
    pub fn merge(&mut self, other: HuntQuery) {
        if self.title.is_none() {
            self.title = other.title;
        }
        self.equals.extend(other.equals);
        self.compares.extend(other.compares);
        self.contains.extend(other.contains);
        self.output.extend(other.output);
    }

    /// Number of mandatory conditions (equality + comparison).
    pub fn mandatory_count(&self) -> usize {
        self.equals.len() + self.compares.len()
    }

    /// True when every event would match (no conditions at all).
    pub fn is_unconditional(&self) -> bool {
        self.mandatory_count() == 0 && self.contains.is_empty()
    }
}
