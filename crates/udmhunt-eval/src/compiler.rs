//! Compile parsed hunt queries into an in-memory form ready for scanning.
//!
//! The compiler turns each condition of a [`HuntQuery`] into a
//! `(FieldPath, CompiledMatcher)` pair: comparison bounds are parsed and
//! contains keywords lowercased once, not per event.
//!
//! Evaluation is split the same way the query is:
//! - [`satisfies_mandatory`]: every equality condition, then every comparison
//!   condition, stopping at the first failure. No conditions means pass.
//! - [`satisfies_optional`]: any contains condition. No conditions means pass,
//!   so optional filtering is opt-in.

use udmhunt_parser::{FieldPath, HuntQuery};

use crate::event::Event;
use crate::matcher::CompiledMatcher;
use crate::result::Projection;

// =============================================================================
// Compiled types
// =============================================================================

/// A compiled hunt query, ready for evaluation.
#[derive(Debug, Clone)]
pub struct CompiledQuery {
    pub title: Option<String>,
    /// Mandatory equality conditions, in declaration order.
    pub equals: Vec<CompiledCondition>,
    /// Mandatory timestamp comparisons, in declaration order.
    pub compares: Vec<CompiledCondition>,
    /// Optional contains conditions.
    pub contains: Vec<CompiledCondition>,
    /// Fields projected from every matching event.
    pub output: Vec<FieldPath>,
}

/// A compiled condition: a field + matcher.
#[derive(Debug, Clone)]
pub struct CompiledCondition {
    pub field: FieldPath,
    pub matcher: CompiledMatcher,
}

impl CompiledCondition {
    pub fn matches(&self, event: &Event) -> bool {
        self.matcher.matches(&event.resolve(&self.field))
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Compile a parsed [`HuntQuery`] into a [`CompiledQuery`].
///
/// Comparison bounds that are not timestamps are logged and compiled into a
/// matcher that never matches.
pub fn compile_query(query: &HuntQuery) -> CompiledQuery {
    let equals = query
        .equals
        .iter()
        .map(|c| CompiledCondition {
            field: c.field.clone(),
            matcher: CompiledMatcher::exact(&c.value),
        })
        .collect();

    let compares = query
        .compares
        .iter()
        .map(|c| {
            let matcher = CompiledMatcher::timestamp(c.op, &c.value);
            if matches!(matcher, CompiledMatcher::Timestamp { bound: None, .. }) {
                log::warn!(
                    "condition '{c}': '{}' is not a timestamp, it will never match",
                    c.value
                );
            }
            CompiledCondition {
                field: c.field.clone(),
                matcher,
            }
        })
        .collect();

    let contains = query
        .contains
        .iter()
        .map(|c| CompiledCondition {
            field: c.field.clone(),
            matcher: CompiledMatcher::contains(&c.keyword),
        })
        .collect();

    CompiledQuery {
        title: query.title.clone(),
        equals,
        compares,
        contains,
        output: query.output.clone(),
    }
}

/// True when the event satisfies every mandatory condition.
pub fn satisfies_mandatory(query: &CompiledQuery, event: &Event) -> bool {
    query
        .equals
        .iter()
        .chain(query.compares.iter())
        .all(|c| c.matches(event))
}

/// True when the event satisfies at least one optional condition, or when
/// there are none.
pub fn satisfies_optional(query: &CompiledQuery, event: &Event) -> bool {
    query.contains.is_empty() || query.contains.iter().any(|c| c.matches(event))
}

/// Resolve every output field against the event.
pub fn project(output: &[FieldPath], event: &Event) -> Projection {
    let mut projection = Projection::new();
    for field in output {
        projection.insert(field.as_str(), event.resolve(field).to_value());
    }
    projection
}

/// Evaluate a compiled query against an event, returning the projection if
/// it matches.
pub fn evaluate_query(query: &CompiledQuery, event: &Event) -> Option<Projection> {
    if !satisfies_mandatory(query, event) || !satisfies_optional(query, event) {
        return None;
    }
    Some(project(&query.output, event))
}

// =============================================================================
// Tests
// =============================================================================
