//! Hunt query engine.
//!
//! The `Engine` holds one compiled hunt and scans event collections with it.
//! Every scan visits each event exactly once, in input order, and never
//! mutates the events.

use serde_json::Value;
use udmhunt_parser::{
    CompareCondition, ContainsCondition, EqualityCondition, FieldPath, HuntQuery,
};

use crate::compiler::{CompiledQuery, compile_query, evaluate_query};
use crate::event::Event;
use crate::result::{Projection, QueryResult};

/// The hunt evaluation engine.
///
/// # Example
///
/// ```rust
/// use udmhunt_parser::parse_hunt_yaml;
/// use udmhunt_eval::Engine;
/// use serde_json::json;
///
/// let query = parse_hunt_yaml(r#"
/// mandatory:
///   - principal.user=alice
/// output:
///   - ts
/// "#).unwrap();
///
/// let engine = Engine::new(&query);
/// let events = vec![
///     json!({"principal": {"user": "alice"}, "ts": "2024-01-01T00:00:00Z"}),
///     json!({"principal": {"user": "bob"}, "ts": "2024-02-01T00:00:00Z"}),
/// ];
/// let result = engine.run(&events);
/// assert_eq!(result.len(), 1);
/// assert_eq!(result.records[0].get("ts"), Some(&json!("2024-01-01T00:00:00Z")));
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    query: CompiledQuery,
}

impl Engine {
    /// Compile `query` into a new engine.
    pub fn new(query: &HuntQuery) -> Self {
        Engine {
            query: compile_query(query),
        }
    }

    /// Evaluate a single event, returning its projection if it matches.
    pub fn evaluate(&self, event: &Event) -> Option<Projection> {
        evaluate_query(&self.query, event)
    }

    /// Scan `events` once, in order, collecting the projection of every match.
    pub fn run<'a, I>(&self, events: I) -> QueryResult
    where
        I: IntoIterator<Item = &'a Value>,
    {
        let mut result = QueryResult::default();
        for value in events {
            result.scanned += 1;
            let event = Event::from_value(value);
            if let Some(projection) = self.evaluate(&event) {
                result.records.push(projection);
            }
        }

        log::debug!(
            "hunt {}: {} of {} events matched",
            self.query.title.as_deref().unwrap_or("<untitled>"),
            result.records.len(),
            result.scanned
        );
        result
    }

    /// Access the compiled query.
    pub fn query(&self) -> &CompiledQuery {
        &self.query
    }
}

/// Run a hunt built from its individual parts.
///
/// Equivalent to assembling a [`HuntQuery`] and calling [`Engine::run`].
pub fn run(
    events: &[Value],
    equals: Vec<EqualityCondition>,
    compares: Vec<CompareCondition>,
    contains: Vec<ContainsCondition>,
    output: Vec<FieldPath>,
) -> QueryResult {
    let query = HuntQuery {
        title: None,
        equals,
        compares,
        contains,
        output,
    };
    Engine::new(&query).run(events)
}
