#![allow(dead_code)]

use serde_json::Value;
use udmhunt_eval::{Engine, QueryResult};
use udmhunt_parser::hunt_from_flags;

pub fn engine_from_flags(mandatory: &[&str], contains: &[&str], output: &[&str]) -> Engine {
    let query = hunt_from_flags(mandatory, contains, output).unwrap();
    Engine::new(&query)
}

pub fn hunt(
    events: &[Value],
    mandatory: &[&str],
    contains: &[&str],
    output: &[&str],
) -> QueryResult {
    engine_from_flags(mandatory, contains, output).run(events)
}

/// Values of `field` across all records, in order.
pub fn column(result: &QueryResult, field: &str) -> Vec<Value> {
    result
        .iter()
        .map(|p| p.get(field).cloned().unwrap_or(Value::Null))
        .collect()
}
