//! Event wrapper with dot-notation field resolution.
//!
//! Provides a thin wrapper around `serde_json::Value` that resolves a
//! [`FieldPath`] against arbitrarily nested objects and arrays. Arrays fan out:
//! every object element that carries the next key contributes a value, so one
//! path can resolve to zero, one, or many values.

use serde_json::Value;
use udmhunt_parser::FieldPath;

/// A reference to a JSON event for field access during evaluation.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    inner: &'a Value,
}

/// The outcome of resolving a field path against an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved<'a> {
    /// No key lookup along the path succeeded.
    Absent,
    /// Exactly one value was found (possibly `null`).
    Single(&'a Value),
    /// The path fanned out across arrays and found several values, in
    /// traversal order.
    Multiple(Vec<&'a Value>),
}

impl<'a> Event<'a> {
    /// Wrap a JSON value as an event.
    pub fn from_value(value: &'a Value) -> Self {
        Event { inner: value }
    }

    /// Resolve `path` against this event.
    ///
    /// Starting from the root, each segment looks the key up on every current
    /// candidate that is an object, and on every object element of every
    /// candidate that is an array. Anything else is dropped. Resolution stops
    /// with [`Resolved::Absent`] as soon as a segment leaves no candidates.
    pub fn resolve(&self, path: &FieldPath) -> Resolved<'a> {
        let mut current: Vec<&'a Value> = vec![self.inner];

        for segment in path.segments() {
            let mut next = Vec::new();
            for &candidate in &current {
                match candidate {
                    Value::Object(map) => {
                        if let Some(v) = map.get(segment.as_str()) {
                            next.push(v);
                        }
                    }
                    // One level of fan-out: nested arrays are not unwrapped
                    Value::Array(items) => {
                        next.extend(
                            items
                                .iter()
                                .filter_map(|item| item.as_object()?.get(segment.as_str())),
                        );
                    }
                    _ => {}
                }
            }
            if next.is_empty() {
                return Resolved::Absent;
            }
            current = next;
        }

        match current.len() {
            0 => Resolved::Absent,
            1 => Resolved::Single(current[0]),
            _ => Resolved::Multiple(current),
        }
    }

    /// Resolve a dot-notation path string. Malformed paths resolve to
    /// [`Resolved::Absent`].
    pub fn get_field(&self, path: &str) -> Resolved<'a> {
        match FieldPath::parse(path) {
            Ok(p) => self.resolve(&p),
            Err(_) => Resolved::Absent,
        }
    }

    /// Access the underlying JSON value.
    pub fn as_value(&self) -> &'a Value {
        self.inner
    }
}

impl<'a> Resolved<'a> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Resolved::Absent)
    }

    /// The canonical string form every matcher compares against.
    ///
    /// `None` for absent and `null` values. Strings render without quotes,
    /// numbers and booleans as their JSON text, objects and arrays as compact
    /// JSON. Multiple values render as the compact JSON array of all of them,
    /// so equality against a fanned-out path only holds for that exact list.
    pub fn canonical(&self) -> Option<String> {
        match self {
            Resolved::Absent => None,
            Resolved::Single(v) => canonical_value(v),
            Resolved::Multiple(values) => {
                let list = Value::Array(values.iter().map(|v| (*v).clone()).collect());
                Some(list.to_string())
            }
        }
    }

    /// Every value found, in traversal order: none when absent, one when
    /// single, each fanned-out hit when multiple.
    pub fn values(&self) -> Vec<&'a Value> {
        match self {
            Resolved::Absent => Vec::new(),
            Resolved::Single(v) => vec![*v],
            Resolved::Multiple(values) => values.clone(),
        }
    }

    /// The value to emit in a projection: `null` when absent, the value itself
    /// when single, an array when multiple.
    pub fn to_value(&self) -> Value {
        match self {
            Resolved::Absent => Value::Null,
            Resolved::Single(v) => (*v).clone(),
            Resolved::Multiple(values) => {
                Value::Array(values.iter().map(|v| (*v).clone()).collect())
            }
        }
    }
}

/// Canonical string form of one JSON value. `None` for `null`.
pub(crate) fn canonical_value(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(v.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn path(s: &str) -> FieldPath {
        FieldPath::parse(s).unwrap()
    }

    #[test]
    fn test_flat_field() {
        let v = json!({"hostname": "ws-01", "user": "admin"});
        let event = Event::from_value(&v);
        assert_eq!(event.resolve(&path("hostname")), Resolved::Single(&json!("ws-01")));
    }

    #[test]
    fn test_nested_field() {
        let v = json!({"principal": {"user": {"userid": "alice"}}});
        let event = Event::from_value(&v);
        assert_eq!(
            event.resolve(&path("principal.user.userid")),
            Resolved::Single(&json!("alice"))
        );
    }

    #[test]
    fn test_nested_object_scalar() {
        let v = json!({"a": {"b": 1}});
        let event = Event::from_value(&v);
        assert_eq!(event.resolve(&path("a.b")), Resolved::Single(&json!(1)));
    }

    #[test]
    fn test_array_fan_out() {
        let v = json!({"a": [{"b": 1}, {"b": 2}]});
        let event = Event::from_value(&v);
        let one = json!(1);
        let two = json!(2);
        assert_eq!(
            event.resolve(&path("a.b")),
            Resolved::Multiple(vec![&one, &two])
        );
    }

    #[test]
    fn test_array_fan_out_single_hit_unwraps() {
        let v = json!({"a": [{"x": 1}, {"b": 2}, "scalar"]});
        let event = Event::from_value(&v);
        assert_eq!(event.resolve(&path("a.b")), Resolved::Single(&json!(2)));
    }

    #[test]
    fn test_deep_fan_out_across_levels() {
        let v = json!({
            "events": [
                {"actors": [{"name": "alice"}, {"name": "bob"}]},
                {"actors": [{"name": "charlie"}]}
            ]
        });
        let event = Event::from_value(&v);
        let (a, b, c) = (json!("alice"), json!("bob"), json!("charlie"));
        assert_eq!(
            event.resolve(&path("events.actors.name")),
            Resolved::Multiple(vec![&a, &b, &c])
        );
    }

    #[test]
    fn test_nested_arrays_not_unwrapped() {
        let v = json!({"a": [[{"b": 1}], [{"b": 2}]]});
        let event = Event::from_value(&v);
        assert_eq!(event.resolve(&path("a.b")), Resolved::Absent);
    }

    #[test]
    fn test_path_ending_on_array_returns_array() {
        let v = json!({"a": {"tags": ["t1", "t2"]}});
        let event = Event::from_value(&v);
        assert_eq!(
            event.resolve(&path("a.tags")),
            Resolved::Single(&json!(["t1", "t2"]))
        );
    }

    #[test]
    fn test_missing_field() {
        let v = json!({"foo": "bar"});
        let event = Event::from_value(&v);
        assert_eq!(event.resolve(&path("missing")), Resolved::Absent);
        assert_eq!(event.resolve(&path("foo.bar")), Resolved::Absent);
    }

    #[test]
    fn test_short_circuit_on_missing_intermediate() {
        let v = json!({"a": {"c": {"d": 1}}});
        let event = Event::from_value(&v);
        assert_eq!(event.resolve(&path("a.b.d")), Resolved::Absent);
    }

    #[test]
    fn test_null_is_present() {
        let v = json!({"a": {"b": null}});
        let event = Event::from_value(&v);
        let resolved = event.resolve(&path("a.b"));
        assert_eq!(resolved, Resolved::Single(&Value::Null));
        assert!(!resolved.is_absent());
        assert_eq!(resolved.canonical(), None);
        assert_eq!(resolved.to_value(), Value::Null);
    }

    #[test]
    fn test_dotted_key_is_not_a_flat_key() {
        let v = json!({"a.b": "flat"});
        let event = Event::from_value(&v);
        assert_eq!(event.resolve(&path("a.b")), Resolved::Absent);
    }

    #[test]
    fn test_root_array_fans_out() {
        let v = json!([{"a": 1}, {"a": 2}]);
        let event = Event::from_value(&v);
        assert!(matches!(event.resolve(&path("a")), Resolved::Multiple(ref vs) if vs.len() == 2));
    }

    #[test]
    fn test_get_field_malformed_path_is_absent() {
        let v = json!({"a": 1});
        let event = Event::from_value(&v);
        assert_eq!(event.get_field(""), Resolved::Absent);
        assert_eq!(event.get_field("a"), Resolved::Single(&json!(1)));
    }

    #[test]
    fn test_canonical_forms() {
        let v = json!({
            "s": "text",
            "n": 42,
            "f": 1.5,
            "b": true,
            "o": {"k": "v"},
            "l": [{"x": "a"}, {"x": 2}]
        });
        let event = Event::from_value(&v);
        assert_eq!(event.get_field("s").canonical().as_deref(), Some("text"));
        assert_eq!(event.get_field("n").canonical().as_deref(), Some("42"));
        assert_eq!(event.get_field("f").canonical().as_deref(), Some("1.5"));
        assert_eq!(event.get_field("b").canonical().as_deref(), Some("true"));
        assert_eq!(event.get_field("o").canonical().as_deref(), Some(r#"{"k":"v"}"#));
        assert_eq!(event.get_field("l.x").canonical().as_deref(), Some(r#"["a",2]"#));
        assert_eq!(event.get_field("zzz").canonical(), None);
    }

    #[test]
    fn test_to_value_shapes() {
        let v = json!({"a": [{"b": 1}, {"b": 2}], "c": "x"});
        let event = Event::from_value(&v);
        assert_eq!(event.get_field("a.b").to_value(), json!([1, 2]));
        assert_eq!(event.get_field("c").to_value(), json!("x"));
        assert_eq!(event.get_field("nope").to_value(), Value::Null);
    }

    #[test]
    fn test_values_per_shape() {
        let v = json!({"a": [{"b": 1}, {"b": null}], "c": "x"});
        let event = Event::from_value(&v);
        let (one, null) = (json!(1), Value::Null);
        assert_eq!(event.get_field("a.b").values(), vec![&one, &null]);
        assert_eq!(event.get_field("c").values(), vec![&json!("x")]);
        assert!(event.get_field("nope").values().is_empty());
    }
}
