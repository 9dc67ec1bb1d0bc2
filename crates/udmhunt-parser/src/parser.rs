//! YAML hunt files and flag lists → [`HuntQuery`].
//!
//! A hunt file is a single YAML mapping whose lists hold the same flag
//! strings the CLI accepts:
//!
//! ```yaml
//! title: Alice after mid-January
//! mandatory:
//!   - principal.user.userid=alice
//!   - metadata.event_timestamp>=2024-01-15T00:00:00Z
//! contains:
//!   - target.process.command_line=powershell
//! output:
//!   - principal.hostname
//!   - target.process.command_line
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::ast::HuntQuery;
use crate::condition::{parse_contains, parse_mandatory, parse_output_field};
use crate::error::Result;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawHunt {
    title: Option<String>,
    #[serde(default)]
    mandatory: Vec<String>,
    #[serde(default)]
    contains: Vec<String>,
    #[serde(default)]
    output: Vec<String>,
}

// =============================================================================
// Public API
// =============================================================================

/// Parse a YAML hunt definition.
pub fn parse_hunt_yaml(yaml: &str) -> Result<HuntQuery> {
    let raw: RawHunt = serde_yaml::from_str(yaml)?;
    let mut query = hunt_from_flags(&raw.mandatory, &raw.contains, &raw.output)?;
    query.title = raw.title;
    Ok(query)
}

/// Parse a YAML hunt definition from a file.
pub fn parse_hunt_file(path: &Path) -> Result<HuntQuery> {
    let content = std::fs::read_to_string(path)?;
    parse_hunt_yaml(&content)
}

/// Build a query from raw flag strings, in the order given.
pub fn hunt_from_flags<S: AsRef<str>>(
    mandatory: &[S],
    contains: &[S],
    output: &[S],
) -> Result<HuntQuery> {
    let mut query = HuntQuery::new();
    for flag in mandatory {
        query.add_mandatory(parse_mandatory(flag.as_ref())?);
    }
    for flag in contains {
        query.contains.push(parse_contains(flag.as_ref())?);
    }
    for field in output {
        query.output.push(parse_output_field(field.as_ref())?);
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::CompareOp;
    use crate::error::HuntParserError;

    #[test]
    fn test_full_hunt_file() {
        let query = parse_hunt_yaml(
            r#"
title: Alice after mid-January
mandatory:
  - principal.user.userid=alice
  - metadata.event_timestamp>=2024-01-15T00:00:00Z
contains:
  - target.process.command_line=powershell
  - target.process.command_line=cmd.exe
output:
  - principal.hostname
  - target.process.command_line
"#,
        )
        .unwrap();

        assert_eq!(query.title.as_deref(), Some("Alice after mid-January"));
        assert_eq!(query.equals.len(), 1);
        assert_eq!(query.equals[0].value, "alice");
        assert_eq!(query.compares.len(), 1);
        assert_eq!(query.compares[0].op, CompareOp::Gte);
        assert_eq!(query.compares[0].value, "2024-01-15T00:00:00Z");
        assert_eq!(query.contains.len(), 2);
        assert_eq!(query.contains[1].keyword, "cmd.exe");
        let output: Vec<&str> = query.output.iter().map(|p| p.as_str()).collect();
        assert_eq!(output, vec!["principal.hostname", "target.process.command_line"]);
    }

    #[test]
    fn test_sections_are_optional() {
        let query = parse_hunt_yaml("title: everything\n").unwrap();
        assert!(query.is_unconditional());
        assert!(query.output.is_empty());
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = parse_hunt_yaml("title: x\nmandatroy:\n  - a=b\n").unwrap_err();
        assert!(matches!(err, HuntParserError::Yaml(_)));
    }

    #[test]
    fn test_bad_flag_in_file() {
        let err = parse_hunt_yaml("mandatory:\n  - no_separator\n").unwrap_err();
        assert!(matches!(err, HuntParserError::Condition(_, _)));
    }

    #[test]
    fn test_hunt_from_flags_preserves_order() {
        let query = hunt_from_flags(
            &["b=2", "a=1", "ts<2024-01-01"],
            &[],
            &["z", "a"],
        )
        .unwrap();
        assert_eq!(query.equals[0].field.as_str(), "b");
        assert_eq!(query.equals[1].field.as_str(), "a");
        assert_eq!(query.compares[0].op, CompareOp::Lt);
        assert_eq!(query.output[0].as_str(), "z");
    }
}
