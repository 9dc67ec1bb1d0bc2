//! Condition flag parser using a pest PEG grammar.
//!
//! Parses the flag strings handed to the CLI (or listed in a hunt file):
//! - `"principal.user.userid=alice"` (mandatory equality)
//! - `"metadata.event_timestamp>=2024-01-01T00:00:00Z"` (mandatory comparison)
//! - `"target.process.command_line=powershell"` (optional contains)

use pest::Parser;
use pest_derive::Parser;

use crate::ast::{
    CompareCondition, CompareOp, ContainsCondition, EqualityCondition, FieldPath,
    MandatoryCondition,
};
use crate::error::{HuntParserError, Result};

// ---------------------------------------------------------------------------
// Pest parser (generated from hunt.pest grammar)
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[grammar = "src/hunt.pest"]
struct ConditionFlagParser;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse a mandatory condition flag: `field=value` or `field<op>value` with
/// `op` one of `>`, `<`, `>=`, `<=`.
///
/// # Examples
///
/// ```
/// use udmhunt_parser::{MandatoryCondition, parse_mandatory};
///
/// let cond = parse_mandatory("ts>=2024-01-01T00:00:00Z").unwrap();
/// assert!(matches!(cond, MandatoryCondition::Compare(_)));
/// ```
pub fn parse_mandatory(flag: &str) -> Result<MandatoryCondition> {
    let parts = split_flag(Rule::mandatory_flag, flag)?;
    let field = FieldPath::parse(parts.field)?;
    let value = parts.value.to_string();

    if parts.op == "=" {
        return Ok(MandatoryCondition::Equals(EqualityCondition { field, value }));
    }

    let op = CompareOp::from_symbol(parts.op)
        .ok_or_else(|| HuntParserError::UnknownOperator(parts.op.to_string()))?;
    Ok(MandatoryCondition::Compare(CompareCondition { field, op, value }))
}

/// Parse an optional contains flag: `field=keyword`.
pub fn parse_contains(flag: &str) -> Result<ContainsCondition> {
    let parts = split_flag(Rule::contains_flag, flag)?;
    Ok(ContainsCondition {
        field: FieldPath::parse(parts.field)?,
        keyword: parts.value.to_string(),
    })
}

/// Parse an output field name.
pub fn parse_output_field(path: &str) -> Result<FieldPath> {
    FieldPath::parse(path)
}

// ---------------------------------------------------------------------------
// Internal parsing helpers
// ---------------------------------------------------------------------------

struct FlagParts<'i> {
    field: &'i str,
    op: &'i str,
    value: &'i str,
}

fn split_flag(rule: Rule, flag: &str) -> Result<FlagParts<'_>> {
    let mut pairs = ConditionFlagParser::parse(rule, flag)
        .map_err(|e| HuntParserError::Condition(flag.to_string(), e.to_string()))?;

    let flag_pair = pairs.next().ok_or_else(|| {
        HuntParserError::Condition(flag.to_string(), "empty parse tree".to_string())
    })?;

    let mut parts = FlagParts {
        field: "",
        op: "",
        value: "",
    };
    for p in flag_pair.into_inner() {
        match p.as_rule() {
            Rule::field => parts.field = p.as_str(),
            Rule::mandatory_op | Rule::eq_op => parts.op = p.as_str(),
            Rule::value => parts.value = p.as_str(),
            _ => {} // EOI
        }
    }
    Ok(parts)
}

// =============================================================================
// Tests
// =============================================================================
