//! # udmhunt-parser
//!
//! Typed hunt queries for UDM-style security events.
//!
//! This crate turns the textual inputs of a hunt into a strongly-typed
//! [`HuntQuery`]:
//!
//! - **Field paths**: dot-delimited keys (`principal.user.userid`), validated once
//! - **Mandatory conditions**: `field=value` equality and `field>=value` style
//!   timestamp comparisons, all of which must hold
//! - **Optional conditions**: `field=keyword` substring matches, at least one of
//!   which must hold when any are given
//! - **Hunt files**: the same flags collected in a YAML document
//!
//! ## Architecture
//!
//! - **PEG grammar** ([`pest`]) for splitting condition flags at their operator
//! - **serde_yaml** for hunt file deserialization
//!
//! ## Quick Start
//!
//! ```rust
//! use udmhunt_parser::parse_hunt_yaml;
//!
//! let yaml = r#"
//! title: Alice logins
//! mandatory:
//!   - principal.user.userid=alice
//! output:
//!   - principal.hostname
//! "#;
//!
//! let query = parse_hunt_yaml(yaml).unwrap();
//! assert_eq!(query.equals.len(), 1);
//! assert_eq!(query.output[0].as_str(), "principal.hostname");
//! ```

pub mod ast;
pub mod condition;
pub mod error;
pub mod parser;

pub use ast::{
    CompareCondition, CompareOp, ContainsCondition, EqualityCondition, FieldPath, HuntQuery,
    MandatoryCondition,
};
pub use condition::{parse_contains, parse_mandatory, parse_output_field};
pub use error::{HuntParserError, Result};
pub use parser::{hunt_from_flags, parse_hunt_file, parse_hunt_yaml};
