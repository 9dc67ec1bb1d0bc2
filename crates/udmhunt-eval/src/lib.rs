//! # udmhunt-eval
//!
//! Hunt engine for UDM-style JSON security events.
//!
//! This crate consumes the [`HuntQuery`](udmhunt_parser::HuntQuery) produced
//! by [`udmhunt_parser`] and evaluates it against an event collection using a
//! compile-then-evaluate model.
//!
//! ## Architecture
//!
//! - **Field resolution** ([`Event::resolve`]): dot paths walk nested objects and
//!   fan out across arrays, yielding [`Resolved::Absent`], `Single` or `Multiple`.
//! - **Matchers** ([`CompiledMatcher`]): exact, case-insensitive contains, and
//!   timestamp ordering over canonical string forms. Contains checks each
//!   fanned-out value on its own.
//! - **Conditions**: mandatory ones must all hold; optional ones need one hit,
//!   and are skipped entirely when none are given.
//! - **Engine**: one in-order scan per query, projecting the requested fields of
//!   each match. Events are never mutated.
//! - **Sources** ([`source`]): JSON arrays, single objects, NDJSON, directories.
//!
//! ## Quick Start
//!
//! ```rust
//! use udmhunt_parser::hunt_from_flags;
//! use udmhunt_eval::Engine;
//! use serde_json::json;
//!
//! let query = hunt_from_flags(
//!     &["metadata.event_type=PROCESS_LAUNCH"],
//!     &["target.process.command_line=whoami"],
//!     &["principal.hostname"],
//! )
//! .unwrap();
//!
//! let events = vec![json!({
//!     "metadata": {"event_type": "PROCESS_LAUNCH"},
//!     "principal": {"hostname": "ws-01"},
//!     "target": {"process": {"command_line": "cmd /c WHOAMI /all"}}
//! })];
//!
//! let result = Engine::new(&query).run(&events);
//! assert_eq!(result.len(), 1);
//! assert_eq!(result.records[0].get("principal.hostname"), Some(&json!("ws-01")));
//! ```

pub mod compiler;
pub mod engine;
pub mod error;
pub mod event;
pub mod matcher;
pub mod result;
pub mod source;
pub mod timestamp;

// Re-export the most commonly used types and functions at crate root
pub use compiler::{
    CompiledCondition, CompiledQuery, compile_query, evaluate_query, project,
    satisfies_mandatory, satisfies_optional,
};
pub use engine::{Engine, run};
pub use error::{EvalError, Result};
pub use event::{Event, Resolved};
pub use matcher::CompiledMatcher;
pub use result::{Projection, QueryResult};
pub use source::{
    EventCollection, SourceConfig, load_events_directory, load_events_file, load_events_path,
    load_events_str, write_events_file,
};
pub use timestamp::{compare_timestamps, parse_timestamp};
