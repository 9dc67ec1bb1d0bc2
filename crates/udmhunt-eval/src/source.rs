//! Event sources: materialize JSON events from text, files and directories.
//!
//! Accepted document shapes, per file or input string:
//! - a JSON array of events (flattened into the collection)
//! - a single JSON object
//! - a stream of JSON values separated by whitespace or newlines (NDJSON)

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::Result;

/// Which files of a directory are loaded.
#[derive(Debug, Clone)]
pub struct SourceConfig {
    /// File extension to load, without the dot. Compared case-insensitively.
    pub extension: String,

    /// Files whose name contains any of these substrings (case-insensitive)
    /// are skipped.
    ///
    /// Default: `["inline"]`.
    pub exclude_substrings: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            extension: "json".to_string(),
            exclude_substrings: vec!["inline".to_string()],
        }
    }
}

impl SourceConfig {
    /// True when `path` should be loaded under this configuration.
    pub fn accepts(&self, path: &Path) -> bool {
        let ext_ok = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(&self.extension));
        if !ext_ok {
            return false;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let name = name.to_lowercase();
        !self
            .exclude_substrings
            .iter()
            .any(|s| name.contains(&s.to_lowercase()))
    }
}

/// Events gathered from a directory, plus the files that failed to load.
#[derive(Debug, Clone, Default)]
pub struct EventCollection {
    pub events: Vec<Value>,
    /// Files that were loaded, in load order, with their event counts.
    pub loaded: Vec<(PathBuf, usize)>,
    /// Per-file load errors. Loading continues past a bad file.
    pub errors: Vec<String>,
}

impl EventCollection {
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// =============================================================================
// Public API
// =============================================================================

/// Parse events from a string holding a JSON array, a single object, or a
/// whitespace separated stream of JSON values.
pub fn load_events_str(input: &str) -> Result<Vec<Value>> {
    let mut events = Vec::new();
    for value in serde_json::Deserializer::from_str(input).into_iter::<Value>() {
        match value? {
            Value::Array(items) => events.extend(items),
            other => events.push(other),
        }
    }
    Ok(events)
}

/// Load events from a single file.
pub fn load_events_file(path: &Path) -> Result<Vec<Value>> {
    let content = std::fs::read_to_string(path)?;
    load_events_str(&content)
}

/// Load and merge events from every accepted file directly inside `dir`.
///
/// Files are visited in file-name order. Subdirectories are not entered.
pub fn load_events_directory(dir: &Path, config: &SourceConfig) -> Result<EventCollection> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && config.accepts(&path) {
            paths.push(path);
        } else {
            log::trace!("skipping {}", path.display());
        }
    }
    paths.sort();

    let mut collection = EventCollection::default();
    for path in paths {
        match load_events_file(&path) {
            Ok(events) => {
                log::debug!("loaded {} events from {}", events.len(), path.display());
                collection.loaded.push((path, events.len()));
                collection.events.extend(events);
            }
            Err(e) => {
                log::warn!("failed to load {}: {e}", path.display());
                collection.errors.push(format!("{}: {e}", path.display()));
            }
        }
    }
    Ok(collection)
}

/// Load events from a file, or from a directory with the given config.
pub fn load_events_path(path: &Path, config: &SourceConfig) -> Result<EventCollection> {
    if path.is_dir() {
        return load_events_directory(path, config);
    }
    let events = load_events_file(path)?;
    Ok(EventCollection {
        loaded: vec![(path.to_path_buf(), events.len())],
        events,
        errors: Vec::new(),
    })
}

/// Write events as a pretty-printed JSON array.
pub fn write_events_file(path: &Path, events: &[Value]) -> Result<()> {
    let json = serde_json::to_string_pretty(events)?;
    std::fs::write(path, json)?;
    Ok(())
}
