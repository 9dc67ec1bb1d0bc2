use thiserror::Error;

/// Errors that can occur while building a hunt query.
#[derive(Debug, Error)]
pub enum HuntParserError {
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Malformed field path: {0}")]
    MalformedPath(String),

    #[error("Condition parse error in '{0}': {1}")]
    Condition(String, String),

    #[error("Unknown comparison operator '{0}'")]
    UnknownOperator(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, HuntParserError>;
