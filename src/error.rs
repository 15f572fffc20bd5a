//! Error taxonomy
//!
//! Every failure surfaced by the crate is an [`XenError`]. Path-related
//! variants carry the assembled path text so callers can report which query
//! failed.

use thiserror::Error;

/// Crate-wide result alias
pub type Result<T, E = XenError> = std::result::Result<T, E>;

/// Errors raised by tree mutation, ingestion and path queries
#[derive(Debug, Error)]
pub enum XenError {
    /// Malformed call, e.g. an odd number of attribute name/value arguments
    #[error("invalid argument: {0}")]
    Argument(String),

    /// A single-result query matched nothing
    #[error("no elements found for <{path}>")]
    NotFound { path: String },

    /// A single-result query matched more than one node
    #[error("multiple elements found for <{path}> ({count} matches)")]
    AmbiguousMatch { path: String, count: usize },

    /// Path feature that is recognised but deliberately not implemented
    #[error("unsupported {feature} in <{path}>")]
    Unsupported { path: String, feature: &'static str },

    /// Index predicate outside the candidate list
    #[error("index {index} out of range for {len} candidates in <{path}>")]
    IndexOutOfRange { path: String, index: i64, len: usize },

    /// Malformed path expression
    #[error("malformed path <{path}>: {message}")]
    Syntax { path: String, message: String },

    /// Regex predicate that does not compile
    #[error("invalid pattern in <{path}>: {source}")]
    Pattern {
        path: String,
        #[source]
        source: regex::Error,
    },

    /// Malformed markup during ingestion
    #[error("parse error at byte {position}: {message}")]
    Parse { message: String, position: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl XenError {
    pub(crate) fn syntax(path: &str, message: impl Into<String>) -> Self {
        XenError::Syntax {
            path: path.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn parse(message: impl Into<String>, position: usize) -> Self {
        XenError::Parse {
            message: message.into(),
            position,
        }
    }

    /// The path expression this error refers to, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            XenError::NotFound { path }
            | XenError::AmbiguousMatch { path, .. }
            | XenError::Unsupported { path, .. }
            | XenError::IndexOutOfRange { path, .. }
            | XenError::Syntax { path, .. }
            | XenError::Pattern { path, .. } => Some(path),
            XenError::Argument(_) | XenError::Parse { .. } | XenError::Io(_) => None,
        }
    }
}
