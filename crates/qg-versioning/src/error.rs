//! ---
//! qg_section: "01-versioning"
//! qg_subsection: "module"
//! qg_type: "source"
//! qg_scope: "code"
//! qg_description: "Error types for version parsing and table checks."
//! qg_version: "v0.1.0"
//! qg_owner: "tbd"
//! ---
use thiserror::Error;

use crate::table::VersionName;

/// Errors raised while parsing a dotted four-part version.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("version '{input}' must have 4 dot-separated parts, found {found}")]
    PartCount { input: String, found: usize },
    #[error("version '{input}' has non-numeric part '{part}'")]
    InvalidPart { input: String, part: String },
    #[error("version '{input}' has part '{part}' outside 0..=65535")]
    OutOfRange { input: String, part: String },
}

/// Consistency failures detected over the version table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    #[error("{tuple} formats to '{formatted}' but {text} is '{expected}'")]
    Mismatch {
        tuple: VersionName,
        text: VersionName,
        formatted: String,
        expected: String,
    },
    #[error("{name} holds an invalid version: {source}")]
    InvalidComponent {
        name: VersionName,
        #[source]
        source: VersionError,
    },
    #[error("version name {0} is declared more than once")]
    DuplicateName(VersionName),
    #[error("{0} is expected to hold a {1} value")]
    UnexpectedKind(VersionName, &'static str),
}

/// Shared result type for table operations.
pub type TableResult<T> = Result<T, TableError>;
