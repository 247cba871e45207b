// src/error.rs
//! Error types for edcs_migrants.
//!
//! Row-level problems (ragged input rows, gazetteer rows without a name) are
//! not errors: they are logged and skipped where they occur. Everything here
//! aborts the run.

use std::path::PathBuf;

/// Alias for Results returning [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("table error in {}: {source}", path.display())]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{table}: required column '{column}' not found in header")]
    MissingColumn { table: String, column: String },

    #[error("variant '{variant}' is claimed by both '{first}' and '{second}'")]
    AmbiguousVariant {
        variant: String,
        first: String,
        second: String,
    },

    #[error("no '{prefix}_<date>.csv' found in {} within {days} days", dir.display())]
    NoInput {
        dir: PathBuf,
        prefix: String,
        days: u32,
    },

    #[error("invalid config {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}
