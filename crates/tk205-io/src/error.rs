//! Error types for loading and configuration.

use crate::format::FileFormat;
use std::path::PathBuf;
use tk205_kernel::Diagnostic;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{}: I/O error: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: cannot decode {format}: {message}", .path.display())]
    Decode {
        path: PathBuf,
        format: FileFormat,
        message: String,
    },

    #[error("{}: cannot encode {format}: {message}", .path.display())]
    Encode {
        path: PathBuf,
        format: FileFormat,
        message: String,
    },

    /// Only `.json` and `.cbor` are read or written.
    #[error("{}: unsupported file format '{extension}' (expected .json or .cbor)", .path.display())]
    UnsupportedFormat { path: PathBuf, extension: String },

    /// The schema itself could not be read or compiled.
    #[error("{}: invalid schema: {message}", .schema.display())]
    Schema { schema: PathBuf, message: String },

    /// The document violates its schema. `errors` holds one
    /// `"<instance path>: <message>"` entry per violation.
    #[error("document does not conform to {}: {} error(s)", .schema.display(), .errors.len())]
    Validation { schema: PathBuf, errors: Vec<String> },

    /// A per-type load found a document of another type.
    #[error("{}: expected {expected}, document declares {found}", .path.display())]
    UnexpectedType {
        path: PathBuf,
        expected: &'static str,
        found: String,
    },

    /// The diagnostic sink promoted a binding diagnostic to a failure.
    #[error("escalated diagnostic: {0}")]
    Escalated(Diagnostic),
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{}: I/O error: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
