use std::path::PathBuf;
use thiserror::Error;

/// Everything that aborts a generator run.
///
/// Classes rejected by the shape or serializability filters never show up
/// here; those are routine exclusions.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed metadata in {}: {detail}", path.display())]
    Metadata { path: PathBuf, detail: String },

    #[error("unsupported assembly schema '{schema}' in {}", path.display())]
    UnsupportedSchema { path: PathBuf, schema: String },

    #[error("cannot resolve dependency '{name}' from {}", from.display())]
    MissingDependency { name: String, from: PathBuf },

    #[error("type not found: {fqn}")]
    TypeNotFound { fqn: String },

    #[error("base schema: {reason}")]
    BaseSchema { reason: String },
}

pub type Result<T, E = GenerateError> = std::result::Result<T, E>;
