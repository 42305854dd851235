//! Tool-level errors.
//!
//! Expression evaluation failures are deliberately not represented here:
//! an enumerator the evaluator cannot cook is emitted unmodified, matching
//! the tolerant behavior downstream loaders rely on.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a generation run.
#[derive(Error, Debug)]
pub enum CdefError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to spawn preprocessor `{command}`: {source}")]
    PreprocessorSpawn {
        command: String,
        source: std::io::Error,
    },

    #[error("preprocessor `{command}` failed:\n{stderr}")]
    Preprocessor { command: String, stderr: String },

    #[error("no engine declarations found in preprocessed source")]
    NoEngineDeclarations,

    #[error("failed to persist output to {path}: {source}")]
    Persist {
        path: PathBuf,
        source: tempfile::PersistError,
    },
}
