//! Error types for the incremental generators.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while checking or running a generator.
///
/// Every variant is fatal to the current invocation; callers abort the build.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("{}:{line}: {message}", .file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        message: String,
    },

    #[error("I/O error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file not found: '{}'", .0.display())]
    MissingInput(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GeneratorError {
    /// Wrap an I/O error with the file it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        GeneratorError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Build a parse error from a YAML failure, keeping the 1-based line if known.
    pub fn yaml(file: impl AsRef<Path>, err: &serde_yaml::Error) -> Self {
        let line = err.location().map(|loc| loc.line()).unwrap_or(1);
        GeneratorError::Parse {
            file: file.as_ref().to_path_buf(),
            line,
            message: format!("YAML error: {}", err),
        }
    }
}

impl From<config::ConfigError> for GeneratorError {
    fn from(err: config::ConfigError) -> Self {
        GeneratorError::Config(err.to_string())
    }
}
