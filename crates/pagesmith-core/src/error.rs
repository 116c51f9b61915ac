use std::io;
use std::path::{Path, PathBuf};

use pagesmith_config::ConfigError;
use pagesmith_plugins::TransformError;
use thiserror::Error;

pub type Result<T, E = TaskError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error at {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },

    /// A build block references a file found in none of the search paths.
    #[error("{} references '{reference}', which was not found in any search path", .page.display())]
    UnresolvedReference { page: PathBuf, reference: String },

    #[error("{} has an unknown build block type '{kind}'", .page.display())]
    UnknownBlock { page: PathBuf, kind: String },

    #[error("task '{task}' did not complete: {message}")]
    Aborted { task: String, message: String },
}

/// Attach the offending path to an I/O failure.
pub trait IoResultExt<T> {
    fn at(self, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> IoResultExt<T> for io::Result<T> {
    fn at(self, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|source| TaskError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let result: io::Result<()> = Err(io::Error::new(io::ErrorKind::NotFound, "gone"));
        let err = result.at("dist/index.html").unwrap_err();

        assert!(err.to_string().contains("dist/index.html"));
        assert!(matches!(err, TaskError::Io { .. }));
    }

    #[test]
    fn test_unresolved_reference_message() {
        let err = TaskError::UnresolvedReference {
            page: PathBuf::from("temp/index.html"),
            reference: "assets/styles/missing.css".into(),
        };
        let message = err.to_string();
        assert!(message.contains("temp/index.html"));
        assert!(message.contains("assets/styles/missing.css"));
    }
}
