//! Error types for the command line front end.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{path}: {source}")]
    Document {
        path: PathBuf,
        source: hf_project::ProjectError,
    },

    #[error("{0}")]
    Engine(#[from] hf_engine::EngineError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{failed} of {total} flow tests failed")]
    BatchFailed { failed: usize, total: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<hf_engine::ValidationError> for CliError {
    fn from(err: hf_engine::ValidationError) -> Self {
        CliError::Engine(err.into())
    }
}

pub type CliResult<T> = Result<T, CliError>;

pub trait WithPath<T> {
    fn at(self, path: &std::path::Path) -> CliResult<T>;
}

impl<T> WithPath<T> for hf_project::ProjectResult<T> {
    fn at(self, path: &std::path::Path) -> CliResult<T> {
        self.map_err(|source| CliError::Document {
            path: path.to_path_buf(),
            source,
        })
    }
}
