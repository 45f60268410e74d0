//! Error types for the bot-definition workspace.

use std::path::PathBuf;

/// Bundle-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum BundleError {
    #[error("io error at `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("archive write failed: {0}")]
    Write(#[from] std::io::Error),

    #[error("json error in `{path}`: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("bot definition not found at `{0}`")]
    MissingDefinition(PathBuf),

    #[error("manifest not found at `{0}`")]
    MissingManifest(PathBuf),

    #[error("`{0}` is not a JSON object")]
    NotAnObject(PathBuf),

    #[error("invalid bot name `{0}`: must be a single path component")]
    InvalidName(String),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, BundleError>;

impl BundleError {
    /// Attach `path` to an I/O failure.
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| Self::Io { path, source }
    }

    /// Attach `path` to a JSON failure.
    pub(crate) fn json(path: impl Into<PathBuf>) -> impl FnOnce(serde_json::Error) -> Self {
        let path = path.into();
        move |source| Self::Json { path, source }
    }
}
