use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading inputs or talking to the organization
/// settings service. The tree component itself never returns these to the
/// host; it logs them and keeps its fallback state.
#[derive(Debug, Error)]
pub enum CollectionTreeError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("settings request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("settings service returned no value for {0}")]
    MissingSetting(String),

    #[error("file watcher error: {0}")]
    Watch(#[from] notify::Error),
}

impl CollectionTreeError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn json(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T, E = CollectionTreeError> = std::result::Result<T, E>;
