use std::path::PathBuf;

/// Failures while reading the startup configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
}
