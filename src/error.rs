use std::path::PathBuf;
use thiserror::Error;

/// Drag transfer data that could not be turned into a payload
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed drag payload: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("drag payload is missing `{0}`")]
    Missing(&'static str),

    #[error("drag payload has zero duration")]
    ZeroDuration,

    #[error("drag payload duration {0} exceeds a day")]
    TooLong(u32),
}

/// Problems reading `config.toml`
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid log filter `{0}`")]
    LogFilter(String),
}
