//! Error types for inspection, configuration and frame replay.

use std::path::PathBuf;

/// Errors raised by the inspection core and its configuration.
#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    /// A detection carried a label outside the configured category set.
    #[error("unknown category label {label:?}")]
    UnknownCategory { label: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors raised while replaying recorded runner responses.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("failed to read frame stream")]
    Io(#[from] std::io::Error),

    #[error("malformed runner response on line {line}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Failure of the frame loop: either the vision source or a rejected frame.
#[derive(Debug, thiserror::Error)]
pub enum RunError<E>
where
    E: std::error::Error + 'static,
{
    #[error("vision source failed")]
    Source(#[source] E),

    #[error("frame {frame} rejected")]
    Inspect {
        frame: u64,
        #[source]
        source: InspectError,
    },
}
