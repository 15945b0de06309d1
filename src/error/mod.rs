//! Error types for configuration loading, conversion requests, and directory walks

use std::path::PathBuf;

/// Errors raised while loading a configuration document
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed configuration{}: {source}", describe_path(.path))]
    Parse {
        path: Option<PathBuf>,
        #[source]
        source: serde_json::Error,
    },

    #[error("{field}: {value:?} is not supported")]
    UnsupportedValue { field: &'static str, value: String },
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn unsupported(field: &'static str, value: impl Into<String>) -> Self {
        Self::UnsupportedValue {
            field,
            value: value.into(),
        }
    }

    /// Name of the configuration field that failed validation, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::UnsupportedValue { field, .. } => Some(*field),
            _ => None,
        }
    }
}

fn describe_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" in {}", p.display()))
        .unwrap_or_default()
}

/// Errors raised by a single conversion request
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(
        "unsupported content type {0:?}; only text/plain, application/json and application/octet-stream are supported"
    )]
    UnsupportedContentType(String),

    #[error("failed to read source: {0}")]
    Read(#[source] std::io::Error),

    #[error("nothing to convert")]
    NothingToConvert,

    #[error("failed to encode request: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("{url} POST failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    #[error("{url} returned HTTP {status}: {body}")]
    Status {
        url: String,
        status: u16,
        body: String,
    },

    #[error("{url} POST read body failed: {source}")]
    ResponseRead {
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("zero bytes returned by {url}")]
    EmptyResponse { url: String },
}

impl ConvertError {
    /// True when the error happened before anything was sent to the service
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedContentType(_)
                | Self::Read(_)
                | Self::NothingToConvert
                | Self::Serialize(_)
        )
    }
}

/// Errors raised while walking a document tree
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: FileError,
    },

    #[error("{failed} of {total} files failed to convert")]
    Failures { failed: usize, total: usize },
}

/// Failure converting one file during a walk
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("cannot read directory: {0}")]
    Traverse(#[from] walkdir::Error),
}

/// Crate-level error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Walk(#[from] WalkError),
}

impl Error {
    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(ConfigError::UnsupportedValue { field, value }) => {
                format!("Configuration error: {} does not accept {:?}", field, value)
            }
            Self::Config(err) => format!("Configuration error: {}", err),
            Self::Convert(ConvertError::Transport { url, .. }) => {
                format!("Conversion service unreachable at {}", url)
            }
            Self::Convert(err) => format!("Conversion error: {}", err),
            Self::Walk(err) => err.to_string(),
        }
    }

    /// A short hint for the most common failure modes
    pub fn tip(&self) -> Option<&'static str> {
        match self {
            Self::Convert(ConvertError::Transport { .. })
            | Self::Walk(WalkError::File {
                source: FileError::Convert(ConvertError::Transport { .. }),
                ..
            }) => Some("Is the conversion server running? Check \"port\" in the configuration."),
            Self::Config(ConfigError::Parse { .. }) => {
                Some("The configuration must be a JSON object with kebab-case keys.")
            }
            Self::Walk(WalkError::Failures { .. }) => {
                Some("Each failed file is listed above. Use --fail-fast to stop at the first one.")
            }
            _ => None,
        }
    }
}

/// Result type for crate operations
pub type Result<T> = std::result::Result<T, Error>;
