//! Error types for sitectl

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sitectl operations
pub type SiteResult<T> = Result<T, SiteError>;

/// Main error type for sitectl
#[derive(Error, Debug)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Command \"{0}\" is not defined")]
    CommandNotFound(String),

    #[error("Database connection \"{0}\" is not configured")]
    ConnectionNotFound(String),

    #[error("Unsupported database driver: {0}")]
    UnsupportedDriver(String),

    #[error("Could not start '{program}': {reason}")]
    ProcessSpawn { program: String, reason: String },

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("User cancelled operation")]
    UserCancelled,

    #[error("User input error: {0}")]
    Dialoguer(String),
}

impl From<dialoguer::Error> for SiteError {
    fn from(err: dialoguer::Error) -> Self {
        match err {
            dialoguer::Error::IO(e) if e.kind() == std::io::ErrorKind::Interrupted => {
                SiteError::UserCancelled
            }
            other => SiteError::Dialoguer(other.to_string()),
        }
    }
}

impl SiteError {
    /// Create a process spawn error
    pub fn spawn<P: Into<String>, R: ToString>(program: P, reason: R) -> Self {
        SiteError::ProcessSpawn {
            program: program.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error comes from looking up a command that was never registered.
    ///
    /// Resolution failures are wiring defects and must travel up as errors
    /// instead of being folded into an exit status.
    pub fn is_resolution(&self) -> bool {
        matches!(self, SiteError::CommandNotFound(_))
    }

    /// Get exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            SiteError::CommandNotFound(_) => 2,
            SiteError::ProcessSpawn { .. } => 127,
            SiteError::UserCancelled => 130,
            _ => 1,
        }
    }
}
