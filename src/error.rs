use std::fmt;
use std::process::ExitCode;
use thiserror::Error;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitStatus {
    Success = 0,
    GeneralError = 1,
    CatalogUnavailable = 2,
    GenerationUnavailable = 3,
    Timeout = 4,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status as u8)
    }
}

/// Why a call to an external service failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    Unreachable,
    Timeout,
    BadResponse,
}

impl FailureReason {
    /// Classify a transport-level reqwest error
    pub fn classify(error: &reqwest::Error) -> Self {
        if error.is_timeout() {
            FailureReason::Timeout
        } else if error.is_connect() {
            FailureReason::Unreachable
        } else if error.is_decode() || error.is_status() || error.is_body() {
            FailureReason::BadResponse
        } else {
            FailureReason::Unreachable
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Unreachable => write!(f, "unreachable"),
            FailureReason::Timeout => write!(f, "timed out"),
            FailureReason::BadResponse => write!(f, "bad response"),
        }
    }
}

/// Failure talking to the book catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Catalog {reason}: {detail}")]
pub struct CatalogError {
    pub reason: FailureReason,
    pub detail: String,
}

impl CatalogError {
    pub fn new(reason: FailureReason, detail: impl Into<String>) -> Self {
        CatalogError {
            reason,
            detail: detail.into(),
        }
    }

    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        CatalogError::new(FailureReason::classify(error), error.to_string())
    }

    /// Message suitable for showing in place of search results
    pub fn user_message(&self) -> String {
        match self.reason {
            FailureReason::Unreachable => {
                "Cannot reach Open Library. Check your network connection and try again.".to_string()
            }
            FailureReason::Timeout => "Open Library took too long to answer. Please try again.".to_string(),
            FailureReason::BadResponse => {
                format!("Open Library returned an unexpected answer ({}).", self.detail)
            }
        }
    }
}

/// Failure talking to the text-generation service
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Generation {reason}: {detail}")]
pub struct GenerationError {
    pub reason: FailureReason,
    pub detail: String,
}

impl GenerationError {
    pub fn new(reason: FailureReason, detail: impl Into<String>) -> Self {
        GenerationError {
            reason,
            detail: detail.into(),
        }
    }

    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        GenerationError::new(FailureReason::classify(error), error.to_string())
    }

    /// Message suitable for showing in place of an analysis
    pub fn user_message(&self) -> String {
        match self.reason {
            FailureReason::Unreachable => {
                "Cannot connect to the generation service. Make sure 'ollama serve' is running.".to_string()
            }
            FailureReason::Timeout => {
                "The generation service timed out. Try again, or raise the analysis timeout.".to_string()
            }
            FailureReason::BadResponse => {
                format!("The generation service returned an unexpected answer ({}).", self.detail)
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum BookclubError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found at {0}")]
    ConfigNotFound(String),

    #[error("Invalid configuration: {0}")]
    ConfigInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error("Unknown genre '{0}'")]
    UnknownGenre(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No books found for genre '{0}'")]
    NoBooksFound(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

impl BookclubError {
    /// Convert error to appropriate exit status
    pub fn exit_status(&self) -> ExitStatus {
        match self {
            BookclubError::Catalog(e) if e.reason == FailureReason::Timeout => ExitStatus::Timeout,
            BookclubError::Generation(e) if e.reason == FailureReason::Timeout => ExitStatus::Timeout,
            BookclubError::Catalog(_) => ExitStatus::CatalogUnavailable,
            BookclubError::Generation(_) => ExitStatus::GenerationUnavailable,

            BookclubError::Config(_)
            | BookclubError::ConfigNotFound(_)
            | BookclubError::ConfigInvalid(_)
            | BookclubError::Io(_)
            | BookclubError::TomlParse(_)
            | BookclubError::TomlSerialize(_)
            | BookclubError::Json(_)
            | BookclubError::UnknownGenre(_)
            | BookclubError::InvalidInput(_)
            | BookclubError::NoBooksFound(_)
            | BookclubError::UserCancelled => ExitStatus::GeneralError,
        }
    }

    /// Human-facing message; network failures never show raw transport text first
    pub fn user_message(&self) -> String {
        match self {
            BookclubError::Catalog(e) => e.user_message(),
            BookclubError::Generation(e) => e.user_message(),
            BookclubError::UnknownGenre(genre) => format!(
                "Unknown genre '{}'. Run 'bookclub genres' to see the available genres.",
                genre
            ),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BookclubError>;
