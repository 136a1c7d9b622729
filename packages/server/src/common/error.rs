//! Typed errors shared by board adapters, the job sink and the sync engine.
//!
//! Every failure carries one of a small set of kinds so callers can decide
//! what to do (retry later, report, reject the request) without matching on
//! provider-specific details.

use serde::Serialize;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Coarse failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Unavailable,
    Internal,
    InvalidArgument,
    Configuration,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::NotFound => "not_found",
            ErrorKind::Unavailable => "unavailable",
            ErrorKind::Internal => "internal",
            ErrorKind::InvalidArgument => "invalid_argument",
            ErrorKind::Configuration => "configuration",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    /// Upstream has no postings for this company/board combination
    #[error("not found: {message}")]
    NotFound { message: String },

    /// Transport failure reaching an upstream or the job sink
    #[error("unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Undecodable response or a write rejected as malformed
    #[error("internal: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    /// Caller asked for something that cannot exist (unknown board, blank company)
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// Malformed configuration input
    #[error("configuration error: {message}")]
    Configuration { message: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::NotFound { .. } => ErrorKind::NotFound,
            Error::Unavailable { .. } => ErrorKind::Unavailable,
            Error::Internal { .. } => ErrorKind::Internal,
            Error::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            Error::Configuration { .. } => ErrorKind::Configuration,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound {
            message: message.into(),
        }
    }

    pub fn unavailable(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Error::Unavailable {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn internal(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Error::Internal {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Internal failure with no underlying error value.
    pub fn internal_msg(message: impl Into<String>) -> Self {
        Error::Internal {
            message: message.into(),
            source: None,
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    /// Message plus the proximate cause, for reports and logs.
    pub fn detail(&self) -> String {
        use std::error::Error as _;
        match self.source() {
            Some(source) => format!("{}: {}", self, source),
            None => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
