//! Error types for the verification client.
//!
//! # Design
//! Only three upstream failures are *classified*: a rejected API key, a
//! rejected captcha token and a rejected confirmation code. They get an
//! `ErrorKind` so callers can branch on them (re-prompt for a captcha vs.
//! re-prompt for a code). Every other failure is reported with enough
//! context to log, but carries no kind.

use std::fmt;

use thiserror::Error;

/// The closed set of upstream failures callers are expected to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Upstream answered 403: the API key is missing or invalid.
    InvalidApiKey,
    /// Upstream rejected the captcha token.
    InvalidCaptchaKey,
    /// Upstream rejected the confirmation code.
    InvalidConfirmationCode,
}

impl ErrorKind {
    /// Stable string code for logs and FFI-style consumers.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidApiKey => "INVALID_KEY",
            ErrorKind::InvalidCaptchaKey => "INVALID_CAPTCHA_KEY",
            ErrorKind::InvalidConfirmationCode => "INVALID_CONFIRMATION_CODE",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An upstream failure that matched a known signature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: String,
}

/// The client operation an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    StartVerification,
    CompleteVerification,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::StartVerification => f.write_str("start verification"),
            Operation::CompleteVerification => f.write_str("complete verification"),
        }
    }
}

/// Failure to turn typed input into an `HttpRequest`.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("failed to parse api endpoint url {url}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("couldn't serialize the verification request body")]
    Serialize(#[source] serde_json::Error),
}

/// Failure to complete an HTTP exchange. No response was obtained.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("couldn't communicate with verification endpoint: {0}")]
    Send(String),

    #[error("failed to read server response: {0}")]
    Read(String),
}

/// Errors returned by `VerificationClient`.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("empty api key received")]
    EmptyApiKey,

    #[error("invalid configuration: {0}")]
    Config(String),

    /// A known upstream failure. Match on it with `kind()` or `is_kind()`.
    #[error(transparent)]
    Classified(#[from] ClassifiedError),

    /// Any other non-200 upstream response.
    #[error("unexpected upstream response ({status}). body: {body}")]
    Upstream { status: u16, body: String },

    #[error("{operation}: failed to create verification request")]
    Build {
        operation: Operation,
        #[source]
        source: BuildError,
    },

    #[error("{operation}: failed to execute request against server")]
    Transport {
        operation: Operation,
        #[source]
        source: TransportError,
    },

    #[error("{operation}: failed to parse server response")]
    Decode {
        operation: Operation,
        #[source]
        source: serde_json::Error,
    },
}

impl VerificationError {
    /// The classified kind, if this error carries one.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            VerificationError::Classified(err) => Some(err.kind),
            _ => None,
        }
    }

    pub fn is_kind(&self, kind: ErrorKind) -> bool {
        self.kind() == Some(kind)
    }
}
