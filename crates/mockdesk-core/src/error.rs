//! Error types for mockdesk.
//!
//! One unified error type with explicit variants for validation, transport,
//! local lookup, authentication, storage and input failures. None of them is
//! fatal: controllers convert them into observable state at the operation
//! boundary.

use thiserror::Error;

use crate::types::RecordId;
use crate::validation::ValidationErrors;

/// The unified error type for mockdesk operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Form input failed one or more field rules.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// Network or HTTP failure talking to a remote endpoint.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// A mutation targeted a record that is not in the local snapshot.
    #[error("record {id} not found in the local snapshot")]
    NotFoundLocal { id: RecordId },

    /// Authentication errors.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Local cache errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Malformed identifiers, URLs, records or settings.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The consumer's scope ended before the operation completed.
    #[error("operation cancelled: consumer scope ended")]
    Cancelled,
}

impl Error {
    /// Message suitable for showing in a view.
    ///
    /// Transport failures surface their underlying message verbatim
    /// (e.g. `Network Error`), everything else uses its display form.
    pub fn user_message(&self) -> String {
        match self {
            Error::Transport(err) => err.message().to_string(),
            Error::Auth(err) => err.to_string(),
            other => other.to_string(),
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// Connection could not be established.
    #[error("{message}")]
    Connection { message: String },

    /// Request timed out at the transport layer.
    #[error("{message}")]
    Timeout { message: String },

    /// Server answered with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Response body could not be decoded.
    #[error("{message}")]
    Decode { message: String },
}

impl TransportError {
    /// Build a status error with the conventional message.
    pub fn status(status: u16) -> Self {
        TransportError::Status {
            status,
            message: format!("Request failed with status code {}", status),
        }
    }

    /// The underlying message.
    pub fn message(&self) -> &str {
        match self {
            TransportError::Connection { message }
            | TransportError::Timeout { message }
            | TransportError::Status { message, .. }
            | TransportError::Decode { message } => message,
        }
    }

    /// HTTP status, when the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Authentication-related errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No credential pair matched.
    #[error("Invalid username or password. Please try again.")]
    InvalidCredentials,

    /// An authenticated route or operation was attempted without the flag.
    #[error("not authenticated")]
    NotAuthenticated,
}

/// Local cache errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("cannot access '{key}': {message}")]
    Io { key: String, message: String },

    /// A cached value could not be decoded.
    #[error("corrupt cache entry '{key}': {message}")]
    Corrupt { key: String, message: String },
}

/// Input validation errors for typed values.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid record identifier.
    #[error("invalid record id '{value}': {reason}")]
    RecordId { value: String, reason: String },

    /// Invalid resource name.
    #[error("invalid resource '{value}': {reason}")]
    Resource { value: String, reason: String },

    /// Invalid base URL.
    #[error("invalid base URL '{value}': {reason}")]
    BaseUrl { value: String, reason: String },

    /// Record payload is not usable.
    #[error("invalid record: {reason}")]
    Record { reason: String },

    /// Generic invalid input.
    #[error("{message}")]
    Other { message: String },
}
