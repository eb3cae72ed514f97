//! Error types for coursedesk.
//!
//! A single [`Error`] type covers every failure a caller can observe. The
//! nested enums keep transport, authorization, server, protocol, input and
//! local storage failures apart, and [`Error::category`] collapses them into the
//! [`ErrorCategory`] that forms and commands branch on.

use std::fmt;
use thiserror::Error;

/// The unified error type for coursedesk operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No response was received (DNS, TLS, connection refused, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The backend rejected the session (401) or the action (403).
    #[error("authorization error: {0}")]
    Auth(#[from] AuthError),

    /// Any other non-2xx response.
    #[error("server error: {0}")]
    Server(#[from] ServerError),

    /// A 2xx response that could not be understood.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input rejected locally before any request was sent.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Persisted session state could not be read or written.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Failure categories distinguishable by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// 401 with no stored credentials, or after a failed refresh.
    Unauthenticated,
    /// 403.
    Forbidden,
    /// No response was received.
    NetworkUnreachable,
    /// Other non-2xx responses and malformed success responses.
    ServerError,
    /// Rejected by client-side validation.
    InvalidInput,
    /// Local session storage failed.
    Storage,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Unauthenticated => "unauthenticated",
            ErrorCategory::Forbidden => "forbidden",
            ErrorCategory::NetworkUnreachable => "network unreachable",
            ErrorCategory::ServerError => "server error",
            ErrorCategory::InvalidInput => "invalid input",
            ErrorCategory::Storage => "storage",
        };
        f.write_str(name)
    }
}

/// Where the caller should send the user after an authorization failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Navigation {
    /// The login entry point.
    Login,
    /// The access-denied entry point.
    AccessDenied,
}

impl Navigation {
    /// Route of the entry point.
    pub fn path(&self) -> &'static str {
        match self {
            Navigation::Login => "/login",
            Navigation::AccessDenied => "/unauthorized",
        }
    }
}

impl Error {
    /// Returns the failure category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Transport(_) => ErrorCategory::NetworkUnreachable,
            Error::Auth(AuthError::Unauthenticated { .. }) => ErrorCategory::Unauthenticated,
            Error::Auth(AuthError::Forbidden { .. }) => ErrorCategory::Forbidden,
            Error::Server(_) | Error::Protocol(_) => ErrorCategory::ServerError,
            Error::InvalidInput(_) => ErrorCategory::InvalidInput,
            Error::Storage(_) => ErrorCategory::Storage,
        }
    }

    /// Returns the navigation instruction carried by this error, if any.
    pub fn navigation(&self) -> Option<Navigation> {
        match self.category() {
            ErrorCategory::Unauthenticated => Some(Navigation::Login),
            ErrorCategory::Forbidden => Some(Navigation::AccessDenied),
            _ => None,
        }
    }

    /// Returns the HTTP status behind this error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Auth(AuthError::Unauthenticated { .. }) => Some(401),
            Error::Auth(AuthError::Forbidden { .. }) => Some(403),
            Error::Server(err) => Some(err.status),
            _ => None,
        }
    }

    /// Check if this is a 401 from the backend.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Auth(AuthError::Unauthenticated { .. }))
    }

    /// Message supplied by the backend, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Error::Auth(AuthError::Unauthenticated { message })
            | Error::Auth(AuthError::Forbidden { message }) => message.as_deref(),
            Error::Server(err) => err.message.as_deref(),
            _ => None,
        }
    }

    /// Build an error from a non-2xx status and an optional body message.
    pub fn from_status(status: u16, message: Option<String>) -> Self {
        match status {
            401 => AuthError::Unauthenticated { message }.into(),
            403 => AuthError::Forbidden { message }.into(),
            _ => ServerError::new(status, message).into(),
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authorization errors returned by the backend.
#[derive(Debug, Error)]
pub enum AuthError {
    /// 401 that could not be recovered by a refresh.
    #[error("unauthenticated{}", fmt_message(.message))]
    Unauthenticated { message: Option<String> },

    /// 403.
    #[error("forbidden{}", fmt_message(.message))]
    Forbidden { message: Option<String> },
}

impl AuthError {
    /// A local "not logged in" failure that never reached the network.
    pub fn not_logged_in() -> Self {
        AuthError::Unauthenticated { message: None }
    }
}

fn fmt_message(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {}", message),
        None => String::new(),
    }
}

/// A non-2xx response other than 401/403.
#[derive(Debug)]
pub struct ServerError {
    /// HTTP status code.
    pub status: u16,
    /// Error message from the server.
    pub message: Option<String>,
}

impl ServerError {
    /// Create a new server error.
    pub fn new(status: u16, message: Option<String>) -> Self {
        Self { status, message }
    }

    /// Check if the endpoint does not exist on this backend.
    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref message) = self.message {
            write!(f, ": {}", message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ServerError {}

/// A successful response that did not carry what the caller needed.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The body did not match the expected shape.
    #[error("unexpected response body: {message}")]
    Decode { message: String },

    /// A checkout or portal endpoint returned no redirect URL.
    #[error("no redirect URL returned by {endpoint}")]
    MissingRedirect { endpoint: String },
}

/// Failures of the local credential and cookie store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading, writing or removing the session file failed.
    #[error("IO error: {message}")]
    Io { message: String },

    /// Session data could not be encoded or decoded.
    #[error("invalid session data: {message}")]
    Encoding { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid redirect URL returned by the backend.
    #[error("invalid redirect URL '{value}': {reason}")]
    Redirect { value: String, reason: String },

    /// Invalid email address.
    #[error("invalid email address '{value}'")]
    Email { value: String },

    /// A required form field was left empty.
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    /// Password and confirmation differ.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Password shorter than the minimum length.
    #[error("password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    /// Page number outside the known range.
    #[error("page {page} is outside 1..={total}")]
    PageOutOfRange { page: u32, total: u32 },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}
