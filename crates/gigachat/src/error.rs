//! Error types for the gigachat library.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, trust material, and input validation errors.

use thiserror::Error;

/// The unified error type for gigachat operations.
///
/// This error type covers all possible failure modes in the library,
/// with explicit variants to allow callers to handle specific cases.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (failed or malformed credential exchange).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Trust material errors (unreadable or unparseable root certificate).
    #[error("trust error: {0}")]
    Trust(#[from] TrustError),

    /// Input validation errors (invalid endpoint URL).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// The session was explicitly closed; no further requests can be made.
    #[error("session closed")]
    SessionClosed,
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

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connection {
                message: err.to_string(),
            }
        } else {
            TransportError::Http {
                message: err.to_string(),
            }
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(TransportError::from(err))
    }
}

/// Authentication-related errors from the credential exchange.
///
/// Both variants are fatal to the call that triggered the exchange and
/// leave any previously stored token untouched.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The exchange endpoint returned a non-success HTTP status.
    #[error("credential exchange failed: HTTP {status}: {body}")]
    ExchangeFailed { status: u16, body: String },

    /// The exchange succeeded at the transport level but the response body
    /// lacked `access_token` or `expires_at`.
    #[error("token fields missing from exchange response: {body}")]
    TokenMissing { body: String },
}

/// Errors loading the pinned root certificate.
#[derive(Debug, Error)]
pub enum TrustError {
    /// The certificate file could not be read.
    #[error("failed to read certificate file '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The certificate bytes could not be parsed.
    #[error("failed to parse certificate: {message}")]
    Parse { message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid endpoint URL format.
    #[error("invalid endpoint URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },
}
