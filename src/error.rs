//! Error types for the Beszel client

use thiserror::Error;

/// Errors that can occur when talking to a Beszel hub
#[derive(Error, Debug)]
pub enum BeszelError {
    /// No base URL could be resolved, or the local config store is unusable
    #[error("Configuration error: {0}")]
    Config(String),

    /// The hub answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        status: u16,
        body: String,
    },

    /// Connection refused, timeout, TLS failure
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body was not the JSON shape we expected
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Local I/O (config file)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request issued after the connection was released
    #[error("Connection already closed")]
    Closed,
}

impl BeszelError {
    /// HTTP status code, if this is an HTTP error
    pub fn status(&self) -> Option<u16> {
        match self {
            BeszelError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the hub rejected the credentials or token
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

pub type BeszelResult<T> = Result<T, BeszelError>;
