//! Error types for the chat client.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// The identity was rejected before connecting
    #[error("Invalid identity '{0}'")]
    InvalidIdentity(String),

    /// Connection error
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
