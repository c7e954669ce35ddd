//! Domain error types.

use thiserror::Error;

/// Value object construction errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueObjectError {
    #[error("identity must not be empty")]
    EmptyIdentity,

    #[error("identity is too long (max {max} characters)")]
    IdentityTooLong { max: usize },

    #[error("message body must not be empty")]
    EmptyMessageBody,

    #[error("canvas size {width}x{height} is invalid (each side must be 1..={max})")]
    InvalidCanvasSize { width: u32, height: u32, max: u32 },
}

/// Reasons a canvas claim is refused.
///
/// The display strings are the reason strings surfaced to HTTP callers.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlacementRejection {
    #[error("out of bounds")]
    OutOfBounds,

    #[error("cell occupied")]
    CellOccupied,

    #[error("already placed")]
    AlreadyPlaced,
}

/// Document storage errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("failed to read document: {0}")]
    Read(String),

    #[error("failed to decode document: {0}")]
    Decode(String),

    #[error("failed to encode document: {0}")]
    Encode(String),

    #[error("failed to write document: {0}")]
    Write(String),
}

/// Connection registry errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("connection '{0}' is not registered")]
    ConnectionNotFound(String),

    #[error("connection '{0}' has already joined")]
    AlreadyIdentified(String),
}

/// Message push errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("connection '{0}' not found")]
    ClientNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}
