//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{PlacementRejection, RegistryError, StoreError};

/// Canvas placement errors (validation and commit)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PlaceError {
    #[error("{0}")]
    Rejected(#[from] PlacementRejection),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Token allocation errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AllocateTokenError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// `join` frame errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum JoinError {
    #[error("connection has already joined")]
    AlreadyJoined,

    #[error("connection is not registered")]
    ConnectionNotFound,
}

impl From<RegistryError> for JoinError {
    fn from(e: RegistryError) -> Self {
        match e {
            RegistryError::AlreadyIdentified(_) => JoinError::AlreadyJoined,
            RegistryError::ConnectionNotFound(_) => JoinError::ConnectionNotFound,
        }
    }
}

/// `message` frame errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SendMessageError {
    #[error("join before sending messages")]
    NotJoined,

    #[error("message body must not be empty")]
    EmptyBody,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to broadcast message: {0}")]
    BroadcastFailed(String),
}

/// `typing-start` / `typing-stop` frame errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayTypingError {
    #[error("join before sending typing events")]
    NotJoined,
}

/// Photo gallery errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhotoError {
    #[error("Photo not found")]
    NotFound,

    #[error("Not allowed to manage photos")]
    Forbidden,

    #[error("{0}")]
    InvalidComment(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
