//! Caller identity supplied by the upstream authentication proxy.
//!
//! The proxy terminates the OAuth flow and forwards the caller through trusted
//! headers. Requests without an identity header are unauthenticated.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::domain::{Identity, Participant};

use super::error::ApiError;

pub const USER_ID_HEADER: &str = "x-user-id";
pub const USER_NAME_HEADER: &str = "x-user-name";
pub const USER_AVATAR_HEADER: &str = "x-user-avatar";

/// An authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub identity: Identity,
    pub display_name: String,
    pub avatar_ref: Option<String>,
}

impl AuthenticatedUser {
    fn from_parts(parts: &Parts) -> Option<Self> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        let identity = Identity::new(header(USER_ID_HEADER)?).ok()?;
        let display_name = header(USER_NAME_HEADER).unwrap_or_else(|| identity.to_string());
        Some(Self {
            identity,
            display_name,
            avatar_ref: header(USER_AVATAR_HEADER),
        })
    }

    pub fn participant(&self) -> Participant {
        Participant::new(
            self.identity.clone(),
            self.display_name.clone(),
            self.avatar_ref.clone(),
        )
    }
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Self::from_parts(parts).ok_or(ApiError::Unauthorized)
    }
}
