//! Ambient HTTP endpoints.

use std::sync::Arc;

use axum::{Json, extract::State};
use recap_shared::time::timestamp_to_rfc3339;

use crate::{
    infrastructure::dto::http::{HealthDto, PublicUserDto},
    ui::{auth::AuthenticatedUser, state::AppState},
};

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthDto> {
    Json(HealthDto {
        status: "OK".to_string(),
        timestamp: timestamp_to_rfc3339(state.clock.now_millis()),
    })
}

/// The authenticated caller
pub async fn current_user(user: AuthenticatedUser) -> Json<PublicUserDto> {
    Json(PublicUserDto {
        id: user.identity.into_string(),
        username: user.display_name,
        avatar: user.avatar_ref,
    })
}
