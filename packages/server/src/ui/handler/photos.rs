//! Photo gallery endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{Photo, PhotoComment},
    infrastructure::dto::http::{CommentRequest, MessageResponse},
    ui::{auth::AuthenticatedUser, error::ApiError, state::AppState},
    usecase::PhotoError,
};

impl From<PhotoError> for ApiError {
    fn from(e: PhotoError) -> Self {
        match e {
            PhotoError::NotFound => ApiError::NotFound(e.to_string()),
            PhotoError::Forbidden => ApiError::Forbidden(e.to_string()),
            PhotoError::InvalidComment(reason) => ApiError::BadRequest(reason),
            PhotoError::Store(e) => {
                tracing::error!("Gallery storage failure: {}", e);
                ApiError::Internal("Failed to update photos".to_string())
            }
        }
    }
}

/// `GET /api/photos`
pub async fn list_photos(State(state): State<Arc<AppState>>) -> Json<Vec<Photo>> {
    Json(state.list_photos_usecase.execute().await)
}

/// `POST /api/photos/{id}/like`
pub async fn like_photo(
    State(state): State<Arc<AppState>>,
    Path(photo_id): Path<String>,
) -> Result<Json<Photo>, ApiError> {
    let photo = state.like_photo_usecase.execute(&photo_id).await?;
    Ok(Json(photo))
}

/// `POST /api/photos/{id}/comments`
pub async fn comment_photo(
    State(state): State<Arc<AppState>>,
    Path(photo_id): Path<String>,
    Json(request): Json<CommentRequest>,
) -> Result<(StatusCode, Json<PhotoComment>), ApiError> {
    let comment = state
        .comment_photo_usecase
        .execute(&photo_id, request.user, request.text)
        .await?;
    Ok((StatusCode::CREATED, Json(comment)))
}

/// `DELETE /api/photos/{id}`
pub async fn delete_photo(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    Path(photo_id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .delete_photo_usecase
        .execute(&user.identity, &photo_id)
        .await?;
    Ok(Json(MessageResponse {
        message: "Photo deleted successfully".to_string(),
    }))
}
