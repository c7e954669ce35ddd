//! Canvas endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::header,
    response::IntoResponse,
};

use crate::{
    domain::{CanvasState, PlacementDraft, PlacementMessage, PlacementRejection},
    infrastructure::dto::http::{
        CanvasMetadataDto, MetadataAttributeDto, PlaceResponse, PlacementRequest,
        TokenAllocationDto, ValidatePlacementResponse,
    },
    ui::{auth::AuthenticatedUser, error::ApiError, state::AppState},
    usecase::{AllocateTokenError, PlaceError},
};

fn placement_request(
    payload: Result<Json<PlacementRequest>, JsonRejection>,
) -> Result<PlacementRequest, ApiError> {
    payload.map(|Json(request)| request).map_err(|e| {
        tracing::debug!("Rejected placement payload: {}", e);
        ApiError::BadRequest("x and y must be integers".to_string())
    })
}

fn storage_error(e: impl std::fmt::Display) -> ApiError {
    tracing::error!("Canvas storage failure: {}", e);
    ApiError::Internal("Failed to access canvas".to_string())
}

/// `GET /canvas/state`
pub async fn canvas_state(State(state): State<Arc<AppState>>) -> Json<CanvasState> {
    Json(state.get_canvas_state_usecase.execute().await)
}

/// `POST /canvas/validate-placement`
pub async fn validate_placement(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    payload: Result<Json<PlacementRequest>, JsonRejection>,
) -> Result<Json<ValidatePlacementResponse>, ApiError> {
    let request = placement_request(payload)?;

    match state
        .validate_placement_usecase
        .execute(&user.identity, request.x, request.y)
        .await
    {
        Ok(()) => Ok(Json(ValidatePlacementResponse { ok: true })),
        Err(PlaceError::Rejected(reason)) => Err(ApiError::BadRequest(reason.to_string())),
        Err(PlaceError::Store(e)) => Err(storage_error(e)),
    }
}

/// `POST /canvas/place`
pub async fn place(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
    payload: Result<Json<PlacementRequest>, JsonRejection>,
) -> Result<Json<PlaceResponse>, ApiError> {
    let request = placement_request(payload)?;
    let draft = PlacementDraft {
        owner_id: user.identity,
        display_name: user.display_name,
        avatar_ref: user.avatar_ref,
        message: PlacementMessage::new(request.message_text()),
    };

    match state
        .place_on_canvas_usecase
        .execute(draft, request.x, request.y)
        .await
    {
        Ok(canvas) => Ok(Json(PlaceResponse { state: canvas })),
        Err(PlaceError::Rejected(PlacementRejection::AlreadyPlaced)) => Err(ApiError::Forbidden(
            PlacementRejection::AlreadyPlaced.to_string(),
        )),
        Err(PlaceError::Rejected(reason)) => Err(ApiError::BadRequest(reason.to_string())),
        Err(PlaceError::Store(e)) => Err(storage_error(e)),
    }
}

/// `POST /canvas/allocate-token`
pub async fn allocate_token(
    State(state): State<Arc<AppState>>,
    user: AuthenticatedUser,
) -> Result<Json<TokenAllocationDto>, ApiError> {
    match state.allocate_token_usecase.execute(&user.identity).await {
        Ok(allocation) => Ok(Json(TokenAllocationDto {
            contract_address: allocation.contract_address,
            token_id: allocation.token_id,
        })),
        Err(AllocateTokenError::Store(e)) => Err(storage_error(e)),
    }
}

/// `GET /canvas/image`
pub async fn canvas_image(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let svg = state.render_canvas_usecase.image().await;
    ([(header::CONTENT_TYPE, "image/svg+xml")], svg)
}

/// `GET /canvas/metadata`
pub async fn canvas_metadata(State(state): State<Arc<AppState>>) -> Json<CanvasMetadataDto> {
    let metadata = state.render_canvas_usecase.metadata().await;

    // Domain Model から DTO への変換
    Json(CanvasMetadataDto {
        name: metadata.name,
        description: metadata.description,
        image: metadata.image,
        attributes: metadata
            .attributes
            .into_iter()
            .map(|attribute| MetadataAttributeDto {
                trait_type: attribute.trait_type.to_string(),
                value: attribute.value.into(),
            })
            .collect(),
    })
}
