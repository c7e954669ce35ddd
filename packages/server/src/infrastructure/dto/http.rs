//! HTTP API request/response DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::CanvasState;

/// Body of `/canvas/validate-placement` and `/canvas/place`
#[derive(Debug, Clone, Deserialize)]
pub struct PlacementRequest {
    pub x: i64,
    pub y: i64,
    /// Anything but a string is treated as an empty message
    #[serde(default)]
    pub message: Option<serde_json::Value>,
}

impl PlacementRequest {
    pub fn message_text(&self) -> &str {
        self.message
            .as_ref()
            .and_then(serde_json::Value::as_str)
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatePlacementResponse {
    pub ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceResponse {
    pub state: CanvasState,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAllocationDto {
    pub contract_address: String,
    pub token_id: u64,
}

/// Token metadata in the common marketplace format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasMetadataDto {
    pub name: String,
    pub description: String,
    pub image: String,
    pub attributes: Vec<MetadataAttributeDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataAttributeDto {
    pub trait_type: String,
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
    /// RFC 3339
    pub timestamp: String,
}

/// The authenticated caller, as exposed by `/auth/user`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicUserDto {
    pub id: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentRequest {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
