//! Conversion logic between DTOs and domain entities.

use crate::domain::{ChatMessage, Participant};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<Participant> for dto::ParticipantDto {
    fn from(model: Participant) -> Self {
        Self {
            identity: model.identity.into_string(),
            display_name: model.display_name,
            avatar_ref: model.avatar_ref,
        }
    }
}

impl From<ChatMessage> for dto::ChatMessageDto {
    fn from(model: ChatMessage) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id.into_string(),
            author_display_name: model.author_display_name,
            author_avatar_ref: model.author_avatar_ref,
            body: model.body,
            sent_at: model.sent_at.value(),
        }
    }
}
