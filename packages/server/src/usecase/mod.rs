//! UseCase layer: one struct per operation.
//!
//! UseCases depend only on the domain ports (`DocumentStore`,
//! `ParticipantRegistry`, `MessagePusher`) and never on concrete
//! infrastructure.

pub mod allocate_token;
pub mod comment_photo;
pub mod connect_participant;
pub mod delete_photo;
pub mod disconnect_participant;
pub mod document;
pub mod error;
pub mod get_canvas_state;
pub mod join_chat;
pub mod like_photo;
pub mod list_photos;
pub mod place_on_canvas;
pub mod relay_typing;
pub mod render_canvas;
pub mod send_message;
pub mod validate_placement;

pub use allocate_token::{AllocateTokenUseCase, TokenAllocation};
pub use comment_photo::CommentPhotoUseCase;
pub use connect_participant::{ChatSnapshot, ConnectParticipantUseCase};
pub use delete_photo::DeletePhotoUseCase;
pub use disconnect_participant::{Departure, DisconnectParticipantUseCase};
pub use document::GuardedDocument;
pub use error::{
    AllocateTokenError, JoinError, PhotoError, PlaceError, RelayTypingError, SendMessageError,
};
pub use get_canvas_state::GetCanvasStateUseCase;
pub use join_chat::{JoinChatUseCase, JoinOutcome};
pub use like_photo::LikePhotoUseCase;
pub use list_photos::ListPhotosUseCase;
pub use place_on_canvas::PlaceOnCanvasUseCase;
pub use relay_typing::{RelayTypingUseCase, TypingRelay};
pub use render_canvas::{CanvasMetadata, MetadataAttribute, RenderCanvasUseCase};
pub use send_message::{MessageDelivery, SendMessageUseCase};
pub use validate_placement::ValidatePlacementUseCase;
