//! Domain layer: entities, value objects and the ports the use cases depend on.

pub mod canvas;
pub mod canvas_image;
pub mod chat;
pub mod error;
pub mod gallery;
pub mod message_pusher;
pub mod registry;
pub mod repository;
pub mod value_object;

pub use canvas::{CanvasState, Placement, PlacementDraft};
pub use chat::{ChatLog, ChatMessage, Participant};
pub use error::{
    MessagePushError, PlacementRejection, RegistryError, StoreError, ValueObjectError,
};
pub use gallery::{Photo, PhotoComment};
pub use message_pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use registry::{ConnectionRegistry, ConnectionState, ParticipantRegistry};
pub use repository::DocumentStore;
pub use value_object::{
    AllowList, ConnectionId, Identity, MessageBody, PlacementMessage, Timestamp,
};
