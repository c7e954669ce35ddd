//! HTTP and WebSocket handlers.

mod canvas;
mod http;
mod photos;
mod websocket;

pub use canvas::{
    allocate_token, canvas_image, canvas_metadata, canvas_state, place, validate_placement,
};
pub use http::{current_user, health_check};
pub use photos::{comment_photo, delete_photo, like_photo, list_photos};
pub use websocket::websocket_handler;
