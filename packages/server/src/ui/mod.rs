//! UI layer: axum router, handlers and HTTP-facing concerns.

pub mod auth;
pub mod error;
mod handler;
mod server;
mod signal;
pub mod state;

pub use server::{Server, router};
