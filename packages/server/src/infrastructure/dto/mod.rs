//! Data Transfer Objects (DTOs) for the recap server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: chat frame DTOs
//! - `http`: HTTP API request/response DTOs

pub mod conversion;
pub mod http;
pub mod websocket;
