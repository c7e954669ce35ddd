//! Recap community server library.
//!
//! Hosts the shared placement canvas, the realtime chat broadcaster and the photo
//! gallery. Durable state lives in JSON documents on disk; live chat connections
//! are tracked in memory only.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
