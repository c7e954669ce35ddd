//! Terminal chat client for the Recap server.
//!
//! Connects to `/ws`, joins with the given identity, prints the snapshot and
//! every subsequent frame, and sends each line typed on stdin as a message.

mod domain;
pub mod error;
mod formatter;
mod runner;
mod session;
mod ui;

pub use runner::{ClientOptions, run_client};
