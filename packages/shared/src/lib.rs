//! Shared utilities for the Recap server and client.

pub mod logger;
pub mod time;
