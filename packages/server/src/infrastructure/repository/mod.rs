//! Repository implementations.
//!
//! - `json_file`: whole-document JSON files on disk
//! - `inmemory`: process-local document store and participant registry

pub mod inmemory;
pub mod json_file;

pub use inmemory::{InMemoryDocumentStore, InMemoryParticipantRegistry};
pub use json_file::JsonFileStore;
