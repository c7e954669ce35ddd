//! In-memory implementations.

pub mod document;
pub mod registry;

pub use document::InMemoryDocumentStore;
pub use registry::InMemoryParticipantRegistry;
