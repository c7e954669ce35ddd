//! Document storage port.
//!
//! Every durable document (canvas state, chat transcript, photo gallery) is read
//! and written wholesale through this trait. Use cases decide how reads and
//! writes are serialised; the port itself makes no atomicity promise across a
//! `load` followed by a `save`.

use async_trait::async_trait;

use super::error::StoreError;

/// Whole-document storage
#[async_trait]
pub trait DocumentStore<D>: Send + Sync
where
    D: Send + Sync + 'static,
{
    /// Load the current document.
    ///
    /// A document that does not exist yet is not an error: implementations
    /// return their initial document.
    async fn load(&self) -> Result<D, StoreError>;

    /// Replace the stored document
    async fn save(&self, document: &D) -> Result<(), StoreError>;
}
