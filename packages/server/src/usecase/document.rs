//! Per-document serialisation of read-modify-write cycles.
//!
//! Each durable document gets one `GuardedDocument`. Mutations hold its lock
//! across `load -> mutate -> save`, so two concurrent writers can never both
//! start from the same pre-update document. Plain reads do not take the lock:
//! stores replace documents atomically, so a reader sees either the old or the
//! new version.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::domain::{DocumentStore, StoreError};

pub struct GuardedDocument<D> {
    store: Arc<dyn DocumentStore<D>>,
    lock: Mutex<()>,
}

impl<D> GuardedDocument<D>
where
    D: Send + Sync + 'static,
{
    pub fn new(store: Arc<dyn DocumentStore<D>>) -> Self {
        Self {
            store,
            lock: Mutex::new(()),
        }
    }

    /// Load the latest committed document
    pub async fn read(&self) -> Result<D, StoreError> {
        self.store.load().await
    }

    /// Run `mutate` against the latest document and persist the result.
    ///
    /// Nothing is written when `mutate` fails, and a failed save means the
    /// mutation is not committed.
    pub async fn update<T, E, F>(&self, mutate: F) -> Result<T, E>
    where
        F: FnOnce(&mut D) -> Result<T, E> + Send,
        T: Send,
        E: From<StoreError>,
    {
        let _guard = self.lock.lock().await;

        let mut document = self.store.load().await?;
        let output = mutate(&mut document)?;
        self.store.save(&document).await?;

        Ok(output)
    }
}
