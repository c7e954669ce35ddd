//! InMemory Document Store 実装
//!
//! DocumentStore trait のプロセス内実装。テストや永続化不要な構成で使用します。
//! 読み込み・書き込みの失敗を再現するためのスイッチを持ちます。

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DocumentStore, StoreError};

/// インメモリ Document Store 実装
pub struct InMemoryDocumentStore<D> {
    document: Mutex<D>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    saves: AtomicUsize,
}

impl<D> InMemoryDocumentStore<D>
where
    D: Clone + Send + Sync + 'static,
{
    /// 新しい InMemoryDocumentStore を作成
    pub fn new(document: D) -> Self {
        Self {
            document: Mutex::new(document),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            saves: AtomicUsize::new(0),
        }
    }

    /// 以降の load を失敗させる
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// 以降の save を失敗させる
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// 成功した save の回数
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// 現在のドキュメント（失敗スイッチを無視）
    pub async fn snapshot(&self) -> D {
        self.document.lock().await.clone()
    }
}

#[async_trait]
impl<D> DocumentStore<D> for InMemoryDocumentStore<D>
where
    D: Clone + Send + Sync + 'static,
{
    async fn load(&self) -> Result<D, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Read("simulated read failure".to_string()));
        }
        let document = self.document.lock().await;
        Ok(document.clone())
    }

    async fn save(&self, document: &D) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Write("simulated write failure".to_string()));
        }
        *self.document.lock().await = document.clone();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
