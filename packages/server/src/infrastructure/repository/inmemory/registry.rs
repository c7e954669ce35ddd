//! InMemory Participant Registry 実装
//!
//! ドメイン層が定義する ParticipantRegistry trait の具体的な実装。
//! ConnectionRegistry ドメインモデルを Mutex で保護して保持します。
//! プロセス再起動で内容は失われます（永続化の対象外）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, ConnectionRegistry, ConnectionState, Participant, ParticipantRegistry,
    RegistryError,
};

/// インメモリ Participant Registry 実装
pub struct InMemoryParticipantRegistry {
    /// ConnectionRegistry ドメインモデル
    registry: Arc<Mutex<ConnectionRegistry>>,
}

impl InMemoryParticipantRegistry {
    /// 新しい InMemoryParticipantRegistry を作成
    pub fn new(registry: Arc<Mutex<ConnectionRegistry>>) -> Self {
        Self { registry }
    }
}

impl Default for InMemoryParticipantRegistry {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(ConnectionRegistry::new())))
    }
}

#[async_trait]
impl ParticipantRegistry for InMemoryParticipantRegistry {
    async fn open(&self, connection_id: ConnectionId) {
        let mut registry = self.registry.lock().await;
        registry.open(connection_id);
    }

    async fn identify(
        &self,
        connection_id: &ConnectionId,
        participant: Participant,
    ) -> Result<(), RegistryError> {
        let mut registry = self.registry.lock().await;
        registry.identify(connection_id, participant)
    }

    async fn close(&self, connection_id: &ConnectionId) -> Option<ConnectionState> {
        let mut registry = self.registry.lock().await;
        registry.close(connection_id)
    }

    async fn participant_of(&self, connection_id: &ConnectionId) -> Option<Participant> {
        let registry = self.registry.lock().await;
        registry.participant_of(connection_id).cloned()
    }

    async fn identified_connections(&self) -> Vec<ConnectionId> {
        let registry = self.registry.lock().await;
        registry.identified_connections()
    }

    async fn count_connections(&self) -> usize {
        let registry = self.registry.lock().await;
        registry.len()
    }
}
