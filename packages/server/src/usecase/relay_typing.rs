//! UseCase: 入力中イベントの中継
//!
//! サーバーは入力中の状態を保持せず、typing-start / typing-stop を他の識別済み
//! 接続にそのまま中継します。中継する ID は接続に紐付いた参加者のもので、
//! フレーム内の ID は使用しません。

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePushError, MessagePusher, Participant, ParticipantRegistry};

use super::error::RelayTypingError;

/// 中継内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingRelay {
    pub participant: Participant,
    pub targets: Vec<ConnectionId>,
}

/// 入力中イベント中継のユースケース
pub struct RelayTypingUseCase {
    registry: Arc<dyn ParticipantRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl RelayTypingUseCase {
    pub fn new(
        registry: Arc<dyn ParticipantRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
        }
    }

    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<TypingRelay, RelayTypingError> {
        let participant = self
            .registry
            .participant_of(connection_id)
            .await
            .ok_or(RelayTypingError::NotJoined)?;

        let targets = self
            .registry
            .identified_connections()
            .await
            .into_iter()
            .filter(|id| id != connection_id)
            .collect();

        Ok(TypingRelay {
            participant,
            targets,
        })
    }

    pub async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        json_message: &str,
    ) -> Result<(), MessagePushError> {
        self.message_pusher.broadcast(targets, json_message).await
    }
}
