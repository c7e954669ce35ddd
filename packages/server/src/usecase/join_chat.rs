//! UseCase: チャットへの参加（join フレーム）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinChatUseCase::execute() / broadcast_participant_joined() メソッド
//!
//! ### なぜこのテストが必要か
//! - 初めて見る参加者だけが knownUsers に追加される（最初のスナップショットが優先）
//! - participant-joined は自分以外の識別済み接続にのみ通知される
//! - 二度目の join は拒否され、最初の参加者情報が維持される
//!
//! ### どのような状況を想定しているか
//! - 正常系：初回参加、既知ユーザーの再参加
//! - 異常系：識別済み接続からの再 join、knownUsers の保存失敗

use std::sync::Arc;

use recap_shared::time::Clock;

use crate::domain::{
    ChatLog, ConnectionId, MessagePushError, MessagePusher, Participant, ParticipantRegistry,
    StoreError, Timestamp,
};

use super::{document::GuardedDocument, error::JoinError};

/// join の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    pub participant: Participant,
    pub joined_at: Timestamp,
    /// participant-joined の通知対象（自分以外の識別済み接続）
    pub targets: Vec<ConnectionId>,
}

/// チャット参加のユースケース
pub struct JoinChatUseCase {
    registry: Arc<dyn ParticipantRegistry>,
    message_pusher: Arc<dyn MessagePusher>,
    chat_log: Arc<GuardedDocument<ChatLog>>,
    clock: Arc<dyn Clock>,
}

impl JoinChatUseCase {
    pub fn new(
        registry: Arc<dyn ParticipantRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        chat_log: Arc<GuardedDocument<ChatLog>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            chat_log,
            clock,
        }
    }

    /// 接続を識別済みにし、必要なら knownUsers に記録する
    ///
    /// knownUsers の保存に失敗しても参加自体は成立する（警告ログのみ）
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        participant: Participant,
    ) -> Result<JoinOutcome, JoinError> {
        self.registry
            .identify(&connection_id, participant.clone())
            .await?;
        tracing::info!(
            "Connection '{}' joined as '{}'",
            connection_id,
            participant.identity
        );

        if let Err(e) = self.remember(&participant).await {
            tracing::warn!(
                "Failed to record known user '{}': {}",
                participant.identity,
                e
            );
        }

        let targets = self
            .registry
            .identified_connections()
            .await
            .into_iter()
            .filter(|id| id != &connection_id)
            .collect();

        Ok(JoinOutcome {
            participant,
            joined_at: Timestamp::new(self.clock.now_millis()),
            targets,
        })
    }

    async fn remember(&self, participant: &Participant) -> Result<(), StoreError> {
        let known = self
            .chat_log
            .read()
            .await?
            .known_users
            .iter()
            .any(|user| user.identity == participant.identity);
        if known {
            return Ok(());
        }

        let participant = participant.clone();
        let added = self
            .chat_log
            .update(move |log| Ok::<_, StoreError>(log.remember(&participant)))
            .await?;
        if added {
            tracing::debug!("Recorded new known user");
        }
        Ok(())
    }

    /// participant-joined を通知対象にブロードキャスト
    pub async fn broadcast_participant_joined(
        &self,
        targets: Vec<ConnectionId>,
        message: &str,
    ) -> Result<(), MessagePushError> {
        self.message_pusher.broadcast(targets, message).await
    }
}
