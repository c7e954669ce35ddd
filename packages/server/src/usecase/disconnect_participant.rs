//! UseCase: 参加者切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 参加者の切断処理（通知対象選定、接続の削除）
//!
//! ### なぜこのテストが必要か
//! - 識別済みの接続の切断だけが participant-left を発生させる
//! - 切断した接続が MessagePusher から登録解除される
//!
//! ### どのような状況を想定しているか
//! - 正常系：識別済み接続の切断と通知
//! - エッジケース：未識別の接続の切断（通知なし）、最後の参加者の切断
//! - 異常系：存在しない接続の切断

use std::sync::Arc;

use recap_shared::time::Clock;

use crate::domain::{
    ConnectionId, ConnectionState, MessagePushError, MessagePusher, Participant,
    ParticipantRegistry, Timestamp,
};

/// 識別済み接続の切断
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub participant: Participant,
    pub left_at: Timestamp,
    /// participant-left の通知対象（残りの識別済み接続）
    pub targets: Vec<ConnectionId>,
}

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// ParticipantRegistry（接続管理の抽象化）
    registry: Arc<dyn ParticipantRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(
        registry: Arc<dyn ParticipantRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            clock,
        }
    }

    /// 参加者切断を実行
    ///
    /// # Returns
    ///
    /// * `Some(Departure)` - 識別済みの接続が切断された（participant-left を通知する）
    /// * `None` - 未識別、または登録されていない接続（通知不要）
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<Departure> {
        let closed = self.registry.close(connection_id).await;
        self.message_pusher.unregister_client(connection_id).await;

        let participant = match closed {
            Some(ConnectionState::Identified(participant)) => participant,
            Some(ConnectionState::Unidentified) => {
                tracing::debug!("Unidentified connection '{}' closed", connection_id);
                return None;
            }
            None => {
                tracing::warn!("Connection '{}' was not registered", connection_id);
                return None;
            }
        };

        let targets = self.registry.identified_connections().await;
        Some(Departure {
            participant,
            left_at: Timestamp::new(self.clock.now_millis()),
            targets,
        })
    }

    /// 残りの接続数を取得
    pub async fn count_remaining_connections(&self) -> usize {
        self.registry.count_connections().await
    }

    /// 参加者が left したことを残りの参加者にブロードキャスト
    pub async fn broadcast_participant_left(
        &self,
        targets: Vec<ConnectionId>,
        message: &str,
    ) -> Result<(), MessagePushError> {
        self.message_pusher.broadcast(targets, message).await
    }
}
