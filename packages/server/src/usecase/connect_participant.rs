//! UseCase: 参加者接続処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() / build_snapshot() / reply() メソッド
//!
//! ### なぜこのテストが必要か
//! - 新しい接続が未識別状態で登録され、送信チャンネルが MessagePusher に渡ることを保証
//! - 接続直後のスナップショットが直近 N 件と既知ユーザー全員を含むことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系：接続とスナップショット構築
//! - エッジケース：スナップショット件数より履歴が多い場合
//! - 異常系：履歴の読み込み失敗（空のスナップショット）

use std::sync::Arc;

use crate::domain::{
    ChatLog, ChatMessage, ConnectionId, MessagePushError, MessagePusher, Participant,
    ParticipantRegistry, PusherChannel,
};

use super::document::GuardedDocument;

/// 接続直後に送る履歴
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSnapshot {
    /// 直近のメッセージ（古い順）
    pub messages: Vec<ChatMessage>,
    pub known_users: Vec<Participant>,
}

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// ParticipantRegistry（接続管理の抽象化）
    registry: Arc<dyn ParticipantRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    chat_log: Arc<GuardedDocument<ChatLog>>,
    /// スナップショットに含めるメッセージ数
    snapshot_size: usize,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(
        registry: Arc<dyn ParticipantRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        chat_log: Arc<GuardedDocument<ChatLog>>,
        snapshot_size: usize,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            chat_log,
            snapshot_size,
        }
    }

    /// 接続を未識別状態で登録し、送信チャンネルを MessagePusher に登録する
    pub async fn execute(&self, connection_id: ConnectionId, sender: PusherChannel) {
        self.registry.open(connection_id).await;
        self.message_pusher
            .register_client(connection_id, sender)
            .await;
    }

    /// 特定の接続だけにフレームを送信（スナップショットやエラー応答）
    pub async fn reply(
        &self,
        connection_id: &ConnectionId,
        json_message: &str,
    ) -> Result<(), MessagePushError> {
        self.message_pusher
            .push_to(connection_id, json_message)
            .await
    }

    /// 接続直後に送るスナップショットを構築
    ///
    /// 履歴の読み込みに失敗した場合は空のスナップショットを返す
    pub async fn build_snapshot(&self) -> ChatSnapshot {
        match self.chat_log.read().await {
            Ok(log) => ChatSnapshot {
                messages: log.recent(self.snapshot_size).to_vec(),
                known_users: log.known_users,
            },
            Err(e) => {
                tracing::warn!("Failed to load chat log for snapshot: {}", e);
                ChatSnapshot::default()
            }
        }
    }
}
