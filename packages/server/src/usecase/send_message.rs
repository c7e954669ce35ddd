//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() / broadcast() メソッド
//!
//! ### なぜこのテストが必要か
//! - 送信者自身もブロードキャスト対象に含まれる（クライアントはローカルエコーしない）
//! - 履歴が上限を超えた場合に最も古いメッセージだけが削除される
//! - 並行した送信で履歴の更新が失われない
//!
//! ### どのような状況を想定しているか
//! - 正常系：メッセージ送信とブロードキャスト
//! - 異常系：未参加の接続からの送信、空のメッセージ、保存失敗
//! - エッジケース：上限ちょうど + 1 件の送信

use std::sync::Arc;

use recap_shared::time::Clock;

use crate::domain::{
    ChatLog, ChatMessage, ConnectionId, MessageBody, MessagePusher, ParticipantRegistry,
    Timestamp,
};

use super::{document::GuardedDocument, error::SendMessageError};

/// 送信結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageDelivery {
    pub message: ChatMessage,
    /// message-received の通知対象（送信者を含む全ての識別済み接続）
    pub targets: Vec<ConnectionId>,
}

/// メッセージ送信のユースケース
pub struct SendMessageUseCase {
    /// ParticipantRegistry（接続管理の抽象化）
    registry: Arc<dyn ParticipantRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
    chat_log: Arc<GuardedDocument<ChatLog>>,
    clock: Arc<dyn Clock>,
    /// 履歴の最大保持件数
    transcript_cap: usize,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        registry: Arc<dyn ParticipantRegistry>,
        message_pusher: Arc<dyn MessagePusher>,
        chat_log: Arc<GuardedDocument<ChatLog>>,
        clock: Arc<dyn Clock>,
        transcript_cap: usize,
    ) -> Self {
        Self {
            registry,
            message_pusher,
            chat_log,
            clock,
            transcript_cap,
        }
    }

    /// メッセージを履歴に追加する
    ///
    /// # Returns
    ///
    /// * `Ok(MessageDelivery)` - 保存されたメッセージとブロードキャスト対象
    /// * `Err(SendMessageError)` - 未参加、空のメッセージ、または保存失敗
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        body: String,
    ) -> Result<MessageDelivery, SendMessageError> {
        let author = self
            .registry
            .participant_of(connection_id)
            .await
            .ok_or(SendMessageError::NotJoined)?;
        let body = MessageBody::new(body).map_err(|_| SendMessageError::EmptyBody)?;

        let now = Timestamp::new(self.clock.now_millis());
        let cap = self.transcript_cap;
        let message = self
            .chat_log
            .update(move |log| Ok::<_, SendMessageError>(log.append(&author, body, now, cap)))
            .await?;
        tracing::info!(
            "Message #{} from '{}' appended to transcript",
            message.id,
            message.author_id
        );

        let targets = self.registry.identified_connections().await;
        Ok(MessageDelivery { message, targets })
    }

    /// message-received をブロードキャスト
    pub async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        json_message: &str,
    ) -> Result<(), SendMessageError> {
        self.message_pusher
            .broadcast(targets, json_message)
            .await
            .map_err(|e| SendMessageError::BroadcastFailed(e.to_string()))
    }
}
