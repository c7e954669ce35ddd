//! Frame formatting utilities for client display.

use recap_server::infrastructure::dto::websocket::{ChatMessageDto, OutboundFrame, ParticipantDto};
use recap_shared::time::timestamp_to_rfc3339;

const RULE: &str = "============================================================";
const THIN_RULE: &str = "------------------------------------------------------------";

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format any server frame. `me` is the identity this client joined as.
    pub fn format_frame(frame: &OutboundFrame, me: &str) -> String {
        match frame {
            OutboundFrame::Snapshot {
                messages,
                known_users,
            } => Self::format_snapshot(messages, known_users, me),
            OutboundFrame::MessageReceived { message } => Self::format_chat_message(message, me),
            OutboundFrame::ParticipantJoined {
                participant,
                joined_at,
            } => Self::format_participant_joined(participant, *joined_at),
            OutboundFrame::ParticipantLeft {
                participant,
                left_at,
            } => Self::format_participant_left(participant, *left_at),
            OutboundFrame::TypingStart { display_name, .. } => {
                format!("\n… {} is typing\n", display_name)
            }
            OutboundFrame::TypingStop { display_name, .. } => {
                format!("\n… {} stopped typing\n", display_name)
            }
            OutboundFrame::Error { message } => Self::format_error(message),
        }
    }

    /// Format the initial snapshot: known users, then recent history
    pub fn format_snapshot(
        messages: &[ChatMessageDto],
        known_users: &[ParticipantDto],
        me: &str,
    ) -> String {
        let mut output = String::new();
        output.push_str(&format!("\n\n{RULE}\n"));
        output.push_str("Known users:\n");

        if known_users.is_empty() {
            output.push_str("(No users yet)\n");
        } else {
            for user in known_users {
                let me_suffix = if user.identity == me { " (me)" } else { "" };
                output.push_str(&format!(
                    "{} [{}]{}\n",
                    user.display_name, user.identity, me_suffix
                ));
            }
        }

        output.push_str(&format!("{RULE}\n"));
        for message in messages {
            output.push_str(&format!(
                "[{}] {}: {}\n",
                timestamp_to_rfc3339(message.sent_at),
                message.author_display_name,
                message.body
            ));
        }
        if !messages.is_empty() {
            output.push_str(&format!("{RULE}\n"));
        }
        output
    }

    pub fn format_participant_joined(participant: &ParticipantDto, joined_at: i64) -> String {
        format!(
            "\n+ {} joined at {}\n",
            participant.display_name,
            timestamp_to_rfc3339(joined_at)
        )
    }

    pub fn format_participant_left(participant: &ParticipantDto, left_at: i64) -> String {
        format!(
            "\n- {} left at {}\n",
            participant.display_name,
            timestamp_to_rfc3339(left_at)
        )
    }

    /// Format a chat message. Own messages are shown as a short confirmation.
    pub fn format_chat_message(message: &ChatMessageDto, me: &str) -> String {
        let sent_at = timestamp_to_rfc3339(message.sent_at);
        if message.author_id == me {
            return format!("sent at {}\n", sent_at);
        }

        format!(
            "\n\n{THIN_RULE}\n\
             @{}: {}\n\
             sent at {}\n\
             {THIN_RULE}\n",
            message.author_display_name, message.body, sent_at
        )
    }

    pub fn format_error(message: &str) -> String {
        format!("\n! {}\n", message)
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(identity: &str, display_name: &str) -> ParticipantDto {
        ParticipantDto {
            identity: identity.to_string(),
            display_name: display_name.to_string(),
            avatar_ref: None,
        }
    }

    fn chat_message(author_id: &str, body: &str) -> ChatMessageDto {
        ChatMessageDto {
            id: 1,
            author_id: author_id.to_string(),
            author_display_name: format!("{author_id} name"),
            author_avatar_ref: None,
            body: body.to_string(),
            sent_at: 1672498800000,
        }
    }

    #[test]
    fn test_format_snapshot_with_no_users() {
        // テスト項目: ユーザーがいない場合、適切なメッセージが表示される
        // when (操作):
        let result = MessageFormatter::format_snapshot(&[], &[], "alice");

        // then (期待する結果):
        assert!(result.contains("Known users:"));
        assert!(result.contains("(No users yet)"));
        assert!(result.contains(RULE));
    }

    #[test]
    fn test_format_snapshot_marks_me_and_lists_history() {
        // テスト項目: 自分にマークが付き、履歴がタイムスタンプ付きで表示される
        // given (前提条件):
        let users = vec![participant("alice", "Alice"), participant("bob", "Bob")];
        let messages = vec![chat_message("bob", "gm")];

        // when (操作):
        let result = MessageFormatter::format_snapshot(&messages, &users, "alice");

        // then (期待する結果):
        assert!(result.contains("Alice [alice] (me)"));
        assert!(result.contains("Bob [bob]\n"));
        assert!(result.contains("bob name: gm"));
        assert!(result.contains("2022-12-31T15:00:00"));
    }

    #[test]
    fn test_format_participant_joined_and_left() {
        // テスト項目: 参加・退出通知が正しくフォーマットされる
        // given (前提条件):
        let bob = participant("bob", "Bob");

        // when (操作):
        let joined = MessageFormatter::format_participant_joined(&bob, 1672498800000);
        let left = MessageFormatter::format_participant_left(&bob, 1672498800000);

        // then (期待する結果):
        assert!(joined.contains("+ Bob joined at"));
        assert!(left.contains("- Bob left at"));
        assert!(left.contains("2022-12-31"));
    }

    #[test]
    fn test_format_chat_message_from_others_and_self() {
        // テスト項目: 他人のメッセージは本文付きで、自分のメッセージは送信確認として表示される
        // given (前提条件):
        let message = chat_message("bob", "Hello, world!");

        // when (操作):
        let from_other = MessageFormatter::format_chat_message(&message, "alice");
        let from_self = MessageFormatter::format_chat_message(&message, "bob");

        // then (期待する結果):
        assert!(from_other.contains("@bob name: Hello, world!"));
        assert!(from_other.contains(THIN_RULE));
        assert!(from_self.starts_with("sent at"));
        assert!(!from_self.contains("Hello"));
    }

    #[test]
    fn test_format_frame_dispatches_typing_and_error() {
        // テスト項目: タイピング通知とエラーフレームが表示用に変換される
        // given (前提条件):
        let typing = OutboundFrame::TypingStart {
            identity: "bob".to_string(),
            display_name: "Bob".to_string(),
        };
        let error = OutboundFrame::error("join before sending messages");

        // when / then:
        assert!(MessageFormatter::format_frame(&typing, "alice").contains("Bob is typing"));
        assert!(
            MessageFormatter::format_frame(&error, "alice")
                .contains("! join before sending messages")
        );
    }

    #[test]
    fn test_format_binary_and_raw_message() {
        // テスト項目: バイナリと解釈できないテキストの通知
        // when / then:
        assert!(MessageFormatter::format_binary_message(1024).contains("1024 bytes"));
        assert!(MessageFormatter::format_raw_message("??").contains("Received: ??"));
    }
}
