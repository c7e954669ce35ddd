//! WebSocket chat frame DTOs.
//!
//! Every frame is a JSON text message tagged by `type` (kebab-case); payload
//! fields are camelCase.

use serde::{Deserialize, Serialize};

/// Participant as seen on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDto {
    pub identity: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_ref: Option<String>,
}

/// Transcript entry as seen on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessageDto {
    pub id: u64,
    pub author_id: String,
    pub author_display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_avatar_ref: Option<String>,
    pub body: String,
    pub sent_at: i64,
}

/// Frames sent by clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum InboundFrame {
    Join {
        identity: String,
        display_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        avatar_ref: Option<String>,
    },
    Message {
        body: String,
    },
    /// Identity fields are accepted for compatibility but the server always
    /// relays the identity bound to the connection.
    TypingStart {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        identity: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
    },
    TypingStop {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        identity: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        display_name: Option<String>,
    },
}

/// Frames sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum OutboundFrame {
    Snapshot {
        messages: Vec<ChatMessageDto>,
        known_users: Vec<ParticipantDto>,
    },
    MessageReceived {
        message: ChatMessageDto,
    },
    ParticipantJoined {
        participant: ParticipantDto,
        joined_at: i64,
    },
    ParticipantLeft {
        participant: ParticipantDto,
        left_at: i64,
    },
    TypingStart {
        identity: String,
        display_name: String,
    },
    TypingStop {
        identity: String,
        display_name: String,
    },
    Error {
        message: String,
    },
}

impl OutboundFrame {
    pub fn error(message: impl Into<String>) -> Self {
        OutboundFrame::Error {
            message: message.into(),
        }
    }

    /// Serialize to a JSON text frame
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbound_join_parses_camel_case_fields() {
        // テスト項目: join フレームが camelCase のフィールドで解析される
        // given (前提条件):
        let json = r#"{"type":"join","identity":"u1","displayName":"Alice","avatarRef":"https://cdn.example/a.png"}"#;

        // when (操作):
        let frame: InboundFrame = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            frame,
            InboundFrame::Join {
                identity: "u1".to_string(),
                display_name: "Alice".to_string(),
                avatar_ref: Some("https://cdn.example/a.png".to_string()),
            }
        );
    }

    #[test]
    fn test_inbound_typing_without_identity() {
        // テスト項目: identity を省略した typing-start フレームも解析できる
        // given (前提条件):
        let json = r#"{"type":"typing-start"}"#;

        // when (操作):
        let frame: InboundFrame = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            frame,
            InboundFrame::TypingStart {
                identity: None,
                display_name: None,
            }
        );
    }

    #[test]
    fn test_inbound_unknown_type_is_rejected() {
        // テスト項目: 未知の type は解析エラーになる
        // given (前提条件):
        let json = r#"{"type":"shout","body":"hi"}"#;

        // when (操作):
        let result = serde_json::from_str::<InboundFrame>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_outbound_message_received_shape() {
        // テスト項目: message-received フレームの JSON 形状
        // given (前提条件):
        let frame = OutboundFrame::MessageReceived {
            message: ChatMessageDto {
                id: 10,
                author_id: "u1".to_string(),
                author_display_name: "Alice".to_string(),
                author_avatar_ref: None,
                body: "hello".to_string(),
                sent_at: 10,
            },
        };

        // when (操作):
        let value: serde_json::Value = serde_json::from_str(&frame.to_json().unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(value["type"], "message-received");
        assert_eq!(value["message"]["authorDisplayName"], "Alice");
        assert_eq!(value["message"]["sentAt"], 10);
        assert!(value["message"].get("authorAvatarRef").is_none());
    }

    #[test]
    fn test_outbound_snapshot_shape() {
        // テスト項目: snapshot フレームは knownUsers を camelCase で含む
        // given (前提条件):
        let frame = OutboundFrame::Snapshot {
            messages: vec![],
            known_users: vec![ParticipantDto {
                identity: "u1".to_string(),
                display_name: "Alice".to_string(),
                avatar_ref: None,
            }],
        };

        // when (操作):
        let value: serde_json::Value = serde_json::from_str(&frame.to_json().unwrap()).unwrap();

        // then (期待する結果):
        assert_eq!(value["type"], "snapshot");
        assert_eq!(value["knownUsers"][0]["displayName"], "Alice");
        assert_eq!(value["messages"].as_array().map(Vec::len), Some(0));
    }

    #[test]
    fn test_outbound_error_frame() {
        // テスト項目: error フレームの JSON 形状
        // when (操作):
        let json = OutboundFrame::error("join first").to_json().unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"type":"error","message":"join first"}"#);
    }
}
