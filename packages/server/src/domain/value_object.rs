//! Value objects shared by the canvas, chat and gallery models.

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::ValueObjectError;

/// Maximum length of an identity string (characters)
pub const MAX_IDENTITY_LENGTH: usize = 128;

/// Maximum length of a canvas placement message (Unicode code points)
pub const MAX_PLACEMENT_MESSAGE_CHARS: usize = 140;

/// Opaque, stable identity of an authenticated participant.
///
/// Supplied by the authentication provider and trusted as-is. Leading and
/// trailing whitespace is not significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(String);

impl Identity {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValueObjectError::EmptyIdentity);
        }
        if trimmed.chars().count() > MAX_IDENTITY_LENGTH {
            return Err(ValueObjectError::IdentityTooLong {
                max: MAX_IDENTITY_LENGTH,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Identity {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Identity> for String {
    fn from(identity: Identity) -> Self {
        identity.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Process-local handle of one duplex chat connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

/// Unix timestamp in milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Free-text annotation attached to a canvas placement.
///
/// Construction never fails: the text is trimmed and silently truncated to
/// [`MAX_PLACEMENT_MESSAGE_CHARS`] code points.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementMessage(String);

impl PlacementMessage {
    pub fn new(raw: &str) -> Self {
        Self(
            raw.trim()
                .chars()
                .take(MAX_PLACEMENT_MESSAGE_CHARS)
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Body of a chat message. Must contain at least one non-whitespace character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageBody(String);

impl MessageBody {
    pub fn new(value: String) -> Result<Self, ValueObjectError> {
        if value.trim().is_empty() {
            return Err(ValueObjectError::EmptyMessageBody);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageBody {
    type Error = ValueObjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Configured set of identities granted an extra capability
/// (canvas override, gallery management).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList(HashSet<Identity>);

impl AllowList {
    /// Build an allow-list from raw strings, skipping blank entries
    pub fn from_raw<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            entries
                .into_iter()
                .filter_map(|entry| Identity::new(entry.into()).ok())
                .collect(),
        )
    }

    pub fn contains(&self, identity: &Identity) -> bool {
        self.0.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_is_trimmed() {
        // テスト項目: Identity の前後の空白が除去される
        // given (前提条件):
        let raw = "  1234567890  ".to_string();

        // when (操作):
        let identity = Identity::new(raw).unwrap();

        // then (期待する結果):
        assert_eq!(identity.as_str(), "1234567890");
    }

    #[test]
    fn test_identity_rejects_blank() {
        // テスト項目: 空白のみの Identity はエラーになる
        // when (操作):
        let result = Identity::new("   ".to_string());

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyIdentity));
    }

    #[test]
    fn test_identity_rejects_too_long() {
        // テスト項目: 上限を超える長さの Identity はエラーになる
        // given (前提条件):
        let raw = "a".repeat(MAX_IDENTITY_LENGTH + 1);

        // when (操作):
        let result = Identity::new(raw);

        // then (期待する結果):
        assert_eq!(
            result,
            Err(ValueObjectError::IdentityTooLong {
                max: MAX_IDENTITY_LENGTH
            })
        );
    }

    #[test]
    fn test_identity_deserialization_validates() {
        // テスト項目: JSON からの Identity 復元でも検証が行われる
        // when (操作):
        let ok: Result<Identity, _> = serde_json::from_str("\"u1\"");
        let blank: Result<Identity, _> = serde_json::from_str("\"  \"");

        // then (期待する結果):
        assert_eq!(ok.unwrap().as_str(), "u1");
        assert!(blank.is_err());
    }

    #[test]
    fn test_placement_message_trims_and_truncates_code_points() {
        // テスト項目: 配置メッセージはトリムされ、140 コードポイントに切り詰められる
        // given (前提条件): マルチバイト文字を含む 200 文字
        let raw = format!("   {}   ", "あ".repeat(200));

        // when (操作):
        let message = PlacementMessage::new(&raw);

        // then (期待する結果):
        assert_eq!(message.as_str().chars().count(), MAX_PLACEMENT_MESSAGE_CHARS);
        assert!(message.as_str().starts_with('あ'));
    }

    #[test]
    fn test_placement_message_short_text_is_kept() {
        // テスト項目: 短いメッセージはトリムのみ行われる
        // when (操作):
        let message = PlacementMessage::new("  hi  ");

        // then (期待する結果):
        assert_eq!(message.as_str(), "hi");
    }

    #[test]
    fn test_message_body_rejects_whitespace_only() {
        // テスト項目: 空白のみのメッセージ本文はエラーになる
        // when (操作):
        let result = MessageBody::new(" \n\t ".to_string());

        // then (期待する結果):
        assert_eq!(result, Err(ValueObjectError::EmptyMessageBody));
    }

    #[test]
    fn test_message_body_keeps_original_text() {
        // テスト項目: 有効なメッセージ本文はそのまま保持される
        // when (操作):
        let body = MessageBody::new("  hello  ".to_string()).unwrap();

        // then (期待する結果):
        assert_eq!(body.as_str(), "  hello  ");
    }

    #[test]
    fn test_allow_list_skips_blank_entries() {
        // テスト項目: AllowList は空のエントリを無視する
        // when (操作):
        let list = AllowList::from_raw(["admin", "", "  ", "mod"]);

        // then (期待する結果):
        assert_eq!(list.len(), 2);
        assert!(list.contains(&Identity::new("admin".to_string()).unwrap()));
        assert!(!list.contains(&Identity::new("guest".to_string()).unwrap()));
    }

    #[test]
    fn test_connection_ids_are_unique() {
        // テスト項目: ConnectionId は生成ごとに異なる
        // when (操作):
        let a = ConnectionId::generate();
        let b = ConnectionId::generate();

        // then (期待する結果):
        assert_ne!(a, b);
    }
}
