//! Chat transcript model.

use serde::{Deserialize, Serialize};

use super::value_object::{Identity, MessageBody, Timestamp};

/// Default number of messages retained in the transcript
pub const DEFAULT_TRANSCRIPT_CAP: usize = 500;

/// Default number of recent messages sent to a newly connected client
pub const DEFAULT_SNAPSHOT_SIZE: usize = 50;

/// Presentation snapshot of a chat participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub identity: Identity,
    pub display_name: String,
    #[serde(default)]
    pub avatar_ref: Option<String>,
}

impl Participant {
    pub fn new(identity: Identity, display_name: String, avatar_ref: Option<String>) -> Self {
        Self {
            identity,
            display_name,
            avatar_ref,
        }
    }
}

/// A transcript entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: u64,
    pub author_id: Identity,
    pub author_display_name: String,
    #[serde(default)]
    pub author_avatar_ref: Option<String>,
    pub body: String,
    pub sent_at: Timestamp,
}

/// The persisted chat document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatLog {
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub known_users: Vec<Participant>,
}

impl ChatLog {
    /// Record a participant the first time it is seen.
    ///
    /// Returns `false` (and keeps the first-seen snapshot) when the identity is
    /// already known.
    pub fn remember(&mut self, participant: &Participant) -> bool {
        if self
            .known_users
            .iter()
            .any(|known| known.identity == participant.identity)
        {
            return false;
        }
        self.known_users.push(participant.clone());
        true
    }

    /// Append a message, evicting the oldest entries beyond `cap` (minimum 1).
    ///
    /// The id is derived from the send time but forced strictly above the last id,
    /// and `sent_at` never goes backwards.
    pub fn append(
        &mut self,
        author: &Participant,
        body: MessageBody,
        now: Timestamp,
        cap: usize,
    ) -> ChatMessage {
        let (id, sent_at) = match self.messages.last() {
            Some(last) => (
                (now.value().max(0) as u64).max(last.id + 1),
                now.max(last.sent_at),
            ),
            None => (now.value().max(0) as u64, now),
        };

        let message = ChatMessage {
            id,
            author_id: author.identity.clone(),
            author_display_name: author.display_name.clone(),
            author_avatar_ref: author.avatar_ref.clone(),
            body: body.into_string(),
            sent_at,
        };
        self.messages.push(message.clone());

        let cap = cap.max(1);
        if self.messages.len() > cap {
            let overflow = self.messages.len() - cap;
            self.messages.drain(..overflow);
        }

        message
    }

    /// The most recent `count` messages, oldest first
    pub fn recent(&self, count: usize) -> &[ChatMessage] {
        let start = self.messages.len().saturating_sub(count);
        &self.messages[start..]
    }
}
