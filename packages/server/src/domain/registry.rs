//! Live connection registry.
//!
//! Volatile by nature: the registry is rebuilt from nothing on every restart, so
//! all participants appear to leave when the process stops. The durable record
//! of participation is `ChatLog::known_users`.

use std::collections::HashMap;

use async_trait::async_trait;

use super::{chat::Participant, error::RegistryError, value_object::ConnectionId};

/// Lifecycle of one connection. `Closed` is represented by removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    /// Accepted, no `join` frame seen yet
    Unidentified,
    /// Joined as a participant
    Identified(Participant),
}

impl ConnectionState {
    pub fn participant(&self) -> Option<&Participant> {
        match self {
            ConnectionState::Unidentified => None,
            ConnectionState::Identified(participant) => Some(participant),
        }
    }
}

/// In-process table of open connections
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    connections: HashMap<ConnectionId, ConnectionState>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a freshly accepted connection as `Unidentified`
    pub fn open(&mut self, connection_id: ConnectionId) {
        self.connections
            .insert(connection_id, ConnectionState::Unidentified);
    }

    /// Attach a participant to an `Unidentified` connection
    pub fn identify(
        &mut self,
        connection_id: &ConnectionId,
        participant: Participant,
    ) -> Result<(), RegistryError> {
        let state = self
            .connections
            .get_mut(connection_id)
            .ok_or_else(|| RegistryError::ConnectionNotFound(connection_id.to_string()))?;

        match state {
            ConnectionState::Identified(_) => {
                Err(RegistryError::AlreadyIdentified(connection_id.to_string()))
            }
            ConnectionState::Unidentified => {
                *state = ConnectionState::Identified(participant);
                Ok(())
            }
        }
    }

    /// Remove a connection, returning the state it was in
    pub fn close(&mut self, connection_id: &ConnectionId) -> Option<ConnectionState> {
        self.connections.remove(connection_id)
    }

    pub fn state_of(&self, connection_id: &ConnectionId) -> Option<&ConnectionState> {
        self.connections.get(connection_id)
    }

    pub fn participant_of(&self, connection_id: &ConnectionId) -> Option<&Participant> {
        self.state_of(connection_id)
            .and_then(ConnectionState::participant)
    }

    /// All connections that have joined
    pub fn identified_connections(&self) -> Vec<ConnectionId> {
        self.connections
            .iter()
            .filter(|(_, state)| matches!(state, ConnectionState::Identified(_)))
            .map(|(id, _)| *id)
            .collect()
    }

    /// Number of open connections, identified or not
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

/// Participant registry port
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には依存しない。
#[async_trait]
pub trait ParticipantRegistry: Send + Sync {
    /// 新しい接続を未識別状態で登録
    async fn open(&self, connection_id: ConnectionId);

    /// 接続に参加者情報を紐付ける
    async fn identify(
        &self,
        connection_id: &ConnectionId,
        participant: Participant,
    ) -> Result<(), RegistryError>;

    /// 接続を削除し、削除前の状態を返す
    async fn close(&self, connection_id: &ConnectionId) -> Option<ConnectionState>;

    /// 接続の参加者情報を取得
    async fn participant_of(&self, connection_id: &ConnectionId) -> Option<Participant>;

    /// 識別済みの全ての接続 ID を取得
    async fn identified_connections(&self) -> Vec<ConnectionId>;

    /// 接続数を取得
    async fn count_connections(&self) -> usize;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::Identity;

    fn participant(identity: &str) -> Participant {
        Participant::new(
            Identity::new(identity.to_string()).unwrap(),
            identity.to_string(),
            None,
        )
    }

    #[test]
    fn test_open_starts_unidentified() {
        // テスト項目: 新しい接続は未識別状態で登録される
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let conn = ConnectionId::generate();

        // when (操作):
        registry.open(conn);

        // then (期待する結果):
        assert_eq!(registry.state_of(&conn), Some(&ConnectionState::Unidentified));
        assert!(registry.identified_connections().is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_identify_transitions_to_identified() {
        // テスト項目: identify で識別済み状態に遷移する
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let conn = ConnectionId::generate();
        registry.open(conn);

        // when (操作):
        let result = registry.identify(&conn, participant("alice"));

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(
            registry.participant_of(&conn).map(|p| p.identity.as_str()),
            Some("alice")
        );
        assert_eq!(registry.identified_connections(), vec![conn]);
    }

    #[test]
    fn test_identify_twice_is_rejected() {
        // テスト項目: 識別済みの接続の再 identify はエラーになり、最初の参加者情報が残る
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let conn = ConnectionId::generate();
        registry.open(conn);
        registry.identify(&conn, participant("alice")).unwrap();

        // when (操作):
        let result = registry.identify(&conn, participant("mallory"));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RegistryError::AlreadyIdentified(conn.to_string()))
        );
        assert_eq!(
            registry.participant_of(&conn).map(|p| p.identity.as_str()),
            Some("alice")
        );
    }

    #[test]
    fn test_identify_unknown_connection() {
        // テスト項目: 未登録の接続の identify はエラーになる
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let conn = ConnectionId::generate();

        // when (操作):
        let result = registry.identify(&conn, participant("alice"));

        // then (期待する結果):
        assert_eq!(
            result,
            Err(RegistryError::ConnectionNotFound(conn.to_string()))
        );
    }

    #[test]
    fn test_close_returns_previous_state() {
        // テスト項目: close は削除前の状態を返し、二度目は None を返す
        // given (前提条件):
        let mut registry = ConnectionRegistry::new();
        let identified = ConnectionId::generate();
        let anonymous = ConnectionId::generate();
        registry.open(identified);
        registry.open(anonymous);
        registry.identify(&identified, participant("alice")).unwrap();

        // when (操作):
        let closed_identified = registry.close(&identified);
        let closed_anonymous = registry.close(&anonymous);
        let closed_again = registry.close(&identified);

        // then (期待する結果):
        assert!(matches!(
            closed_identified,
            Some(ConnectionState::Identified(_))
        ));
        assert_eq!(closed_anonymous, Some(ConnectionState::Unidentified));
        assert_eq!(closed_again, None);
        assert!(registry.is_empty());
    }
}
