//! WebSocket chat connection handler.
//!
//! Each connection gets an outbound channel registered with the MessagePusher.
//! Every frame, including the snapshot and error replies, goes through that
//! channel. A pusher task drains it into the socket while the receive task
//! dispatches inbound frames to the chat use cases. Whichever task finishes
//! first aborts the other, and the connection is then closed in the registry.

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, Identity, Participant},
    infrastructure::dto::websocket::{InboundFrame, OutboundFrame},
    ui::state::AppState,
    usecase::SendMessageError,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Spawns a task that receives frames from the rx channel and pushes them to the WebSocket sender.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            if sender.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

fn encode(frame: &OutboundFrame) -> Option<String> {
    match frame.to_json() {
        Ok(json) => Some(json),
        Err(e) => {
            tracing::error!("Failed to encode outbound frame: {}", e);
            None
        }
    }
}

/// Push a frame to one connection only
async fn reply(state: &AppState, connection_id: ConnectionId, frame: &OutboundFrame) {
    let Some(json) = encode(frame) else {
        return;
    };
    if let Err(e) = state
        .connect_participant_usecase
        .reply(&connection_id, &json)
        .await
    {
        tracing::warn!("Failed to reply to '{}': {}", connection_id, e);
    }
}

async fn reply_error(state: &AppState, connection_id: ConnectionId, message: impl Into<String>) {
    reply(state, connection_id, &OutboundFrame::error(message)).await;
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (tx, rx) = mpsc::unbounded_channel();

    state
        .connect_participant_usecase
        .execute(connection_id, tx)
        .await;
    tracing::info!("Connection '{}' opened", connection_id);

    // Queue recent history before anything else. The connection is not
    // identified yet, so no broadcast can be queued ahead of it.
    {
        let snapshot = state.connect_participant_usecase.build_snapshot().await;

        // Domain Model から DTO への変換
        let frame = OutboundFrame::Snapshot {
            messages: snapshot.messages.into_iter().map(Into::into).collect(),
            known_users: snapshot.known_users.into_iter().map(Into::into).collect(),
        };
        reply(&state, connection_id, &frame).await;
        tracing::debug!("Queued snapshot for '{}'", connection_id);
    }

    let (sender, mut receiver) = socket.split();

    let state_clone = state.clone();

    // Spawn a task to receive frames from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::debug!("WebSocket error on '{}': {}", connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_frame(&state_clone, connection_id, text.as_str()).await;
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push frames from other connections to this one
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    close_connection(&state, connection_id).await;
}

async fn handle_frame(state: &AppState, connection_id: ConnectionId, text: &str) {
    let frame = match serde_json::from_str::<InboundFrame>(text) {
        Ok(frame) => frame,
        Err(e) => {
            tracing::warn!("Malformed frame from '{}': {}", connection_id, e);
            reply_error(state, connection_id, "malformed frame").await;
            return;
        }
    };

    match frame {
        InboundFrame::Join {
            identity,
            display_name,
            avatar_ref,
        } => handle_join(state, connection_id, identity, display_name, avatar_ref).await,
        InboundFrame::Message { body } => handle_message(state, connection_id, body).await,
        InboundFrame::TypingStart { .. } => handle_typing(state, connection_id, true).await,
        InboundFrame::TypingStop { .. } => handle_typing(state, connection_id, false).await,
    }
}

async fn handle_join(
    state: &AppState,
    connection_id: ConnectionId,
    identity: String,
    display_name: String,
    avatar_ref: Option<String>,
) {
    let identity = match Identity::new(identity) {
        Ok(identity) => identity,
        Err(e) => {
            reply_error(state, connection_id, e.to_string()).await;
            return;
        }
    };
    let display_name = match display_name.trim() {
        "" => identity.to_string(),
        name => name.to_string(),
    };
    let avatar_ref = avatar_ref.filter(|avatar| !avatar.trim().is_empty());
    let participant = Participant::new(identity, display_name, avatar_ref);

    let outcome = match state
        .join_chat_usecase
        .execute(connection_id, participant)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("Rejected join on '{}': {}", connection_id, e);
            reply_error(state, connection_id, e.to_string()).await;
            return;
        }
    };

    let frame = OutboundFrame::ParticipantJoined {
        participant: outcome.participant.into(),
        joined_at: outcome.joined_at.value(),
    };
    if let Some(json) = encode(&frame) {
        if let Err(e) = state
            .join_chat_usecase
            .broadcast_participant_joined(outcome.targets, &json)
            .await
        {
            tracing::warn!("Failed to broadcast participant-joined: {}", e);
        } else {
            tracing::info!("Broadcasted participant-joined for '{}'", connection_id);
        }
    }
}

async fn handle_message(
    state: &AppState,
    connection_id: ConnectionId,
    body: String,
) {
    let delivery = match state
        .send_message_usecase
        .execute(&connection_id, body)
        .await
    {
        Ok(delivery) => delivery,
        Err(SendMessageError::Store(e)) => {
            tracing::error!("Failed to persist message from '{}': {}", connection_id, e);
            reply_error(state, connection_id, "failed to save message").await;
            return;
        }
        Err(e) => {
            tracing::warn!("Rejected message from '{}': {}", connection_id, e);
            reply_error(state, connection_id, e.to_string()).await;
            return;
        }
    };

    let frame = OutboundFrame::MessageReceived {
        message: delivery.message.into(),
    };
    if let Some(json) = encode(&frame)
        && let Err(e) = state
            .send_message_usecase
            .broadcast(delivery.targets, &json)
            .await
    {
        tracing::warn!("Failed to broadcast message: {}", e);
    }
}

async fn handle_typing(
    state: &AppState,
    connection_id: ConnectionId,
    started: bool,
) {
    let relay = match state.relay_typing_usecase.execute(&connection_id).await {
        Ok(relay) => relay,
        Err(e) => {
            reply_error(state, connection_id, e.to_string()).await;
            return;
        }
    };

    let identity = relay.participant.identity.into_string();
    let display_name = relay.participant.display_name;
    let frame = if started {
        OutboundFrame::TypingStart {
            identity,
            display_name,
        }
    } else {
        OutboundFrame::TypingStop {
            identity,
            display_name,
        }
    };
    if let Some(json) = encode(&frame)
        && let Err(e) = state
            .relay_typing_usecase
            .broadcast(relay.targets, &json)
            .await
    {
        tracing::warn!("Failed to relay typing event: {}", e);
    }
}

async fn close_connection(state: &AppState, connection_id: ConnectionId) {
    let Some(departure) = state
        .disconnect_participant_usecase
        .execute(&connection_id)
        .await
    else {
        tracing::info!("Connection '{}' closed before joining", connection_id);
        return;
    };
    tracing::info!(
        "'{}' left ({} connections remaining)",
        departure.participant.identity,
        state
            .disconnect_participant_usecase
            .count_remaining_connections()
            .await
    );

    // Broadcast participant-left to all remaining identified connections
    let frame = OutboundFrame::ParticipantLeft {
        participant: departure.participant.into(),
        left_at: departure.left_at.value(),
    };
    if let Some(json) = encode(&frame) {
        if let Err(e) = state
            .disconnect_participant_usecase
            .broadcast_participant_left(departure.targets, &json)
            .await
        {
            tracing::warn!("Failed to broadcast participant-left: {}", e);
        } else {
            tracing::info!("Broadcasted participant-left for '{}'", connection_id);
        }
    }
}
