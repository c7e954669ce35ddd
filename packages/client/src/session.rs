//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use recap_server::infrastructure::dto::websocket::{InboundFrame, OutboundFrame};
use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use crate::error::ClientError;

use super::{
    domain::outgoing_body, formatter::MessageFormatter, runner::ClientOptions,
    ui::redisplay_prompt,
};

fn encode(frame: &InboundFrame) -> Result<String, ClientError> {
    serde_json::to_string(frame).map_err(|e| ClientError::ConnectionError(e.to_string()))
}

/// Run one connection: join, then relay stdin lines until either side stops.
///
/// Returns `Ok(())` when the user ends input, an error when the connection drops.
pub async fn run_client_session(options: &ClientOptions) -> Result<(), ClientError> {
    let (ws_stream, _response) = connect_async(options.url.as_str())
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    tracing::info!("Connected to chat server!");

    let (mut write, mut read) = ws_stream.split();

    // Join before anything else is sent
    let join = encode(&InboundFrame::Join {
        identity: options.identity.clone(),
        display_name: options.display_name.clone(),
        avatar_ref: options.avatar_ref.clone(),
    })?;
    write
        .send(Message::Text(join.into()))
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;

    println!(
        "\nYou are '{}'. Type messages and press Enter to send. Press Ctrl+C to exit.\n",
        options.display_name
    );

    let identity_for_read = options.identity.clone();

    // Spawn a task to handle incoming frames
    let mut read_task = tokio::spawn(async move {
        while let Some(message) = read.next().await {
            let formatted = match message {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<OutboundFrame>(text.as_str()) {
                        Ok(frame) => MessageFormatter::format_frame(&frame, &identity_for_read),
                        Err(_) => MessageFormatter::format_raw_message(text.as_str()),
                    }
                }
                Ok(Message::Binary(data)) => MessageFormatter::format_binary_message(data.len()),
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    break;
                }
                _ => continue,
            };
            print!("{}", formatted);
            redisplay_prompt(&identity_for_read);
        }
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();
    let prompt = format!("{}> ", options.identity);

    // Spawn a blocking thread for rustyline (synchronous readline)
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    if let Some(body) = outgoing_body(&line) {
                        rl.add_history_entry(body).ok();
                        if input_tx.send(body.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to send stdin lines as message frames
    let mut write_task = tokio::spawn(async move {
        while let Some(body) = input_rx.recv().await {
            let json = match encode(&InboundFrame::Message { body }) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize message: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send message: {}", e);
                return Err(ClientError::ConnectionError(e.to_string()));
            }
        }

        // Input ended; close politely
        let _ = write.send(Message::Close(None)).await;
        Ok(())
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut read_task => {
            write_task.abort();
            Err(ClientError::ConnectionError("Connection lost".to_string()))
        }
        write_result = &mut write_task => {
            read_task.abort();
            write_result.unwrap_or_else(|e| Err(ClientError::ConnectionError(e.to_string())))
        }
    }
}
