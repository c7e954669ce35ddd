//! Client execution logic with reconnection support.

use std::time::Duration;

use crate::error::ClientError;

use super::{
    domain::{
        MAX_RECONNECT_ATTEMPTS, RECONNECT_INTERVAL_SECS, should_attempt_reconnect,
        should_exit_immediately,
    },
    session::run_client_session,
};

/// Who to connect as, and where
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// WebSocket endpoint, e.g. `ws://127.0.0.1:3001/ws`
    pub url: String,
    pub identity: String,
    pub display_name: String,
    pub avatar_ref: Option<String>,
}

/// Run the chat client with reconnection logic
pub async fn run_client(options: ClientOptions) -> Result<(), ClientError> {
    if options.identity.trim().is_empty() {
        return Err(ClientError::InvalidIdentity(options.identity));
    }

    let mut reconnect_count = 0;

    loop {
        tracing::info!(
            "Attempting to connect to {} as '{}' (attempt {}/{})",
            options.url,
            options.identity,
            reconnect_count + 1,
            MAX_RECONNECT_ATTEMPTS
        );

        match run_client_session(&options).await {
            Ok(()) => {
                // If input ended normally (user exit), don't reconnect
                tracing::info!("Client session ended normally");
                return Ok(());
            }
            Err(e) if should_exit_immediately(&e) => return Err(e),
            Err(e) => {
                tracing::warn!("Connection lost: {}", e);
                reconnect_count += 1;

                if !should_attempt_reconnect(&e, reconnect_count, MAX_RECONNECT_ATTEMPTS) {
                    tracing::error!(
                        "Failed to reconnect after {} attempts. Exiting.",
                        MAX_RECONNECT_ATTEMPTS
                    );
                    return Err(e);
                }

                tracing::info!(
                    "Reconnecting in {} seconds... (attempt {}/{})",
                    RECONNECT_INTERVAL_SECS,
                    reconnect_count + 1,
                    MAX_RECONNECT_ATTEMPTS
                );

                tokio::time::sleep(Duration::from_secs(RECONNECT_INTERVAL_SECS)).await;
            }
        }
    }
}
