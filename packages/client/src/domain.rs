//! Domain logic for client-side operations.
//!
//! Pure functions deciding how the client reacts to errors, kept free of side
//! effects so they are easy to test.

use crate::error::ClientError;

/// Maximum number of connection attempts before giving up
pub const MAX_RECONNECT_ATTEMPTS: u32 = 5;
/// Delay between connection attempts
pub const RECONNECT_INTERVAL_SECS: u64 = 5;

/// Check if the client should exit immediately based on the error type.
///
/// Retrying cannot fix an invalid identity, so that error ends the client.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(error, ClientError::InvalidIdentity(_))
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The number of failed attempts so far
/// * `max_attempts` - The maximum number of attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}

/// A line typed by the user is sent only if it has visible content
pub fn outgoing_body(line: &str) -> Option<&str> {
    let line = line.trim();
    (!line.is_empty()).then_some(line)
}
