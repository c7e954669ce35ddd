//! UI utilities for the client.

use std::io::Write;

/// Redisplay the prompt after receiving a message
pub fn redisplay_prompt(identity: &str) {
    print!("{}> ", identity);
    std::io::stdout().flush().ok();
}
