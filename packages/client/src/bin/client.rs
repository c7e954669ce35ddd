//! Recap terminal chat client.
//!
//! Joins the chat as the given identity and sends each line typed on stdin as a
//! message. Reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin recap-client -- --identity alice --name Alice
//! cargo run --bin recap-client -- -i bob -u ws://127.0.0.1:3001/ws
//! ```

use clap::Parser;
use recap_client::{ClientOptions, run_client};
use recap_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "recap-client")]
#[command(about = "Terminal chat client for the Recap server", long_about = None)]
struct Args {
    /// Identity to join the chat as
    #[arg(short = 'i', long, env = "RECAP_IDENTITY")]
    identity: String,

    /// Display name (defaults to the identity)
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Avatar URL shown to other participants
    #[arg(short = 'a', long)]
    avatar: Option<String>,

    /// WebSocket server URL
    #[arg(short = 'u', long, env = "RECAP_WS_URL", default_value = "ws://127.0.0.1:3001/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    let display_name = args.name.unwrap_or_else(|| args.identity.clone());

    if let Err(e) = run_client(ClientOptions {
        url: args.url,
        identity: args.identity,
        display_name,
        avatar_ref: args.avatar,
    })
    .await
    {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
