//! Recap community server.
//!
//! Serves the placement canvas, the realtime chat and the photo gallery from
//! JSON documents stored under the data directory.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin recap-server
//! cargo run --bin recap-server -- --host 0.0.0.0 --port 3001 --data-dir ./data
//! RECAP_OVERRIDE_IDS=admin,mod cargo run --bin recap-server
//! ```

use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use recap_server::{
    config::{DEFAULT_CANVAS_SIZE, DEFAULT_CONTRACT_ADDRESS, ServerConfig},
    domain::{
        AllowList,
        canvas::MAX_CANVAS_SIZE,
        chat::{DEFAULT_SNAPSHOT_SIZE, DEFAULT_TRANSCRIPT_CAP},
    },
    ui::{Server, state::AppState},
};
use recap_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "recap-server")]
#[command(about = "Recap community server: canvas, chat and gallery", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "RECAP_HOST", default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, env = "RECAP_PORT", default_value = "3001")]
    port: u16,

    /// Directory holding the JSON documents and uploaded files
    #[arg(short = 'd', long, env = "RECAP_DATA_DIR", default_value = "./data")]
    data_dir: PathBuf,

    /// Canvas width in cells
    #[arg(
        long,
        env = "RECAP_CANVAS_WIDTH",
        default_value_t = DEFAULT_CANVAS_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_CANVAS_SIZE))
    )]
    canvas_width: u32,

    /// Canvas height in cells
    #[arg(
        long,
        env = "RECAP_CANVAS_HEIGHT",
        default_value_t = DEFAULT_CANVAS_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_CANVAS_SIZE))
    )]
    canvas_height: u32,

    /// Identities allowed to move their placement
    #[arg(long, env = "RECAP_OVERRIDE_IDS", value_delimiter = ',')]
    override_ids: Vec<String>,

    /// Identities allowed to manage gallery photos
    #[arg(long, env = "RECAP_UPLOADER_IDS", value_delimiter = ',')]
    uploader_ids: Vec<String>,

    /// Contract address reported with allocated token ids
    #[arg(long, env = "RECAP_CONTRACT_ADDRESS", default_value = DEFAULT_CONTRACT_ADDRESS)]
    contract_address: String,

    /// Public base URL used in canvas metadata (defaults to http://<host>:<port>)
    #[arg(long, env = "RECAP_PUBLIC_BASE_URL")]
    public_base_url: Option<String>,

    /// Maximum number of chat messages kept in the transcript
    #[arg(long, env = "RECAP_TRANSCRIPT_CAP", default_value_t = DEFAULT_TRANSCRIPT_CAP)]
    transcript_cap: usize,

    /// Number of recent messages sent to a new connection
    #[arg(long, env = "RECAP_SNAPSHOT_SIZE", default_value_t = DEFAULT_SNAPSHOT_SIZE)]
    snapshot_size: usize,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        let public_base_url = self
            .public_base_url
            .unwrap_or_else(|| format!("http://{}:{}", self.host, self.port));

        ServerConfig {
            host: self.host,
            port: self.port,
            data_dir: self.data_dir,
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
            override_ids: AllowList::from_raw(self.override_ids),
            uploader_ids: AllowList::from_raw(self.uploader_ids),
            contract_address: self.contract_address,
            public_base_url,
            transcript_cap: self.transcript_cap,
            snapshot_size: self.snapshot_size,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let config = Args::parse().into_config();
    tracing::info!(
        "Using data directory '{}' ({}x{} canvas, {} override ids, {} uploader ids)",
        config.data_dir.display(),
        config.canvas_width,
        config.canvas_height,
        config.override_ids.len(),
        config.uploader_ids.len()
    );

    // Wire documents, registry, pusher and use cases, then run the server
    let state = Arc::new(AppState::from_config(&config));
    let server = Server::new(state);
    if let Err(e) = server.run(config.host.clone(), config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
