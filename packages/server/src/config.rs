//! Server configuration.
//!
//! Built by the binary from command line flags and `RECAP_*` environment
//! variables, then consumed once when the use cases are wired.

use std::path::PathBuf;

use crate::domain::{
    AllowList,
    chat::{DEFAULT_SNAPSHOT_SIZE, DEFAULT_TRANSCRIPT_CAP},
};

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_CANVAS_SIZE: u32 = 32;
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

const CANVAS_DOCUMENT: &str = "canvas-state.json";
const CHAT_LOG_DOCUMENT: &str = "chat-log.json";
const PHOTOS_DOCUMENT: &str = "photos-data.json";
const UPLOADS_DIR: &str = "uploads";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory holding every JSON document and the uploads directory
    pub data_dir: PathBuf,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Identities allowed to move their canvas placement
    pub override_ids: AllowList,
    /// Identities allowed to manage gallery photos
    pub uploader_ids: AllowList,
    pub contract_address: String,
    /// Externally reachable base URL, used in token metadata
    pub public_base_url: String,
    pub transcript_cap: usize,
    pub snapshot_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            data_dir: PathBuf::from("./data"),
            canvas_width: DEFAULT_CANVAS_SIZE,
            canvas_height: DEFAULT_CANVAS_SIZE,
            override_ids: AllowList::default(),
            uploader_ids: AllowList::default(),
            contract_address: DEFAULT_CONTRACT_ADDRESS.to_string(),
            public_base_url: format!("http://{DEFAULT_HOST}:{DEFAULT_PORT}"),
            transcript_cap: DEFAULT_TRANSCRIPT_CAP,
            snapshot_size: DEFAULT_SNAPSHOT_SIZE,
        }
    }
}

impl ServerConfig {
    /// Default configuration storing documents under `data_dir`
    pub fn with_data_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            ..Self::default()
        }
    }

    pub fn canvas_path(&self) -> PathBuf {
        self.data_dir.join(CANVAS_DOCUMENT)
    }

    pub fn chat_log_path(&self) -> PathBuf {
        self.data_dir.join(CHAT_LOG_DOCUMENT)
    }

    pub fn photos_path(&self) -> PathBuf {
        self.data_dir.join(PHOTOS_DOCUMENT)
    }

    pub fn uploads_dir(&self) -> PathBuf {
        self.data_dir.join(UPLOADS_DIR)
    }
}
