// src/config.rs

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{UploadError, UploadResult};

/// Environment variable that overrides the configured server URL.
pub const SERVER_ENV: &str = "GIF_UPLOAD_SERVER";

const CONFIG_DIR: &str = "gif-upload";
const CONFIG_FILE: &str = "config.json";

/// Settings for talking to the gallery server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server_url: String,
    pub upload_path: String,
    pub gallery_path: String,
    /// Request timeout in seconds. 0 disables it.
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_url: "http://localhost:8080".into(),
            upload_path: "/gif".into(),
            gallery_path: "/".into(),
            timeout_secs: 30,
            user_agent: format!("gif-upload/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Default location: `<config dir>/gif-upload/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Loads the config file at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> UploadResult<Self> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {}, using defaults", path.display());
                return Ok(Config::default());
            }
            Err(e) => return Err(UploadError::io(path, e)),
        };
        serde_json::from_str(&text).map_err(|e| UploadError::Config {
            path: path.to_path_buf(),
            description: e.to_string(),
        })
    }

    /// Loads from `path` if given, else from the default location,
    /// then applies the server URL environment override.
    pub fn resolve(path: Option<&Path>) -> UploadResult<Self> {
        let mut config = match path.map(Path::to_path_buf).or_else(Config::default_path) {
            Some(path) => Config::load(&path)?,
            None => Config::default(),
        };
        if let Ok(server) = std::env::var(SERVER_ENV) {
            if !server.is_empty() {
                config.server_url = server;
            }
        }
        Ok(config)
    }
}
