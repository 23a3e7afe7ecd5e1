use std::net::SocketAddr;
use std::path::Path;

use roster_api::session::SessionSettings;
use roster_client::ApiConfig;
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config.example.toml";

/// Console configuration file. Every section is optional.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default)]
pub struct ConsoleConfig {
    pub server: ListenConfig,
    pub student_api: ApiConfig,
    pub session: SessionSettings,
}

#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ListenConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ListenConfig {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".into(),
            port: 3000,
        }
    }
}

impl ListenConfig {
    pub fn socket_addr(&self) -> Option<SocketAddr> {
        format!("{}:{}", self.bind, self.port).parse().ok()
    }
}

impl ConsoleConfig {
    /// Reads `path`, or falls back to defaults when it is missing or invalid.
    pub fn load(path: &Path) -> Self {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("cannot read {}: {e}; continuing with defaults", path.display());
                return Self::default();
            }
        };

        toml::from_str(&text).unwrap_or_else(|e| {
            tracing::warn!("cannot parse {}: {e}; continuing with defaults", path.display());
            Self::default()
        })
    }
}

/// `--config <path>` from the command line, else `ROSTER_CONFIG`, else the
/// example file next to the binary's working directory.
pub fn config_path(mut args: impl Iterator<Item = String>) -> String {
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(path) = args.next() {
                return path;
            }
        } else if let Some(path) = arg.strip_prefix("--config=") {
            return path.to_string();
        }
    }
    std::env::var("ROSTER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into())
}
