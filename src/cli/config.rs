use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::ApiClient;
use crate::auth::{ProbeOutcome, SessionProber};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerInfo {
    pub url: String,
    pub description: String,
    pub added_at: DateTime<Utc>,
    pub last_ping: Option<DateTime<Utc>>,
    pub status: ServerStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerStatus {
    Up,
    Down,
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub servers: HashMap<String, ServerInfo>,
}

/// Session cookie saved between runs, tied to the server that issued it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub server_url: String,
    pub sid: String,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub current_server: Option<String>,
    pub session: Option<StoredSession>,
}

impl ServerInfo {
    pub fn new(url: String, description: String) -> Self {
        Self {
            url,
            description,
            added_at: Utc::now(),
            last_ping: None,
            status: ServerStatus::Unknown,
        }
    }

    pub fn update_ping(&mut self, status: ServerStatus) {
        self.last_ping = Some(Utc::now());
        self.status = status;
    }
}

impl EnvironmentConfig {
    /// Session id for `server_url`, if one was saved for that server
    pub fn session_for(&self, server_url: &str) -> Option<String> {
        self.session
            .as_ref()
            .filter(|s| s.server_url == server_url)
            .map(|s| s.sid.clone())
    }

    pub fn store_session(&mut self, server_url: &str, sid: Option<String>) {
        self.session = sid.map(|sid| StoredSession {
            server_url: server_url.to_string(),
            sid,
            saved_at: Utc::now(),
        });
    }
}

pub fn get_config_dir() -> anyhow::Result<PathBuf> {
    let config_dir = if let Ok(custom_dir) = std::env::var("FINANCE_CLI_CONFIG_DIR") {
        PathBuf::from(custom_dir)
    } else {
        let home = std::env::var("HOME").map_err(|_| anyhow::anyhow!("HOME environment variable not set"))?;
        PathBuf::from(home).join(".config").join("finance").join("cli")
    };

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)?;
    }

    Ok(config_dir)
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let server_file = get_config_dir()?.join("server.json");

    if !server_file.exists() {
        return Ok(ServerConfig::default());
    }

    let content = fs::read_to_string(server_file)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_server_config(config: &ServerConfig) -> anyhow::Result<()> {
    let server_file = get_config_dir()?.join("server.json");
    fs::write(server_file, serde_json::to_string_pretty(config)?)?;
    Ok(())
}

pub fn load_environment_config() -> anyhow::Result<EnvironmentConfig> {
    let env_file = get_config_dir()?.join("env.json");

    if !env_file.exists() {
        return Ok(EnvironmentConfig::default());
    }

    let content = fs::read_to_string(env_file)?;
    Ok(serde_json::from_str(&content)?)
}

pub fn save_environment_config(config: &EnvironmentConfig) -> anyhow::Result<()> {
    let env_file = get_config_dir()?.join("env.json");
    fs::write(env_file, serde_json::to_string_pretty(config)?)?;
    Ok(())
}

/// Base URL of the selected server, falling back to the configured default
pub fn resolve_server_url(default_url: &str) -> anyhow::Result<String> {
    let env_config = load_environment_config()?;
    let Some(name) = env_config.current_server else {
        return Ok(default_url.to_string());
    };

    let servers = load_server_config()?;
    match servers.servers.get(&name) {
        Some(info) => Ok(info.url.clone()),
        None => {
            tracing::warn!("Current server '{}' is no longer registered, using {}", name, default_url);
            Ok(default_url.to_string())
        }
    }
}

/// Any answer from the session endpoint, 401 included, means the API is up
pub async fn ping_server(api: ApiClient) -> ServerStatus {
    match SessionProber::new(api).check().await {
        ProbeOutcome::Authenticated(_) | ProbeOutcome::NoSession => ServerStatus::Up,
        ProbeOutcome::Unreachable(_) => ServerStatus::Down,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_bound_to_server() {
        let mut env = EnvironmentConfig::default();
        env.store_session("http://localhost:8000/", Some("abc".to_string()));
        assert_eq!(env.session_for("http://localhost:8000/").as_deref(), Some("abc"));
        assert_eq!(env.session_for("https://finance.example.com/"), None);

        env.store_session("http://localhost:8000/", None);
        assert!(env.session.is_none());
    }
}
