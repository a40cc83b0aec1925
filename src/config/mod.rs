use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub environment: Environment,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when neither FINANCE_LOG nor RUST_LOG is set
    pub filter: String,
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Presets first, then specific env vars win
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("FINANCE_API_URL") {
            if !v.trim().is_empty() {
                self.api.base_url = v.trim().to_string();
            }
        }
        if let Ok(v) = env::var("FINANCE_API_TIMEOUT_SECS") {
            self.api.request_timeout_secs = v.parse().unwrap_or(self.api.request_timeout_secs);
        }
        if let Ok(v) = env::var("FINANCE_API_CONNECT_TIMEOUT_SECS") {
            self.api.connect_timeout_secs = v.parse().unwrap_or(self.api.connect_timeout_secs);
        }

        if let Ok(v) = env::var("FINANCE_LOG") {
            self.logging.filter = v;
        } else if let Ok(v) = env::var("RUST_LOG") {
            self.logging.filter = v;
        }

        self
    }

    pub fn development() -> Self {
        Self {
            environment: Environment::Development,
            api: ApiConfig {
                base_url: "http://localhost:8000".to_string(),
                request_timeout_secs: 30,
                connect_timeout_secs: 10,
            },
            logging: LoggingConfig {
                filter: "finance_client=debug,warn".to_string(),
            },
        }
    }

    pub fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            api: ApiConfig {
                base_url: "https://staging.finance.example.com".to_string(),
                request_timeout_secs: 15,
                connect_timeout_secs: 5,
            },
            logging: LoggingConfig {
                filter: "finance_client=info,warn".to_string(),
            },
        }
    }

    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            api: ApiConfig {
                base_url: "https://finance.example.com".to_string(),
                request_timeout_secs: 10,
                connect_timeout_secs: 5,
            },
            logging: LoggingConfig {
                filter: "warn".to_string(),
            },
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::development()
    }
}
