#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use axum::Router;
use finance_client::api::ApiClient;
use finance_client::config::ApiConfig;

/// In-process stand-in for the finance API
pub struct MockApi {
    pub port: u16,
    pub base_url: String,
}

impl MockApi {
    pub async fn spawn(router: Router) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock API")?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, router).await;
        });

        Ok(Self {
            port,
            base_url: format!("http://127.0.0.1:{}", port),
        })
    }

    pub fn client(&self) -> Result<ApiClient> {
        client_for(&self.base_url)
    }
}

pub fn client_for(base_url: &str) -> Result<ApiClient> {
    let config = ApiConfig {
        base_url: base_url.to_string(),
        request_timeout_secs: 5,
        connect_timeout_secs: 2,
    };
    Ok(ApiClient::new(&config)?)
}

/// Base URL with nothing listening behind it
pub fn unreachable_url() -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    Ok(format!("http://127.0.0.1:{}", port))
}

/// Shared log of what the mock API received
#[derive(Clone)]
pub struct Recorder<T> {
    entries: Arc<Mutex<Vec<T>>>,
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl<T: Clone> Recorder<T> {
    pub fn push(&self, entry: T) {
        self.entries.lock().expect("recorder lock").push(entry);
    }

    pub fn entries(&self) -> Vec<T> {
        self.entries.lock().expect("recorder lock").clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("recorder lock").len()
    }
}

pub type QueryLog = Recorder<HashMap<String, String>>;
