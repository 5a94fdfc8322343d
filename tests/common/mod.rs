#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use turnilo_dashboards::config::AppConfig;
use turnilo_dashboards::server;

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub dashboards_url: String,
    pub client: reqwest::Client,
    _db_dir: Option<tempfile::TempDir>,
}

impl TestServer {
    /// Boot the real router in-process on a free port against `database_url`
    async fn spawn(database_url: String, db_dir: Option<tempfile::TempDir>) -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;

        let mut config = AppConfig::development();
        config.database.url = database_url;
        config.database.max_connections = 5;
        config.api.port = port;
        config.api.enable_request_logging = false;

        let base_url = format!("http://127.0.0.1:{}", port);
        let dashboards_url = format!("{}{}", base_url, config.dashboards_path());

        tokio::spawn(async move {
            if let Err(e) = server::run(config).await {
                eprintln!("test server exited: {e:?}");
            }
        });

        Ok(Self {
            port,
            base_url,
            dashboards_url,
            client: reqwest::Client::new(),
            _db_dir: db_dir,
        })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = self.client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn item_url(&self, id: impl std::fmt::Display) -> String {
        format!("{}/{}", self.dashboards_url, id)
    }

    pub async fn create(&self, body: &Value) -> Result<reqwest::Response> {
        Ok(self.client.post(&self.dashboards_url).json(body).send().await?)
    }
}

/// One server per test so ids start at 1 and tests never share rows
pub async fn spawn_server() -> Result<TestServer> {
    let server = TestServer::spawn("sqlite::memory:".to_string(), None).await?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Server over a temporary database file with a multi-connection pool
pub async fn spawn_file_backed_server() -> Result<TestServer> {
    let dir = tempfile::tempdir().context("failed to create temp dir")?;
    let url = format!("sqlite://{}", dir.path().join("dashboards.db").display());
    let server = TestServer::spawn(url, Some(dir)).await?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

pub fn dashboard(data_cube: &str, short_name: &str) -> Value {
    json!({
        "dataCube": data_cube,
        "shortName": short_name,
        "name": "Simple dashboard",
        "hash": "N4IgbglgzgrghgGwgLzgFwgewHYgFwhpwBGCApiADQhwC2ZyOA+gNYIBOAngBQCCAJNBa0WIAL4AVACJVqtBkw4x2xHAHMuBdgDMYCGuMkyxVVi3apUc9qYxycCotA6QjAI0WnqXRFpTEY1i40jFx+sghaMTTECNkqlGARAE1YbyE4DzBScnsJBwlp+ah6qgB9AgZBzigRMhqCGmNZgDVQgKTCa6ezjrWS0+dAvxNoS2cJOfwA=="
    })
}
