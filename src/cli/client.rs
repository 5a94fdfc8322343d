use reqwest::{Client, Response};
use serde_json::Value;

use super::DEFAULT_PATH;

/// Thin HTTP client over the dashboard resource
pub struct DashboardClient {
    http: Client,
    base_url: String,
}

impl DashboardClient {
    pub fn new(host: &str, port: u16) -> Self {
        Self {
            http: Client::new(),
            base_url: format!("http://{}:{}/{}", host, port, DEFAULT_PATH),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn create(&self, body: Value) -> reqwest::Result<Response> {
        self.http.post(&self.base_url).json(&body).send().await
    }

    pub async fn update(&self, id: &str, body: Value) -> reqwest::Result<Response> {
        self.http.put(self.item_url(id)).json(&body).send().await
    }

    pub async fn delete(&self, id: &str) -> reqwest::Result<Response> {
        self.http.delete(self.item_url(id)).send().await
    }

    pub async fn get(&self, id: &str) -> reqwest::Result<Response> {
        self.http.get(self.item_url(id)).send().await
    }

    pub async fn list(
        &self,
        short_name: Option<&str>,
        data_cube: Option<&str>,
    ) -> reqwest::Result<Response> {
        let mut params = Vec::new();
        if let Some(s) = short_name {
            params.push(("shortName", s));
        }
        if let Some(c) = data_cube {
            params.push(("dataCube", c));
        }
        self.http.get(&self.base_url).query(&params).send().await
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.base_url, id)
    }
}
