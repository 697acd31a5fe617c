// src/source/http.rs

//! HTTP-backed source.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::SourceConfig;
use crate::source::Source;
use crate::utils::http::create_async_client;
use crate::utils::url::join_path;

/// Source that fetches pages from the configured site over HTTP.
#[derive(Clone)]
pub struct HttpSource {
    base_url: String,
    client: Client,
}

impl HttpSource {
    /// Create a source from the site configuration.
    pub fn new(config: &SourceConfig) -> Result<Self> {
        Ok(Self {
            base_url: config.base_url.clone(),
            client: create_async_client(config)?,
        })
    }

    async fn get(&self, path: &str) -> Result<reqwest::Response> {
        let url = join_path(&self.base_url, path);
        log::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::upstream(path, format!("HTTP {status}")));
        }
        Ok(response)
    }
}

#[async_trait]
impl Source for HttpSource {
    async fn fetch(&self, path: &str) -> Result<String> {
        Ok(self.get(path).await?.text().await?)
    }

    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value> {
        let text = self.get(path).await?.text().await?;
        serde_json::from_str(&text).map_err(|e| AppError::upstream(path, e))
    }
}
