//! Fetch capability used by the normalizers.
//!
//! The engine only ever asks for a path relative to the site root and gets
//! back raw markup or decoded JSON. How the request is made (client, timeout,
//! headers) is the implementation's business.
//!
//! Implementations return owned data rather than parsed documents so that no
//! `scraper::Html` is held across an `.await`.

pub mod http;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;

use crate::error::Result;

pub use http::HttpSource;

/// Trait for page sources.
#[async_trait]
pub trait Source: Send + Sync {
    /// Fetch an HTML page or fragment.
    async fn fetch(&self, path: &str) -> Result<String>;

    /// Fetch and decode a JSON endpoint.
    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value>;
}
