//! In-memory source serving canned pages, for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::source::Source;

/// Serves fixed bodies keyed by exact request path and records every request.
#[derive(Default)]
pub struct MemorySource {
    pages: HashMap<String, String>,
    json: HashMap<String, serde_json::Value>,
    requests: Mutex<Vec<String>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, path: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(path.into(), body.into());
        self
    }

    pub fn with_json(mut self, path: impl Into<String>, body: serde_json::Value) -> Self {
        self.json.insert(path.into(), body);
        self
    }

    /// Paths requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("requests lock").clone()
    }

    fn record(&self, path: &str) {
        self.requests
            .lock()
            .expect("requests lock")
            .push(path.to_string());
    }
}

#[async_trait]
impl Source for MemorySource {
    async fn fetch(&self, path: &str) -> Result<String> {
        self.record(path);
        self.pages
            .get(path)
            .cloned()
            .ok_or_else(|| AppError::upstream(path, "HTTP 404 Not Found"))
    }

    async fn fetch_json(&self, path: &str) -> Result<serde_json::Value> {
        self.record(path);
        self.json
            .get(path)
            .cloned()
            .ok_or_else(|| AppError::upstream(path, "HTTP 500 Internal Server Error"))
    }
}
