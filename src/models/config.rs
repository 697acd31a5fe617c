//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::labels::{LabelMapping, LabelTable, default_labels};
use crate::models::{GenreRef, Selectors};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Upstream site and HTTP client settings
    #[serde(default)]
    pub source: SourceConfig,

    /// Genre catalog settings
    #[serde(default)]
    pub taxonomy: TaxonomyConfig,

    /// Listing row label to field mappings
    #[serde(default = "default_labels")]
    pub labels: Vec<LabelMapping>,

    /// CSS selectors per page type
    #[serde(default)]
    pub selectors: Selectors,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.source.base_url)?;
        if base.cannot_be_a_base() {
            return Err(AppError::validation("source.base_url must be an absolute URL"));
        }
        if self.source.user_agent.trim().is_empty() {
            return Err(AppError::validation("source.user_agent is empty"));
        }
        if self.source.timeout_secs == 0 {
            return Err(AppError::validation("source.timeout_secs must be > 0"));
        }
        if let Some(genre) = &self.taxonomy.adult_genre {
            if genre.id.as_deref().is_none_or(|id| id.trim().is_empty()) {
                return Err(AppError::validation("taxonomy.adult_genre needs an id"));
            }
        }
        LabelTable::new(&self.labels)?;
        Ok(())
    }

    /// Build the label lookup table.
    pub fn label_table(&self) -> Result<LabelTable> {
        LabelTable::new(&self.labels)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            taxonomy: TaxonomyConfig::default(),
            labels: default_labels(),
            selectors: Selectors::default(),
        }
    }
}

/// Upstream site and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Site root every request path is appended to
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Genre catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Genre appended to the catalog because the site keeps it out of the
    /// navigation menu. `None` disables it.
    #[serde(default = "defaults::adult_genre")]
    pub adult_genre: Option<GenreRef>,
}

impl Default for TaxonomyConfig {
    fn default() -> Self {
        Self {
            adult_genre: defaults::adult_genre(),
        }
    }
}

mod defaults {
    use crate::models::GenreRef;

    pub fn base_url() -> String {
        "https://nettruyenviet.com".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) \
         Chrome/124.0 Safari/537.36"
            .into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn adult_genre() -> Option<GenreRef> {
        Some(GenreRef {
            id: Some("16".into()),
            name: "16+".into(),
            description: Some("Truyện có nội dung dành cho độc giả từ 16 tuổi trở lên".into()),
        })
    }
}
