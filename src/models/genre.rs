//! Genre references.

use serde::{Deserialize, Serialize};

/// Reserved genre id meaning "no genre filter".
pub const ALL_GENRES: &str = "all";

/// A genre as listed by the site's navigation menu, or a free-text label
/// that could not be matched against it (`id == None`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GenreRef {
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl GenreRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: name.into(),
            description: None,
        }
    }

    /// A label with no taxonomy match. Kept so consumers can detect it.
    pub fn unresolved(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
        }
    }
}
