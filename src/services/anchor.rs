// src/services/anchor.rs

//! Numeric comic id and comment token lookup.
//!
//! The chapter list and comment endpoints are keyed by the site's internal
//! numeric id rather than the slug, and comments also need a per-page token.
//! Both are embedded in the detail page.

use scraper::{Html, Selector};

use crate::error::{AppError, Result};
use crate::models::DetailSelectors;
use crate::source::Source;
use crate::utils::html::{first_attr, parse_selector};

/// Request path of a comic's detail page.
pub fn detail_path(comic_id: &str) -> String {
    format!("truyen-tranh/{}", comic_id.trim_matches('/'))
}

/// Identifiers needed to query a comic's service endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComicAnchor {
    pub comic_id: u64,
    pub token: String,
}

/// Reads a [`ComicAnchor`] from detail page markup.
#[derive(Debug, Clone)]
pub struct AnchorExtractor {
    comic_id: Selector,
    comic_id_attr: String,
    token: Selector,
    token_attr: String,
}

impl AnchorExtractor {
    pub fn new(selectors: &DetailSelectors) -> Result<Self> {
        Ok(Self {
            comic_id: parse_selector(&selectors.comic_id)?,
            comic_id_attr: selectors.comic_id_attr.clone(),
            token: parse_selector(&selectors.comment_token)?,
            token_attr: selectors.comment_token_attr.clone(),
        })
    }

    /// Fetch a comic's detail page and read its anchor.
    pub async fn fetch(&self, source: &dyn Source, comic_id: &str) -> Result<ComicAnchor> {
        let html = source.fetch(&detail_path(comic_id)).await?;
        self.extract(&html, comic_id)
    }

    /// Read the anchor from detail markup.
    ///
    /// A missing numeric id is fatal; a missing token is tolerated as empty.
    pub fn extract(&self, html: &str, comic_id: &str) -> Result<ComicAnchor> {
        let document = Html::parse_document(html);
        let root = document.root_element();

        let numeric_id = first_attr(root, &self.comic_id, &self.comic_id_attr)
            .and_then(|id| id.parse().ok())
            .ok_or_else(|| AppError::extraction(comic_id, "numeric comic id not found"))?;

        let token = first_attr(root, &self.token, &self.token_attr).unwrap_or_else(|| {
            log::debug!("No comment token on {}", comic_id);
            String::new()
        });

        Ok(ComicAnchor {
            comic_id: numeric_id,
            token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::memory::MemorySource;

    fn extractor() -> AnchorExtractor {
        AnchorExtractor::new(&DetailSelectors::default()).unwrap()
    }

    #[test]
    fn test_extract_anchor() {
        let html = r#"<div class="star" data-id="4242"></div><input id="commentToken" value="tok-1">"#;
        let anchor = extractor().extract(html, "abc").unwrap();
        assert_eq!(
            anchor,
            ComicAnchor {
                comic_id: 4242,
                token: "tok-1".into()
            }
        );
    }

    #[test]
    fn test_missing_token_is_empty() {
        let anchor = extractor()
            .extract(r#"<div class="star" data-id="7"></div>"#, "abc")
            .unwrap();
        assert_eq!(anchor.token, "");
    }

    #[test]
    fn test_missing_id_is_fatal() {
        let err = extractor().extract("<p>nothing</p>", "abc").unwrap_err();
        assert!(matches!(err, AppError::Extraction { .. }));
    }

    #[tokio::test]
    async fn test_fetch_uses_detail_path() {
        let source = MemorySource::new().with_page(
            "truyen-tranh/abc",
            r#"<div class="star" data-id="9"></div>"#,
        );
        let anchor = extractor().fetch(&source, "abc").await.unwrap();
        assert_eq!(anchor.comic_id, 9);
        assert_eq!(source.requests(), vec!["truyen-tranh/abc".to_string()]);
    }
}
