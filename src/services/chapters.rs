// src/services/chapters.rs

//! Chapter list service.

use serde::Deserialize;

use crate::error::Result;
use crate::models::{ChapterRef, DetailSelectors};
use crate::services::anchor::AnchorExtractor;
use crate::source::Source;
use crate::utils::text::clean_text;
use crate::utils::url::trailing_number;

/// Chapter list endpoint for a numeric comic id.
pub fn chapter_list_path(numeric_id: u64) -> String {
    format!("Comic/Services/ComicService.asmx/ProcessChapterList?comicId={numeric_id}")
}

#[derive(Debug, Deserialize)]
struct ChapterListResponse {
    #[serde(default)]
    chapters: Option<Vec<RawChapter>>,
}

#[derive(Debug, Deserialize)]
struct RawChapter {
    #[serde(default, alias = "chapterName")]
    name: String,
    #[serde(default)]
    url: String,
    #[serde(default, alias = "updatedAt")]
    updated_at: Option<String>,
}

/// Fetches a comic's full chapter list.
#[derive(Debug, Clone)]
pub struct ChapterListService {
    anchor: AnchorExtractor,
}

impl ChapterListService {
    pub fn new(selectors: &DetailSelectors) -> Result<Self> {
        Ok(Self {
            anchor: AnchorExtractor::new(selectors)?,
        })
    }

    /// Resolve the numeric id from the detail page, then query the chapter
    /// list endpoint.
    pub async fn list(&self, source: &dyn Source, comic_id: &str) -> Result<Vec<ChapterRef>> {
        let anchor = self.anchor.fetch(source, comic_id).await?;
        let json = source.fetch_json(&chapter_list_path(anchor.comic_id)).await?;
        let chapters = parse_chapter_list(json)?;
        log::debug!("{} has {} chapters", comic_id, chapters.len());
        Ok(chapters)
    }
}

/// Decode the chapter list payload. A missing list is an empty list.
pub fn parse_chapter_list(json: serde_json::Value) -> Result<Vec<ChapterRef>> {
    let response: ChapterListResponse = serde_json::from_value(json)?;
    Ok(response
        .chapters
        .unwrap_or_default()
        .into_iter()
        .map(|raw| ChapterRef {
            id: trailing_number(&raw.url).unwrap_or(0),
            name: clean_text(&raw.name),
            updated_at: raw.updated_at.filter(|d| !d.trim().is_empty()),
        })
        .collect())
}
