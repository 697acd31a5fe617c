// src/services/reader.rs

//! Chapter reader: page images plus the chapter list for navigation.

use scraper::{Html, Selector};

use crate::error::Result;
use crate::models::{ChapterPage, ChapterRef, DetailSelectors, PageImage, ReaderSelectors};
use crate::services::chapters::ChapterListService;
use crate::source::Source;
use crate::utils::html::{parse_selector, text_or_empty};
use crate::utils::url::with_scheme;

/// Request path of a chapter page.
pub fn chapter_path(comic_id: &str, chapter: u32) -> String {
    format!("truyen-tranh/{}/chuong-{}", comic_id.trim_matches('/'), chapter)
}

#[derive(Debug, Clone)]
pub struct ChapterReader {
    image: Selector,
    primary_src_attr: String,
    backup_src_attr: String,
    chapter_name: Selector,
    comic_name: Selector,
    chapters: ChapterListService,
}

impl ChapterReader {
    pub fn new(reader: &ReaderSelectors, detail: &DetailSelectors) -> Result<Self> {
        Ok(Self {
            image: parse_selector(&reader.image)?,
            primary_src_attr: reader.primary_src_attr.clone(),
            backup_src_attr: reader.backup_src_attr.clone(),
            chapter_name: parse_selector(&reader.chapter_name)?,
            comic_name: parse_selector(&reader.comic_name)?,
            chapters: ChapterListService::new(detail)?,
        })
    }

    /// Fetch a chapter page and the comic's chapter list concurrently.
    pub async fn read(&self, source: &dyn Source, comic_id: &str, chapter: u32) -> Result<ChapterPage> {
        log::info!("Fetching chapter {} of {}", chapter, comic_id);
        let path = chapter_path(comic_id, chapter);
        let (html, chapters) =
            tokio::try_join!(source.fetch(&path), self.chapters.list(source, comic_id))?;
        Ok(self.parse(&html, chapters))
    }

    /// Build the chapter page from already-fetched markup.
    pub fn parse(&self, html: &str, chapters: Vec<ChapterRef>) -> ChapterPage {
        let document = Html::parse_document(html);
        let root = document.root_element();

        let images = root
            .select(&self.image)
            .filter_map(|img| {
                let attr = |name: &str| {
                    img.value()
                        .attr(name)
                        .map(str::trim)
                        .filter(|v| !v.is_empty())
                        .map(with_scheme)
                };
                let src = attr(&self.primary_src_attr).or_else(|| attr("src"))?;
                Some((src, attr(&self.backup_src_attr)))
            })
            .enumerate()
            .map(|(index, (src, backup_url))| PageImage {
                page: index as u32 + 1,
                src,
                backup_url,
            })
            .collect();

        ChapterPage {
            images,
            chapters,
            chapter_name: text_or_empty(root, &self.chapter_name),
            comic_name: text_or_empty(root, &self.comic_name),
        }
    }
}
