// src/services/discovery.rs

//! Search suggestions and recommendation carousels.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{
    Authors, ChapterRef, DiscoverySelectors, RecommendKind, RecommendedComic, SearchSuggestion,
    UPDATING,
};
use crate::source::Source;
use crate::utils::html::{first_attr, parse_selector, text_of, text_or_empty};
use crate::utils::text::{clean_text, is_placeholder};
use crate::utils::url::{encode_query_value, slug_from_link, trailing_number, with_scheme};

/// Suggestion endpoint for a query.
pub fn suggest_path(query: &str) -> String {
    format!("Comic/Services/SuggestSearch.ashx?q={}", encode_query_value(query))
}

#[derive(Debug, Clone)]
pub struct DiscoveryService {
    suggest_item: Selector,
    suggest_tag: Selector,
    suggest_authors: Selector,
    suggest_title: Selector,
    suggest_image: Selector,
    carousel_item: Selector,
    caption_link: Selector,
    titled_link: Selector,
    time: Selector,
    image: Selector,
    image_attr: String,
    link: Selector,
}

impl DiscoveryService {
    pub fn new(s: &DiscoverySelectors) -> Result<Self> {
        Ok(Self {
            suggest_item: parse_selector(&s.suggest_item)?,
            suggest_tag: parse_selector(&s.suggest_tag)?,
            suggest_authors: parse_selector(&s.suggest_authors)?,
            suggest_title: parse_selector(&s.suggest_title)?,
            suggest_image: parse_selector(&s.suggest_image)?,
            carousel_item: parse_selector(&s.carousel_item)?,
            caption_link: parse_selector(&s.carousel_chapter)?,
            titled_link: parse_selector(&s.carousel_title)?,
            time: parse_selector(&s.carousel_time)?,
            image: parse_selector(&s.carousel_image)?,
            image_attr: s.carousel_image_attr.clone(),
            link: parse_selector(&s.link)?,
        })
    }

    /// Quick search suggestions. An empty query is rejected before fetching.
    pub async fn suggest(&self, source: &dyn Source, query: &str) -> Result<Vec<SearchSuggestion>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidQuery("search query is empty".into()));
        }
        let html = source.fetch(&suggest_path(query)).await?;
        Ok(self.parse_suggestions(&html))
    }

    pub fn parse_suggestions(&self, html: &str) -> Vec<SearchSuggestion> {
        let fragment = Html::parse_fragment(html);
        fragment
            .root_element()
            .select(&self.suggest_item)
            .map(|li| self.parse_suggestion(li))
            .collect()
    }

    fn parse_suggestion(&self, li: ElementRef<'_>) -> SearchSuggestion {
        let tags: Vec<String> = li.select(&self.suggest_tag).map(text_of).collect();

        let latest_chapter = match tags.first() {
            Some(chapter) if chapter.starts_with("Chapter") => chapter.clone(),
            _ => UPDATING.to_string(),
        };
        let genres = match tags.as_slice() {
            [_, .., last] => last
                .split(", ")
                .map(str::trim)
                .filter(|g| !g.is_empty())
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        };

        let authors = text_or_empty(li, &self.suggest_authors);
        let authors = if authors.is_empty() || is_placeholder(&authors) {
            Authors::default()
        } else {
            Authors::List(authors.split(" - ").map(clean_text).collect())
        };

        SearchSuggestion {
            id: first_attr(li, &self.link, "href")
                .and_then(|href| slug_from_link(&href))
                .unwrap_or_default(),
            title: text_or_empty(li, &self.suggest_title),
            thumbnail: first_attr(li, &self.suggest_image, "src")
                .filter(|src| !src.is_empty())
                .map(|src| with_scheme(&src)),
            latest_chapter,
            genres,
            authors,
        }
    }

    /// Comics from the recommendation carousel of a landing page.
    pub async fn recommend(&self, source: &dyn Source, kind: RecommendKind) -> Result<Vec<RecommendedComic>> {
        let html = source.fetch(kind.path()).await?;
        let comics = self.parse_carousel(&html);
        log::debug!("{} recommended comics from {}", comics.len(), kind.path());
        Ok(comics)
    }

    pub fn parse_carousel(&self, html: &str) -> Vec<RecommendedComic> {
        let document = Html::parse_document(html);
        document
            .root_element()
            .select(&self.carousel_item)
            .map(|item| {
                let caption = item.select(&self.caption_link).next();
                let latest_chapter = ChapterRef {
                    id: caption
                        .and_then(|a| a.value().attr("href"))
                        .and_then(trailing_number)
                        .unwrap_or(0),
                    name: caption
                        .map(|a| a.value().attr("title").map(clean_text).unwrap_or_else(|| text_of(a)))
                        .unwrap_or_default(),
                    updated_at: None,
                };
                let thumbnail = item.select(&self.image).next().and_then(|img| {
                    img.value()
                        .attr(&self.image_attr)
                        .or_else(|| img.value().attr("src"))
                        .map(str::trim)
                        .filter(|src| !src.is_empty())
                        .map(with_scheme)
                });

                RecommendedComic {
                    id: first_attr(item, &self.link, "href")
                        .and_then(|href| slug_from_link(&href))
                        .unwrap_or_default(),
                    title: first_attr(item, &self.titled_link, "title").unwrap_or_default(),
                    thumbnail,
                    updated_at: text_or_empty(item, &self.time),
                    latest_chapter,
                }
            })
            .collect()
    }
}
