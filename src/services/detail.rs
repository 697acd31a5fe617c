// src/services/detail.rs

//! Comic detail normalizer.

use scraper::{Html, Selector};

use crate::error::Result;
use crate::models::{ChapterRef, ComicDetail, DetailSelectors, GenreRef};
use crate::services::anchor::detail_path;
use crate::services::chapters::ChapterListService;
use crate::source::Source;
use crate::utils::html::{exists, first_attr, first_text, parse_selector, raw_text_of, text_of, text_or_empty};
use crate::utils::text::{normalize_whitespace, parse_authors, parse_count, parse_decimal, parse_status, parse_total, split_list};
use crate::utils::url::{slug_from_link, with_scheme};

#[derive(Debug, Clone)]
struct DetailQuery {
    title: Selector,
    thumbnail: Selector,
    description: Selector,
    authors: Selector,
    status: Selector,
    genres: Selector,
    other_names: Selector,
    total_views: Selector,
    followers: Selector,
    rating_value: Selector,
    rating_count: Selector,
    adult_warning: Selector,
}

/// Builds a full [`ComicDetail`] from the detail page and the chapter list.
#[derive(Debug, Clone)]
pub struct DetailNormalizer {
    query: DetailQuery,
    chapters: ChapterListService,
}

impl DetailNormalizer {
    pub fn new(selectors: &DetailSelectors) -> Result<Self> {
        Ok(Self {
            query: DetailQuery {
                title: parse_selector(&selectors.title)?,
                thumbnail: parse_selector(&selectors.thumbnail)?,
                description: parse_selector(&selectors.description)?,
                authors: parse_selector(&selectors.authors)?,
                status: parse_selector(&selectors.status)?,
                genres: parse_selector(&selectors.genres)?,
                other_names: parse_selector(&selectors.other_names)?,
                total_views: parse_selector(&selectors.total_views)?,
                followers: parse_selector(&selectors.followers)?,
                rating_value: parse_selector(&selectors.rating_value)?,
                rating_count: parse_selector(&selectors.rating_count)?,
                adult_warning: parse_selector(&selectors.adult_warning)?,
            },
            chapters: ChapterListService::new(selectors)?,
        })
    }

    /// Fetch the detail page and the chapter list concurrently.
    ///
    /// The chapter list needs the numeric id from the detail page, so that
    /// page is requested twice; either request failing fails the whole call.
    pub async fn normalize(&self, source: &dyn Source, comic_id: &str) -> Result<ComicDetail> {
        log::info!("Fetching detail for {}", comic_id);
        let path = detail_path(comic_id);
        let (html, chapters) =
            tokio::try_join!(source.fetch(&path), self.chapters.list(source, comic_id))?;
        Ok(self.parse(&html, comic_id, chapters))
    }

    /// Build a detail record from already-fetched markup.
    pub fn parse(&self, html: &str, comic_id: &str, chapters: Vec<ChapterRef>) -> ComicDetail {
        let document = Html::parse_document(html);
        let root = document.root_element();
        let q = &self.query;

        let genres = root
            .select(&q.genres)
            .map(|link| {
                let name = text_of(link);
                match link.value().attr("href").and_then(slug_from_link) {
                    Some(id) => GenreRef::new(id, name),
                    None => GenreRef::unresolved(name),
                }
            })
            .collect();

        ComicDetail {
            id: comic_id.to_string(),
            title: text_or_empty(root, &q.title),
            thumbnail: first_attr(root, &q.thumbnail, "src")
                .filter(|src| !src.is_empty())
                .map(|src| with_scheme(&src)),
            description: root
                .select(&q.description)
                .next()
                .map(|el| normalize_whitespace(&raw_text_of(el)))
                .unwrap_or_default(),
            authors: parse_authors(&text_or_empty(root, &q.authors)),
            status: parse_status(&text_or_empty(root, &q.status)),
            genres,
            other_names: split_list(&text_or_empty(root, &q.other_names)).into_vec(),
            total_views: parse_total(&text_or_empty(root, &q.total_views)),
            followers: parse_total(&text_or_empty(root, &q.followers)),
            rating_average: first_text(root, &q.rating_value)
                .map(|t| parse_decimal(&t))
                .unwrap_or_default(),
            rating_count: first_text(root, &q.rating_count)
                .map(|t| parse_count(&t))
                .unwrap_or_default(),
            is_adult: exists(root, &q.adult_warning),
            chapters,
        }
    }
}
