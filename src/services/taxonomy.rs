// src/services/taxonomy.rs

//! Genre catalog service.
//!
//! Builds the genre list from the site's navigation menu and matches free-text
//! genre labels against it. Nothing is cached between calls; callers that need
//! a consistent view fetch one snapshot and pass it down.

use scraper::{Html, Selector};

use crate::error::Result;
use crate::models::{ALL_GENRES, Config, GenreRef};
use crate::source::Source;
use crate::utils::html::{parse_selector, text_of};
use crate::utils::url::slug_from_link;

/// Menu slug that links to the unfiltered browse page.
const BROWSE_ALL_SLUG: &str = "tim-truyen";

/// Service for building and querying the genre catalog.
#[derive(Debug, Clone)]
pub struct TaxonomyResolver {
    genre_link: Selector,
    description_attr: String,
    adult_genre: Option<GenreRef>,
}

impl TaxonomyResolver {
    /// Create a resolver from the taxonomy selectors and settings.
    pub fn new(config: &Config) -> Result<Self> {
        let selectors = &config.selectors.taxonomy;
        Ok(Self {
            genre_link: parse_selector(&selectors.genre_link)?,
            description_attr: selectors.description_attr.clone(),
            adult_genre: config.taxonomy.adult_genre.clone(),
        })
    }

    /// Fetch the home page and build the catalog.
    pub async fn resolve(&self, source: &dyn Source) -> Result<Vec<GenreRef>> {
        let html = source.fetch("").await?;
        let genres = self.parse(&html);
        log::debug!("Resolved {} genres", genres.len());
        Ok(genres)
    }

    /// Build the catalog from home page markup.
    pub fn parse(&self, html: &str) -> Vec<GenreRef> {
        let document = Html::parse_document(html);
        let mut genres: Vec<GenreRef> = document
            .select(&self.genre_link)
            .filter_map(|link| {
                let slug = slug_from_link(link.value().attr("href")?)?;
                let id = if slug == BROWSE_ALL_SLUG {
                    ALL_GENRES.to_string()
                } else {
                    slug
                };
                Some(GenreRef {
                    id: Some(id),
                    name: text_of(link),
                    description: link
                        .value()
                        .attr(&self.description_attr)
                        .map(str::trim)
                        .filter(|d| !d.is_empty())
                        .map(str::to_string),
                })
            })
            .collect();

        if let Some(adult) = &self.adult_genre {
            if !genres.iter().any(|g| g.id == adult.id) {
                genres.push(adult.clone());
            }
        }

        genres
    }
}

/// Find a genre by name, ignoring case.
pub fn find_genre<'a>(snapshot: &'a [GenreRef], name: &str) -> Option<&'a GenreRef> {
    let wanted = name.trim().to_lowercase();
    snapshot.iter().find(|g| g.name.to_lowercase() == wanted)
}

/// Resolve a listing label against a snapshot. Labels with no match are kept,
/// with no id and their original text.
pub fn resolve_label(snapshot: &[GenreRef], label: &str) -> GenreRef {
    match find_genre(snapshot, label) {
        Some(genre) => GenreRef {
            id: genre.id.clone(),
            name: genre.name.clone(),
            description: None,
        },
        None => GenreRef::unresolved(label.trim()),
    }
}
