// src/api.rs

//! Logical operations over a comic site.
//!
//! [`ComicsApi`] maps each browse operation onto a listing path and hands the
//! work to the matching normalizer. Inputs are checked here, so rejected
//! requests never reach the source.

use crate::error::{AppError, Result};
use crate::models::{
    ALL_GENRES, ChapterPage, ChapterRef, CommentNode, ComicDetail, ComicSummary, Config, GenreRef,
    Paged, RecommendKind, RecommendedComic, SearchSuggestion, StatusFilter, TopCategory,
};
use crate::services::comments::UNSCOPED_CHAPTER;
use crate::services::{
    ChapterListService, ChapterReader, CommentReconstructor, DetailNormalizer, DiscoveryService,
    ListingNormalizer, TaxonomyResolver,
};
use crate::source::{HttpSource, Source};
use crate::utils::url::encode_query_value;

/// Sort code for newly added comics.
const NEW_COMICS_SORT: u8 = 15;

/// Entry point bundling a source with the compiled normalizers.
pub struct ComicsApi<S> {
    source: S,
    taxonomy: TaxonomyResolver,
    listing: ListingNormalizer,
    detail: DetailNormalizer,
    chapters: ChapterListService,
    comments: CommentReconstructor,
    reader: ChapterReader,
    discovery: DiscoveryService,
}

impl ComicsApi<HttpSource> {
    /// Build an API backed by HTTP, using the configured site.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(HttpSource::new(&config.source)?, config)
    }
}

impl<S: Source> ComicsApi<S> {
    /// Validate the configuration and compile every selector up front.
    pub fn new(source: S, config: &Config) -> Result<Self> {
        config.validate()?;
        let selectors = &config.selectors;
        Ok(Self {
            source,
            taxonomy: TaxonomyResolver::new(config)?,
            listing: ListingNormalizer::new(config)?,
            detail: DetailNormalizer::new(&selectors.detail)?,
            chapters: ChapterListService::new(&selectors.detail)?,
            comments: CommentReconstructor::new(&selectors.detail, &selectors.comments)?,
            reader: ChapterReader::new(&selectors.reader, &selectors.detail)?,
            discovery: DiscoveryService::new(&selectors.discovery)?,
        })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The genre catalog.
    pub async fn genres(&self) -> Result<Vec<GenreRef>> {
        self.taxonomy.resolve(&self.source).await
    }

    /// Comics in a genre, or every comic for `all`.
    pub async fn list_by_genre(
        &self,
        genre: &str,
        page: u32,
        status: StatusFilter,
    ) -> Result<Paged<ComicSummary>> {
        let genre = genre.trim();
        if genre.is_empty() {
            return Err(AppError::InvalidQuery("genre is empty".into()));
        }
        let path = if genre.eq_ignore_ascii_case(ALL_GENRES) {
            "tim-truyen?".to_string()
        } else {
            format!("tim-truyen/{genre}?")
        };
        self.listing(&path, page, status).await
    }

    /// Newly added comics.
    pub async fn new_comics(&self, page: u32, status: StatusFilter) -> Result<Paged<ComicSummary>> {
        let path = format!("tim-truyen?sort={NEW_COMICS_SORT}");
        self.listing(&path, page, status).await
    }

    /// Top comics for a ranking category.
    pub async fn top(
        &self,
        category: TopCategory,
        page: u32,
        status: StatusFilter,
    ) -> Result<Paged<ComicSummary>> {
        let path = format!("tim-truyen?sort={}", category.sort_code());
        self.listing(&path, page, status).await
    }

    pub async fn completed(&self, page: u32) -> Result<Paged<ComicSummary>> {
        self.listing("tim-truyen?", page, StatusFilter::Completed).await
    }

    /// Recently updated comics, from the site root.
    pub async fn recent_updates(&self, page: u32) -> Result<Paged<ComicSummary>> {
        self.listing("", page, StatusFilter::All).await
    }

    pub async fn trending(&self, page: u32) -> Result<Paged<ComicSummary>> {
        self.listing("truyen-tranh-hot?", page, StatusFilter::All).await
    }

    pub async fn boy(&self, page: u32) -> Result<Paged<ComicSummary>> {
        self.listing("truyen-con-trai?", page, StatusFilter::All).await
    }

    pub async fn girl(&self, page: u32) -> Result<Paged<ComicSummary>> {
        self.listing("truyen-con-gai?", page, StatusFilter::All).await
    }

    /// Full-text search. An empty query is rejected.
    pub async fn search(&self, query: &str, page: u32) -> Result<Paged<ComicSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::InvalidQuery("search query is empty".into()));
        }
        let path = format!("tim-truyen?keyword={}&", encode_query_value(query));
        self.listing(&path, page, StatusFilter::All).await
    }

    /// Comics by an author alias. An empty alias is rejected.
    pub async fn by_author(&self, alias: &str, page: u32) -> Result<Paged<ComicSummary>> {
        let alias = alias.trim();
        if alias.is_empty() {
            return Err(AppError::InvalidQuery("author alias is empty".into()));
        }
        let path = format!("tim-truyen?tac-gia={}", encode_query_value(alias));
        self.listing(&path, page, StatusFilter::All).await
    }

    pub async fn detail(&self, comic_id: &str) -> Result<ComicDetail> {
        self.detail.normalize(&self.source, comic_id).await
    }

    pub async fn chapters(&self, comic_id: &str) -> Result<Vec<ChapterRef>> {
        self.chapters.list(&self.source, comic_id).await
    }

    /// Page images of one chapter, with the chapter list for navigation.
    pub async fn chapter(&self, comic_id: &str, chapter: u32) -> Result<ChapterPage> {
        self.reader.read(&self.source, comic_id, chapter).await
    }

    /// One page of comments, for the whole comic or a single chapter.
    pub async fn comments(
        &self,
        comic_id: &str,
        page: u32,
        chapter_id: Option<i64>,
    ) -> Result<Paged<CommentNode>> {
        self.comments
            .reconstruct(&self.source, comic_id, page, chapter_id.unwrap_or(UNSCOPED_CHAPTER))
            .await
    }

    pub async fn search_suggest(&self, query: &str) -> Result<Vec<SearchSuggestion>> {
        self.discovery.suggest(&self.source, query).await
    }

    pub async fn recommend(&self, kind: RecommendKind) -> Result<Vec<RecommendedComic>> {
        self.discovery.recommend(&self.source, kind).await
    }

    async fn listing(
        &self,
        path: &str,
        page: u32,
        status: StatusFilter,
    ) -> Result<Paged<ComicSummary>> {
        self.listing.normalize(&self.source, path, page, status).await
    }
}
