// src/models/mod.rs

//! Domain models for the extraction engine.
//!
//! Output records, request filters and configuration, organized by their
//! primary purpose.

mod chapter;
mod comic;
mod comment;
mod config;
mod envelope;
mod filter;
mod genre;
pub mod labels;
mod selectors;

// Re-export all public types
pub use chapter::{ChapterPage, PageImage};
pub use comic::{
    Authors, ChapterRef, ComicDetail, ComicSummary, FieldValue, RecommendedComic,
    SearchSuggestion, Status, Total, UPDATING,
};
pub use comment::{CommentNode, CommentReply, DEFAULT_AVATAR};
pub use config::{Config, SourceConfig, TaxonomyConfig};
pub use envelope::{ErrorEnvelope, PageEnvelope, Paged};
pub use filter::{RecommendKind, StatusFilter, TopCategory};
pub use genre::{ALL_GENRES, GenreRef};
pub use labels::{LabelMapping, LabelTable, SummaryField, ValueKind};
pub use selectors::{
    CommentSelectors, DetailSelectors, DiscoverySelectors, ListingSelectors, ReaderSelectors,
    Selectors, TaxonomySelectors,
};
