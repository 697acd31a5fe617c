//! Service layer for the extraction engine.
//!
//! This module contains the page normalizers:
//! - Genre catalog (`TaxonomyResolver`)
//! - Listing pages (`ListingNormalizer`)
//! - Comic detail and chapter list (`DetailNormalizer`, `ChapterListService`)
//! - Comment threads (`CommentReconstructor`)
//! - Chapter reader (`ChapterReader`)
//! - Search suggestions and recommendations (`DiscoveryService`)

pub mod anchor;
pub mod chapters;
pub mod comments;
pub mod detail;
pub mod discovery;
pub mod listing;
pub mod reader;
pub mod taxonomy;

pub use anchor::{AnchorExtractor, ComicAnchor};
pub use chapters::ChapterListService;
pub use comments::CommentReconstructor;
pub use detail::DetailNormalizer;
pub use discovery::DiscoveryService;
pub use listing::ListingNormalizer;
pub use reader::ChapterReader;
pub use taxonomy::TaxonomyResolver;
