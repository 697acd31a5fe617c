// src/models/comic.rs

//! Comic summary and detail records.

use serde::{Serialize, Serializer};

use crate::models::GenreRef;

/// Literal used wherever the source has no usable value.
pub const UPDATING: &str = "Updating";

/// Publication status. The source only distinguishes "finished" from
/// everything else.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
pub enum Status {
    Completed,
    #[default]
    Ongoing,
}

/// A counter scraped from the page: either a confirmed number or unknown.
///
/// Unknown serializes as the string `"Updating"`, never as `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Total {
    Count(u64),
    #[default]
    Updating,
}

impl Serialize for Total {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Total::Count(n) => serializer.serialize_u64(*n),
            Total::Updating => serializer.serialize_str(UPDATING),
        }
    }
}

/// Author field: a single name (possibly the `"Updating"` placeholder) or a
/// list of names.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Authors {
    Name(String),
    List(Vec<String>),
}

impl Default for Authors {
    fn default() -> Self {
        Authors::Name(UPDATING.to_string())
    }
}

/// Reference to a chapter.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChapterRef {
    /// Numeric chapter id, `0` when the link carried none
    pub id: u64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// A comic as it appears in a listing page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ComicSummary {
    pub id: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
    pub is_trending: bool,
    pub short_description: String,
    pub status: Status,
    pub genres: Vec<GenreRef>,
    pub other_names: Vec<String>,
    pub total_views: Total,
    pub followers: Total,
    pub total_comments: Total,
    pub authors: Authors,
    pub updated_at: String,
    pub latest_chapters: Vec<ChapterRef>,
}

/// One extracted label:value field, already converted to its final type.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Genres(Vec<GenreRef>),
    Status(Status),
    TotalViews(Total),
    TotalComments(Total),
    Followers(Total),
    OtherNames(Vec<String>),
    UpdatedAt(String),
    Authors(Authors),
}

impl ComicSummary {
    /// Build the fully-populated default record for a listing row.
    ///
    /// Every optional field holds its sentinel, so whatever the row markup
    /// lacks still serializes with a stable shape.
    pub fn template(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            thumbnail_url: None,
            is_trending: false,
            short_description: String::new(),
            status: Status::default(),
            genres: Vec::new(),
            other_names: Vec::new(),
            total_views: Total::Updating,
            followers: Total::Updating,
            total_comments: Total::Updating,
            authors: Authors::default(),
            updated_at: UPDATING.to_string(),
            latest_chapters: Vec::new(),
        }
    }

    /// Overlay a single extracted field onto the record.
    pub fn apply(&mut self, value: FieldValue) {
        match value {
            FieldValue::Genres(genres) => self.genres = genres,
            FieldValue::Status(status) => self.status = status,
            FieldValue::TotalViews(total) => self.total_views = total,
            FieldValue::TotalComments(total) => self.total_comments = total,
            FieldValue::Followers(total) => self.followers = total,
            FieldValue::OtherNames(names) => self.other_names = names,
            FieldValue::UpdatedAt(date) => self.updated_at = date,
            FieldValue::Authors(authors) => self.authors = authors,
        }
    }

    /// Template plus every overlay, in order.
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldValue>) -> Self {
        for field in fields {
            self.apply(field);
        }
        self
    }
}

/// Full record for a single comic page.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ComicDetail {
    pub id: String,
    pub title: String,
    pub thumbnail: Option<String>,
    pub description: String,
    pub authors: Authors,
    pub status: Status,
    pub genres: Vec<GenreRef>,
    pub other_names: Vec<String>,
    pub total_views: Total,
    pub followers: Total,
    pub rating_average: f64,
    pub rating_count: u64,
    pub is_adult: bool,
    pub chapters: Vec<ChapterRef>,
}

/// Front-page carousel entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendedComic {
    pub id: String,
    pub title: String,
    pub thumbnail: Option<String>,
    pub updated_at: String,
    pub latest_chapter: ChapterRef,
}

/// Search-box suggestion entry.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchSuggestion {
    pub id: String,
    pub title: String,
    pub thumbnail: Option<String>,
    pub latest_chapter: String,
    pub genres: Vec<String>,
    pub authors: Authors,
}
