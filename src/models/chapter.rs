//! Chapter reader records.

use serde::Serialize;

use crate::models::ChapterRef;

/// One image of a chapter.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageImage {
    pub page: u32,
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_url: Option<String>,
}

/// Reader view of a chapter, with the comic's chapter list for navigation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ChapterPage {
    pub images: Vec<PageImage>,
    pub chapters: Vec<ChapterRef>,
    pub chapter_name: String,
    pub comic_name: String,
}
