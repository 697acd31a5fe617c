// src/models/selectors.rs

//! CSS selectors for each page type of the source site.
//!
//! Every field has a default matching the current site layout, so a config
//! file only needs to name the selectors that changed.

use serde::{Deserialize, Serialize};

/// All selector groups.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Selectors {
    #[serde(default)]
    pub listing: ListingSelectors,

    #[serde(default)]
    pub detail: DetailSelectors,

    #[serde(default)]
    pub comments: CommentSelectors,

    #[serde(default)]
    pub reader: ReaderSelectors,

    #[serde(default)]
    pub taxonomy: TaxonomySelectors,

    #[serde(default)]
    pub discovery: DiscoverySelectors,
}

/// Selectors for a paginated listing page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingSelectors {
    /// Selector for each comic in the listing
    pub item: String,

    /// Thumbnail image within an item
    pub thumbnail: String,

    /// Attribute holding the lazy-loaded thumbnail URL
    pub thumbnail_attr: String,

    /// Title element within an item
    pub title: String,

    /// Link whose href carries the comic slug
    pub link: String,

    /// Marker element present on trending comics
    pub trending: String,

    /// Hover-box description
    pub short_description: String,

    /// `Label: value` rows in the hover box
    pub info_row: String,

    /// Latest chapter entries within an item
    pub chapter_item: String,

    /// Time element within a latest-chapter entry
    pub chapter_time: String,

    /// Pagination link to the last page
    pub last_page: String,

    /// Active pagination element, used when there is no last-page link
    pub active_page: String,
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self {
            item: "#ctl00_divCenter .item".to_string(),
            thumbnail: ".image img".to_string(),
            thumbnail_attr: "data-original".to_string(),
            title: "figcaption h3".to_string(),
            link: "a".to_string(),
            trending: ".icon-hot".to_string(),
            short_description: ".box_text".to_string(),
            info_row: ".message_main p".to_string(),
            chapter_item: ".comic-item li".to_string(),
            chapter_time: ".time".to_string(),
            last_page: "a[title=\"Trang cuối\"]".to_string(),
            active_page: ".pagination-outter li.active a".to_string(),
        }
    }
}

/// Selectors for a comic detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetailSelectors {
    pub title: String,
    pub thumbnail: String,
    pub description: String,
    pub authors: String,
    pub status: String,
    pub genres: String,
    pub other_names: String,
    pub total_views: String,
    pub followers: String,
    pub rating_value: String,
    pub rating_count: String,

    /// Warning banner shown on adult comics
    pub adult_warning: String,

    /// Element carrying the internal numeric comic id
    pub comic_id: String,
    pub comic_id_attr: String,

    /// Element carrying the comment-service request token
    pub comment_token: String,
    pub comment_token_attr: String,
}

impl Default for DetailSelectors {
    fn default() -> Self {
        Self {
            title: ".title-detail".to_string(),
            thumbnail: "#item-detail .col-image img".to_string(),
            description: ".detail-content p".to_string(),
            authors: ".author p:nth-child(2)".to_string(),
            status: ".status p:nth-child(2)".to_string(),
            genres: ".kind p:nth-child(2) a".to_string(),
            other_names: ".other-name".to_string(),
            total_views: ".list-info .row:last-child p:nth-child(2)".to_string(),
            followers: ".follow b".to_string(),
            rating_value: "span[itemprop=\"ratingValue\"]".to_string(),
            rating_count: "span[itemprop=\"ratingCount\"]".to_string(),
            adult_warning: ".alert-danger".to_string(),
            comic_id: ".star".to_string(),
            comic_id_attr: "data-id".to_string(),
            comment_token: "input#commentToken".to_string(),
            comment_token_attr: "value".to_string(),
        }
    }
}

/// Selectors for the HTML fragment returned by the comment service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentSelectors {
    /// Top-level comment
    pub item: String,

    /// Reply within a top-level comment
    pub reply: String,

    /// Avatar image, falls back to a default icon when absent
    pub avatar: String,

    pub username: String,
    pub content: String,
    pub created_at: String,
    pub vote_count: String,

    /// Mentioned user, only present on replies
    pub mention: String,
}

impl Default for CommentSelectors {
    fn default() -> Self {
        Self {
            item: "li.clearfix".to_string(),
            reply: ".item".to_string(),
            avatar: ".avatar img".to_string(),
            username: ".authorname".to_string(),
            content: ".comment-content".to_string(),
            created_at: ".comment-footer abbr".to_string(),
            vote_count: ".vote-up-count".to_string(),
            mention: ".mention-user".to_string(),
        }
    }
}

/// Selectors for the chapter reader page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderSelectors {
    pub image: String,
    pub primary_src_attr: String,
    pub backup_src_attr: String,
    pub chapter_name: String,
    pub comic_name: String,
}

impl Default for ReaderSelectors {
    fn default() -> Self {
        Self {
            image: ".page-chapter img".to_string(),
            primary_src_attr: "data-sv1".to_string(),
            backup_src_attr: "data-sv2".to_string(),
            chapter_name: ".breadcrumb li:last-child".to_string(),
            comic_name: ".breadcrumb li:nth-last-child(2)".to_string(),
        }
    }
}

/// Selectors for the genre navigation menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxonomySelectors {
    pub genre_link: String,

    /// Attribute holding the genre description tooltip
    pub description_attr: String,
}

impl Default for TaxonomySelectors {
    fn default() -> Self {
        Self {
            genre_link: "#mainNav .clearfix li a".to_string(),
            description_attr: "data-title".to_string(),
        }
    }
}

/// Selectors for the search-suggestion fragment and the landing-page carousel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverySelectors {
    /// Each suggestion entry
    pub suggest_item: String,

    /// Tag lines of a suggestion: latest chapter first, genres last
    pub suggest_tag: String,

    pub suggest_authors: String,
    pub suggest_title: String,
    pub suggest_image: String,

    /// Each carousel slide
    pub carousel_item: String,

    /// Latest-chapter link in a slide caption
    pub carousel_chapter: String,

    /// Link carrying the comic title
    pub carousel_title: String,

    pub carousel_time: String,
    pub carousel_image: String,

    /// Attribute holding the lazy-loaded slide image, `src` is the fallback
    pub carousel_image_attr: String,

    /// Link whose href carries the comic slug, in both suggestions and slides
    pub link: String,
}

impl Default for DiscoverySelectors {
    fn default() -> Self {
        Self {
            suggest_item: "li".to_string(),
            suggest_tag: "i".to_string(),
            suggest_authors: "b".to_string(),
            suggest_title: "h3".to_string(),
            suggest_image: "img".to_string(),
            carousel_item: "#ctl00_divAlt1 div.item".to_string(),
            carousel_chapter: ".slide-caption > a".to_string(),
            carousel_title: "a[title]".to_string(),
            carousel_time: ".time".to_string(),
            carousel_image: "img".to_string(),
            carousel_image_attr: "data-original".to_string(),
            link: "a".to_string(),
        }
    }
}
