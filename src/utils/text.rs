// src/utils/text.rs

//! Text field extractors.
//!
//! These never fail: unusable input maps to a sentinel (`Total::Updating`,
//! `Status::Ongoing`, an empty list), so a malformed field cannot abort a
//! whole page.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Authors, Status, Total, UPDATING};

/// Label the site shows for finished comics.
pub const COMPLETED_LABEL: &str = "Hoàn thành";

/// Site placeholder for "currently updating".
pub const UPDATING_PLACEHOLDER: &str = "Đang cập nhật";

static LIST_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r", |; | - ").expect("valid separator regex"));

/// Remove embedded line breaks and tabs, then trim.
pub fn clean_text(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\n' | '\r' | '\t'))
        .collect::<String>()
        .trim()
        .to_string()
}

/// Collapse all whitespace runs to a single space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Result of the list-vs-scalar rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Split {
    Scalar(String),
    List(Vec<String>),
}

impl Split {
    /// Flatten into a list; an empty scalar becomes an empty list.
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Split::Scalar(s) if s.is_empty() => Vec::new(),
            Split::Scalar(s) => vec![s],
            Split::List(items) => items,
        }
    }
}

/// Split on `", "`, `"; "` or `" - "` when any is present; otherwise keep the
/// text as a single value. Parts are trimmed and empty parts dropped.
pub fn split_list(text: &str) -> Split {
    let text = clean_text(text);
    if !LIST_SEPARATOR.is_match(&text) {
        return Split::Scalar(text);
    }
    Split::List(
        LIST_SEPARATOR
            .split(&text)
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Parse a displayed counter such as `12.345` or `1,024`.
///
/// `N/A`, empty and any other non-numeric text stay unknown rather than
/// becoming zero.
pub fn parse_total(text: &str) -> Total {
    let text = clean_text(text);
    if text.is_empty() || text.eq_ignore_ascii_case("N/A") {
        return Total::Updating;
    }
    let digits: String = text.chars().filter(|c| !matches!(c, '.' | ',')).collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Total::Updating;
    }
    digits.parse().map(Total::Count).unwrap_or(Total::Updating)
}

/// Map the site's status label to the two-state status.
pub fn parse_status(text: &str) -> Status {
    if clean_text(text) == COMPLETED_LABEL {
        Status::Completed
    } else {
        Status::Ongoing
    }
}

/// Parse an author field, mapping the site placeholder to `"Updating"`.
pub fn parse_authors(text: &str) -> Authors {
    match split_list(text) {
        Split::List(names) if !names.is_empty() => Authors::List(names),
        Split::List(_) => Authors::default(),
        Split::Scalar(name) if name.is_empty() || is_placeholder(&name) => Authors::default(),
        Split::Scalar(name) => Authors::Name(name),
    }
}

/// Whether the text is an "unknown" placeholder.
pub fn is_placeholder(text: &str) -> bool {
    let text = clean_text(text);
    text.to_lowercase() == UPDATING_PLACEHOLDER.to_lowercase() || text == UPDATING
}

/// Leading integer of a text, ignoring thousands separators; `0` when absent.
pub fn parse_count(text: &str) -> u64 {
    match parse_total(text) {
        Total::Count(n) => n,
        Total::Updating => 0,
    }
}

/// Decimal number such as a rating; `0.0` when absent.
pub fn parse_decimal(text: &str) -> f64 {
    clean_text(text).replace(',', ".").parse().unwrap_or(0.0)
}
