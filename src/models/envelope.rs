// src/models/envelope.rs

//! Paginated result envelopes.
//!
//! An out-of-range page is an ordinary outcome, so it is modelled as a
//! variant of the result rather than as an [`crate::error::AppError`].

use serde::Serialize;

/// A page of items.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PageEnvelope<T> {
    pub items: Vec<T>,
    pub total_pages: u32,
    pub current_page: u32,
}

/// A recoverable, caller-visible failure.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub status: u16,
    pub message: String,
}

/// Either a page of items or a soft error. Serializes as whichever shape it
/// holds, with no tag.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Paged<T> {
    Page(PageEnvelope<T>),
    Error(ErrorEnvelope),
}

impl<T> Paged<T> {
    pub fn page(items: Vec<T>, total_pages: u32, current_page: u32) -> Self {
        Paged::Page(PageEnvelope {
            items,
            total_pages,
            current_page,
        })
    }

    /// Listing page past the last one.
    pub fn not_found() -> Self {
        Self::error(404, "Page not found")
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::error(400, message)
    }

    fn error(status: u16, message: impl Into<String>) -> Self {
        Paged::Error(ErrorEnvelope {
            status,
            message: message.into(),
        })
    }

    pub fn as_page(&self) -> Option<&PageEnvelope<T>> {
        match self {
            Paged::Page(page) => Some(page),
            Paged::Error(_) => None,
        }
    }

    pub fn as_error(&self) -> Option<&ErrorEnvelope> {
        match self {
            Paged::Page(_) => None,
            Paged::Error(err) => Some(err),
        }
    }
}
