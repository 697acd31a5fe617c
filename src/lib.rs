// src/lib.rs

//! Comic catalog extraction engine.
//!
//! Turns a comic site's listing pages, detail pages and comment threads into
//! stable JSON records. See [`api::ComicsApi`] for the entry point.

pub mod api;
pub mod error;
pub mod models;
pub mod services;
pub mod source;
pub mod utils;
