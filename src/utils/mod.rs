//! Field extractors and other helpers.

pub mod html;
pub mod http;
pub mod text;
pub mod url;
