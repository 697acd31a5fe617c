//! Comment thread records.

use serde::Serialize;

/// Avatar used for every comment; the service does not expose user images.
pub const DEFAULT_AVATAR: &str = "https://api.iconify.design/ei/user.svg?height=48";

/// A top-level comment with its replies.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommentNode {
    pub avatar: String,
    pub username: String,
    pub content: String,
    pub stickers: Vec<String>,
    pub created_at: Option<String>,
    pub vote_count: i64,
    pub replies: Vec<CommentReply>,
}

/// A reply. The service never nests deeper than parent and reply, so a
/// reply has no `replies` of its own.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommentReply {
    pub avatar: String,
    pub username: String,
    pub content: String,
    pub stickers: Vec<String>,
    pub created_at: Option<String>,
    pub vote_count: i64,
    pub mention_user: String,
}
