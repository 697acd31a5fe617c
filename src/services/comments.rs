// src/services/comments.rs

//! Comment thread reconstruction.
//!
//! Comments come from a JSON service that returns a comment count plus an
//! HTML fragment with the threads. A chapter-scoped query is paired with an
//! unscoped one so a chapter with a broken comment feed still shows the
//! comic's comments.

use futures::future;
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{CommentNode, CommentReply, CommentSelectors, DEFAULT_AVATAR, DetailSelectors, Paged};
use crate::services::anchor::{AnchorExtractor, ComicAnchor};
use crate::source::Source;
use crate::utils::html::{
    child_image_attrs, first_outside, own_text, parse_selector, text_of, text_or_empty,
};
use crate::utils::url::{encode_query_value, query_param, with_scheme};

/// Comments per page on the comment service.
pub const COMMENTS_PER_PAGE: u64 = 15;

/// Chapter id meaning "all chapters of the comic".
pub const UNSCOPED_CHAPTER: i64 = -1;

/// Comment service request path.
pub fn comment_path(anchor: &ComicAnchor, chapter_id: i64, page: u32) -> String {
    format!(
        "Comic/Services/CommentService.asmx/List?comicId={}&orderBy=0&chapterId={}&parentId=0&pageNumber={}&token={}",
        anchor.comic_id,
        chapter_id,
        page,
        encode_query_value(&anchor.token)
    )
}

/// Number of comment pages for a comment count.
pub fn total_pages(comment_count: u64) -> u32 {
    u32::try_from(comment_count.div_ceil(COMMENTS_PER_PAGE)).unwrap_or(u32::MAX)
}

#[derive(Debug, Deserialize)]
struct CommentPayload {
    #[serde(default = "succeeded")]
    success: bool,
    #[serde(default, alias = "commentCount")]
    comment_count: u64,
    #[serde(default)]
    response: String,
}

fn succeeded() -> bool {
    true
}

#[derive(Debug, Clone)]
struct CommentQuery {
    item: Selector,
    reply: Selector,
    avatar: Selector,
    username: Selector,
    content: Selector,
    created_at: Selector,
    vote_count: Selector,
    mention: Selector,
}

/// Rebuilds nested comment threads for a comic or one of its chapters.
#[derive(Debug, Clone)]
pub struct CommentReconstructor {
    anchor: AnchorExtractor,
    query: CommentQuery,
}

impl CommentReconstructor {
    pub fn new(detail: &DetailSelectors, comments: &CommentSelectors) -> Result<Self> {
        Ok(Self {
            anchor: AnchorExtractor::new(detail)?,
            query: CommentQuery {
                item: parse_selector(&comments.item)?,
                reply: parse_selector(&comments.reply)?,
                avatar: parse_selector(&comments.avatar)?,
                username: parse_selector(&comments.username)?,
                content: parse_selector(&comments.content)?,
                created_at: parse_selector(&comments.created_at)?,
                vote_count: parse_selector(&comments.vote_count)?,
                mention: parse_selector(&comments.mention)?,
            },
        })
    }

    /// Fetch one page of comments.
    ///
    /// Soft failures come back as error envelopes: `400 "Invalid page"` past
    /// the last page, `400 "Something went wrong!"` when no query succeeded.
    pub async fn reconstruct(
        &self,
        source: &dyn Source,
        comic_id: &str,
        page: u32,
        chapter_id: i64,
    ) -> Result<Paged<CommentNode>> {
        if page == 0 {
            return Err(AppError::invalid_filter("page", "0"));
        }

        let anchor = self.anchor.fetch(source, comic_id).await?;
        let primary = comment_path(&anchor, chapter_id, page);

        let payload = if chapter_id == UNSCOPED_CHAPTER {
            query_comments(source, &primary).await
        } else {
            let fallback = comment_path(&anchor, UNSCOPED_CHAPTER, page);
            let (scoped, unscoped) = future::join(
                query_comments(source, &primary),
                query_comments(source, &fallback),
            )
            .await;
            scoped.or_else(|e| {
                log::warn!("Chapter {} comments unavailable, using comic comments: {}", chapter_id, e);
                unscoped
            })
        };

        let payload = match payload {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("Comment service failed for {}: {}", comic_id, e);
                return Ok(Paged::bad_request("Something went wrong!"));
            }
        };

        let total_pages = total_pages(payload.comment_count);
        if page > total_pages {
            return Ok(Paged::bad_request("Invalid page"));
        }

        let comments = self.parse_thread(&payload.response);
        log::debug!("Parsed {} comments for {} page {}", comments.len(), comic_id, page);
        Ok(Paged::page(comments, total_pages, page))
    }

    /// Parse the comment fragment into top-level comments with their replies.
    pub fn parse_thread(&self, html: &str) -> Vec<CommentNode> {
        let fragment = Html::parse_fragment(html);
        fragment
            .root_element()
            .select(&self.query.item)
            .map(|item| self.parse_comment(item))
            .collect()
    }

    fn parse_comment(&self, item: ElementRef<'_>) -> CommentNode {
        let leaf = self.parse_leaf(item);
        CommentNode {
            avatar: leaf.avatar,
            username: leaf.username,
            content: leaf.content,
            stickers: leaf.stickers,
            created_at: leaf.created_at,
            vote_count: leaf.vote_count,
            replies: item
                .select(&self.query.reply)
                .map(|reply| self.parse_reply(reply))
                .collect(),
        }
    }

    fn parse_reply(&self, reply: ElementRef<'_>) -> CommentReply {
        let leaf = self.parse_leaf(reply);
        CommentReply {
            avatar: leaf.avatar,
            username: leaf.username,
            content: leaf.content,
            stickers: leaf.stickers,
            created_at: leaf.created_at,
            vote_count: leaf.vote_count,
            mention_user: text_or_empty(reply, &self.query.mention),
        }
    }

    /// Fields shared by comments and replies. Lookups skip anything inside a
    /// nested reply, so a comment missing a field never borrows its reply's.
    fn parse_leaf(&self, scope: ElementRef<'_>) -> Leaf {
        let q = &self.query;
        let own = |selector: &Selector| first_outside(scope, selector, &q.reply);
        let content = own(&q.content);

        Leaf {
            avatar: own(&q.avatar)
                .and_then(|img| img.value().attr("src"))
                .map(str::trim)
                .filter(|src| !src.is_empty())
                .map(with_scheme)
                .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
            username: own(&q.username).map(text_of).unwrap_or_default(),
            content: content.map(own_text).unwrap_or_default(),
            stickers: content
                .map(|el| {
                    child_image_attrs(el, "src")
                        .iter()
                        .map(|src| unwrap_sticker(src))
                        .collect()
                })
                .unwrap_or_default(),
            created_at: own(&q.created_at)
                .and_then(|abbr| abbr.value().attr("title"))
                .map(str::trim)
                .filter(|title| !title.is_empty())
                .map(str::to_string),
            vote_count: own(&q.vote_count)
                .and_then(|el| text_of(el).parse().ok())
                .unwrap_or(0),
        }
    }
}

struct Leaf {
    avatar: String,
    username: String,
    content: String,
    stickers: Vec<String>,
    created_at: Option<String>,
    vote_count: i64,
}

/// Sticker images are often served through a proxy as `...?url=<original>`.
fn unwrap_sticker(src: &str) -> String {
    query_param(src, "url").unwrap_or_else(|| with_scheme(src))
}

/// Query the comment service once.
///
/// Transport errors, non-2xx answers, `success: false` and undecodable
/// payloads all count as failure.
async fn query_comments(source: &dyn Source, path: &str) -> Result<CommentPayload> {
    let json = source.fetch_json(path).await?;
    let body = match json.get("data") {
        Some(data) if data.is_object() => data.clone(),
        _ => json,
    };
    let payload: CommentPayload =
        serde_json::from_value(body).map_err(|e| AppError::upstream(path, e))?;
    if !payload.success {
        return Err(AppError::upstream(path, "comment service reported failure"));
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::source::memory::MemorySource;

    const DETAIL: &str =
        r#"<div class="star" data-id="4242"></div><input id="commentToken" value="tok en">"#;

    const THREAD: &str = r#"
        <ul class="list-comment">
          <li class="clearfix">
            <figure class="avatar"><img src="//cdn.test/alice.jpg"></figure>
            <div class="summary">
              <div class="info">
                <div class="comment-header"><span class="authorname name-1">Alice</span></div>
                <div class="comment-content">Great chapter!
                  <img src="https://st.test/proxy?url=https%3A%2F%2Fcdn.test%2Fs1.gif">
                </div>
              </div>
              <ul class="comment-footer">
                <li><span class="vote-up"><i class="fa fa-thumbs-up"></i> <span class="vote-up-count">12</span></span></li>
                <li><abbr title="06/05/2024 10:00">1 giờ trước</abbr></li>
              </ul>
              <ul class="nested">
                <li class="item">
                  <div class="summary">
                    <div class="info">
                      <div class="comment-header"><span class="authorname">Bob</span></div>
                      <div class="comment-content"><span class="mention-user">Alice</span> agreed
                        <img src="https://cdn.test/s2.gif"></div>
                    </div>
                    <ul class="comment-footer">
                      <li><span class="vote-up-count">3</span></li>
                      <li><abbr title="06/05/2024 11:00">vừa xong</abbr></li>
                    </ul>
                  </div>
                </li>
              </ul>
            </div>
          </li>
          <li class="clearfix">
            <div class="info"><span class="authorname">Carol</span>
            <div class="comment-content">First</div></div>
          </li>
        </ul>
    "#;

    fn reconstructor() -> CommentReconstructor {
        CommentReconstructor::new(&DetailSelectors::default(), &CommentSelectors::default()).unwrap()
    }

    fn anchor() -> ComicAnchor {
        ComicAnchor {
            comic_id: 4242,
            token: "tok en".into(),
        }
    }

    #[test]
    fn test_comment_path_encodes_token() {
        assert_eq!(
            comment_path(&anchor(), -1, 2),
            "Comic/Services/CommentService.asmx/List?comicId=4242&orderBy=0&chapterId=-1&parentId=0&pageNumber=2&token=tok+en"
        );
    }

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(15), 1);
        assert_eq!(total_pages(16), 2);
        assert_eq!(total_pages(47), 4);
    }

    #[test]
    fn test_parse_thread() {
        let comments = reconstructor().parse_thread(THREAD);
        assert_eq!(comments.len(), 2);

        let alice = &comments[0];
        assert_eq!(alice.username, "Alice");
        assert_eq!(alice.avatar, "https://cdn.test/alice.jpg");
        assert_eq!(alice.content, "Great chapter!");
        assert_eq!(alice.stickers, vec!["https://cdn.test/s1.gif"]);
        assert_eq!(alice.created_at.as_deref(), Some("06/05/2024 10:00"));
        assert_eq!(alice.vote_count, 12);
        assert_eq!(alice.replies.len(), 1);

        let bob = &alice.replies[0];
        assert_eq!(bob.username, "Bob");
        assert_eq!(bob.mention_user, "Alice");
        assert_eq!(bob.content, "agreed");
        assert_eq!(bob.stickers, vec!["https://cdn.test/s2.gif"]);
        assert_eq!(bob.vote_count, 3);
        assert_eq!(bob.avatar, DEFAULT_AVATAR);

        let carol = &comments[1];
        assert_eq!(carol.content, "First");
        assert_eq!(carol.vote_count, 0);
        assert_eq!(carol.created_at, None);
        assert!(carol.replies.is_empty());
    }

    #[test]
    fn test_comment_does_not_borrow_reply_fields() {
        let thread = r#"
            <ul class="list-comment">
              <li class="clearfix">
                <div class="comment-header"><span class="authorname">Alice</span></div>
                <ul class="nested">
                  <li class="item">
                    <figure class="avatar"><img src="https://cdn.test/bob.jpg"></figure>
                    <span class="authorname">Bob</span>
                    <div class="comment-content">reply text</div>
                    <ul class="comment-footer">
                      <li><span class="vote-up-count">9</span></li>
                      <li><abbr title="06/05/2024 11:00">vừa xong</abbr></li>
                    </ul>
                  </li>
                </ul>
              </li>
            </ul>
        "#;

        let comments = reconstructor().parse_thread(thread);
        assert_eq!(comments.len(), 1);

        let alice = &comments[0];
        assert_eq!(alice.username, "Alice");
        assert_eq!(alice.avatar, DEFAULT_AVATAR);
        assert_eq!(alice.content, "");
        assert!(alice.stickers.is_empty());
        assert_eq!(alice.vote_count, 0);
        assert_eq!(alice.created_at, None);

        let bob = &alice.replies[0];
        assert_eq!(bob.username, "Bob");
        assert_eq!(bob.avatar, "https://cdn.test/bob.jpg");
        assert_eq!(bob.content, "reply text");
        assert_eq!(bob.vote_count, 9);
        assert_eq!(bob.created_at.as_deref(), Some("06/05/2024 11:00"));
    }

    #[tokio::test]
    async fn test_primary_query_used() {
        let source = MemorySource::new()
            .with_page("truyen-tranh/abc", DETAIL)
            .with_json(
                comment_path(&anchor(), 55, 1),
                json!({"success": true, "commentCount": 47, "response": THREAD}),
            )
            .with_json(
                comment_path(&anchor(), -1, 1),
                json!({"success": true, "commentCount": 1, "response": ""}),
            );

        let result = reconstructor().reconstruct(&source, "abc", 1, 55).await.unwrap();
        let page = result.as_page().unwrap();
        assert_eq!(page.total_pages, 4);
        assert_eq!(page.items.len(), 2);
    }

    #[tokio::test]
    async fn test_fallback_when_primary_fails() {
        let source = MemorySource::new()
            .with_page("truyen-tranh/abc", DETAIL)
            .with_json(comment_path(&anchor(), 55, 1), json!({"success": false}))
            .with_json(
                comment_path(&anchor(), -1, 1),
                json!({"data": {"commentCount": 16, "response": THREAD}}),
            );

        let result = reconstructor().reconstruct(&source, "abc", 1, 55).await.unwrap();
        let page = result.as_page().unwrap();
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items[0].username, "Alice");
    }

    #[tokio::test]
    async fn test_both_queries_failing() {
        let source = MemorySource::new().with_page("truyen-tranh/abc", DETAIL);

        let result = reconstructor().reconstruct(&source, "abc", 1, 55).await.unwrap();
        let err = result.as_error().unwrap();
        assert_eq!(err.status, 400);
        assert_eq!(err.message, "Something went wrong!");
        assert_eq!(source.requests().len(), 3);
    }

    #[tokio::test]
    async fn test_unscoped_issues_single_query() {
        let source = MemorySource::new()
            .with_page("truyen-tranh/abc", DETAIL)
            .with_json(
                comment_path(&anchor(), -1, 1),
                json!({"commentCount": 3, "response": THREAD}),
            );

        let result = reconstructor().reconstruct(&source, "abc", 1, -1).await.unwrap();
        assert_eq!(result.as_page().unwrap().total_pages, 1);
        assert_eq!(source.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_page_past_end_is_invalid() {
        let source = MemorySource::new()
            .with_page("truyen-tranh/abc", DETAIL)
            .with_json(
                comment_path(&anchor(), -1, 5),
                json!({"commentCount": 47, "response": ""}),
            );

        let result = reconstructor().reconstruct(&source, "abc", 5, -1).await.unwrap();
        let err = result.as_error().unwrap();
        assert_eq!(err.status, 400);
        assert_eq!(err.message, "Invalid page");
    }

    #[tokio::test]
    async fn test_missing_comic_id_is_fatal() {
        let source = MemorySource::new().with_page("truyen-tranh/abc", "<p></p>");
        let err = reconstructor().reconstruct(&source, "abc", 1, -1).await.unwrap_err();
        assert!(matches!(err, AppError::Extraction { .. }));
    }
}
