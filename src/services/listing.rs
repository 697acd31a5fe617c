// src/services/listing.rs

//! Listing page normalizer.
//!
//! Every browse-style operation (genre, new, top, completed, recent, search,
//! author, trending, boy, girl) lands on the same card grid, so they all share
//! this parser. The genre catalog is fetched alongside each listing page to
//! resolve genre labels to ids.

use scraper::{ElementRef, Html, Selector};

use crate::error::{AppError, Result};
use crate::models::{
    ChapterRef, ComicSummary, Config, FieldValue, GenreRef, LabelTable, Paged, StatusFilter,
    SummaryField, UPDATING, ValueKind,
};
use crate::services::taxonomy::{TaxonomyResolver, resolve_label};
use crate::source::Source;
use crate::utils::html::{exists, first_attr, first_text, parse_selector, raw_text_of, text_of};
use crate::utils::text::{clean_text, normalize_whitespace, parse_authors, parse_status, parse_total, split_list};
use crate::utils::url::{append_query, page_param, slug_from_link, trailing_number, with_scheme};

/// Compose the request path for a listing page.
///
/// # Examples
/// ```
/// use comics::models::StatusFilter;
/// use comics::services::listing::listing_path;
///
/// assert_eq!(
///     listing_path("tim-truyen?sort=15", 1, StatusFilter::All),
///     "tim-truyen?sort=15&status=-1&page=1"
/// );
/// ```
pub fn listing_path(path: &str, page: u32, status: StatusFilter) -> String {
    append_query(&append_query(path, "status", status.code()), "page", page)
}

/// Compiled listing selectors.
#[derive(Debug, Clone)]
struct ListingQuery {
    item: Selector,
    thumbnail: Selector,
    title: Selector,
    link: Selector,
    trending: Selector,
    short_description: Selector,
    info_row: Selector,
    chapter_item: Selector,
    chapter_link: Selector,
    chapter_time: Selector,
    last_page: Selector,
    active_page: Selector,
}

/// Turns listing pages into paginated comic summaries.
#[derive(Debug, Clone)]
pub struct ListingNormalizer {
    query: ListingQuery,
    thumbnail_attr: String,
    labels: LabelTable,
    taxonomy: TaxonomyResolver,
}

impl ListingNormalizer {
    /// Create a normalizer, compiling selectors and the label table.
    pub fn new(config: &Config) -> Result<Self> {
        let s = &config.selectors.listing;
        Ok(Self {
            query: ListingQuery {
                item: parse_selector(&s.item)?,
                thumbnail: parse_selector(&s.thumbnail)?,
                title: parse_selector(&s.title)?,
                link: parse_selector(&s.link)?,
                trending: parse_selector(&s.trending)?,
                short_description: parse_selector(&s.short_description)?,
                info_row: parse_selector(&s.info_row)?,
                chapter_item: parse_selector(&s.chapter_item)?,
                chapter_link: parse_selector("a")?,
                chapter_time: parse_selector(&s.chapter_time)?,
                last_page: parse_selector(&s.last_page)?,
                active_page: parse_selector(&s.active_page)?,
            },
            thumbnail_attr: s.thumbnail_attr.clone(),
            labels: config.label_table()?,
            taxonomy: TaxonomyResolver::new(config)?,
        })
    }

    /// Fetch a listing page together with the genre catalog and normalize it.
    ///
    /// A page past the last one yields `Paged::not_found()`.
    pub async fn normalize(
        &self,
        source: &dyn Source,
        path: &str,
        page: u32,
        status: StatusFilter,
    ) -> Result<Paged<ComicSummary>> {
        if page == 0 {
            return Err(AppError::invalid_filter("page", "0"));
        }

        let request = listing_path(path, page, status);
        log::info!("Fetching listing {}", request);

        let (html, genres) = tokio::try_join!(source.fetch(&request), self.taxonomy.resolve(source))?;
        Ok(self.parse(&html, page, &genres))
    }

    /// Normalize already-fetched listing markup.
    pub fn parse(&self, html: &str, page: u32, genres: &[GenreRef]) -> Paged<ComicSummary> {
        let document = Html::parse_document(html);
        let root = document.root_element();

        let total_pages = self.total_pages(root);
        if page > total_pages {
            log::debug!("Page {} is past the last page ({})", page, total_pages);
            return Paged::not_found();
        }

        let items: Vec<ComicSummary> = root
            .select(&self.query.item)
            .map(|item| self.parse_item(item, genres))
            .collect();

        log::debug!("Parsed {} comics on page {}/{}", items.len(), page, total_pages);
        Paged::page(items, total_pages, page)
    }

    /// Last page number: the last-page link, then the active page, then 1.
    fn total_pages(&self, root: ElementRef<'_>) -> u32 {
        first_attr(root, &self.query.last_page, "href")
            .and_then(|href| page_param(&href))
            .or_else(|| first_text(root, &self.query.active_page).and_then(|t| t.parse().ok()))
            .unwrap_or(1)
            .max(1)
    }

    fn parse_item(&self, item: ElementRef<'_>, genres: &[GenreRef]) -> ComicSummary {
        let q = &self.query;

        let id = first_attr(item, &q.link, "href")
            .and_then(|href| slug_from_link(&href))
            .unwrap_or_default();
        let title = first_text(item, &q.title).unwrap_or_default();

        let fields: Vec<FieldValue> = item
            .select(&q.info_row)
            .filter_map(|row| {
                let text = text_of(row);
                let (label, value) = text.split_once(':')?;
                match self.labels.field(label) {
                    Some(field) => Some(field_value(field, value.trim(), genres)),
                    None => {
                        log::debug!("Skipping unmapped listing label '{}'", label.trim());
                        None
                    }
                }
            })
            .collect();

        let mut summary = ComicSummary::template(id, title).with_fields(fields);
        summary.thumbnail_url = first_attr(item, &q.thumbnail, &self.thumbnail_attr)
            .filter(|src| !src.is_empty())
            .map(|src| with_scheme(&src));
        summary.is_trending = exists(item, &q.trending);
        summary.short_description = item
            .select(&q.short_description)
            .next()
            .map(|el| normalize_whitespace(&raw_text_of(el)))
            .unwrap_or_default();

        summary.latest_chapters = item
            .select(&q.chapter_item)
            .map(|li| self.parse_chapter(li))
            .collect();

        summary
    }

    fn parse_chapter(&self, li: ElementRef<'_>) -> ChapterRef {
        let link = li.select(&self.query.chapter_link).next();
        let id = link
            .and_then(|a| {
                a.value()
                    .attr("data-id")
                    .and_then(|id| id.trim().parse().ok())
                    .or_else(|| a.value().attr("href").and_then(trailing_number))
            })
            .unwrap_or(0);
        let name = link
            .map(|a| match a.value().attr("title") {
                Some(title) if !title.trim().is_empty() => clean_text(title),
                _ => text_of(a),
            })
            .unwrap_or_default();

        ChapterRef {
            id,
            name,
            updated_at: first_text(li, &self.query.chapter_time).filter(|t| !t.is_empty()),
        }
    }
}

/// Convert a raw row value into the field's typed value.
fn field_value(field: SummaryField, raw: &str, genres: &[GenreRef]) -> FieldValue {
    match field.kind() {
        ValueKind::GenreList => FieldValue::Genres(
            split_list(raw)
                .into_vec()
                .iter()
                .map(|label| resolve_label(genres, label))
                .collect(),
        ),
        ValueKind::Status => FieldValue::Status(parse_status(raw)),
        ValueKind::Total => {
            let total = parse_total(raw);
            match field {
                SummaryField::TotalComments => FieldValue::TotalComments(total),
                SummaryField::Followers => FieldValue::Followers(total),
                _ => FieldValue::TotalViews(total),
            }
        }
        ValueKind::List => FieldValue::OtherNames(split_list(raw).into_vec()),
        ValueKind::ListOrScalar => FieldValue::Authors(parse_authors(raw)),
        ValueKind::Text => {
            let text = clean_text(raw);
            FieldValue::UpdatedAt(if text.is_empty() { UPDATING.to_string() } else { text })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Authors, Status, Total};
    use crate::source::memory::MemorySource;

    const HOME: &str = r#"
        <ul id="mainNav"><li><ul class="clearfix">
          <li><a href="/tim-truyen">Tất cả</a></li>
          <li><a href="/tim-truyen/action-95">Action</a></li>
          <li><a href="/tim-truyen/hanh-dong">Hành Động</a></li>
        </ul></li></ul>
    "#;

    const LISTING: &str = r##"
        <html><body>
        <div id="ctl00_divCenter">
          <div class="items"><div class="row">
            <div class="item">
              <figure class="clearfix">
                <div class="image">
                  <a href="https://site.test/truyen-tranh/dao-hai-tac"><img data-original="//cdn.test/op.jpg"></a>
                  <span class="icon-hot"></span>
                </div>
                <figcaption>
                  <h3><a href="https://site.test/truyen-tranh/dao-hai-tac">Đảo Hải Tặc</a></h3>
                  <ul class="comic-item">
                    <li class="chapter clearfix">
                      <a data-id="1001" href="https://site.test/truyen-tranh/dao-hai-tac/chuong-1100/1001" title="Chapter 1100">Chapter 1100</a>
                      <i class="time">1 giờ trước</i>
                    </li>
                    <li class="chapter clearfix">
                      <a href="https://site.test/truyen-tranh/dao-hai-tac/chuong-1099/1000">Chapter 1099</a>
                    </li>
                  </ul>
                </figcaption>
              </figure>
              <div class="box_tootip">
                <div class="message_main">
                  <p><label>Tên khác:</label></p>
                  <p><label>Thể loại:</label>action, Hành Động, Xuyên Không</p>
                  <p><label>Tác giả:</label>Oda Eiichiro</p>
                  <p><label>Tình trạng:</label> Đang tiến hành</p>
                  <p><label>Lượt xem:</label>1.234.567</p>
                  <p><label>Bình luận:</label>N/A</p>
                  <p><label>Theo dõi:</label>45,000</p>
                  <p><label>Năm phát hành:</label>1997</p>
                  <p><label>Ngày cập nhật:</label>12:30 05/06</p>
                </div>
                <div class="box_text">- Hành trình của
                  Luffy -</div>
              </div>
            </div>
            <div class="item">
              <figure class="clearfix">
                <div class="image"><a href="/truyen-tranh/solo-leveling"><img data-original="https://cdn.test/sl.jpg"></a></div>
                <figcaption><h3><a href="/truyen-tranh/solo-leveling">Solo Leveling</a></h3></figcaption>
              </figure>
              <div class="box_tootip"><div class="message_main">
                <p><label>Tình trạng:</label>Hoàn thành</p>
                <p><label>Tác giả:</label>Chugong - Dubu</p>
              </div></div>
            </div>
          </div></div>
        </div>
        <div class="pagination-outter"><ul class="pagination">
          <li class="active"><a href="#">1</a></li>
          <li><a title="Trang cuối" href="https://site.test/tim-truyen?sort=15&amp;status=-1&amp;page=3">Cuối</a></li>
        </ul></div>
        </body></html>
    "##;

    fn normalizer() -> ListingNormalizer {
        ListingNormalizer::new(&Config::default()).unwrap()
    }

    #[test]
    fn test_listing_path() {
        assert_eq!(
            listing_path("tim-truyen?sort=15", 2, StatusFilter::Completed),
            "tim-truyen?sort=15&status=2&page=2"
        );
        assert_eq!(
            listing_path("truyen-con-gai?", 1, StatusFilter::All),
            "truyen-con-gai?status=-1&page=1"
        );
    }

    #[tokio::test]
    async fn test_new_comics_first_page() {
        let source = MemorySource::new()
            .with_page("tim-truyen?sort=15&status=-1&page=1", LISTING)
            .with_page("", HOME);

        let result = normalizer()
            .normalize(&source, "tim-truyen?sort=15", 1, StatusFilter::All)
            .await
            .unwrap();

        let page = result.as_page().unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.items.len(), 2);

        let requests = source.requests();
        assert!(requests.contains(&"tim-truyen?sort=15&status=-1&page=1".to_string()));
        assert!(requests.contains(&String::new()));
    }

    #[test]
    fn test_item_fields() {
        let genres = TaxonomyResolver::new(&Config::default()).unwrap().parse(HOME);
        let result = normalizer().parse(LISTING, 1, &genres);
        let first = &result.as_page().unwrap().items[0];

        assert_eq!(first.id, "dao-hai-tac");
        assert_eq!(first.title, "Đảo Hải Tặc");
        assert_eq!(first.thumbnail_url.as_deref(), Some("https://cdn.test/op.jpg"));
        assert!(first.is_trending);
        assert_eq!(first.short_description, "- Hành trình của Luffy -");
        assert_eq!(first.status, Status::Ongoing);
        assert_eq!(first.total_views, Total::Count(1_234_567));
        assert_eq!(first.total_comments, Total::Updating);
        assert_eq!(first.followers, Total::Count(45_000));
        assert_eq!(first.authors, Authors::Name("Oda Eiichiro".into()));
        assert_eq!(first.updated_at, "12:30 05/06");
        assert!(first.other_names.is_empty());

        assert_eq!(first.latest_chapters.len(), 2);
        assert_eq!(first.latest_chapters[0].id, 1001);
        assert_eq!(first.latest_chapters[0].name, "Chapter 1100");
        assert_eq!(first.latest_chapters[0].updated_at.as_deref(), Some("1 giờ trước"));
        assert_eq!(first.latest_chapters[1].id, 1000);
        assert_eq!(first.latest_chapters[1].updated_at, None);
    }

    #[test]
    fn test_genres_resolved_and_unresolved_kept() {
        let genres = TaxonomyResolver::new(&Config::default()).unwrap().parse(HOME);
        let result = normalizer().parse(LISTING, 1, &genres);
        let first = &result.as_page().unwrap().items[0];

        assert_eq!(first.genres.len(), 3);
        assert_eq!(first.genres[0], GenreRef::new("action-95", "Action"));
        assert_eq!(first.genres[1], GenreRef::new("hanh-dong", "Hành Động"));
        assert_eq!(first.genres[2], GenreRef::unresolved("Xuyên Không"));
    }

    #[test]
    fn test_missing_rows_keep_template_defaults() {
        let result = normalizer().parse(LISTING, 1, &[]);
        let second = &result.as_page().unwrap().items[1];

        assert_eq!(second.id, "solo-leveling");
        assert!(!second.is_trending);
        assert_eq!(second.status, Status::Completed);
        assert_eq!(
            second.authors,
            Authors::List(vec!["Chugong".into(), "Dubu".into()])
        );
        assert_eq!(second.total_views, Total::Updating);
        assert_eq!(second.updated_at, UPDATING);
        assert!(second.genres.is_empty());
        assert!(second.latest_chapters.is_empty());
    }

    #[test]
    fn test_page_past_end_is_not_found() {
        let result = normalizer().parse(LISTING, 4, &[]);
        let err = result.as_error().unwrap();
        assert_eq!(err.status, 404);
        assert_eq!(err.message, "Page not found");
    }

    #[test]
    fn test_total_pages_fallbacks() {
        let active_only = r#"<div class="pagination-outter"><ul><li class="active"><a>5</a></li></ul></div>"#;
        let result = normalizer().parse(active_only, 5, &[]);
        assert_eq!(result.as_page().unwrap().total_pages, 5);

        let bare = "<html><body></body></html>";
        let result = normalizer().parse(bare, 1, &[]);
        let page = result.as_page().unwrap();
        assert_eq!(page.total_pages, 1);
        assert!(page.items.is_empty());

        assert!(normalizer().parse(bare, 2, &[]).as_error().is_some());
    }

    #[tokio::test]
    async fn test_page_zero_rejected_before_fetch() {
        let source = MemorySource::new();
        let err = normalizer()
            .normalize(&source, "tim-truyen?", 0, StatusFilter::All)
            .await
            .unwrap_err();
        assert!(err.is_precondition());
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_upstream_failure_is_fatal() {
        let source = MemorySource::new().with_page("", HOME);
        let result = normalizer()
            .normalize(&source, "truyen-tranh-hot?", 1, StatusFilter::All)
            .await;
        assert!(matches!(result, Err(AppError::Upstream { .. })));
    }
}
