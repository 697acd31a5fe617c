// src/utils/html.rs

//! DOM query helpers over `scraper`.
//!
//! All lookups take an element scope (use `Html::root_element` for a whole
//! document) and return `Option` or an empty value when nothing matches.

use scraper::{ElementRef, Selector};

use crate::error::{AppError, Result};
use crate::utils::text::clean_text;

/// Parse a CSS selector, mapping failures to [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// All text beneath an element, cleaned.
pub fn text_of(element: ElementRef<'_>) -> String {
    clean_text(&element.text().collect::<String>())
}

/// All text beneath an element, without cleaning.
pub fn raw_text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Text of the element's own text nodes, skipping text that belongs to child
/// elements.
pub fn own_text(element: ElementRef<'_>) -> String {
    let text: String = element
        .children()
        .filter_map(|node| node.value().as_text().map(|t| t.to_string()))
        .collect();
    clean_text(&text)
}

/// Cleaned text of the first match, if any.
pub fn first_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope.select(selector).next().map(text_of)
}

/// Cleaned text of the first match, or an empty string.
pub fn text_or_empty(scope: ElementRef<'_>, selector: &Selector) -> String {
    first_text(scope, selector).unwrap_or_default()
}

/// Attribute of the first match, if both exist.
pub fn first_attr(scope: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(|value| value.trim().to_string())
}

/// First match that does not sit inside a `fence` match below `scope`.
pub fn first_outside<'a>(
    scope: ElementRef<'a>,
    selector: &Selector,
    fence: &Selector,
) -> Option<ElementRef<'a>> {
    scope.select(selector).find(|el| {
        !el.ancestors()
            .take_while(|node| node.id() != scope.id())
            .filter_map(ElementRef::wrap)
            .any(|ancestor| fence.matches(&ancestor))
    })
}

/// Whether anything in the scope matches.
pub fn exists(scope: ElementRef<'_>, selector: &Selector) -> bool {
    scope.select(selector).next().is_some()
}

/// Direct `<img>` children of an element, by attribute.
pub fn child_image_attrs(element: ElementRef<'_>, attr: &str) -> Vec<String> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "img")
        .filter_map(|img| img.value().attr(attr).map(str::to_string))
        .collect()
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;

    #[test]
    fn test_parse_selector_valid() {
        assert!(parse_selector("div.class").is_ok());
        assert!(parse_selector("a[title=\"Trang cuối\"]").is_ok());
    }

    #[test]
    fn test_parse_selector_invalid() {
        assert!(parse_selector("[[invalid").is_err());
    }

    #[test]
    fn test_own_text_skips_children() {
        let html = Html::parse_fragment(
            r#"<div class="c"><span class="mention-user">@bob</span> thanks <img src="s.png"></div>"#,
        );
        let sel = parse_selector(".c").unwrap();
        let el = html.select(&sel).next().unwrap();
        assert_eq!(own_text(el), "thanks");
        assert_eq!(text_of(el), "@bob thanks");
        assert_eq!(child_image_attrs(el, "src"), vec!["s.png".to_string()]);
    }

    #[test]
    fn test_first_outside_skips_fenced_matches() {
        let html = Html::parse_fragment(
            r#"<div class="outer"><div class="inner"><b>nested</b></div><b>own</b></div>"#,
        );
        let outer = html.select(&parse_selector(".outer").unwrap()).next().unwrap();
        let bold = parse_selector("b").unwrap();
        let fence = parse_selector(".inner").unwrap();

        assert_eq!(first_outside(outer, &bold, &fence).map(text_of).as_deref(), Some("own"));

        let inner = html.select(&fence).next().unwrap();
        assert_eq!(first_outside(inner, &bold, &fence).map(text_of).as_deref(), Some("nested"));
        assert!(first_outside(outer, &parse_selector("i").unwrap(), &fence).is_none());
    }

    #[test]
    fn test_missing_nodes_are_absent() {
        let html = Html::parse_document("<p>hi</p>");
        let sel = parse_selector(".nope").unwrap();
        let root = html.root_element();
        assert_eq!(first_text(root, &sel), None);
        assert_eq!(first_attr(root, &sel, "href"), None);
        assert_eq!(text_or_empty(root, &sel), "");
        assert!(!exists(root, &sel));
    }
}
