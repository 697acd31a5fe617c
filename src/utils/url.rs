// src/utils/url.rs

//! URL and identifier utilities.

use url::Url;

/// Last path segment of a link, without query string or fragment.
///
/// # Examples
/// ```
/// use comics::utils::url::slug_from_link;
///
/// assert_eq!(
///     slug_from_link("https://example.com/truyen-tranh/one-piece"),
///     Some("one-piece".to_string())
/// );
/// ```
pub fn slug_from_link(link: &str) -> Option<String> {
    let path = link.split(['?', '#']).next().unwrap_or("");
    path.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// Split a `slug-1234` segment into the human slug and the numeric suffix.
pub fn split_numeric_suffix(segment: &str) -> (&str, Option<u64>) {
    if let Some((slug, tail)) = segment.rsplit_once('-') {
        if !tail.is_empty() && tail.chars().all(|c| c.is_ascii_digit()) {
            return (slug, tail.parse().ok());
        }
    }
    (segment, None)
}

/// Numeric id at the end of a link: the last segment when it is a number,
/// otherwise the `-<digits>` suffix of that segment.
pub fn trailing_number(link: &str) -> Option<u64> {
    let segment = slug_from_link(link)?;
    if segment.chars().all(|c| c.is_ascii_digit()) {
        return segment.parse().ok();
    }
    split_numeric_suffix(&segment).1
}

/// Append a query parameter, picking `&` or `?` depending on whether the path
/// already carries a query. A trailing `?` or `&` is reused.
pub fn append_query(path: &str, key: &str, value: impl std::fmt::Display) -> String {
    let separator = if path.ends_with('?') || path.ends_with('&') {
        ""
    } else if path.contains('?') {
        "&"
    } else {
        "?"
    };
    format!("{path}{separator}{key}={value}")
}

/// Read the `page` number out of a pagination link.
///
/// The link may be absolute or relative; when it does not parse as a URL the
/// text after the last `=` is used.
pub fn page_param(link: &str) -> Option<u32> {
    let base = Url::parse("http://placeholder.invalid/").ok()?;
    if let Ok(url) = base.join(link) {
        if let Some((_, value)) = url.query_pairs().find(|(key, _)| key == "page") {
            return value.trim().parse().ok();
        }
    }
    link.rsplit('=').next()?.trim().parse().ok()
}

/// Value of a query parameter, when the link carries one.
pub fn query_param(link: &str, name: &str) -> Option<String> {
    let base = Url::parse("http://placeholder.invalid/").ok()?;
    let url = base.join(link).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

/// Give protocol-relative links (`//cdn/...`) an explicit `https:` scheme.
pub fn with_scheme(link: &str) -> String {
    if link.starts_with("//") {
        format!("https:{link}")
    } else {
        link.to_string()
    }
}

/// Encode a value for use inside a query string (spaces become `+`).
pub fn encode_query_value(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Join a request path onto the site root, collapsing runs of `?`.
pub fn join_path(base_url: &str, path: &str) -> String {
    let mut joined = format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    );
    while joined.contains("??") {
        joined = joined.replace("??", "?");
    }
    joined
}
