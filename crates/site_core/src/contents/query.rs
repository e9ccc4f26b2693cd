//! Listing query-string parsing and link building.

use url::form_urlencoded;

use super::{legacy_route::safe_decode_path_segment, types::ContentSort};

/// Decoded query string as ordered `(key, value)` pairs; keys may repeat.
pub type QueryParams = Vec<(String, String)>;

/// Default zero-based page.
pub const DEFAULT_PAGE: u32 = 0;
/// Default page size.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Largest page size a link may request.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Normalized listing query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentsQuery {
    /// Zero-based page; malformed or negative input becomes [`DEFAULT_PAGE`].
    pub page: u32,
    /// Items per page, between 1 and [`MAX_PAGE_SIZE`].
    pub page_size: u32,
    /// Trimmed free-text search; empty means no search.
    pub q: String,
    /// Listing order; anything but `oldest` is newest-first.
    pub sort: ContentSort,
    /// Trimmed store filter; empty means every store.
    pub store_id: String,
}

/// Optional inputs for [`build_contents_href`]; absent fields take defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentsHrefParams {
    /// Requested page; negatives clamp to 0.
    pub page: Option<i64>,
    /// Requested page size; clamped to `1..=MAX_PAGE_SIZE`.
    pub page_size: Option<i64>,
    /// Search text; omitted from the link when blank.
    pub q: Option<String>,
    /// Listing order; defaults to newest.
    pub sort: Option<ContentSort>,
    /// Store filter; omitted from the link when blank.
    pub store_id: Option<String>,
}

impl From<&ContentsQuery> for ContentsHrefParams {
    fn from(query: &ContentsQuery) -> Self {
        Self {
            page: Some(query.page.into()),
            page_size: Some(query.page_size.into()),
            q: Some(query.q.clone()),
            sort: Some(query.sort),
            store_id: Some(query.store_id.clone()),
        }
    }
}

/// Decodes a `?a=1&b=2` search string (leading `?` optional).
pub fn parse_query_string(search: &str) -> QueryParams {
    let search = search.strip_prefix('?').unwrap_or(search);
    form_urlencoded::parse(search.as_bytes())
        .into_owned()
        .collect()
}

/// First value recorded for `key`.
pub fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.as_str())
}

/// Leading-integer parse: optional whitespace and sign, then digits; trailing junk is ignored.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = digits[..end]
        .bytes()
        .fold(0_i64, |acc, digit| {
            acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
        });
    Some(if negative { -magnitude } else { magnitude })
}

fn parse_non_negative(raw: Option<&str>, fallback: u32) -> u32 {
    match raw.filter(|raw| !raw.is_empty()).and_then(parse_leading_int) {
        Some(value) if value >= 0 => u32::try_from(value).unwrap_or(u32::MAX),
        _ => fallback,
    }
}

fn parse_page_size(raw: Option<&str>) -> u32 {
    let parsed = parse_non_negative(raw, DEFAULT_PAGE_SIZE);
    let safe = if parsed < 1 { DEFAULT_PAGE_SIZE } else { parsed };
    safe.min(MAX_PAGE_SIZE)
}

/// Normalizes the `/contents` query.
pub fn parse_contents_query(params: &[(String, String)]) -> ContentsQuery {
    let text = |key: &str| first_param(params, key).unwrap_or_default().trim().to_string();
    ContentsQuery {
        page: parse_non_negative(first_param(params, "page"), DEFAULT_PAGE),
        page_size: parse_page_size(first_param(params, "pageSize")),
        q: text("q"),
        sort: match first_param(params, "sort") {
            Some("oldest") => ContentSort::Oldest,
            _ => ContentSort::Newest,
        },
        store_id: text("storeId"),
    }
}

/// Zero-based comments page of a content detail URL.
pub fn parse_comments_page(params: &[(String, String)]) -> u32 {
    parse_non_negative(first_param(params, "commentsPage"), DEFAULT_PAGE)
}

/// Positive numeric content id from a `/content/{id}` segment; leading digits win as in `parseInt`.
pub fn parse_content_id(raw: &str) -> Option<u64> {
    let decoded = safe_decode_path_segment(raw)?;
    parse_leading_int(&decoded)
        .filter(|id| *id > 0)
        .and_then(|id| u64::try_from(id).ok())
}

/// Detail link showing comments page `comments_page` of content `content_id`.
pub fn build_comments_href(content_id: u64, comments_page: u32) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("commentsPage", &comments_page.to_string())
        .finish();
    format!("/content/{content_id}?{query}")
}

/// Builds a `/contents` link, clamping paging values and dropping blank filters.
pub fn build_contents_href(params: &ContentsHrefParams) -> String {
    let page = params.page.unwrap_or(DEFAULT_PAGE.into()).max(0);
    let page_size = params
        .page_size
        .unwrap_or(DEFAULT_PAGE_SIZE.into())
        .clamp(1, MAX_PAGE_SIZE.into());

    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("page", &page.to_string())
        .append_pair("pageSize", &page_size.to_string())
        .append_pair("sort", params.sort.unwrap_or_default().as_str());

    if let Some(q) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        query.append_pair("q", q);
    }
    if let Some(store_id) = params
        .store_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
    {
        query.append_pair("storeId", store_id);
    }

    format!("/contents?{}", query.finish())
}
