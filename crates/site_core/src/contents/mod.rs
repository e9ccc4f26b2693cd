//! Guide contents: wire types, listing queries, related picks, legacy redirects, date labels.

pub mod format;
pub mod legacy_route;
pub mod query;
pub mod related;
pub mod types;

pub use format::{format_date_short, format_date_time, DATE_UNAVAILABLE};
pub use legacy_route::{build_legacy_content_redirect_path, safe_decode_path_segment};
pub use query::{
    build_comments_href, build_contents_href, parse_comments_page, parse_content_id,
    parse_contents_query, parse_query_string, ContentsHrefParams, ContentsQuery, QueryParams,
};
pub use related::{select_related_contents, DEFAULT_RELATED_LIMIT};
pub use types::{ContentSort, GuideContent, GuideContentComment, PageResponse};
