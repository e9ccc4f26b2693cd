//! Read-only client for the site's backend API.

pub mod client;
pub mod config;
pub mod messages;

pub use client::{
    extract_api_error_message, related_contents_query, sanitize_page_size, SiteApi, SiteApiError,
    COMMENTS_PAGE_SIZE, RELATED_CONTENTS_PAGE_SIZE,
};
pub use config::{is_dev_host, ApiConfig, DEFAULT_FEATURED_STORES_ENDPOINT};
pub use messages::{
    comments_error_message, content_error_message, list_error_message, store_error_message,
};
