//! Content-quality thresholds for showing an ad.

/// Minimum normalized title length on a content detail page.
pub const MIN_CONTENT_TITLE_CHARS: usize = 20;
/// Minimum normalized description length on a content detail page.
pub const MIN_CONTENT_DESCRIPTION_CHARS: usize = 140;
/// Minimum number of listed items before the listing shows an ad.
pub const MIN_LISTING_ITEMS_FOR_AD: usize = 3;

fn normalized_len(value: &str) -> usize {
    value.split_whitespace().map(|word| word.chars().count()).sum::<usize>()
        + value.split_whitespace().count().saturating_sub(1)
}

/// Whether a content detail page carries enough text to host an ad.
///
/// Whitespace runs count as one character and surrounding whitespace is ignored.
pub fn is_content_detail_ad_eligible(title: Option<&str>, description: Option<&str>) -> bool {
    normalized_len(title.unwrap_or_default()) >= MIN_CONTENT_TITLE_CHARS
        && normalized_len(description.unwrap_or_default()) >= MIN_CONTENT_DESCRIPTION_CHARS
}

/// Whether a listing page is healthy and long enough to host an ad.
pub fn is_contents_listing_ad_eligible(has_error: bool, item_count: usize) -> bool {
    !has_error && item_count >= MIN_LISTING_ITEMS_FOR_AD
}
