//! "Read next" selection for a content detail page.

use std::collections::HashSet;

use super::types::GuideContent;

/// Default number of related items shown.
pub const DEFAULT_RELATED_LIMIT: usize = 4;

/// Picks up to `limit` items from `preferred` then `fallback`, skipping the current item and
/// any id already chosen.
pub fn select_related_contents(
    current_id: u64,
    preferred: &[GuideContent],
    fallback: &[GuideContent],
    limit: usize,
) -> Vec<GuideContent> {
    let mut seen = HashSet::from([current_id]);
    preferred
        .iter()
        .chain(fallback)
        .filter(|item| seen.insert(item.id))
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn content(id: u64) -> GuideContent {
        GuideContent {
            id,
            title: format!("Conteúdo {id}"),
            description: String::new(),
            image_url: String::new(),
            thrift_store_id: Some("store-1".to_string()),
            thrift_store_name: "Brechó".to_string(),
            thrift_store_cover_image_url: None,
            created_at: "2026-02-09T12:00:00Z".to_string(),
            like_count: 0,
            comment_count: 0,
            liked_by_me: false,
        }
    }

    fn ids(items: &[GuideContent]) -> Vec<u64> {
        items.iter().map(|item| item.id).collect()
    }

    #[test]
    fn preferred_first_then_fallback_without_duplicates() {
        let preferred = [content(1), content(2), content(3)];
        let fallback = [content(3), content(4), content(5), content(6)];

        let selected =
            select_related_contents(2, &preferred, &fallback, DEFAULT_RELATED_LIMIT);
        assert_eq!(ids(&selected), vec![1, 3, 4, 5]);
    }

    #[test]
    fn zero_limit_and_short_inputs() {
        let preferred = [content(1)];
        assert!(select_related_contents(9, &preferred, &[], 0).is_empty());
        assert_eq!(ids(&select_related_contents(1, &preferred, &[], 4)), Vec::<u64>::new());
        assert_eq!(ids(&select_related_contents(9, &preferred, &[], 4)), vec![1]);
    }
}
