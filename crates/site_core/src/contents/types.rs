//! Wire types for guide contents as served by the backend.

use serde::{Deserialize, Serialize};

/// Listing order for guide contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSort {
    /// Most recent first.
    #[default]
    Newest,
    /// Oldest first.
    Oldest,
}

impl ContentSort {
    /// Query-string token.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
        }
    }
}

/// One guide article published by a thrift store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideContent {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub thrift_store_id: Option<String>,
    pub thrift_store_name: String,
    pub thrift_store_cover_image_url: Option<String>,
    /// ISO-8601 timestamp.
    pub created_at: String,
    pub like_count: u64,
    pub comment_count: u64,
    #[serde(default)]
    pub liked_by_me: bool,
}

/// One reader comment on a guide article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuideContentComment {
    pub id: u64,
    pub body: String,
    pub user_id: Option<String>,
    pub user_display_name: Option<String>,
    pub user_photo_url: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub edited: bool,
}

/// Zero-based page of results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub has_next: bool,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn content_page_decodes_backend_json() {
        let raw = r#"{
            "items": [{
                "id": 7,
                "title": "Como garimpar jaquetas",
                "description": "Dicas",
                "imageUrl": "https://cdn.example/7.jpg",
                "thriftStoreId": null,
                "thriftStoreName": "Brechó da Vila",
                "thriftStoreCoverImageUrl": null,
                "createdAt": "2026-02-09T12:00:00Z",
                "likeCount": 3,
                "commentCount": 1
            }],
            "page": 0,
            "hasNext": true
        }"#;

        let page: PageResponse<GuideContent> = serde_json::from_str(raw).expect("decode page");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].thrift_store_name, "Brechó da Vila");
        assert!(!page.items[0].liked_by_me);
        assert!(page.has_next);
    }

    #[test]
    fn sort_uses_lowercase_tokens() {
        assert_eq!(
            serde_json::to_string(&ContentSort::Oldest).expect("encode"),
            "\"oldest\""
        );
        assert_eq!(ContentSort::default().as_str(), "newest");
    }
}
