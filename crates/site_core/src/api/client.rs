//! Typed client for the public `/site` endpoints.

use std::rc::Rc;

use percent_encoding::utf8_percent_encode;
use platform_host::{ContentResponse, ContentSource};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use url::Url;

use super::config::ApiConfig;
use crate::{
    contents::{
        legacy_route::URI_COMPONENT, query::MAX_PAGE_SIZE, select_related_contents, ContentSort,
        ContentsQuery, GuideContent, GuideContentComment, PageResponse, DEFAULT_RELATED_LIMIT,
    },
    stores::{normalize_featured_stores, normalize_store_details, FeaturedStore, StoreDetails},
};

/// Comments shown per page on a content detail page.
pub const COMMENTS_PAGE_SIZE: u32 = 10;
/// Contents fetched per list when picking related reads.
pub const RELATED_CONTENTS_PAGE_SIZE: u32 = 8;

const CONTENTS_FALLBACK: &str = "Não foi possível carregar os conteúdos.";
const STORE_FALLBACK: &str = "Não foi possível carregar a loja.";
const INVALID_RESPONSE: &str = "Resposta inválida da API.";
const INVALID_STORE_RESPONSE: &str = "Resposta inválida da API de lojas.";

/// Failed API call, carrying the HTTP status (or a synthetic one) and a displayable message.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} (status {status})")]
pub struct SiteApiError {
    /// HTTP status; `503` when no API origin is configured, `500` for transport or decode failures.
    pub status: u16,
    /// Message from the backend payload, or a fallback.
    pub message: String,
}

impl SiteApiError {
    /// Builds an error with `status` and `message`.
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

/// Trimmed `message` of an error payload, or `fallback` when absent, blank, or not JSON.
pub fn extract_api_error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|payload| payload.get("message"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn endpoint(base: &str, path: &str, query: &[(&str, String)]) -> Result<String, SiteApiError> {
    let mut url = Url::parse(&format!("{}{path}", base.trim_end_matches('/')))
        .map_err(|err| SiteApiError::new(503, format!("URL da API inválida: {err}")))?;
    if !query.is_empty() {
        url.query_pairs_mut()
            .extend_pairs(query.iter().map(|(key, value)| (*key, value.as_str())));
    }
    Ok(url.into())
}

/// Page size actually sent to the backend: at least 1, at most [`MAX_PAGE_SIZE`].
pub fn sanitize_page_size(page_size: u32) -> u32 {
    page_size.clamp(1, MAX_PAGE_SIZE)
}

fn listing_pairs(query: &ContentsQuery) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        ("page", query.page.to_string()),
        ("pageSize", sanitize_page_size(query.page_size).to_string()),
        ("sort", query.sort.as_str().to_string()),
    ];
    if !query.q.trim().is_empty() {
        pairs.push(("q", query.q.trim().to_string()));
    }
    if !query.store_id.trim().is_empty() {
        pairs.push(("storeId", query.store_id.trim().to_string()));
    }
    pairs
}

/// First page of the newest contents, optionally limited to one store, for related picks.
pub fn related_contents_query(store_id: Option<&str>) -> ContentsQuery {
    ContentsQuery {
        page: 0,
        page_size: RELATED_CONTENTS_PAGE_SIZE,
        q: String::new(),
        sort: ContentSort::Newest,
        store_id: store_id.unwrap_or_default().to_string(),
    }
}

/// Client for the site's read-only API, bound to one transport and origin.
#[derive(Clone)]
pub struct SiteApi {
    source: Rc<dyn ContentSource>,
    base_url: Option<String>,
    featured_stores_endpoint: String,
}

impl std::fmt::Debug for SiteApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteApi")
            .field("base_url", &self.base_url)
            .field("featured_stores_endpoint", &self.featured_stores_endpoint)
            .finish_non_exhaustive()
    }
}

impl SiteApi {
    /// Binds `source` to the origin `config` selects for a page served from `hostname`.
    pub fn new(source: Rc<dyn ContentSource>, config: &ApiConfig, hostname: Option<&str>) -> Self {
        Self {
            source,
            base_url: config.select_api_base(hostname).map(str::to_string),
            featured_stores_endpoint: config.featured_stores_endpoint.clone(),
        }
    }

    /// Selected API origin, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> Result<String, SiteApiError> {
        let base = self
            .base_url
            .as_deref()
            .ok_or_else(|| SiteApiError::new(503, "API base URL não configurada."))?;
        endpoint(base, path, query)
    }

    async fn fetch(&self, url: &str, fallback: &str) -> Result<ContentResponse, SiteApiError> {
        let response = self
            .source
            .get_json(url)
            .await
            .map_err(|_| SiteApiError::new(500, fallback))?;
        if response.is_success() {
            Ok(response)
        } else {
            Err(SiteApiError::new(
                response.status,
                extract_api_error_message(&response.body, fallback),
            ))
        }
    }

    async fn fetch_typed<T: DeserializeOwned>(&self, url: &str) -> Result<T, SiteApiError> {
        let response = self.fetch(url, CONTENTS_FALLBACK).await?;
        serde_json::from_str(&response.body).map_err(|_| SiteApiError::new(500, INVALID_RESPONSE))
    }

    /// One listing page for an already-normalized query.
    ///
    /// # Errors
    ///
    /// Returns [`SiteApiError`] for a missing origin, transport failure, non-2xx status, or an
    /// undecodable body.
    pub async fn list_contents(
        &self,
        query: &ContentsQuery,
    ) -> Result<PageResponse<GuideContent>, SiteApiError> {
        let url = self.url("/site/contents", &listing_pairs(query))?;
        self.fetch_typed(&url).await
    }

    /// One content by id.
    ///
    /// # Errors
    ///
    /// As [`SiteApi::list_contents`]; a missing content is status `404`.
    pub async fn get_content(&self, id: u64) -> Result<GuideContent, SiteApiError> {
        let url = self.url(&format!("/site/contents/{id}"), &[])?;
        self.fetch_typed(&url).await
    }

    /// One page of a content's comments, [`COMMENTS_PAGE_SIZE`] at a time.
    ///
    /// # Errors
    ///
    /// As [`SiteApi::list_contents`].
    pub async fn list_comments(
        &self,
        id: u64,
        page: u32,
    ) -> Result<PageResponse<GuideContentComment>, SiteApiError> {
        let url = self.url(
            &format!("/site/contents/{id}/comments"),
            &[
                ("page", page.to_string()),
                ("pageSize", COMMENTS_PAGE_SIZE.to_string()),
            ],
        )?;
        self.fetch_typed(&url).await
    }

    /// "Read next" picks for `current`: the newest contents of its store first, then the newest
    /// contents overall. Either list failing only drops its candidates.
    pub async fn related_contents(&self, current: &GuideContent) -> Vec<GuideContent> {
        let fallback = self
            .list_contents(&related_contents_query(None))
            .await
            .map(|page| page.items)
            .unwrap_or_default();
        let preferred = match current.thrift_store_id.as_deref() {
            Some(store_id) => self
                .list_contents(&related_contents_query(Some(store_id)))
                .await
                .map(|page| page.items)
                .unwrap_or_else(|_| fallback.clone()),
            None => fallback.clone(),
        };
        select_related_contents(current.id, &preferred, &fallback, DEFAULT_RELATED_LIMIT)
    }

    /// Public profile of one store.
    ///
    /// # Errors
    ///
    /// Status `400` for a blank id, `500` when the payload lacks an id or name, otherwise as
    /// [`SiteApi::list_contents`].
    pub async fn get_store(&self, id: &str) -> Result<StoreDetails, SiteApiError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(SiteApiError::new(400, "Identificador de loja inválido."));
        }
        let url = self.url(
            &format!("/site/stores/{}", utf8_percent_encode(id, URI_COMPONENT)),
            &[],
        )?;
        let response = self.fetch(&url, STORE_FALLBACK).await?;
        serde_json::from_str::<Value>(&response.body)
            .ok()
            .as_ref()
            .and_then(normalize_store_details)
            .ok_or_else(|| SiteApiError::new(500, INVALID_STORE_RESPONSE))
    }

    /// Curated stores for the home carousel. A body that is not a list yields no stores.
    ///
    /// # Errors
    ///
    /// Returns [`SiteApiError`] for transport failures and non-2xx statuses.
    pub async fn list_featured_stores(&self) -> Result<Vec<FeaturedStore>, SiteApiError> {
        let response = self
            .fetch(
                &self.featured_stores_endpoint,
                "Não foi possível carregar os brechós em destaque.",
            )
            .await?;
        Ok(serde_json::from_str::<Value>(&response.body)
            .map(|payload| normalize_featured_stores(&payload))
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use platform_host::{MemoryContentSource, NoopContentSource};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::contents::{parse_contents_query, parse_query_string};

    const BASE: &str = "https://api.example";
    const STORE_ID: &str = "3f2b8c1e-9a4d-4b7e-8c21-5d6f7a8b9c0d";

    fn api(source: &MemoryContentSource) -> SiteApi {
        let config = ApiConfig::from_raw(Some("https://api.example/"), None, None);
        SiteApi::new(Rc::new(source.clone()), &config, Some("guiabrecho.com.br"))
    }

    fn content_json(id: u64) -> String {
        format!(
            r#"{{"id":{id},"title":"T{id}","description":"D","imageUrl":"","thriftStoreId":null,
            "thriftStoreName":"Vila","thriftStoreCoverImageUrl":null,
            "createdAt":"2026-02-09T12:00:00Z","likeCount":0,"commentCount":0}}"#
        )
    }

    #[test]
    fn listing_sends_normalized_query() {
        let source = MemoryContentSource::default();
        let url = format!(
            "{BASE}/site/contents?page=2&pageSize=100&sort=oldest&q=jaqueta+jeans&storeId=vila"
        );
        source.respond(
            url.clone(),
            200,
            format!(r#"{{"items":[{}],"page":2,"hasNext":false}}"#, content_json(7)),
        );

        let query = parse_contents_query(&parse_query_string(
            "page=2&pageSize=500&sort=oldest&q=+jaqueta%20jeans+&storeId=vila",
        ));
        let page = block_on(api(&source).list_contents(&query)).expect("page");

        assert_eq!(source.requests(), vec![url]);
        assert_eq!(page.items[0].id, 7);
        assert_eq!(page.page, 2);
    }

    #[test]
    fn error_status_carries_backend_message() {
        let source = MemoryContentSource::default();
        source.respond(
            format!("{BASE}/site/contents/9"),
            404,
            r#"{"message":"  Conteúdo removido  "}"#,
        );
        source.respond(format!("{BASE}/site/contents/10"), 502, "<html>bad gateway</html>");

        assert_eq!(
            block_on(api(&source).get_content(9)),
            Err(SiteApiError::new(404, "Conteúdo removido"))
        );
        assert_eq!(
            block_on(api(&source).get_content(10)),
            Err(SiteApiError::new(502, CONTENTS_FALLBACK))
        );
    }

    #[test]
    fn undecodable_success_body_is_an_invalid_response() {
        let source = MemoryContentSource::default();
        source.respond(format!("{BASE}/site/contents/3"), 200, r#"{"id":"three"}"#);
        assert_eq!(
            block_on(api(&source).get_content(3)),
            Err(SiteApiError::new(500, INVALID_RESPONSE))
        );
    }

    #[test]
    fn comments_use_fixed_page_size() {
        let source = MemoryContentSource::default();
        let url = format!("{BASE}/site/contents/5/comments?page=1&pageSize=10");
        source.respond(
            url.clone(),
            200,
            r#"{"items":[{"id":1,"body":"Amei!","userId":null,"userDisplayName":"Ana",
            "userPhotoUrl":null,"createdAt":"2026-02-09T12:00:00Z","edited":true}],
            "page":1,"hasNext":false}"#,
        );

        let page = block_on(api(&source).list_comments(5, 1)).expect("comments");
        assert_eq!(page.items[0].user_display_name.as_deref(), Some("Ana"));
        assert!(page.items[0].edited);
        assert_eq!(source.requests(), vec![url]);
    }

    #[test]
    fn store_lookup_validates_id_and_payload() {
        let source = MemoryContentSource::default();
        source.respond(
            format!("{BASE}/site/stores/{STORE_ID}"),
            200,
            format!(r#"{{"id":"{STORE_ID}","name":" Brechó da Vila ","categories":["Roupas"]}}"#),
        );
        source.respond(format!("{BASE}/site/stores/broken"), 200, r#"{"id":"broken"}"#);

        let store = block_on(api(&source).get_store(STORE_ID)).expect("store");
        assert_eq!(store.name, "Brechó da Vila");
        assert_eq!(store.categories, vec!["Roupas".to_string()]);

        assert_eq!(
            block_on(api(&source).get_store("   ")).map_err(|err| err.status),
            Err(400)
        );
        assert_eq!(
            block_on(api(&source).get_store("broken")),
            Err(SiteApiError::new(500, INVALID_STORE_RESPONSE))
        );
        assert_eq!(
            block_on(api(&source).get_store("a b")).map_err(|err| err.status),
            Err(404)
        );
        assert_eq!(
            source.requests().last().map(String::as_str),
            Some("https://api.example/site/stores/a%20b")
        );
    }

    #[test]
    fn featured_stores_tolerate_unexpected_bodies() {
        let source = MemoryContentSource::default();
        let api = SiteApi::new(
            Rc::new(source.clone()),
            &ApiConfig::from_raw(None, None, Some("https://cdn.example/featured.json")),
            None,
        );
        source.respond(
            "https://cdn.example/featured.json",
            200,
            r#"[{"id":"a","name":"Loja A","coverImageUrl":"https://cdn.example/a.jpg"},{"id":"b"}]"#,
        );
        assert_eq!(block_on(api.list_featured_stores()).expect("stores").len(), 1);

        source.respond("https://cdn.example/featured.json", 200, r#"{"items":[]}"#);
        assert_eq!(block_on(api.list_featured_stores()), Ok(Vec::new()));

        source.respond("https://cdn.example/featured.json", 500, "");
        assert_eq!(
            block_on(api.list_featured_stores()).map_err(|err| err.status),
            Err(500)
        );
    }

    #[test]
    fn missing_origin_and_transport_failures_are_reported() {
        let unconfigured = SiteApi::new(Rc::new(NoopContentSource), &ApiConfig::default(), None);
        assert_eq!(
            block_on(unconfigured.get_content(1)).map_err(|err| err.status),
            Err(503)
        );

        let offline = SiteApi::new(
            Rc::new(NoopContentSource),
            &ApiConfig::from_raw(Some(BASE), None, None),
            None,
        );
        assert_eq!(
            block_on(offline.get_content(1)),
            Err(SiteApiError::new(500, CONTENTS_FALLBACK))
        );
    }

    #[test]
    fn related_contents_prefer_same_store_and_survive_failures() {
        let source = MemoryContentSource::default();
        let latest = format!("{BASE}/site/contents?page=0&pageSize=8&sort=newest");
        let same_store = format!("{latest}&storeId=vila");
        source.respond(
            latest,
            200,
            format!(
                r#"{{"items":[{},{},{}],"page":0,"hasNext":false}}"#,
                content_json(9),
                content_json(5),
                content_json(4)
            ),
        );
        source.respond(
            same_store.clone(),
            200,
            format!(
                r#"{{"items":[{},{}],"page":0,"hasNext":false}}"#,
                content_json(5),
                content_json(2)
            ),
        );

        let mut current: GuideContent =
            serde_json::from_str(&content_json(5)).expect("current content");
        current.thrift_store_id = Some("vila".to_string());
        let ids = |items: Vec<GuideContent>| items.iter().map(|item| item.id).collect::<Vec<_>>();

        assert_eq!(ids(block_on(api(&source).related_contents(&current))), vec![2, 9, 4]);

        source.respond(same_store, 500, "");
        assert_eq!(ids(block_on(api(&source).related_contents(&current))), vec![9, 4]);

        let offline = SiteApi::new(
            Rc::new(NoopContentSource),
            &ApiConfig::from_raw(Some(BASE), None, None),
            None,
        );
        assert!(block_on(offline.related_contents(&current)).is_empty());
    }

    #[test]
    fn hand_built_queries_are_clamped_before_sending() {
        let mut query = related_contents_query(None);
        query.page_size = 0;
        assert_eq!(listing_pairs(&query)[1], ("pageSize", "1".to_string()));
        query.page_size = 5_000;
        assert_eq!(listing_pairs(&query)[1], ("pageSize", "100".to_string()));
    }

    #[test]
    fn related_query_is_first_newest_page() {
        let query = related_contents_query(Some("vila"));
        assert_eq!(query.page, 0);
        assert_eq!(query.page_size, RELATED_CONTENTS_PAGE_SIZE);
        assert_eq!(query.store_id, "vila");
        assert_eq!(
            listing_pairs(&related_contents_query(None)),
            vec![
                ("page", "0".to_string()),
                ("pageSize", "8".to_string()),
                ("sort", "newest".to_string()),
            ]
        );
    }
}
