//! Read-only HTTP access to the site's content API.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

/// Object-safe boxed future used by [`ContentSource`] async methods.
pub type ContentSourceFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Raw response from the content API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text (JSON on success and on most errors).
    pub body: String,
}

impl ContentResponse {
    /// Builds a response with `status` and `body`.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Host service issuing `GET` requests that accept JSON.
///
/// Transport failures (offline, CORS, aborted) are `Err`; any HTTP status, including 4xx/5xx, is an
/// `Ok` response for the caller to interpret.
pub trait ContentSource {
    /// Fetches `url` with `Accept: application/json`.
    fn get_json<'a>(&'a self, url: &'a str) -> ContentSourceFuture<'a, Result<ContentResponse, String>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Content source for targets without network access.
pub struct NoopContentSource;

impl ContentSource for NoopContentSource {
    fn get_json<'a>(&'a self, _url: &'a str) -> ContentSourceFuture<'a, Result<ContentResponse, String>> {
        Box::pin(async { Err("content api unavailable on this host".to_string()) })
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory content source keyed by exact URL.
///
/// Unknown URLs answer `404` with an empty JSON object. Clones share responses and the request
/// log.
pub struct MemoryContentSource {
    responses: Rc<RefCell<HashMap<String, ContentResponse>>>,
    requests: Rc<RefCell<Vec<String>>>,
}

impl MemoryContentSource {
    /// Registers the response served for `url`, replacing any previous one.
    pub fn respond(&self, url: impl Into<String>, status: u16, body: impl Into<String>) {
        self.responses
            .borrow_mut()
            .insert(url.into(), ContentResponse::new(status, body));
    }

    /// Returns every requested URL, oldest first.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl ContentSource for MemoryContentSource {
    fn get_json<'a>(&'a self, url: &'a str) -> ContentSourceFuture<'a, Result<ContentResponse, String>> {
        Box::pin(async move {
            self.requests.borrow_mut().push(url.to_string());
            Ok(self
                .responses
                .borrow()
                .get(url)
                .cloned()
                .unwrap_or_else(|| ContentResponse::new(404, "{}")))
        })
    }
}
