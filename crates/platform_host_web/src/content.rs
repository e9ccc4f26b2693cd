//! `fetch`-backed content API transport.

use platform_host::{ContentResponse, ContentSource, ContentSourceFuture};

#[derive(Debug, Clone, Copy, Default)]
/// Browser content source issuing `window.fetch` requests.
pub struct WebContentSource;

impl ContentSource for WebContentSource {
    fn get_json<'a>(&'a self, url: &'a str) -> ContentSourceFuture<'a, Result<ContentResponse, String>> {
        #[cfg(target_arch = "wasm32")]
        {
            Box::pin(imp::fetch_json(url))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = url;
            Box::pin(async { Err("fetch unavailable off wasm32".to_string()) })
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod imp {
    use platform_host::ContentResponse;
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestCache, RequestInit, Response};

    fn js_error_to_string(err: JsValue) -> String {
        if let Some(text) = err.as_string() {
            return text;
        }
        if let Ok(message) = js_sys::Reflect::get(&err, &JsValue::from_str("message")) {
            if let Some(text) = message.as_string() {
                return text;
            }
        }
        format!("{err:?}")
    }

    pub(super) async fn fetch_json(url: &str) -> Result<ContentResponse, String> {
        let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
        let init = RequestInit::new();
        init.set_method("GET");
        init.set_cache(RequestCache::NoStore);
        let request = Request::new_with_str_and_init(url, &init).map_err(js_error_to_string)?;
        request
            .headers()
            .set("Accept", "application/json")
            .map_err(js_error_to_string)?;

        let response: Response = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error_to_string)?
            .dyn_into()
            .map_err(js_error_to_string)?;
        let body = JsFuture::from(response.text().map_err(js_error_to_string)?)
            .await
            .map_err(js_error_to_string)?;

        Ok(ContentResponse::new(
            response.status(),
            body.as_string().unwrap_or_default(),
        ))
    }
}
