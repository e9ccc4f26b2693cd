//! Top-level navigation adapter for browser contexts.

use platform_host::NavigationService;

#[derive(Debug, Clone, Copy, Default)]
/// Browser navigation adapter that assigns `window.location.href`.
pub struct WebNavigationService;

impl NavigationService for WebNavigationService {
    fn assign(&self, url: &str) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
            window
                .location()
                .set_href(url)
                .map_err(|err| format!("location assignment failed: {err:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = url;
            Ok(())
        }
    }
}
