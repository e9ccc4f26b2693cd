//! Document environment adapter: `document.hidden`, `navigator.userAgent`, `location.hostname`,
//! and root theming.

use platform_host::DocumentEnvironment;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;

#[derive(Debug, Clone, Copy, Default)]
/// Browser document environment backed by the global `window`.
pub struct WebDocumentEnvironment;

impl DocumentEnvironment for WebDocumentEnvironment {
    fn is_hidden(&self) -> bool {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()
                .and_then(|window| window.document())
                .map(|document| document.hidden())
                .unwrap_or(false)
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            false
        }
    }

    fn user_agent(&self) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()?.navigator().user_agent().ok()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }

    fn hostname(&self) -> Option<String> {
        #[cfg(target_arch = "wasm32")]
        {
            web_sys::window()?.location().hostname().ok()
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            None
        }
    }

    fn apply_theme(&self, dark: bool) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(root) = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.document_element())
            else {
                return;
            };
            let _ = root.class_list().toggle_with_force("dark", dark);
            if let Ok(root) = root.dyn_into::<web_sys::HtmlElement>() {
                let scheme = if dark { "dark" } else { "light" };
                let _ = root.style().set_property("color-scheme", scheme);
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        let _ = dark;
    }
}
