//! `<script>` tag injection with load/error reporting.

use platform_host::{ScriptErrorCallback, ScriptLoadCallback, ScriptLoader, ScriptRequest};

/// Attribute tracking a tag's load outcome so later mounts can reuse it.
#[cfg(target_arch = "wasm32")]
const LOAD_STATE_ATTRIBUTE: &str = "data-load-state";

#[derive(Debug, Clone, Copy, Default)]
/// Browser script loader that appends one async, anonymous-CORS tag per request id.
pub struct WebScriptLoader;

impl ScriptLoader for WebScriptLoader {
    fn load_script(
        &self,
        request: &ScriptRequest,
        on_load: ScriptLoadCallback,
        on_error: ScriptErrorCallback,
    ) {
        #[cfg(target_arch = "wasm32")]
        {
            match prepare(request) {
                Ok(ScriptTag::Loaded) => on_load(),
                Ok(ScriptTag::Failed) => {
                    on_error(format!("script `{}` failed to load earlier", request.src));
                }
                Ok(ScriptTag::Pending(script)) => observe(&script, request, on_load, on_error),
                Err(err) => on_error(err),
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = (request, on_load);
            on_error("script loading unavailable outside the browser".to_string());
        }
    }
}

#[cfg(target_arch = "wasm32")]
enum ScriptTag {
    Loaded,
    Failed,
    Pending(web_sys::Element),
}

#[cfg(target_arch = "wasm32")]
fn prepare(request: &ScriptRequest) -> Result<ScriptTag, String> {
    use wasm_bindgen::JsCast;

    let document = web_sys::window()
        .and_then(|window| window.document())
        .ok_or_else(|| "document unavailable".to_string())?;

    if let Some(existing) = document.get_element_by_id(&request.id) {
        return Ok(
            match existing.get_attribute(LOAD_STATE_ATTRIBUTE).as_deref() {
                Some("loaded") => ScriptTag::Loaded,
                Some("failed") => ScriptTag::Failed,
                _ => ScriptTag::Pending(existing),
            },
        );
    }

    let script = document
        .create_element("script")
        .map_err(|err| format!("failed to create script tag: {err:?}"))?
        .dyn_into::<web_sys::HtmlScriptElement>()
        .map_err(|_| "failed to cast script tag".to_string())?;
    script.set_id(&request.id);
    script.set_src(&request.src);
    script.set_async(true);
    script.set_cross_origin(Some("anonymous"));
    let _ = script.set_attribute(LOAD_STATE_ATTRIBUTE, "loading");
    let head = document
        .head()
        .ok_or_else(|| "document head unavailable".to_string())?;
    head.append_child(&script)
        .map_err(|err| format!("failed to append script tag: {err:?}"))?;
    Ok(ScriptTag::Pending(script.into()))
}

#[cfg(target_arch = "wasm32")]
fn observe(
    script: &web_sys::Element,
    request: &ScriptRequest,
    on_load: ScriptLoadCallback,
    on_error: ScriptErrorCallback,
) {
    use std::{cell::RefCell, rc::Rc};

    use wasm_bindgen::{closure::Closure, JsCast};

    let callbacks = Rc::new(RefCell::new(Some((on_load, on_error))));

    let load_callbacks = callbacks.clone();
    let load_target = script.clone();
    let on_load_event = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_| {
        let _ = load_target.set_attribute(LOAD_STATE_ATTRIBUTE, "loaded");
        if let Some((on_load, _)) = load_callbacks.borrow_mut().take() {
            on_load();
        }
    }));

    let error_callbacks = callbacks.clone();
    let error_target = script.clone();
    let src = request.src.clone();
    let on_error_event = Closure::<dyn FnMut(web_sys::Event)>::wrap(Box::new(move |_| {
        let _ = error_target.set_attribute(LOAD_STATE_ATTRIBUTE, "failed");
        if let Some((_, on_error)) = error_callbacks.borrow_mut().take() {
            on_error(format!("script `{src}` failed to load"));
        }
    }));

    let registered = script
        .add_event_listener_with_callback("load", on_load_event.as_ref().unchecked_ref())
        .and_then(|()| {
            script.add_event_listener_with_callback(
                "error",
                on_error_event.as_ref().unchecked_ref(),
            )
        });
    on_load_event.forget();
    on_error_event.forget();

    if let Err(err) = registered {
        if let Some((_, on_error)) = callbacks.borrow_mut().take() {
            on_error(format!("failed to observe script load: {err:?}"));
        }
    }
}
