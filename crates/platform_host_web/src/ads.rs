//! AdSense queue and slot-inspector adapters.
//!
//! The network exposes a global `window.adsbygoogle` queue. Before the loader script runs it is a
//! plain array created on first push; afterwards the script swaps in an object whose `push`
//! processes requests immediately and may throw.

use platform_host::{AdQueue, AdSlotObservation, AdSlotInspector, AdSlotRequest};

/// Global property holding the ad request queue.
pub const AD_QUEUE_GLOBAL: &str = "adsbygoogle";
/// Attribute the network writes on the slot element once it decides fill.
pub const AD_STATUS_ATTRIBUTE: &str = "data-ad-status";

#[derive(Debug, Clone, Copy, Default)]
/// Browser ad queue that pushes onto `window.adsbygoogle`.
pub struct WebAdQueue;

impl AdQueue for WebAdQueue {
    fn enqueue(&self, request: &AdSlotRequest) -> Result<(), String> {
        #[cfg(target_arch = "wasm32")]
        {
            use js_sys::{Array, Function, Reflect};
            use wasm_bindgen::{JsCast, JsValue};

            let window = web_sys::window().ok_or_else(|| "window unavailable".to_string())?;
            let key = JsValue::from_str(AD_QUEUE_GLOBAL);
            let existing = Reflect::get(&window, &key)
                .map_err(|err| format!("read {AD_QUEUE_GLOBAL} failed: {err:?}"))?;
            let queue = if existing.is_undefined() || existing.is_null() {
                let fresh: JsValue = Array::new().into();
                Reflect::set(&window, &key, &fresh)
                    .map_err(|err| format!("install {AD_QUEUE_GLOBAL} failed: {err:?}"))?;
                fresh
            } else {
                existing
            };

            let push = Reflect::get(&queue, &JsValue::from_str("push"))
                .map_err(|err| format!("read {AD_QUEUE_GLOBAL}.push failed: {err:?}"))?
                .dyn_into::<Function>()
                .map_err(|_| format!("{AD_QUEUE_GLOBAL}.push is not callable"))?;
            let payload = serde_wasm_bindgen::to_value(request).map_err(|err| err.to_string())?;
            push.call1(&queue, &payload)
                .map(|_| ())
                .map_err(|err| format!("{AD_QUEUE_GLOBAL}.push() threw: {err:?}"))
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = request;
            Err("ad network unavailable outside the browser".to_string())
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Browser inspector reading the slot's status attribute and creative iframe height.
pub struct WebAdSlotInspector;

impl AdSlotInspector for WebAdSlotInspector {
    fn observe(&self, slot_dom_id: &str) -> AdSlotObservation {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(slot) = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id(slot_dom_id))
            else {
                return AdSlotObservation::untouched();
            };
            let frame_height = slot
                .query_selector("iframe")
                .ok()
                .flatten()
                .map(|frame| frame.get_bounding_client_rect().height())
                .unwrap_or(0.0);
            AdSlotObservation {
                status: slot.get_attribute(AD_STATUS_ATTRIBUTE),
                frame_height,
            }
        }

        #[cfg(not(target_arch = "wasm32"))]
        {
            let _ = slot_dom_id;
            AdSlotObservation::untouched()
        }
    }
}
