//! Browser (`wasm32`) implementations of [`platform_host`] service contracts.
//!
//! This crate is the concrete browser-side host wiring layer for preference storage,
//! navigation, document environment, the AdSense queue and slot inspector, script injection, and
//! content API requests.
//! Off `wasm32` every adapter degrades to the behavior of its `platform_host` no-op counterpart
//! so the workspace builds and tests natively.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

/// Compile-time host-strategy selection and concrete adapter factories for runtime wiring.
pub mod adapters;
pub mod ads;
pub mod content;
pub mod document;
pub mod navigation;
pub mod script;
pub mod storage;

pub use adapters::{
    ad_queue, ad_slot_inspector, build_host_services, content_source, document_environment,
    host_strategy_name, navigation_service, prefs_store, script_loader, selected_host_strategy,
    AdQueueAdapter, AdSlotInspectorAdapter, ContentSourceAdapter, DocumentEnvironmentAdapter,
    NavigationServiceAdapter, PrefsStoreAdapter, ScriptLoaderAdapter,
};
pub use ads::{WebAdQueue, WebAdSlotInspector, AD_QUEUE_GLOBAL, AD_STATUS_ATTRIBUTE};
pub use content::WebContentSource;
pub use document::WebDocumentEnvironment;
pub use navigation::WebNavigationService;
pub use script::WebScriptLoader;
pub use storage::local_prefs::WebPrefsStore;
