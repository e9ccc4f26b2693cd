//! Typed host-domain contracts shared by the site runtime and browser adapters.
//!
//! This crate is the API-first boundary for platform services. It exposes preference storage,
//! navigation, document environment, ad-network, script-loading, and content API traits together with
//! in-memory/no-op adapters, while concrete browser adapters live in `platform_host_web`.

#![warn(missing_docs, rustdoc::broken_intra_doc_links)]

pub mod ads;
pub mod content;
pub mod document;
pub mod host;
pub mod navigation;
pub mod script;
pub mod storage;

pub use ads::{
    AdQueue, AdSlotObservation, AdSlotInspector, AdSlotRequest, MemoryAdQueue, NoopAdQueue,
    NoopAdSlotInspector, ScriptedAdSlotInspector,
};
pub use content::{
    ContentResponse, ContentSource, ContentSourceFuture, MemoryContentSource, NoopContentSource,
};
pub use document::{DocumentEnvironment, NoopDocumentEnvironment, StaticDocumentEnvironment};
pub use host::{HostServices, HostStrategy};
pub use navigation::{NavigationService, NoopNavigationService, RecordingNavigationService};
pub use script::{
    ImmediateScriptLoader, NoopScriptLoader, ScriptErrorCallback, ScriptLoadCallback,
    ScriptLoader, ScriptRequest,
};
pub use storage::prefs::{FailingPrefsStore, MemoryPrefsStore, NoopPrefsStore, PrefsStore};
