use std::rc::Rc;

use platform_host::{
    AdQueue, AdSlotObservation, AdSlotInspector, AdSlotRequest, ContentResponse, ContentSource,
    ContentSourceFuture, DocumentEnvironment, HostServices, HostStrategy, NavigationService,
    NoopAdQueue, NoopAdSlotInspector, NoopContentSource, NoopDocumentEnvironment,
    NoopNavigationService, NoopPrefsStore, NoopScriptLoader, PrefsStore, ScriptErrorCallback,
    ScriptLoadCallback, ScriptLoader, ScriptRequest,
};

use crate::{
    WebAdQueue, WebAdSlotInspector, WebContentSource, WebDocumentEnvironment, WebNavigationService,
    WebPrefsStore, WebScriptLoader,
};

/// Returns the compile-time selected host strategy for the active build.
pub const fn selected_host_strategy() -> HostStrategy {
    #[cfg(feature = "headless-host")]
    {
        HostStrategy::Headless
    }

    #[cfg(not(feature = "headless-host"))]
    {
        HostStrategy::Browser
    }
}

/// Returns the selected host strategy as a stable string token.
pub fn host_strategy_name() -> &'static str {
    selected_host_strategy().as_str()
}

/// Adapter enum that erases the concrete preference backend behind [`PrefsStore`].
#[derive(Debug, Clone, Copy)]
pub enum PrefsStoreAdapter {
    /// Browser `localStorage` persistence.
    Browser(WebPrefsStore),
    /// No-op fallback for headless builds.
    Headless(NoopPrefsStore),
}

impl PrefsStore for PrefsStoreAdapter {
    fn load_pref(&self, key: &str) -> Result<Option<String>, String> {
        match self {
            Self::Browser(store) => store.load_pref(key),
            Self::Headless(store) => store.load_pref(key),
        }
    }

    fn save_pref(&self, key: &str, raw: &str) -> Result<(), String> {
        match self {
            Self::Browser(store) => store.save_pref(key, raw),
            Self::Headless(store) => store.save_pref(key, raw),
        }
    }

    fn delete_pref(&self, key: &str) -> Result<(), String> {
        match self {
            Self::Browser(store) => store.delete_pref(key),
            Self::Headless(store) => store.delete_pref(key),
        }
    }
}

/// Adapter enum that erases the concrete navigation backend behind [`NavigationService`].
#[derive(Debug, Clone, Copy)]
pub enum NavigationServiceAdapter {
    /// Browser `location.href` assignment.
    Browser(WebNavigationService),
    /// No-op fallback for headless builds.
    Headless(NoopNavigationService),
}

impl NavigationService for NavigationServiceAdapter {
    fn assign(&self, url: &str) -> Result<(), String> {
        match self {
            Self::Browser(service) => service.assign(url),
            Self::Headless(service) => service.assign(url),
        }
    }
}

/// Adapter enum that erases the concrete document backend behind [`DocumentEnvironment`].
#[derive(Debug, Clone, Copy)]
pub enum DocumentEnvironmentAdapter {
    /// Browser `document`/`navigator` globals.
    Browser(WebDocumentEnvironment),
    /// Always-visible fallback for headless builds.
    Headless(NoopDocumentEnvironment),
}

impl DocumentEnvironment for DocumentEnvironmentAdapter {
    fn is_hidden(&self) -> bool {
        match self {
            Self::Browser(document) => document.is_hidden(),
            Self::Headless(document) => document.is_hidden(),
        }
    }

    fn user_agent(&self) -> Option<String> {
        match self {
            Self::Browser(document) => document.user_agent(),
            Self::Headless(document) => document.user_agent(),
        }
    }

    fn hostname(&self) -> Option<String> {
        match self {
            Self::Browser(document) => document.hostname(),
            Self::Headless(document) => document.hostname(),
        }
    }

    fn apply_theme(&self, dark: bool) {
        match self {
            Self::Browser(document) => document.apply_theme(dark),
            Self::Headless(document) => document.apply_theme(dark),
        }
    }
}

/// Adapter enum that erases the concrete ad queue behind [`AdQueue`].
#[derive(Debug, Clone, Copy)]
pub enum AdQueueAdapter {
    /// `window.adsbygoogle` queue.
    Browser(WebAdQueue),
    /// Always-failing fallback for headless builds.
    Headless(NoopAdQueue),
}

impl AdQueue for AdQueueAdapter {
    fn enqueue(&self, request: &AdSlotRequest) -> Result<(), String> {
        match self {
            Self::Browser(queue) => queue.enqueue(request),
            Self::Headless(queue) => queue.enqueue(request),
        }
    }
}

/// Adapter enum that erases the concrete slot inspector behind [`AdSlotInspector`].
#[derive(Debug, Clone, Copy)]
pub enum AdSlotInspectorAdapter {
    /// DOM-backed inspector.
    Browser(WebAdSlotInspector),
    /// Untouched-slot fallback for headless builds.
    Headless(NoopAdSlotInspector),
}

impl AdSlotInspector for AdSlotInspectorAdapter {
    fn observe(&self, slot_dom_id: &str) -> AdSlotObservation {
        match self {
            Self::Browser(inspector) => inspector.observe(slot_dom_id),
            Self::Headless(inspector) => inspector.observe(slot_dom_id),
        }
    }
}

/// Adapter enum that erases the concrete script loader behind [`ScriptLoader`].
#[derive(Debug, Clone, Copy)]
pub enum ScriptLoaderAdapter {
    /// `<script>` tag injection.
    Browser(WebScriptLoader),
    /// Always-failing fallback for headless builds.
    Headless(NoopScriptLoader),
}

impl ScriptLoader for ScriptLoaderAdapter {
    fn load_script(
        &self,
        request: &ScriptRequest,
        on_load: ScriptLoadCallback,
        on_error: ScriptErrorCallback,
    ) {
        match self {
            Self::Browser(loader) => loader.load_script(request, on_load, on_error),
            Self::Headless(loader) => loader.load_script(request, on_load, on_error),
        }
    }
}

/// Adapter enum that erases the concrete content transport behind [`ContentSource`].
#[derive(Debug, Clone, Copy)]
pub enum ContentSourceAdapter {
    /// `window.fetch` requests.
    Browser(WebContentSource),
    /// Always-failing fallback for headless builds.
    Headless(NoopContentSource),
}

impl ContentSource for ContentSourceAdapter {
    fn get_json<'a>(&'a self, url: &'a str) -> ContentSourceFuture<'a, Result<ContentResponse, String>> {
        match self {
            Self::Browser(source) => source.get_json(url),
            Self::Headless(source) => source.get_json(url),
        }
    }
}

/// Builds the preferences adapter for the compile-time selected host strategy.
pub fn prefs_store() -> PrefsStoreAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => PrefsStoreAdapter::Browser(WebPrefsStore),
        HostStrategy::Headless => PrefsStoreAdapter::Headless(NoopPrefsStore),
    }
}

/// Builds the navigation adapter for the compile-time selected host strategy.
pub fn navigation_service() -> NavigationServiceAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => NavigationServiceAdapter::Browser(WebNavigationService),
        HostStrategy::Headless => NavigationServiceAdapter::Headless(NoopNavigationService),
    }
}

/// Builds the document-environment adapter for the compile-time selected host strategy.
pub fn document_environment() -> DocumentEnvironmentAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => DocumentEnvironmentAdapter::Browser(WebDocumentEnvironment),
        HostStrategy::Headless => DocumentEnvironmentAdapter::Headless(NoopDocumentEnvironment),
    }
}

/// Builds the ad-queue adapter for the compile-time selected host strategy.
pub fn ad_queue() -> AdQueueAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => AdQueueAdapter::Browser(WebAdQueue),
        HostStrategy::Headless => AdQueueAdapter::Headless(NoopAdQueue),
    }
}

/// Builds the ad-slot inspector adapter for the compile-time selected host strategy.
pub fn ad_slot_inspector() -> AdSlotInspectorAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => AdSlotInspectorAdapter::Browser(WebAdSlotInspector),
        HostStrategy::Headless => AdSlotInspectorAdapter::Headless(NoopAdSlotInspector),
    }
}

/// Builds the script-loader adapter for the compile-time selected host strategy.
pub fn script_loader() -> ScriptLoaderAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => ScriptLoaderAdapter::Browser(WebScriptLoader),
        HostStrategy::Headless => ScriptLoaderAdapter::Headless(NoopScriptLoader),
    }
}

/// Builds the content-source adapter for the compile-time selected host strategy.
pub fn content_source() -> ContentSourceAdapter {
    match selected_host_strategy() {
        HostStrategy::Browser => ContentSourceAdapter::Browser(WebContentSource),
        HostStrategy::Headless => ContentSourceAdapter::Headless(NoopContentSource),
    }
}

/// Assembles the full [`HostServices`] bundle for the compile-time selected host strategy.
pub fn build_host_services() -> HostServices {
    HostServices {
        prefs: Rc::new(prefs_store()),
        navigation: Rc::new(navigation_service()),
        document: Rc::new(document_environment()),
        ad_queue: Rc::new(ad_queue()),
        ad_inspector: Rc::new(ad_slot_inspector()),
        scripts: Rc::new(script_loader()),
        content: Rc::new(content_source()),
        host_strategy: selected_host_strategy(),
    }
}
