//! Shared host-bundle model for browser and headless runtime composition.

use std::rc::Rc;

use crate::{
    AdQueue, AdSlotInspector, ContentSource, DocumentEnvironment, NavigationService, NoopAdQueue,
    NoopAdSlotInspector, NoopContentSource, NoopDocumentEnvironment, NoopNavigationService,
    NoopPrefsStore, NoopScriptLoader, PrefsStore, ScriptLoader,
};

/// Stable host strategy selected for the current build/runtime composition path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Browser-backed runtime composition.
    Browser,
    /// Composition with no-op or in-memory adapters (non-wasm builds and tests).
    Headless,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics and runtime inspection.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Headless => "headless",
        }
    }
}

/// Runtime-selected host service bundle injected into the site runtime.
///
/// All environment-specific service selection happens before this bundle crosses into
/// `site_runtime`, which keeps components decoupled from browser adapter details.
#[derive(Clone)]
pub struct HostServices {
    /// Lightweight preference store (consent and theme).
    pub prefs: Rc<dyn PrefsStore>,
    /// Top-level navigation service.
    pub navigation: Rc<dyn NavigationService>,
    /// Document visibility, user agent, and root theming.
    pub document: Rc<dyn DocumentEnvironment>,
    /// Ad network request queue.
    pub ad_queue: Rc<dyn AdQueue>,
    /// Rendered ad-slot inspector.
    pub ad_inspector: Rc<dyn AdSlotInspector>,
    /// External script loader.
    pub scripts: Rc<dyn ScriptLoader>,
    /// Content API transport.
    pub content: Rc<dyn ContentSource>,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Builds a bundle backed entirely by no-op adapters.
    pub fn headless() -> Self {
        Self {
            prefs: Rc::new(NoopPrefsStore),
            navigation: Rc::new(NoopNavigationService),
            document: Rc::new(NoopDocumentEnvironment),
            ad_queue: Rc::new(NoopAdQueue),
            ad_inspector: Rc::new(NoopAdSlotInspector),
            scripts: Rc::new(NoopScriptLoader),
            content: Rc::new(NoopContentSource),
            host_strategy: HostStrategy::Headless,
        }
    }
}

impl std::fmt::Debug for HostServices {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostServices")
            .field("host_strategy", &self.host_strategy)
            .finish_non_exhaustive()
    }
}
