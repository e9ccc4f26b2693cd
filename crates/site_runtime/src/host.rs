//! Host bundle wrapper and the site-wide runtime context.

use std::rc::Rc;

use leptos::*;
use platform_host::{
    AdQueue, AdSlotInspector, ContentSource, DocumentEnvironment, HostServices, NavigationService,
    PrefsStore, ScriptLoader,
};
use site_core::{
    theme::{read_theme, ThemePreference},
    AdsConfig, ApiConfig, SiteApi,
};

#[derive(Clone)]
/// Host service bundle used by the site's effect executors.
pub struct SiteHostContext {
    services: HostServices,
}

impl SiteHostContext {
    /// Wraps an injected host bundle.
    pub fn new(services: HostServices) -> Self {
        Self { services }
    }

    /// Returns the configured preference store.
    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.services.prefs.clone()
    }

    /// Returns the configured navigation service.
    pub fn navigation(&self) -> Rc<dyn NavigationService> {
        self.services.navigation.clone()
    }

    /// Returns the configured document environment.
    pub fn document(&self) -> Rc<dyn DocumentEnvironment> {
        self.services.document.clone()
    }

    /// Returns the ad network request queue.
    pub fn ad_queue(&self) -> Rc<dyn AdQueue> {
        self.services.ad_queue.clone()
    }

    /// Returns the rendered ad-slot inspector.
    pub fn ad_inspector(&self) -> Rc<dyn AdSlotInspector> {
        self.services.ad_inspector.clone()
    }

    /// Returns the external script loader.
    pub fn script_loader(&self) -> Rc<dyn ScriptLoader> {
        self.services.scripts.clone()
    }

    /// Returns the content API transport.
    pub fn content_source(&self) -> Rc<dyn ContentSource> {
        self.services.content.clone()
    }

    /// Builds the API client for the origin `config` selects on this host.
    pub fn site_api(&self, config: &ApiConfig) -> SiteApi {
        let hostname = self.document().hostname();
        SiteApi::new(self.content_source(), config, hostname.as_deref())
    }
}

#[derive(Clone, Copy)]
/// Leptos context shared by every site component.
pub struct SiteRuntimeContext {
    /// Host services for side effects.
    pub host: StoredValue<SiteHostContext>,
    /// Build-time ad configuration.
    pub ads: StoredValue<AdsConfig>,
    /// Active color theme.
    pub theme: RwSignal<ThemePreference>,
    /// Backend API client.
    pub api: StoredValue<SiteApi>,
}

#[component]
/// Provides [`SiteRuntimeContext`] to descendants and applies the stored theme.
pub fn SiteRuntimeProvider(
    /// Browser or headless host bundle assembled by the entry layer.
    host_services: HostServices,
    /// API endpoints; defaults to the values baked in at build time.
    #[prop(optional)]
    api_config: Option<ApiConfig>,
    children: Children,
) -> impl IntoView {
    let host = SiteHostContext::new(host_services);
    let api = host.site_api(&api_config.unwrap_or_else(ApiConfig::from_build_env));
    let theme = read_theme(host.prefs_store().as_ref());
    host.document().apply_theme(theme == ThemePreference::Dark);

    let runtime = SiteRuntimeContext {
        host: store_value(host),
        ads: store_value(AdsConfig::from_build_env()),
        theme: create_rw_signal(theme),
        api: store_value(api),
    };
    provide_context(runtime);

    children().into_view()
}

/// Returns the current [`SiteRuntimeContext`].
///
/// # Panics
///
/// Panics if called outside [`SiteRuntimeProvider`].
pub fn use_site_runtime() -> SiteRuntimeContext {
    use_context::<SiteRuntimeContext>().expect("SiteRuntimeContext not provided")
}

/// Returns a handle on the backend API client.
///
/// # Panics
///
/// Panics if called outside [`SiteRuntimeProvider`].
pub fn use_site_api() -> SiteApi {
    use_site_runtime().api.get_value()
}

#[cfg(test)]
mod tests {
    use platform_host::{MemoryContentSource, StaticDocumentEnvironment};
    use pretty_assertions::assert_eq;

    use super::*;

    fn host_on(hostname: &str) -> SiteHostContext {
        SiteHostContext::new(HostServices {
            document: Rc::new(StaticDocumentEnvironment::default().with_hostname(hostname)),
            content: Rc::new(MemoryContentSource::default()),
            ..HostServices::headless()
        })
    }

    #[test]
    fn api_origin_follows_serving_host() {
        let config = ApiConfig::from_raw(
            Some("https://api.guiabrecho.com.br"),
            Some("https://dev-api.guiabrecho.com.br"),
            None,
        );
        assert_eq!(
            host_on("guiabrecho.com.br").site_api(&config).base_url(),
            Some("https://api.guiabrecho.com.br")
        );
        assert_eq!(
            host_on("localhost").site_api(&config).base_url(),
            Some("https://dev-api.guiabrecho.com.br")
        );
    }
}
