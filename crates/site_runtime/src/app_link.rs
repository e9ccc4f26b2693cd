//! Components that hand the visitor off to the native app.

use std::time::Duration;

use leptos::*;
use leptos::leptos_dom::helpers::TimeoutHandle;
use site_core::{
    app_link::{AttemptId, StoreLinks},
    reduce_app_link, AppLinkAction, AppLinkEffect, AppLinkState, DeepLinkTarget, TriggerMode,
};

use crate::host::{use_site_runtime, SiteHostContext};

/// State and timer hooks an app-link executor borrows from its UI framework.
pub trait AppLinkDriver {
    /// Feeds `action` back into the resolver.
    fn dispatch(&self, action: AppLinkAction);
    /// Schedules the fallback of `attempt` to fire after `delay`.
    fn arm_fallback(&self, attempt: AttemptId, delay: Duration) -> Result<(), String>;
    /// Clears the fallback armed for `attempt`, if it is still pending.
    fn cancel_fallback(&self, attempt: AttemptId);
}

/// Starts an attempt for `deep_link`, sniffing the store from the host user agent unless
/// `store_url` is given.
pub fn trigger_app_link(
    driver: &impl AppLinkDriver,
    host: &SiteHostContext,
    deep_link: &str,
    store_url: Option<String>,
    mode: TriggerMode,
) {
    let user_agent = host.document().user_agent();
    let target = DeepLinkTarget::resolve(
        deep_link,
        store_url,
        user_agent.as_deref(),
        &StoreLinks::default(),
    );
    driver.dispatch(AppLinkAction::Trigger { target, mode });
}

/// Translates one resolver effect into host calls.
pub fn run_app_link_effect(
    driver: &impl AppLinkDriver,
    host: &SiteHostContext,
    effect: AppLinkEffect,
) {
    match effect {
        AppLinkEffect::Navigate(url) => {
            if let Err(err) = host.navigation().assign(&url) {
                logging::warn!("app link navigation to {url} failed: {err}");
            }
        }
        AppLinkEffect::ArmFallback { attempt, delay } => {
            if let Err(err) = driver.arm_fallback(attempt, delay) {
                logging::warn!("app link fallback timer failed: {err}");
            }
        }
        AppLinkEffect::CancelFallback { attempt } => driver.cancel_fallback(attempt),
    }
}

/// Action reported when the fallback timer of `attempt` fires.
pub fn fallback_elapsed(host: &SiteHostContext, attempt: AttemptId) -> AppLinkAction {
    AppLinkAction::FallbackElapsed {
        attempt,
        document_hidden: host.document().is_hidden(),
    }
}

/// Abandons any pending attempt and clears its timer.
pub fn teardown_app_link(driver: &impl AppLinkDriver, state: &mut AppLinkState) {
    if let Ok(effects) = reduce_app_link(state, AppLinkAction::Teardown) {
        for effect in effects {
            if let AppLinkEffect::CancelFallback { attempt } = effect {
                driver.cancel_fallback(attempt);
            }
        }
    }
}

#[derive(Clone, Copy)]
struct AppLinkRuntime {
    host: StoredValue<SiteHostContext>,
    state: RwSignal<AppLinkState>,
    effects: RwSignal<Vec<AppLinkEffect>>,
    timers: StoredValue<Vec<(AttemptId, TimeoutHandle)>>,
}

impl AppLinkRuntime {
    fn install() -> Self {
        let runtime = Self {
            host: use_site_runtime().host,
            state: create_rw_signal(AppLinkState::default()),
            effects: create_rw_signal(Vec::new()),
            timers: store_value(Vec::new()),
        };

        create_effect(move |_| {
            let queued = runtime.effects.get();
            if queued.is_empty() {
                return;
            }
            runtime.effects.set(Vec::new());
            for effect in queued {
                runtime.run_effect(effect);
            }
        });

        on_cleanup(move || runtime.teardown());
        runtime
    }

    fn trigger(self, deep_link: &str, store_url: Option<String>, mode: TriggerMode) {
        let host = self.host.get_value();
        trigger_app_link(&self, &host, deep_link, store_url, mode);
    }

    fn run_effect(self, effect: AppLinkEffect) {
        if let Some(host) = self.host.try_get_value() {
            run_app_link_effect(&self, &host, effect);
        }
    }

    fn teardown(self) {
        if let Some(mut state) = self.state.try_get_untracked() {
            teardown_app_link(&self, &mut state);
        }
    }
}

impl AppLinkDriver for AppLinkRuntime {
    fn dispatch(&self, action: AppLinkAction) {
        let Some(mut state) = self.state.try_get_untracked() else {
            return;
        };
        match reduce_app_link(&mut state, action) {
            Ok(effects) => {
                self.state.set(state);
                if !effects.is_empty() {
                    self.effects.update(|queue| queue.extend(effects));
                }
            }
            Err(err) => logging::debug_warn!("app link: {err}"),
        }
    }

    fn arm_fallback(&self, attempt: AttemptId, delay: Duration) -> Result<(), String> {
        let runtime = *self;
        let fired = move || {
            runtime
                .timers
                .try_update_value(|timers| timers.retain(|(id, _)| *id != attempt));
            if let Some(action) = runtime
                .host
                .try_with_value(|host| fallback_elapsed(host, attempt))
            {
                runtime.dispatch(action);
            }
        };
        let handle = set_timeout_with_handle(fired, delay).map_err(|err| format!("{err:?}"))?;
        self.timers.update_value(|timers| timers.push((attempt, handle)));
        Ok(())
    }

    fn cancel_fallback(&self, attempt: AttemptId) {
        self.timers.try_update_value(|timers| {
            timers.retain(|(id, handle)| {
                if *id == attempt {
                    handle.clear();
                }
                *id != attempt
            })
        });
    }
}

#[component]
/// Button that opens `deep_link` in the app and falls back to the store if the tab stays visible.
pub fn OpenInAppButton(
    /// Custom-scheme link handed to the OS.
    #[prop(into)]
    deep_link: String,
    /// Store listing to use instead of sniffing the user agent.
    #[prop(optional, into)]
    store_url: Option<String>,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let runtime = AppLinkRuntime::install();
    let deep_link = store_value(deep_link);
    let store_url = store_value(store_url);

    view! {
        <button
            type="button"
            class=class
            on:click=move |_| {
                deep_link.with_value(|link| runtime.trigger(link, store_url.get_value(), TriggerMode::Manual));
            }
        >
            {children()}
        </button>
    }
}

#[component]
/// Invisible helper that tries the app once on mount when the platform has a store to fall back to.
pub fn AutoOpenInApp(
    /// Custom-scheme link handed to the OS.
    #[prop(into)]
    deep_link: String,
) -> impl IntoView {
    let runtime = AppLinkRuntime::install();
    runtime.trigger(&deep_link, None, TriggerMode::Automatic);
}
