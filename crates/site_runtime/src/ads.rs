//! Consent-gated ad unit and its page-level wrappers.

use std::{
    sync::atomic::{AtomicU32, Ordering},
    time::Duration,
};

use leptos::*;
use leptos::leptos_dom::helpers::{IntervalHandle, TimeoutHandle};
use platform_host::AdSlotRequest;
use site_core::ads::{
    is_content_detail_ad_eligible, is_contents_listing_ad_eligible, read_ads_consent,
    write_ads_consent, AdFailure, AdGateAction, AdGateEffect, AdGateRender, AdGateState,
    AdsConfig, PersistedAdsConsent, OFFSCREEN_SLOT_STYLE,
};
use site_core::reduce_ad_gate;

use crate::host::{use_site_runtime, SiteHostContext};

static NEXT_SLOT: AtomicU32 = AtomicU32::new(1);

const AD_LABEL: &str = "Publicidade";

/// State, frame, and timer hooks an ad gate executor borrows from its UI framework.
pub trait AdGateDriver {
    /// Feeds `action` back into the gate.
    fn dispatch(&self, action: AdGateAction);
    /// Whether the owning gate is still mounted.
    fn is_live(&self) -> bool;
    /// Runs `task` after the next paint, once the slot element exists.
    fn on_next_frame(&self, task: Box<dyn FnOnce()>);
    /// Starts the fill poll and the resolution deadline. Either failing is an error and leaves
    /// neither running.
    fn start_resolution_timers(&self, poll_interval: Duration, timeout: Duration)
        -> Result<(), String>;
    /// Stops both resolution timers, if running.
    fn stop_resolution_timers(&self);
}

/// DOM id of the `<ins>` element for gate number `slot`.
pub fn slot_dom_id(slot: u32) -> String {
    format!("gb-ad-slot-{slot}")
}

/// Translates one gate effect into host calls for the slot `slot_dom_id`.
pub fn run_ad_gate_effect<D>(
    driver: &D,
    host: &SiteHostContext,
    config: &AdsConfig,
    slot_dom_id: &str,
    effect: AdGateEffect,
) where
    D: AdGateDriver + Clone + 'static,
{
    match effect {
        AdGateEffect::PersistConsent(consent) => {
            if let Err(err) = write_ads_consent(Some(host.prefs_store().as_ref()), consent) {
                logging::warn!("failed to persist ads consent: {err}");
            }
        }
        AdGateEffect::LoadScript => {
            let (ready, failed) = (driver.clone(), driver.clone());
            host.script_loader().load_script(
                &config.script_request(),
                Box::new(move || ready.dispatch(AdGateAction::ScriptReady)),
                Box::new(move |reason| failed.dispatch(AdGateAction::ScriptFailed(reason))),
            );
        }
        AdGateEffect::EnqueueSlot => {
            let (frame_driver, frame_host) = (driver.clone(), host.clone());
            let request = config.slot_request(slot_dom_id);
            driver.on_next_frame(Box::new(move || {
                enqueue_slot(&frame_driver, &frame_host, &request);
            }));
        }
        AdGateEffect::StartResolutionTimers {
            poll_interval,
            timeout,
        } => {
            if let Err(err) = driver.start_resolution_timers(poll_interval, timeout) {
                logging::warn!("ad resolution timers unavailable: {err}");
                driver.dispatch(AdGateAction::ResolutionTimedOut);
            }
        }
        AdGateEffect::StopResolutionTimers => driver.stop_resolution_timers(),
        AdGateEffect::ReportFailure(AdFailure::ScriptLoad(reason)) => {
            logging::debug_warn!("ad script failed to load: {reason}");
        }
        AdGateEffect::ReportFailure(AdFailure::Enqueue(reason)) => {
            logging::debug_warn!("ad network failed to enqueue ad: {reason}");
        }
    }
}

/// Pushes the slot to the ad network unless the gate unmounted before the frame ran.
pub fn enqueue_slot(driver: &impl AdGateDriver, host: &SiteHostContext, request: &AdSlotRequest) {
    if !driver.is_live() {
        return;
    }
    let result = host.ad_queue().enqueue(request);
    driver.dispatch(AdGateAction::EnqueueFinished(result));
}

/// One fill poll: reads the slot and reports what the network rendered.
pub fn poll_slot(driver: &impl AdGateDriver, host: &SiteHostContext, slot_dom_id: &str) {
    driver.dispatch(AdGateAction::PollTick(host.ad_inspector().observe(slot_dom_id)));
}

/// Unmounts the gate, stopping its resolution timers when they are running.
pub fn teardown_ad_gate(driver: &impl AdGateDriver, state: &mut AdGateState) {
    if let Ok(effects) = reduce_ad_gate(state, AdGateAction::Unmounted) {
        if effects.contains(&AdGateEffect::StopResolutionTimers) {
            driver.stop_resolution_timers();
        }
    }
}

#[derive(Clone, Copy)]
struct ResolutionTimers {
    poll: IntervalHandle,
    timeout: TimeoutHandle,
}

#[derive(Clone, Copy)]
struct AdGateRuntime {
    host: StoredValue<SiteHostContext>,
    config: StoredValue<AdsConfig>,
    slot: u32,
    state: RwSignal<AdGateState>,
    effects: RwSignal<Vec<AdGateEffect>>,
    timers: StoredValue<Option<ResolutionTimers>>,
}

impl AdGateRuntime {
    fn install(config: AdsConfig) -> Self {
        let host = use_site_runtime().host;
        let runtime = Self {
            host,
            config: store_value(config),
            slot: NEXT_SLOT.fetch_add(1, Ordering::Relaxed),
            state: create_rw_signal(AdGateState::default()),
            effects: create_rw_signal(Vec::new()),
            timers: store_value(None),
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

        let consent = host.with_value(|host| read_ads_consent(Some(host.prefs_store().as_ref())));
        runtime.dispatch(AdGateAction::Mounted { consent });
        runtime
    }

    fn slot_dom_id(self) -> String {
        slot_dom_id(self.slot)
    }

    fn run_effect(self, effect: AdGateEffect) {
        let (Some(host), Some(config)) = (self.host.try_get_value(), self.config.try_get_value())
        else {
            return;
        };
        run_ad_gate_effect(&self, &host, &config, &self.slot_dom_id(), effect);
    }

    fn teardown(self) {
        if let Some(mut state) = self.state.try_get_untracked() {
            teardown_ad_gate(&self, &mut state);
        }
    }
}

impl AdGateDriver for AdGateRuntime {
    fn dispatch(&self, action: AdGateAction) {
        let Some(mut state) = self.state.try_get_untracked() else {
            return;
        };
        match reduce_ad_gate(&mut state, action) {
            Ok(effects) => {
                if state != self.state.get_untracked() {
                    self.state.set(state);
                }
                if !effects.is_empty() {
                    self.effects.update(|queue| queue.extend(effects));
                }
            }
            Err(err) => logging::debug_warn!("ad gate: {err}"),
        }
    }

    fn is_live(&self) -> bool {
        self.state.try_get_untracked().is_some()
    }

    fn on_next_frame(&self, task: Box<dyn FnOnce()>) {
        request_animation_frame(task);
    }

    fn start_resolution_timers(
        &self,
        poll_interval: Duration,
        timeout: Duration,
    ) -> Result<(), String> {
        let runtime = *self;
        let slot_dom_id = self.slot_dom_id();
        let poll = set_interval_with_handle(
            move || {
                runtime
                    .host
                    .try_with_value(|host| poll_slot(&runtime, host, &slot_dom_id));
            },
            poll_interval,
        );
        let deadline = set_timeout_with_handle(
            move || runtime.dispatch(AdGateAction::ResolutionTimedOut),
            timeout,
        );

        match (poll, deadline) {
            (Ok(poll), Ok(timeout)) => {
                self.timers.set_value(Some(ResolutionTimers { poll, timeout }));
                Ok(())
            }
            (poll, deadline) => {
                let reason = poll
                    .as_ref()
                    .err()
                    .or(deadline.as_ref().err())
                    .map(|err| format!("{err:?}"))
                    .unwrap_or_default();
                if let Ok(poll) = poll {
                    poll.clear();
                }
                if let Ok(deadline) = deadline {
                    deadline.clear();
                }
                Err(reason)
            }
        }
    }

    fn stop_resolution_timers(&self) {
        if let Some(Some(timers)) = self.timers.try_update_value(Option::take) {
            timers.poll.clear();
            timers.timeout.clear();
        }
    }
}

#[component]
/// Ad unit shown only after explicit consent and only once the network confirms a fill.
///
/// Until the fill is confirmed the unit is rendered off-screen, so an empty slot never takes up
/// space on the page.
pub fn AdConsentGate(
    /// Publisher and slot configuration; must be [`AdsConfig::is_configured`].
    config: AdsConfig,
    /// Classes applied once the ad is visible.
    #[prop(optional, into)]
    class: String,
) -> impl IntoView {
    let client_id = config.client_id.clone();
    let slot_id = config.slot_id.clone();
    let runtime = AdGateRuntime::install(config);
    let render = create_memo(move |_| runtime.state.with(AdGateState::render));
    let show_prompt = move || render.get() == AdGateRender::ConsentPrompt;
    let show_slot = move || {
        matches!(
            render.get(),
            AdGateRender::OffscreenSlot | AdGateRender::VisibleSlot
        )
    };
    let slot_style = move || {
        if render.get() == AdGateRender::VisibleSlot {
            ""
        } else {
            OFFSCREEN_SLOT_STYLE
        }
    };
    let slot_class = store_value(class);
    let choose = move |consent| runtime.dispatch(AdGateAction::ConsentChosen(consent));

    view! {
        <Show when=show_prompt>
            <section class="ad-consent" aria-label="Preferência de anúncios">
                <p class="ad-label">{AD_LABEL}</p>
                <p class="ad-consent-copy">
                    "Este espaço pode exibir anúncios personalizados. Você permite?"
                </p>
                <div class="ad-consent-actions">
                    <button type="button" on:click=move |_| choose(PersistedAdsConsent::Granted)>
                        "Permitir anúncios"
                    </button>
                    <button type="button" on:click=move |_| choose(PersistedAdsConsent::Denied)>
                        "Agora não"
                    </button>
                </div>
            </section>
        </Show>
        <Show when=show_slot>
            <section
                class=move || {
                    if render.get() == AdGateRender::VisibleSlot {
                        slot_class.get_value()
                    } else {
                        String::new()
                    }
                }
                style=slot_style
                aria-hidden=move || (render.get() != AdGateRender::VisibleSlot).to_string()
            >
                <p class="ad-label">{AD_LABEL}</p>
                <ins
                    id=runtime.slot_dom_id()
                    class="adsbygoogle"
                    style="display:block;min-height:90px"
                    data-ad-client=client_id.clone()
                    data-ad-slot=slot_id.clone()
                    data-ad-format="auto"
                    data-full-width-responsive="true"
                ></ins>
            </section>
        </Show>
    }
}

#[component]
/// Consent-gated ad for content listings, or a configuration hint in debug builds.
pub fn LandingContentsAd(#[prop(optional, into)] class: String) -> impl IntoView {
    let config = use_site_runtime().ads.get_value();
    if config.is_configured() {
        view! { <AdConsentGate config=config class=class/> }.into_view()
    } else if cfg!(debug_assertions) {
        view! {
            <section class="ad-config-hint">
                <p class="ad-label">{AD_LABEL}</p>
                <p>
                    "Configure GUIA_ADSENSE_CLIENT_ID e GUIA_ADSENSE_HOME_CONTENTS_SLOT_ID para ativar este anúncio."
                </p>
            </section>
        }
        .into_view()
    } else {
        ().into_view()
    }
}

#[component]
/// Ad on a content detail page, shown only when the article carries enough text.
pub fn ContentDetailAd(
    #[prop(into)] title: String,
    #[prop(into)] description: String,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    is_content_detail_ad_eligible(Some(&title), Some(&description))
        .then(|| view! { <LandingContentsAd class=class/> })
}

#[component]
/// Ad on a listing page, shown only for healthy listings with enough items.
pub fn ContentsListingAd(
    has_error: bool,
    item_count: usize,
    #[prop(optional, into)] class: String,
) -> impl IntoView {
    is_contents_listing_ad_eligible(has_error, item_count)
        .then(|| view! { <LandingContentsAd class=class/> })
}


#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        collections::VecDeque,
        rc::Rc,
    };

    use platform_host::{
        AdSlotObservation, HostServices, ImmediateScriptLoader, MemoryAdQueue, MemoryPrefsStore,
        ScriptedAdSlotInspector,
    };
    use pretty_assertions::assert_eq;
    use site_core::{
        ads::{AdsConsentState, AD_POLL_INTERVAL, AD_RESOLUTION_TIMEOUT},
        ManualClock, TimerId,
    };

    use super::*;

    const SLOT: &str = "gb-ad-slot-7";

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Timer {
        Poll,
        Timeout,
    }

    #[derive(Default)]
    struct Gate {
        state: RefCell<AdGateState>,
        unmounted: Cell<bool>,
        inbox: RefCell<VecDeque<AdGateAction>>,
        frames: RefCell<Vec<Box<dyn FnOnce()>>>,
        clock: RefCell<ManualClock<Timer>>,
        timers: RefCell<Vec<TimerId>>,
        timer_failure: Option<String>,
    }

    /// Gate driven by a virtual clock and a manual frame queue.
    #[derive(Clone, Default)]
    struct ClockGate(Rc<Gate>);

    impl AdGateDriver for ClockGate {
        fn dispatch(&self, action: AdGateAction) {
            self.0.inbox.borrow_mut().push_back(action);
        }

        fn is_live(&self) -> bool {
            !self.0.unmounted.get()
        }

        fn on_next_frame(&self, task: Box<dyn FnOnce()>) {
            self.0.frames.borrow_mut().push(task);
        }

        fn start_resolution_timers(
            &self,
            poll_interval: Duration,
            timeout: Duration,
        ) -> Result<(), String> {
            if let Some(reason) = &self.0.timer_failure {
                return Err(reason.clone());
            }
            let mut clock = self.0.clock.borrow_mut();
            let poll = clock.set_interval(poll_interval, Timer::Poll);
            let deadline = clock.set_timeout(timeout, Timer::Timeout);
            self.0.timers.borrow_mut().extend([poll, deadline]);
            Ok(())
        }

        fn stop_resolution_timers(&self) {
            let mut clock = self.0.clock.borrow_mut();
            for id in self.0.timers.borrow_mut().drain(..) {
                clock.clear(id);
            }
        }
    }

    struct Host {
        context: SiteHostContext,
        prefs: MemoryPrefsStore,
        queue: MemoryAdQueue,
        scripts: ImmediateScriptLoader,
    }

    fn host(queue: MemoryAdQueue, inspector: ScriptedAdSlotInspector) -> Host {
        let prefs = MemoryPrefsStore::default();
        let scripts = ImmediateScriptLoader::default();
        let context = SiteHostContext::new(HostServices {
            prefs: Rc::new(prefs.clone()),
            ad_queue: Rc::new(queue.clone()),
            ad_inspector: Rc::new(inspector),
            scripts: Rc::new(scripts.clone()),
            ..HostServices::headless()
        });
        Host {
            context,
            prefs,
            queue,
            scripts,
        }
    }

    fn config() -> AdsConfig {
        AdsConfig::from_raw(None, Some("ca-pub-1"), Some("42"))
    }

    impl ClockGate {
        fn failing_timers() -> Self {
            Self(Rc::new(Gate {
                timer_failure: Some("setInterval unavailable".to_string()),
                ..Gate::default()
            }))
        }

        fn pump(&self, host: &SiteHostContext) {
            loop {
                let Some(action) = self.0.inbox.borrow_mut().pop_front() else {
                    break;
                };
                let reduced = reduce_ad_gate(&mut self.0.state.borrow_mut(), action);
                for effect in reduced.unwrap_or_default() {
                    run_ad_gate_effect(self, host, &config(), SLOT, effect);
                }
            }
        }

        fn paint(&self, host: &SiteHostContext) {
            let frames: Vec<_> = self.0.frames.borrow_mut().drain(..).collect();
            for frame in frames {
                frame();
            }
            self.pump(host);
        }

        /// Advances one poll interval at a time so stopped timers never fire late.
        fn advance(&self, host: &SiteHostContext, by: Duration) {
            let mut elapsed = Duration::ZERO;
            while elapsed < by {
                let mut fired = Vec::new();
                self.0
                    .clock
                    .borrow_mut()
                    .advance(AD_POLL_INTERVAL, |_, timer| fired.push(timer));
                for timer in fired {
                    match timer {
                        Timer::Poll => poll_slot(self, host, SLOT),
                        Timer::Timeout => self.dispatch(AdGateAction::ResolutionTimedOut),
                    }
                    self.pump(host);
                }
                elapsed += AD_POLL_INTERVAL;
            }
        }

        fn unmount(&self) {
            self.0.unmounted.set(true);
            teardown_ad_gate(self, &mut self.0.state.borrow_mut());
        }

        fn render(&self) -> AdGateRender {
            self.0.state.borrow().render()
        }

        fn pending_timers(&self) -> usize {
            self.0.clock.borrow().pending()
        }
    }

    fn mounted_granted(host: &Host) -> ClockGate {
        let gate = ClockGate::default();
        gate.dispatch(AdGateAction::Mounted {
            consent: AdsConsentState::Granted,
        });
        gate.pump(&host.context);
        gate
    }

    #[test]
    fn consent_choice_is_persisted_and_loads_the_script() {
        let host = host(MemoryAdQueue::default(), ScriptedAdSlotInspector::default());
        let gate = ClockGate::default();
        gate.dispatch(AdGateAction::Mounted {
            consent: read_ads_consent(Some(&host.prefs)),
        });
        gate.pump(&host.context);
        assert_eq!(gate.render(), AdGateRender::ConsentPrompt);

        gate.dispatch(AdGateAction::ConsentChosen(PersistedAdsConsent::Granted));
        gate.pump(&host.context);

        assert_eq!(read_ads_consent(Some(&host.prefs)), AdsConsentState::Granted);
        assert_eq!(host.scripts.requests(), vec![config().script_request()]);
        assert_eq!(gate.render(), AdGateRender::OffscreenSlot);
    }

    #[test]
    fn slot_is_enqueued_after_paint_and_shown_once_filled() {
        let host = host(
            MemoryAdQueue::default(),
            ScriptedAdSlotInspector::new([
                AdSlotObservation::untouched(),
                AdSlotObservation::with_status("filled", 250.0),
            ]),
        );
        let gate = mounted_granted(&host);
        assert!(host.queue.requests().is_empty());

        gate.paint(&host.context);
        assert_eq!(host.queue.requests(), vec![AdSlotRequest::new(SLOT)]);
        assert_eq!(gate.pending_timers(), 2);

        gate.advance(&host.context, AD_POLL_INTERVAL * 2);
        assert_eq!(gate.render(), AdGateRender::VisibleSlot);
        assert_eq!(gate.pending_timers(), 0);
    }

    #[test]
    fn gate_unmounted_before_paint_never_enqueues() {
        let host = host(MemoryAdQueue::default(), ScriptedAdSlotInspector::default());
        let gate = mounted_granted(&host);

        gate.unmount();
        gate.paint(&host.context);

        assert!(host.queue.requests().is_empty());
        assert_eq!(gate.pending_timers(), 0);
    }

    #[test]
    fn missing_timers_resolve_hidden() {
        let host = host(MemoryAdQueue::default(), ScriptedAdSlotInspector::default());
        let gate = ClockGate::failing_timers();
        gate.dispatch(AdGateAction::Mounted {
            consent: AdsConsentState::Granted,
        });
        gate.pump(&host.context);
        gate.paint(&host.context);

        assert_eq!(host.queue.requests().len(), 1);
        assert_eq!(gate.render(), AdGateRender::Nothing);
        assert!(gate.0.state.borrow().is_resolved());
    }

    #[test]
    fn never_filled_slot_hides_at_the_deadline() {
        let host = host(MemoryAdQueue::default(), ScriptedAdSlotInspector::default());
        let gate = mounted_granted(&host);
        gate.paint(&host.context);

        gate.advance(&host.context, AD_RESOLUTION_TIMEOUT - AD_POLL_INTERVAL);
        assert_eq!(gate.render(), AdGateRender::OffscreenSlot);

        gate.advance(&host.context, AD_POLL_INTERVAL);
        assert_eq!(gate.render(), AdGateRender::Nothing);
        assert_eq!(gate.pending_timers(), 0);
    }

    #[test]
    fn unmount_while_polling_clears_both_timers() {
        let host = host(MemoryAdQueue::default(), ScriptedAdSlotInspector::default());
        let gate = mounted_granted(&host);
        gate.paint(&host.context);
        assert_eq!(gate.pending_timers(), 2);

        gate.unmount();
        assert_eq!(gate.pending_timers(), 0);
    }

    #[test]
    fn enqueue_failure_hides_the_slot() {
        let host = host(
            MemoryAdQueue::failing("adsbygoogle missing"),
            ScriptedAdSlotInspector::default(),
        );
        let gate = mounted_granted(&host);
        gate.paint(&host.context);

        assert_eq!(gate.render(), AdGateRender::Nothing);
        assert_eq!(gate.pending_timers(), 0);
    }

    #[test]
    fn slot_ids_are_numbered() {
        assert_eq!(slot_dom_id(7), SLOT);
    }
}
