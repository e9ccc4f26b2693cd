//! Consent-gated ad slot with bounded fill resolution.
//!
//! The ad network offers no completion callback, so after the fill request is queued the host
//! polls the slot's DOM every [`AD_POLL_INTERVAL`] and classifies what it sees with
//! [`classify_ad_state`]. A hard [`AD_RESOLUTION_TIMEOUT`] hides the slot if no verdict arrives.
//! The slot stays off-screen until it is confirmed filled, so an empty slot never shifts layout.

use std::time::Duration;

use platform_host::AdSlotObservation;
use thiserror::Error;

use super::consent::{AdsConsentState, PersistedAdsConsent};

/// Interval between slot DOM polls once the request is queued.
pub const AD_POLL_INTERVAL: Duration = Duration::from_millis(250);
/// Upper bound on waiting for a fill verdict, measured from the queued request.
pub const AD_RESOLUTION_TIMEOUT: Duration = Duration::from_millis(7_000);

/// Status attribute value for a served creative.
pub const AD_STATUS_FILLED: &str = "filled";
/// Status attribute value for a slot the network left empty.
pub const AD_STATUS_UNFILLED: &str = "unfilled";

/// Fill verdict derived from one slot observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdFillSignal {
    /// No verdict yet.
    Pending,
    /// Creative rendered.
    Filled,
    /// Network reported no fill.
    Unfilled,
}

/// Classifies a slot's status attribute and creative frame height.
///
/// `filled` only counts once the frame has a positive, finite height; the network sets the
/// attribute before the frame has laid out.
pub fn classify_ad_state(status: Option<&str>, frame_height: f64) -> AdFillSignal {
    match status {
        Some(AD_STATUS_UNFILLED) => AdFillSignal::Unfilled,
        Some(AD_STATUS_FILLED) if frame_height.is_finite() && frame_height > 0.0 => {
            AdFillSignal::Filled
        }
        _ => AdFillSignal::Pending,
    }
}

/// Whether the slot should take up space on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdVisibilityState {
    /// Outcome unknown; rendered off-screen.
    #[default]
    Pending,
    /// Confirmed filled.
    Visible,
    /// Unfilled, declined, failed, or timed out.
    Hidden,
}

/// Progress of the single fill request a mount may make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdSlotPhase {
    /// Waiting for consent and the network script.
    #[default]
    AwaitingScript,
    /// Fill request handed to the host queue.
    Enqueuing,
    /// Request queued; polling the slot.
    Polling {
        /// Poll ticks observed so far.
        ticks: u32,
    },
    /// Verdict reached (or gave up); nothing else will happen this mount.
    Resolved,
}

/// Why a slot resolved hidden without a network verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdFailure {
    /// The network script failed to load.
    ScriptLoad(String),
    /// Pushing the fill request threw.
    Enqueue(String),
}

/// What the widget renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdGateRender {
    /// Allow/decline prompt; no ad container.
    ConsentPrompt,
    /// Ad container positioned off-screen, transparent, and inert.
    OffscreenSlot,
    /// Ad container with the caller's visible styling.
    VisibleSlot,
    /// Nothing at all.
    Nothing,
}

/// Inline style for the unresolved container.
pub const OFFSCREEN_SLOT_STYLE: &str =
    "position:absolute;left:-10000px;opacity:0;pointer-events:none;";

/// Gate state for one mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdGateState {
    /// Consent dimension.
    pub consent: AdsConsentState,
    /// Visibility dimension.
    pub visibility: AdVisibilityState,
    /// Fill request progress.
    pub slot: AdSlotPhase,
}

impl AdGateState {
    /// Fresh state for a mount that read `consent` from storage.
    pub fn mounted(consent: AdsConsentState) -> Self {
        let mut state = Self {
            consent,
            ..Self::default()
        };
        if consent == AdsConsentState::Denied {
            state.visibility = AdVisibilityState::Hidden;
            state.slot = AdSlotPhase::Resolved;
        }
        state
    }

    /// What the widget renders in this state.
    pub fn render(&self) -> AdGateRender {
        match (self.consent, self.visibility) {
            (AdsConsentState::Unknown, _) => AdGateRender::ConsentPrompt,
            (_, AdVisibilityState::Hidden) | (AdsConsentState::Denied, _) => AdGateRender::Nothing,
            (AdsConsentState::Granted, AdVisibilityState::Pending) => AdGateRender::OffscreenSlot,
            (AdsConsentState::Granted, AdVisibilityState::Visible) => AdGateRender::VisibleSlot,
        }
    }

    /// Whether the mount has reached its terminal visibility.
    pub fn is_resolved(&self) -> bool {
        self.slot == AdSlotPhase::Resolved
    }

    fn resolve(&mut self, visibility: AdVisibilityState) {
        self.visibility = visibility;
        self.slot = AdSlotPhase::Resolved;
    }
}

/// Inputs to [`reduce_ad_gate`].
#[derive(Debug, Clone, PartialEq)]
pub enum AdGateAction {
    /// The widget mounted with the consent read from storage.
    Mounted {
        /// Stored consent.
        consent: AdsConsentState,
    },
    /// The visitor answered the prompt.
    ConsentChosen(PersistedAdsConsent),
    /// The network script finished loading.
    ScriptReady,
    /// The network script failed to load.
    ScriptFailed(String),
    /// The host pushed the fill request; `Err` carries what the network threw.
    EnqueueFinished(Result<(), String>),
    /// One poll of the slot DOM.
    PollTick(AdSlotObservation),
    /// The resolution timeout elapsed.
    ResolutionTimedOut,
    /// The widget unmounted.
    Unmounted,
}

/// Side effects the host must perform, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdGateEffect {
    /// Persist the visitor's choice.
    PersistConsent(PersistedAdsConsent),
    /// Load the network script and report back with `ScriptReady`/`ScriptFailed`.
    LoadScript,
    /// Push the fill request and report back with `EnqueueFinished`.
    EnqueueSlot,
    /// Start the poll interval and the resolution timeout.
    StartResolutionTimers {
        /// Poll cadence.
        poll_interval: Duration,
        /// Hard deadline.
        timeout: Duration,
    },
    /// Clear both resolution timers.
    StopResolutionTimers,
    /// Record a failure that hid the slot (debug builds only).
    ReportFailure(AdFailure),
}

/// Rejected gate transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdGateError {
    /// The visitor already chose during this mount or a previous one.
    #[error("ads consent already decided")]
    ConsentAlreadyDecided,
    /// The action does not apply in the current state (e.g. script ready without consent).
    #[error("{action} not permitted while {state}")]
    NotPermitted {
        /// Rejected action.
        action: &'static str,
        /// Short description of the blocking state.
        state: &'static str,
    },
}

/// Applies an [`AdGateAction`] and returns the effects to execute in order.
///
/// Once the slot is resolved every later network event (ticks, timeouts, script callbacks,
/// enqueue results) is absorbed as a no-op so the verdict cannot change.
///
/// # Errors
///
/// Returns [`AdGateError`] for choices made twice and for network events that arrive before the
/// visitor granted consent. Rejected actions leave `state` untouched and emit no effects.
pub fn reduce_ad_gate(
    state: &mut AdGateState,
    action: AdGateAction,
) -> Result<Vec<AdGateEffect>, AdGateError> {
    let mut effects = Vec::new();

    match action {
        AdGateAction::Mounted { consent } => {
            *state = AdGateState::mounted(consent);
            if consent == AdsConsentState::Granted {
                effects.push(AdGateEffect::LoadScript);
            }
        }
        AdGateAction::ConsentChosen(choice) => {
            if state.consent != AdsConsentState::Unknown {
                return Err(AdGateError::ConsentAlreadyDecided);
            }
            state.consent = choice.into();
            effects.push(AdGateEffect::PersistConsent(choice));
            match choice {
                PersistedAdsConsent::Granted => effects.push(AdGateEffect::LoadScript),
                PersistedAdsConsent::Denied => state.resolve(AdVisibilityState::Hidden),
            }
        }
        AdGateAction::Unmounted => {
            if matches!(state.slot, AdSlotPhase::Polling { .. }) {
                effects.push(AdGateEffect::StopResolutionTimers);
            }
            state.slot = AdSlotPhase::Resolved;
        }
        _ if state.is_resolved() => {}
        _ if state.consent != AdsConsentState::Granted => {
            return Err(AdGateError::NotPermitted {
                action: action_name(&action),
                state: "consent is not granted",
            });
        }
        AdGateAction::ScriptReady => {
            if state.slot != AdSlotPhase::AwaitingScript {
                return Err(AdGateError::NotPermitted {
                    action: "script ready",
                    state: "the fill request was already made",
                });
            }
            state.slot = AdSlotPhase::Enqueuing;
            effects.push(AdGateEffect::EnqueueSlot);
        }
        AdGateAction::ScriptFailed(reason) => {
            state.resolve(AdVisibilityState::Hidden);
            effects.push(AdGateEffect::ReportFailure(AdFailure::ScriptLoad(reason)));
        }
        AdGateAction::EnqueueFinished(result) => {
            if state.slot != AdSlotPhase::Enqueuing {
                return Err(AdGateError::NotPermitted {
                    action: "enqueue finished",
                    state: "no fill request is in flight",
                });
            }
            match result {
                Ok(()) => {
                    state.slot = AdSlotPhase::Polling { ticks: 0 };
                    effects.push(AdGateEffect::StartResolutionTimers {
                        poll_interval: AD_POLL_INTERVAL,
                        timeout: AD_RESOLUTION_TIMEOUT,
                    });
                }
                Err(reason) => {
                    state.resolve(AdVisibilityState::Hidden);
                    effects.push(AdGateEffect::ReportFailure(AdFailure::Enqueue(reason)));
                }
            }
        }
        AdGateAction::PollTick(observation) => {
            let AdSlotPhase::Polling { ticks } = state.slot else {
                return Err(AdGateError::NotPermitted {
                    action: "poll tick",
                    state: "polling has not started",
                });
            };
            match classify_ad_state(observation.status.as_deref(), observation.frame_height) {
                AdFillSignal::Pending => {
                    state.slot = AdSlotPhase::Polling { ticks: ticks + 1 };
                }
                AdFillSignal::Filled => {
                    state.resolve(AdVisibilityState::Visible);
                    effects.push(AdGateEffect::StopResolutionTimers);
                }
                AdFillSignal::Unfilled => {
                    state.resolve(AdVisibilityState::Hidden);
                    effects.push(AdGateEffect::StopResolutionTimers);
                }
            }
        }
        AdGateAction::ResolutionTimedOut => {
            if !matches!(state.slot, AdSlotPhase::Polling { .. }) {
                return Err(AdGateError::NotPermitted {
                    action: "resolution timeout",
                    state: "polling has not started",
                });
            }
            state.resolve(AdVisibilityState::Hidden);
            effects.push(AdGateEffect::StopResolutionTimers);
        }
    }

    Ok(effects)
}

fn action_name(action: &AdGateAction) -> &'static str {
    match action {
        AdGateAction::Mounted { .. } => "mounted",
        AdGateAction::ConsentChosen(_) => "consent chosen",
        AdGateAction::ScriptReady => "script ready",
        AdGateAction::ScriptFailed(_) => "script failed",
        AdGateAction::EnqueueFinished(_) => "enqueue finished",
        AdGateAction::PollTick(_) => "poll tick",
        AdGateAction::ResolutionTimedOut => "resolution timeout",
        AdGateAction::Unmounted => "unmounted",
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::clock::ManualClock;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Timer {
        Poll,
        Timeout,
    }

    /// Drives a gate through the host loop with scripted slot observations.
    struct Harness {
        state: AdGateState,
        clock: ManualClock<Timer>,
        timers: Vec<crate::clock::TimerId>,
        observations: std::collections::VecDeque<AdSlotObservation>,
        ticks_seen: u32,
        effects: Vec<AdGateEffect>,
    }

    impl Harness {
        fn granted(observations: Vec<AdSlotObservation>) -> Self {
            let mut harness = Self {
                state: AdGateState::default(),
                clock: ManualClock::default(),
                timers: Vec::new(),
                observations: observations.into(),
                ticks_seen: 0,
                effects: Vec::new(),
            };
            harness.dispatch(AdGateAction::Mounted {
                consent: AdsConsentState::Granted,
            });
            harness.dispatch(AdGateAction::ScriptReady);
            harness.dispatch(AdGateAction::EnqueueFinished(Ok(())));
            harness
        }

        fn dispatch(&mut self, action: AdGateAction) {
            let effects = reduce_ad_gate(&mut self.state, action).expect("gate transition");
            for effect in effects {
                match &effect {
                    AdGateEffect::StartResolutionTimers {
                        poll_interval,
                        timeout,
                    } => {
                        self.timers
                            .push(self.clock.set_interval(*poll_interval, Timer::Poll));
                        self.timers
                            .push(self.clock.set_timeout(*timeout, Timer::Timeout));
                    }
                    AdGateEffect::StopResolutionTimers => {
                        for id in self.timers.drain(..) {
                            self.clock.clear(id);
                        }
                    }
                    _ => {}
                }
                self.effects.push(effect);
            }
        }

        fn advance(&mut self, by: Duration) {
            let mut clock = std::mem::take(&mut self.clock);
            clock.advance(by, |clock, timer| {
                std::mem::swap(&mut self.clock, clock);
                let action = match timer {
                    Timer::Poll => {
                        self.ticks_seen += 1;
                        AdGateAction::PollTick(
                            self.observations.pop_front().unwrap_or_default(),
                        )
                    }
                    Timer::Timeout => AdGateAction::ResolutionTimedOut,
                };
                self.dispatch(action);
                std::mem::swap(&mut self.clock, clock);
            });
            self.clock = clock;
        }
    }

    #[test]
    fn classification_requires_status_and_positive_frame() {
        assert_eq!(classify_ad_state(Some("unfilled"), 0.0), AdFillSignal::Unfilled);
        assert_eq!(classify_ad_state(Some("unfilled"), 250.0), AdFillSignal::Unfilled);
        assert_eq!(classify_ad_state(Some("filled"), 90.0), AdFillSignal::Filled);
        assert_eq!(classify_ad_state(Some("filled"), 0.0), AdFillSignal::Pending);
        assert_eq!(classify_ad_state(Some("filled"), f64::NAN), AdFillSignal::Pending);
        assert_eq!(classify_ad_state(None, 90.0), AdFillSignal::Pending);
        assert_eq!(classify_ad_state(Some("done"), 90.0), AdFillSignal::Pending);
    }

    #[test]
    fn offscreen_style_parks_slot_without_sizing_it() {
        let declarations: Vec<&str> = OFFSCREEN_SLOT_STYLE
            .split(';')
            .filter(|declaration| !declaration.is_empty())
            .collect();
        assert_eq!(
            declarations,
            vec![
                "position:absolute",
                "left:-10000px",
                "opacity:0",
                "pointer-events:none"
            ]
        );
    }

    #[test]
    fn unknown_consent_renders_prompt_without_slot() {
        let mut state = AdGateState::default();
        let effects = reduce_ad_gate(
            &mut state,
            AdGateAction::Mounted {
                consent: AdsConsentState::Unknown,
            },
        )
        .expect("mount");

        assert!(effects.is_empty());
        assert_eq!(state.render(), AdGateRender::ConsentPrompt);
        assert_eq!(
            reduce_ad_gate(&mut state, AdGateAction::ScriptReady),
            Err(AdGateError::NotPermitted {
                action: "script ready",
                state: "consent is not granted"
            })
        );
        assert_eq!(state.render(), AdGateRender::ConsentPrompt);
    }

    #[test]
    fn granting_consent_persists_and_loads_script() {
        let mut state = AdGateState::mounted(AdsConsentState::Unknown);
        let effects = reduce_ad_gate(
            &mut state,
            AdGateAction::ConsentChosen(PersistedAdsConsent::Granted),
        )
        .expect("grant");

        assert_eq!(
            effects,
            vec![
                AdGateEffect::PersistConsent(PersistedAdsConsent::Granted),
                AdGateEffect::LoadScript
            ]
        );
        assert_eq!(state.render(), AdGateRender::OffscreenSlot);
    }

    #[test]
    fn declining_consent_persists_and_hides() {
        let mut state = AdGateState::mounted(AdsConsentState::Unknown);
        let effects = reduce_ad_gate(
            &mut state,
            AdGateAction::ConsentChosen(PersistedAdsConsent::Denied),
        )
        .expect("decline");

        assert_eq!(
            effects,
            vec![AdGateEffect::PersistConsent(PersistedAdsConsent::Denied)]
        );
        assert_eq!(state.visibility, AdVisibilityState::Hidden);
        assert_eq!(state.render(), AdGateRender::Nothing);
        assert_eq!(
            reduce_ad_gate(
                &mut state,
                AdGateAction::ConsentChosen(PersistedAdsConsent::Granted)
            ),
            Err(AdGateError::ConsentAlreadyDecided)
        );
    }

    #[test]
    fn stored_denial_mounts_hidden_without_effects() {
        let mut state = AdGateState::default();
        let effects = reduce_ad_gate(
            &mut state,
            AdGateAction::Mounted {
                consent: AdsConsentState::Denied,
            },
        )
        .expect("mount");
        assert!(effects.is_empty());
        assert_eq!(state.render(), AdGateRender::Nothing);
    }

    #[test]
    fn slot_is_enqueued_exactly_once() {
        let mut state = AdGateState::mounted(AdsConsentState::Granted);
        assert_eq!(
            reduce_ad_gate(&mut state, AdGateAction::ScriptReady),
            Ok(vec![AdGateEffect::EnqueueSlot])
        );
        assert!(reduce_ad_gate(&mut state, AdGateAction::ScriptReady).is_err());
        assert_eq!(state.slot, AdSlotPhase::Enqueuing);
    }

    #[test]
    fn enqueue_failure_hides_without_retry() {
        let mut state = AdGateState::mounted(AdsConsentState::Granted);
        reduce_ad_gate(&mut state, AdGateAction::ScriptReady).expect("ready");
        let effects = reduce_ad_gate(
            &mut state,
            AdGateAction::EnqueueFinished(Err("TagError: no slot size".to_string())),
        )
        .expect("enqueue failed");

        assert_eq!(
            effects,
            vec![AdGateEffect::ReportFailure(AdFailure::Enqueue(
                "TagError: no slot size".to_string()
            ))]
        );
        assert_eq!(state.render(), AdGateRender::Nothing);
        assert_eq!(reduce_ad_gate(&mut state, AdGateAction::ScriptReady), Ok(vec![]));
    }

    #[test]
    fn script_failure_hides_immediately() {
        let mut state = AdGateState::mounted(AdsConsentState::Granted);
        let effects = reduce_ad_gate(
            &mut state,
            AdGateAction::ScriptFailed("net::ERR_BLOCKED_BY_CLIENT".to_string()),
        )
        .expect("script failed");

        assert_eq!(
            effects,
            vec![AdGateEffect::ReportFailure(AdFailure::ScriptLoad(
                "net::ERR_BLOCKED_BY_CLIENT".to_string()
            ))]
        );
        assert_eq!(state.visibility, AdVisibilityState::Hidden);
    }

    #[test]
    fn visible_only_when_filled_status_and_frame_coincide() {
        let mut harness = Harness::granted(vec![
            AdSlotObservation::with_status("filled", 0.0),
            AdSlotObservation {
                status: None,
                frame_height: 90.0,
            },
            AdSlotObservation::with_status("filled", 90.0),
        ]);

        harness.advance(Duration::from_millis(500));
        assert_eq!(harness.state.visibility, AdVisibilityState::Pending);
        assert_eq!(harness.state.render(), AdGateRender::OffscreenSlot);

        harness.advance(Duration::from_millis(250));
        assert_eq!(harness.state.visibility, AdVisibilityState::Visible);
        assert_eq!(harness.state.render(), AdGateRender::VisibleSlot);
        assert_eq!(harness.clock.pending(), 0);
    }

    #[test]
    fn unfilled_after_two_ticks_hides_and_stops_polling() {
        let mut harness = Harness::granted(vec![
            AdSlotObservation::untouched(),
            AdSlotObservation::with_status("unfilled", 0.0),
        ]);

        harness.advance(AD_RESOLUTION_TIMEOUT * 2);

        assert_eq!(harness.ticks_seen, 2);
        assert_eq!(harness.state.render(), AdGateRender::Nothing);
        assert_eq!(harness.clock.pending(), 0);
        assert_eq!(
            harness.effects.last(),
            Some(&AdGateEffect::StopResolutionTimers)
        );
    }

    #[test]
    fn timeout_hides_slot_that_never_fills() {
        let mut harness = Harness::granted(Vec::new());

        harness.advance(AD_RESOLUTION_TIMEOUT - Duration::from_millis(1));
        assert_eq!(harness.state.visibility, AdVisibilityState::Pending);

        harness.advance(Duration::from_millis(1));
        assert_eq!(harness.state.visibility, AdVisibilityState::Hidden);
        assert!(harness.state.is_resolved());
        assert_eq!(harness.clock.pending(), 0);
        assert_eq!(
            harness.ticks_seen,
            (AD_RESOLUTION_TIMEOUT.as_millis() / AD_POLL_INTERVAL.as_millis()) as u32
        );
    }

    #[test]
    fn resolution_is_terminal_against_late_events() {
        let mut harness = Harness::granted(vec![AdSlotObservation::with_status("filled", 120.0)]);
        harness.advance(AD_POLL_INTERVAL);
        assert_eq!(harness.state.visibility, AdVisibilityState::Visible);

        let resolved = harness.state;
        for late in [
            AdGateAction::PollTick(AdSlotObservation::with_status("unfilled", 0.0)),
            AdGateAction::ResolutionTimedOut,
            AdGateAction::ScriptReady,
            AdGateAction::ScriptFailed("late".to_string()),
            AdGateAction::EnqueueFinished(Ok(())),
        ] {
            assert_eq!(reduce_ad_gate(&mut harness.state, late), Ok(vec![]));
        }
        assert_eq!(harness.state, resolved);
    }

    #[test]
    fn unmount_while_polling_stops_timers() {
        let mut state = AdGateState::mounted(AdsConsentState::Granted);
        reduce_ad_gate(&mut state, AdGateAction::ScriptReady).expect("ready");
        reduce_ad_gate(&mut state, AdGateAction::EnqueueFinished(Ok(()))).expect("queued");

        assert_eq!(
            reduce_ad_gate(&mut state, AdGateAction::Unmounted),
            Ok(vec![AdGateEffect::StopResolutionTimers])
        );
        assert_eq!(
            reduce_ad_gate(
                &mut state,
                AdGateAction::PollTick(AdSlotObservation::with_status("filled", 90.0))
            ),
            Ok(vec![])
        );
    }

    #[test]
    fn consent_click_drives_memory_host_to_visible_slot() {
        use std::{cell::RefCell, rc::Rc};

        use platform_host::{
            AdQueue, AdSlotInspector, ImmediateScriptLoader, MemoryAdQueue, MemoryPrefsStore,
            ScriptLoader, ScriptedAdSlotInspector,
        };

        use crate::ads::{config::AdsConfig, consent::read_ads_consent, write_ads_consent};

        let config = AdsConfig::from_raw(None, Some("ca-pub-1"), Some("42"));
        let prefs = MemoryPrefsStore::default();
        let scripts = ImmediateScriptLoader::default();
        let queue = MemoryAdQueue::default();
        let inspector = ScriptedAdSlotInspector::new([
            AdSlotObservation::untouched(),
            AdSlotObservation::with_status("filled", 250.0),
        ]);
        let inbox: Rc<RefCell<Vec<AdGateAction>>> = Rc::default();
        let mut state = AdGateState::default();
        let mut clock = ManualClock::<Timer>::default();

        let mut pending = vec![
            AdGateAction::Mounted {
                consent: read_ads_consent(Some(&prefs)),
            },
            AdGateAction::ConsentChosen(PersistedAdsConsent::Granted),
        ];
        while !pending.is_empty() {
            for action in std::mem::take(&mut pending) {
                for effect in reduce_ad_gate(&mut state, action).expect("transition") {
                    match effect {
                        AdGateEffect::PersistConsent(consent) => {
                            write_ads_consent(Some(&prefs), consent).expect("persist");
                        }
                        AdGateEffect::LoadScript => {
                            let (ok, err) = (inbox.clone(), inbox.clone());
                            scripts.load_script(
                                &config.script_request(),
                                Box::new(move || ok.borrow_mut().push(AdGateAction::ScriptReady)),
                                Box::new(move |reason| {
                                    err.borrow_mut().push(AdGateAction::ScriptFailed(reason))
                                }),
                            );
                        }
                        AdGateEffect::EnqueueSlot => {
                            let result = queue.enqueue(&config.slot_request("slot-1"));
                            pending.push(AdGateAction::EnqueueFinished(result));
                        }
                        AdGateEffect::StartResolutionTimers {
                            poll_interval,
                            timeout,
                        } => {
                            clock.set_interval(poll_interval, Timer::Poll);
                            clock.set_timeout(timeout, Timer::Timeout);
                        }
                        other => panic!("unexpected effect {other:?}"),
                    }
                }
            }
            pending.extend(inbox.borrow_mut().drain(..));
        }
        assert_eq!(state.render(), AdGateRender::OffscreenSlot);

        clock.advance(AD_POLL_INTERVAL * 2, |_, timer| {
            assert_eq!(timer, Timer::Poll);
            let observation = inspector.observe("slot-1");
            reduce_ad_gate(&mut state, AdGateAction::PollTick(observation)).expect("tick");
        });

        assert_eq!(state.render(), AdGateRender::VisibleSlot);
        assert_eq!(read_ads_consent(Some(&prefs)), AdsConsentState::Granted);
        assert_eq!(scripts.requests(), vec![config.script_request()]);
        assert_eq!(queue.requests().len(), 1);
        assert_eq!(inspector.reads(), 2);
    }
}
