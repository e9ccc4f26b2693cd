//! Deep-link hand-off to the native app with a store fallback.
//!
//! Opening a custom-scheme URI gives no success signal. The resolver navigates to the URI, arms a
//! single fallback timer when the platform has a store listing, and on expiry redirects to the
//! store only if the tab is still visible (a hidden tab means the OS switched to the app).

use std::time::Duration;

use thiserror::Error;

use crate::urls;

/// Delay before the store fallback checks whether the app took over.
pub const APP_OPEN_FALLBACK_DELAY: Duration = Duration::from_millis(2_500);

/// Client platform as far as store routing is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// Android phones and tablets (Play Store).
    Android,
    /// iPhone, iPad, and iPod touch (App Store).
    Ios,
    /// Everything else; no store fallback.
    Other,
}

/// Detects the store platform from a user-agent string (case-insensitive substring match).
pub fn detect_platform(user_agent: &str) -> Platform {
    let ua = user_agent.to_lowercase();
    if ua.contains("android") {
        Platform::Android
    } else if ["iphone", "ipad", "ipod"]
        .iter()
        .any(|marker| ua.contains(marker))
    {
        Platform::Ios
    } else {
        Platform::Other
    }
}

/// Store listing URLs per platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLinks {
    /// Play Store listing.
    pub android: String,
    /// App Store listing.
    pub ios: String,
}

impl Default for StoreLinks {
    fn default() -> Self {
        Self {
            android: urls::android_store_url(),
            ios: urls::ios_store_url(),
        }
    }
}

impl StoreLinks {
    /// Returns the listing for `platform`, or `None` when the platform has no store.
    pub fn store_url_for(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::Android => Some(&self.android),
            Platform::Ios => Some(&self.ios),
            Platform::Other => None,
        }
    }
}

/// Resolves the store URL for an optional user agent (`None` means no navigator is available).
pub fn resolve_store_url(user_agent: Option<&str>, links: &StoreLinks) -> Option<String> {
    user_agent
        .map(detect_platform)
        .and_then(|platform| links.store_url_for(platform))
        .map(str::to_string)
}

/// One navigation attempt: the deep link plus the store fallback, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeepLinkTarget {
    /// Custom-scheme URI handed to the OS.
    pub uri: String,
    /// Store listing to fall back to; `None` disables the fallback.
    pub store_url: Option<String>,
}

impl DeepLinkTarget {
    /// Builds a target, preferring `explicit_store_url` and otherwise sniffing `user_agent`.
    pub fn resolve(
        uri: impl Into<String>,
        explicit_store_url: Option<String>,
        user_agent: Option<&str>,
        links: &StoreLinks,
    ) -> Self {
        Self {
            uri: uri.into(),
            store_url: explicit_store_url.or_else(|| resolve_store_url(user_agent, links)),
        }
    }
}

/// Sequence number of a navigation attempt within one mount.
pub type AttemptId = u32;

/// How the attempt was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    /// User gesture (button click); every click starts a fresh attempt.
    Manual,
    /// Fired on mount; at most once per mount and only when a store fallback exists.
    Automatic,
}

/// How an attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppLinkOutcome {
    /// The tab was hidden when the fallback fired; the app presumably opened.
    AppOpened,
    /// The tab was still visible; the visitor was sent to the store.
    RedirectedToStore,
    /// No store URL for this platform, so nothing followed the deep link.
    NoFallback,
    /// The owner was torn down before the fallback fired.
    Abandoned,
}

/// Resolver lifecycle for one mount.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppLinkPhase {
    /// Nothing attempted yet.
    #[default]
    Idle,
    /// Deep link assigned; fallback timer armed.
    AwaitingApp {
        /// Attempt owning the armed timer.
        attempt: AttemptId,
        /// Store listing to open if the tab stays visible.
        store_url: String,
    },
    /// Latest attempt finished.
    Settled {
        /// Attempt that finished.
        attempt: AttemptId,
        /// How it finished.
        outcome: AppLinkOutcome,
    },
}

/// Resolver state for one mount.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppLinkState {
    /// Current lifecycle phase.
    pub phase: AppLinkPhase,
    attempts: AttemptId,
}

impl AppLinkState {
    /// Number of attempts started in this mount.
    pub fn attempts(&self) -> AttemptId {
        self.attempts
    }

    /// Attempt whose fallback timer is currently armed, if any.
    pub fn armed_attempt(&self) -> Option<AttemptId> {
        match self.phase {
            AppLinkPhase::AwaitingApp { attempt, .. } => Some(attempt),
            _ => None,
        }
    }
}

/// Inputs to [`reduce_app_link`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppLinkAction {
    /// Start an attempt.
    Trigger {
        /// Deep link and fallback for this attempt.
        target: DeepLinkTarget,
        /// Click or mount.
        mode: TriggerMode,
    },
    /// The fallback timer for `attempt` fired.
    FallbackElapsed {
        /// Attempt the timer was armed for.
        attempt: AttemptId,
        /// `document.hidden` read at fire time.
        document_hidden: bool,
    },
    /// The owning component unmounted.
    Teardown,
}

/// Side effects the host must perform, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppLinkEffect {
    /// Point the current tab at a URL.
    Navigate(String),
    /// Arm the one-shot fallback timer for `attempt`.
    ArmFallback {
        /// Attempt to report back in [`AppLinkAction::FallbackElapsed`].
        attempt: AttemptId,
        /// Timer delay.
        delay: Duration,
    },
    /// Clear the fallback timer armed for `attempt`.
    CancelFallback {
        /// Attempt whose timer must be cleared.
        attempt: AttemptId,
    },
}

/// Rejected resolver transitions. None of these are user-facing failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppLinkError {
    /// An automatic trigger arrived after this mount already attempted a hand-off.
    #[error("app link already attempted for this mount")]
    AlreadyTriggered,
    /// A fallback fired for an attempt that is no longer armed.
    #[error("fallback for attempt {0} is no longer armed")]
    StaleAttempt(AttemptId),
}

/// Applies an [`AppLinkAction`] and returns the effects to execute in order.
///
/// Navigation to the deep link always precedes arming its fallback, and at most one fallback
/// timer is armed at any time.
///
/// # Errors
///
/// Returns [`AppLinkError::AlreadyTriggered`] for a repeated automatic trigger and
/// [`AppLinkError::StaleAttempt`] for a fallback that was superseded or cancelled. Rejected
/// actions leave `state` untouched and emit no effects.
pub fn reduce_app_link(
    state: &mut AppLinkState,
    action: AppLinkAction,
) -> Result<Vec<AppLinkEffect>, AppLinkError> {
    let mut effects = Vec::new();
    match action {
        AppLinkAction::Trigger { target, mode } => {
            if mode == TriggerMode::Automatic {
                if state.phase != AppLinkPhase::Idle {
                    return Err(AppLinkError::AlreadyTriggered);
                }
                if target.store_url.is_none() {
                    return Ok(effects);
                }
            }

            if let Some(superseded) = state.armed_attempt() {
                effects.push(AppLinkEffect::CancelFallback {
                    attempt: superseded,
                });
            }

            state.attempts += 1;
            let attempt = state.attempts;
            effects.push(AppLinkEffect::Navigate(target.uri));
            state.phase = match target.store_url {
                Some(store_url) => {
                    effects.push(AppLinkEffect::ArmFallback {
                        attempt,
                        delay: APP_OPEN_FALLBACK_DELAY,
                    });
                    AppLinkPhase::AwaitingApp { attempt, store_url }
                }
                None => AppLinkPhase::Settled {
                    attempt,
                    outcome: AppLinkOutcome::NoFallback,
                },
            };
        }
        AppLinkAction::FallbackElapsed {
            attempt,
            document_hidden,
        } => {
            let store_url = match &state.phase {
                AppLinkPhase::AwaitingApp {
                    attempt: armed,
                    store_url,
                } if *armed == attempt => store_url.clone(),
                _ => return Err(AppLinkError::StaleAttempt(attempt)),
            };

            let outcome = if document_hidden {
                AppLinkOutcome::AppOpened
            } else {
                effects.push(AppLinkEffect::Navigate(store_url));
                AppLinkOutcome::RedirectedToStore
            };
            state.phase = AppLinkPhase::Settled { attempt, outcome };
        }
        AppLinkAction::Teardown => {
            if let Some(attempt) = state.armed_attempt() {
                effects.push(AppLinkEffect::CancelFallback { attempt });
                state.phase = AppLinkPhase::Settled {
                    attempt,
                    outcome: AppLinkOutcome::Abandoned,
                };
            }
        }
    }
    Ok(effects)
}
