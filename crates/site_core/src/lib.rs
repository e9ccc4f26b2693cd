//! Target-independent core of the Guia Brechó site.
//!
//! The app hand-off and ad gate state machines take actions and return effects for a host runtime
//! to execute. The API client reaches the backend only through the host's content transport.

pub mod ads;
pub mod api;
pub mod app_link;
pub mod clock;
pub mod contents;
pub mod navigation;
pub mod stores;
pub mod theme;
pub mod urls;
pub mod validation;

pub use ads::{
    reduce_ad_gate, AdGateAction, AdGateEffect, AdGateError, AdGateRender, AdGateState,
    AdsConfig, AdsConsentState, PersistedAdsConsent,
};
pub use api::{ApiConfig, SiteApi, SiteApiError};
pub use app_link::{
    reduce_app_link, AppLinkAction, AppLinkEffect, AppLinkError, AppLinkState, DeepLinkTarget,
    StoreLinks, TriggerMode,
};
pub use clock::{ManualClock, TimerId};
pub use theme::ThemePreference;
