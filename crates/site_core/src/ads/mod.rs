//! Consent-gated ad placement: persisted consent, build config, eligibility, and the slot gate.

pub mod config;
pub mod consent;
pub mod eligibility;
pub mod gate;

pub use config::{AdsConfig, AD_SCRIPT_ID};
pub use consent::{
    normalize_ads_consent, read_ads_consent, read_ads_consent_checked, write_ads_consent,
    AdsConsentState, PersistedAdsConsent, ADS_CONSENT_STORAGE_KEY,
};
pub use eligibility::{is_content_detail_ad_eligible, is_contents_listing_ad_eligible};
pub use gate::{
    classify_ad_state, reduce_ad_gate, AdFailure, AdFillSignal, AdGateAction, AdGateEffect,
    AdGateError, AdGateRender, AdGateState, AdSlotPhase, AdVisibilityState, AD_POLL_INTERVAL,
    AD_RESOLUTION_TIMEOUT, OFFSCREEN_SLOT_STYLE,
};
