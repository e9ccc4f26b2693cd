//! Persisted ads consent.

use platform_host::PrefsStore;
use serde::{Deserialize, Serialize};

/// Storage key holding the visitor's ads choice.
pub const ADS_CONSENT_STORAGE_KEY: &str = "meer_ads_consent_v1";

/// Visitor's ads consent as seen by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdsConsentState {
    /// No valid stored choice.
    #[default]
    Unknown,
    /// Visitor allowed ads.
    Granted,
    /// Visitor declined ads.
    Denied,
}

/// A choice that may be written to storage. `Unknown` is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersistedAdsConsent {
    /// Visitor allowed ads.
    Granted,
    /// Visitor declined ads.
    Denied,
}

impl PersistedAdsConsent {
    /// Literal stored for this choice.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }
}

impl From<PersistedAdsConsent> for AdsConsentState {
    fn from(value: PersistedAdsConsent) -> Self {
        match value {
            PersistedAdsConsent::Granted => Self::Granted,
            PersistedAdsConsent::Denied => Self::Denied,
        }
    }
}

/// Maps a raw stored value onto a consent state; anything but the two literals is `Unknown`.
pub fn normalize_ads_consent(value: Option<&str>) -> AdsConsentState {
    match value {
        Some("granted") => AdsConsentState::Granted,
        Some("denied") => AdsConsentState::Denied,
        _ => AdsConsentState::Unknown,
    }
}

/// Reads the stored consent, surfacing storage errors.
///
/// # Errors
///
/// Returns the store's error when the read itself fails.
pub fn read_ads_consent_checked(store: &dyn PrefsStore) -> Result<AdsConsentState, String> {
    let raw = store.load_pref(ADS_CONSENT_STORAGE_KEY)?;
    Ok(normalize_ads_consent(raw.as_deref()))
}

/// Reads the stored consent; a missing or failing store reads as `Unknown`.
pub fn read_ads_consent(store: Option<&dyn PrefsStore>) -> AdsConsentState {
    store
        .and_then(|store| read_ads_consent_checked(store).ok())
        .unwrap_or_default()
}

/// Persists an explicit choice. A missing store is a silent no-op.
///
/// # Errors
///
/// Returns the store's error when the write fails.
pub fn write_ads_consent(
    store: Option<&dyn PrefsStore>,
    consent: PersistedAdsConsent,
) -> Result<(), String> {
    match store {
        Some(store) => store.save_pref(ADS_CONSENT_STORAGE_KEY, consent.as_str()),
        None => Ok(()),
    }
}
