//! Build-time ad network configuration.

use platform_host::{AdSlotRequest, ScriptRequest};

/// DOM id of the injected ad network script tag.
pub const AD_SCRIPT_ID: &str = "adsense-script";
/// Ad network loader endpoint; the publisher id is appended as `client`.
pub const AD_SCRIPT_ENDPOINT: &str = "https://pagead2.googlesyndication.com/pagead/js/adsbygoogle.js";

/// Ad settings baked into the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdsConfig {
    /// Master switch; only the literal `false` disables ads.
    pub enabled: bool,
    /// Publisher id (`ca-pub-…`).
    pub client_id: String,
    /// Slot id of the contents ad unit.
    pub slot_id: String,
}

impl AdsConfig {
    /// Builds a config from raw environment values, trimming each.
    pub fn from_raw(enabled: Option<&str>, client_id: Option<&str>, slot_id: Option<&str>) -> Self {
        Self {
            enabled: enabled.map(str::trim) != Some("false"),
            client_id: client_id.unwrap_or_default().trim().to_string(),
            slot_id: slot_id.unwrap_or_default().trim().to_string(),
        }
    }

    /// Reads `GUIA_ADS_ENABLED`, `GUIA_ADSENSE_CLIENT_ID`, and
    /// `GUIA_ADSENSE_HOME_CONTENTS_SLOT_ID` as set when the crate was compiled.
    pub fn from_build_env() -> Self {
        Self::from_raw(
            option_env!("GUIA_ADS_ENABLED"),
            option_env!("GUIA_ADSENSE_CLIENT_ID"),
            option_env!("GUIA_ADSENSE_HOME_CONTENTS_SLOT_ID"),
        )
    }

    /// Whether an ad unit can be rendered at all.
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.client_id.is_empty() && !self.slot_id.is_empty()
    }

    /// Loader URL for this publisher.
    pub fn script_src(&self) -> String {
        format!("{AD_SCRIPT_ENDPOINT}?client={}", self.client_id)
    }

    /// Script tag request for the loader.
    pub fn script_request(&self) -> ScriptRequest {
        ScriptRequest {
            id: AD_SCRIPT_ID.to_string(),
            src: self.script_src(),
        }
    }

    /// Fill request for the slot rendered under `slot_dom_id`.
    pub fn slot_request(&self, slot_dom_id: &str) -> AdSlotRequest {
        AdSlotRequest::new(slot_dom_id)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn values_are_trimmed_and_enabled_by_default() {
        let config = AdsConfig::from_raw(None, Some(" ca-pub-123 "), Some("\t987\n"));
        assert_eq!(
            config,
            AdsConfig {
                enabled: true,
                client_id: "ca-pub-123".to_string(),
                slot_id: "987".to_string(),
            }
        );
        assert!(config.is_configured());
        assert_eq!(
            config.script_src(),
            "https://pagead2.googlesyndication.com/pagead/js/adsbygoogle.js?client=ca-pub-123"
        );
        assert_eq!(config.script_request().id, AD_SCRIPT_ID);
    }

    #[test]
    fn only_literal_false_disables() {
        assert!(!AdsConfig::from_raw(Some(" false "), Some("c"), Some("s")).is_configured());
        assert!(AdsConfig::from_raw(Some("0"), Some("c"), Some("s")).is_configured());
        assert!(AdsConfig::from_raw(Some("FALSE"), Some("c"), Some("s")).enabled);
    }

    #[test]
    fn missing_ids_leave_unit_unconfigured() {
        assert!(!AdsConfig::from_raw(None, Some("ca-pub-1"), Some("  ")).is_configured());
        assert!(!AdsConfig::from_raw(None, None, Some("1")).is_configured());
    }
}
