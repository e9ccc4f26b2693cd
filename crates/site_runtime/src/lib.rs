//! Leptos runtime for the Guia Brechó site.
//!
//! Components here own timers and DOM side effects; all decisions come from the `site_core`
//! reducers, which this crate drives through the injected [`platform_host::HostServices`].
//! Effect translation is written against [`AppLinkDriver`] and [`AdGateDriver`], so it also runs
//! under a virtual clock outside the browser.

pub mod ads;
pub mod app_link;
pub mod host;
pub mod theme;

pub use ads::{AdConsentGate, AdGateDriver, ContentDetailAd, ContentsListingAd, LandingContentsAd};
pub use app_link::{AppLinkDriver, AutoOpenInApp, OpenInAppButton};
pub use host::{
    use_site_api, use_site_runtime, SiteHostContext, SiteRuntimeContext, SiteRuntimeProvider,
};
pub use theme::ThemeToggleButton;
