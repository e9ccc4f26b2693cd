//! App identity, store listings, and deep-link construction.

use percent_encoding::utf8_percent_encode;

use crate::contents::legacy_route::URI_COMPONENT;

/// Public app name.
pub const APP_NAME: &str = "Guia Brechó";
/// Android application package.
pub const ANDROID_PACKAGE: &str = "com.edufelip.meer";
/// App Store numeric application id.
pub const IOS_APP_STORE_ID: &str = "6756424043";
/// Custom URI scheme registered by the native app.
pub const DEEP_LINK_SCHEME: &str = "meer";
/// Canonical public origin of the site.
pub const WEB_BASE_URL: &str = "https://guiabrecho.com.br";

/// Play Store listing URL.
pub fn android_store_url() -> String {
    format!("https://play.google.com/store/apps/details?id={ANDROID_PACKAGE}")
}

/// App Store listing URL.
pub fn ios_store_url() -> String {
    format!("https://apps.apple.com/app/id{IOS_APP_STORE_ID}")
}

/// Deep link opening one content item inside the native app.
pub fn content_deep_link(content_id: &str) -> String {
    format!(
        "{DEEP_LINK_SCHEME}://content/{}",
        utf8_percent_encode(content_id, URI_COMPONENT)
    )
}

/// Deep link opening one store profile inside the native app.
pub fn store_deep_link(store_id: &str) -> String {
    format!(
        "{DEEP_LINK_SCHEME}://store/{}",
        utf8_percent_encode(store_id, URI_COMPONENT)
    )
}

/// Deep link handing a password-reset token to the native app.
pub fn password_reset_deep_link(token: &str) -> String {
    format!(
        "{DEEP_LINK_SCHEME}://reset-password/{}",
        utf8_percent_encode(token, URI_COMPONENT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_urls_embed_app_identifiers() {
        assert_eq!(
            android_store_url(),
            "https://play.google.com/store/apps/details?id=com.edufelip.meer"
        );
        assert_eq!(ios_store_url(), "https://apps.apple.com/app/id6756424043");
    }

    #[test]
    fn deep_links_encode_ids() {
        assert_eq!(content_deep_link("42"), "meer://content/42");
        assert_eq!(content_deep_link("a b/c"), "meer://content/a%20b%2Fc");
        assert_eq!(
            store_deep_link("3f2b8c1e-9a4d-4b7e-8c21-5d6f7a8b9c0d"),
            "meer://store/3f2b8c1e-9a4d-4b7e-8c21-5d6f7a8b9c0d"
        );
        assert_eq!(
            password_reset_deep_link("tok=en/1"),
            "meer://reset-password/tok%3Den%2F1"
        );
    }
}
