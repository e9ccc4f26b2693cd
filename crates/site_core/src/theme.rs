//! Light/dark theme preference.

use platform_host::{DocumentEnvironment, PrefsStore};

/// Storage key holding the preferred theme.
pub const THEME_STORAGE_KEY: &str = "gb_theme";

/// Site color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    /// Default.
    #[default]
    Light,
    /// Dark.
    Dark,
}

impl ThemePreference {
    /// Stored literal, also used as the CSS `color-scheme` value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Anything but `"dark"` is light.
pub fn normalize_theme(value: Option<&str>) -> ThemePreference {
    match value {
        Some("dark") => ThemePreference::Dark,
        _ => ThemePreference::Light,
    }
}

/// Stored theme; unreadable storage reads as light.
pub fn read_theme(store: &dyn PrefsStore) -> ThemePreference {
    normalize_theme(store.load_pref(THEME_STORAGE_KEY).ok().flatten().as_deref())
}

/// Applies `theme` to the document and persists it.
///
/// # Errors
///
/// Returns the store's error when persisting fails; the document is updated regardless.
pub fn apply_and_store_theme(
    theme: ThemePreference,
    document: &dyn DocumentEnvironment,
    store: &dyn PrefsStore,
) -> Result<(), String> {
    document.apply_theme(theme == ThemePreference::Dark);
    store.save_pref(THEME_STORAGE_KEY, theme.as_str())
}

#[cfg(test)]
mod tests {
    use platform_host::{FailingPrefsStore, MemoryPrefsStore, StaticDocumentEnvironment};

    use super::*;

    #[test]
    fn only_dark_literal_is_dark() {
        assert_eq!(normalize_theme(Some("dark")), ThemePreference::Dark);
        assert_eq!(normalize_theme(Some("Dark")), ThemePreference::Light);
        assert_eq!(normalize_theme(None), ThemePreference::Light);
    }

    #[test]
    fn toggling_applies_and_persists() {
        let store = MemoryPrefsStore::default();
        let document = StaticDocumentEnvironment::default();

        let next = read_theme(&store).toggled();
        apply_and_store_theme(next, &document, &store).expect("persist theme");

        assert_eq!(read_theme(&store), ThemePreference::Dark);
        assert_eq!(document.applied_dark_theme(), Some(true));
    }

    #[test]
    fn storage_failure_still_applies_theme() {
        let store = FailingPrefsStore::new("QuotaExceededError");
        let document = StaticDocumentEnvironment::default();

        assert!(apply_and_store_theme(ThemePreference::Dark, &document, &store).is_err());
        assert_eq!(document.applied_dark_theme(), Some(true));
        assert_eq!(read_theme(&store), ThemePreference::Light);
    }
}
