//! Light/dark toggle.

use leptos::*;
use site_core::theme::{apply_and_store_theme, ThemePreference};

use crate::host::use_site_runtime;

/// Accessible label for the toggle while `theme` is active.
pub fn theme_toggle_label(theme: ThemePreference) -> &'static str {
    match theme {
        ThemePreference::Dark => "Ativar tema claro",
        ThemePreference::Light => "Ativar tema escuro",
    }
}

fn theme_toggle_glyph(theme: ThemePreference) -> &'static str {
    match theme {
        ThemePreference::Dark => "☀",
        ThemePreference::Light => "☾",
    }
}

#[component]
/// Round button flipping between light and dark themes; the choice is remembered.
pub fn ThemeToggleButton(#[prop(optional, into)] class: String) -> impl IntoView {
    let runtime = use_site_runtime();
    let theme = runtime.theme;
    let class = if class.trim().is_empty() {
        "theme-toggle".to_string()
    } else {
        class
    };

    let toggle = move |_| {
        let next = theme.get_untracked().toggled();
        theme.set(next);
        let stored = runtime.host.with_value(|host| {
            apply_and_store_theme(next, host.document().as_ref(), host.prefs_store().as_ref())
        });
        if let Err(err) = stored {
            logging::warn!("failed to persist theme: {err}");
        }
    };

    view! {
        <button
            type="button"
            class=class
            aria-label=move || theme_toggle_label(theme.get())
            title=move || theme_toggle_label(theme.get())
            on:click=toggle
        >
            <span aria-hidden="true">{move || theme_toggle_glyph(theme.get())}</span>
        </button>
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn label_names_the_theme_it_switches_to() {
        assert_eq!(theme_toggle_label(ThemePreference::Light), "Ativar tema escuro");
        assert_eq!(theme_toggle_label(ThemePreference::Dark), "Ativar tema claro");
        assert_eq!(theme_toggle_glyph(ThemePreference::Dark), "☀");
    }
}
