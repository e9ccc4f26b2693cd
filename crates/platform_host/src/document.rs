//! Document/tab environment contracts: visibility, user agent, hostname, and root theming.

use std::cell::{Cell, RefCell};

/// Host view of the current document and the browser that renders it.
pub trait DocumentEnvironment {
    /// Returns whether the document is currently hidden (backgrounded tab or app switch).
    fn is_hidden(&self) -> bool;

    /// Returns the client user-agent string, or `None` when no navigator exists.
    fn user_agent(&self) -> Option<String>;

    /// Returns the hostname the page was served from, or `None` outside a browser.
    fn hostname(&self) -> Option<String>;

    /// Applies the site color scheme to the document root.
    fn apply_theme(&self, dark: bool);
}

#[derive(Debug, Clone, Copy, Default)]
/// Document environment for non-browser targets: always visible, no user agent.
pub struct NoopDocumentEnvironment;

impl DocumentEnvironment for NoopDocumentEnvironment {
    fn is_hidden(&self) -> bool {
        false
    }

    fn user_agent(&self) -> Option<String> {
        None
    }

    fn hostname(&self) -> Option<String> {
        None
    }

    fn apply_theme(&self, _dark: bool) {}
}

#[derive(Debug, Default)]
/// Scriptable document environment used by tests and headless hosts.
pub struct StaticDocumentEnvironment {
    hidden: Cell<bool>,
    user_agent: Option<String>,
    hostname: Option<String>,
    dark_theme: RefCell<Option<bool>>,
}

impl StaticDocumentEnvironment {
    /// Builds a visible document reporting `user_agent`.
    pub fn with_user_agent(user_agent: impl Into<String>) -> Self {
        Self {
            hidden: Cell::new(false),
            user_agent: Some(user_agent.into()),
            hostname: None,
            dark_theme: RefCell::new(None),
        }
    }

    /// Reports `hostname` as the serving host.
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    /// Marks the document hidden or visible.
    pub fn set_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
    }

    /// Returns the last applied theme (`Some(true)` for dark), if any.
    pub fn applied_dark_theme(&self) -> Option<bool> {
        *self.dark_theme.borrow()
    }
}

impl DocumentEnvironment for StaticDocumentEnvironment {
    fn is_hidden(&self) -> bool {
        self.hidden.get()
    }

    fn user_agent(&self) -> Option<String> {
        self.user_agent.clone()
    }

    fn hostname(&self) -> Option<String> {
        self.hostname.clone()
    }

    fn apply_theme(&self, dark: bool) {
        *self.dark_theme.borrow_mut() = Some(dark);
    }
}
