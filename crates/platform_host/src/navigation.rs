//! Top-level navigation host-service contracts.

use std::{cell::RefCell, rc::Rc};

/// Host service that points the current browsing context at a new URL.
///
/// Assignment is fire-and-forget: custom-scheme URIs may be intercepted by the operating system,
/// and the host reports no success signal either way.
pub trait NavigationService {
    /// Navigates the current tab to `url` (`location.href = url` in a browser).
    fn assign(&self, url: &str) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op navigation service for unsupported targets.
pub struct NoopNavigationService;

impl NavigationService for NoopNavigationService {
    fn assign(&self, _url: &str) -> Result<(), String> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// Navigation service that records every assigned URL in order.
pub struct RecordingNavigationService {
    visited: Rc<RefCell<Vec<String>>>,
}

impl RecordingNavigationService {
    /// Returns every URL assigned so far, oldest first.
    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }
}

impl NavigationService for RecordingNavigationService {
    fn assign(&self, url: &str) -> Result<(), String> {
        self.visited.borrow_mut().push(url.to_string());
        Ok(())
    }
}
