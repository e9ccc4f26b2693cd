//! Third-party script loading contracts.

use std::{cell::RefCell, rc::Rc};

/// Callback fired once the script finished loading.
pub type ScriptLoadCallback = Box<dyn FnOnce()>;

/// Callback fired with a reason when the script failed to load.
pub type ScriptErrorCallback = Box<dyn FnOnce(String)>;

/// Description of one external script tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRequest {
    /// DOM id used to de-duplicate the tag across mounts.
    pub id: String,
    /// Absolute script URL.
    pub src: String,
}

/// Host service that injects external scripts and reports their load outcome.
///
/// Exactly one of the two callbacks is invoked per call, possibly synchronously when the script is
/// already present and loaded.
pub trait ScriptLoader {
    /// Loads `request`, reporting readiness through `on_load` or failure through `on_error`.
    fn load_script(
        &self,
        request: &ScriptRequest,
        on_load: ScriptLoadCallback,
        on_error: ScriptErrorCallback,
    );
}

#[derive(Debug, Clone, Copy, Default)]
/// Script loader for hosts that cannot inject scripts; every load fails immediately.
pub struct NoopScriptLoader;

impl ScriptLoader for NoopScriptLoader {
    fn load_script(
        &self,
        _request: &ScriptRequest,
        _on_load: ScriptLoadCallback,
        on_error: ScriptErrorCallback,
    ) {
        on_error("script loading unavailable on this host".to_string());
    }
}

#[derive(Debug, Clone, Default)]
/// Loader that records requests and resolves them synchronously with a fixed outcome.
pub struct ImmediateScriptLoader {
    requests: Rc<RefCell<Vec<ScriptRequest>>>,
    failure: Option<String>,
}

impl ImmediateScriptLoader {
    /// Builds a loader whose loads all fail with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            requests: Rc::default(),
            failure: Some(reason.into()),
        }
    }

    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<ScriptRequest> {
        self.requests.borrow().clone()
    }
}

impl ScriptLoader for ImmediateScriptLoader {
    fn load_script(
        &self,
        request: &ScriptRequest,
        on_load: ScriptLoadCallback,
        on_error: ScriptErrorCallback,
    ) {
        self.requests.borrow_mut().push(request.clone());
        match &self.failure {
            Some(reason) => on_error(reason.clone()),
            None => on_load(),
        }
    }
}
