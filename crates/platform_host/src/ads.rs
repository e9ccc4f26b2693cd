//! Ad-network host-service contracts: the slot fill queue and the rendered-slot inspector.

use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    rc::Rc,
};

use serde::Serialize;

/// Fill request pushed onto the ad network queue for one slot.
///
/// The network reads slot configuration from the DOM node itself, so the serialized payload is an
/// empty object; `slot_dom_id` only identifies the slot on the host side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdSlotRequest {
    /// DOM id of the `<ins>` element the request fills.
    #[serde(skip)]
    pub slot_dom_id: String,
}

impl AdSlotRequest {
    /// Builds a request for the slot rendered under `slot_dom_id`.
    pub fn new(slot_dom_id: impl Into<String>) -> Self {
        Self {
            slot_dom_id: slot_dom_id.into(),
        }
    }
}

/// One observation of an ad slot's rendered DOM state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AdSlotObservation {
    /// Value of the slot's fill status attribute (`filled` / `unfilled`), if set.
    pub status: Option<String>,
    /// Rendered height in CSS pixels of the nested creative frame; `0.0` when absent.
    pub frame_height: f64,
}

impl AdSlotObservation {
    /// Observation of a slot the network has not touched yet.
    pub fn untouched() -> Self {
        Self::default()
    }

    /// Observation with a status attribute and frame height.
    pub fn with_status(status: impl Into<String>, frame_height: f64) -> Self {
        Self {
            status: Some(status.into()),
            frame_height,
        }
    }
}

/// Host-side handle on the ad network's global request queue.
pub trait AdQueue {
    /// Pushes a fill request. Errors carry whatever the network script threw.
    fn enqueue(&self, request: &AdSlotRequest) -> Result<(), String>;
}

/// Host-side reader of an ad slot's rendered DOM state.
pub trait AdSlotInspector {
    /// Reads the current fill status and frame geometry of the slot rendered under `slot_dom_id`.
    fn observe(&self, slot_dom_id: &str) -> AdSlotObservation;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op ad queue for targets without an ad network.
pub struct NoopAdQueue;

impl AdQueue for NoopAdQueue {
    fn enqueue(&self, _request: &AdSlotRequest) -> Result<(), String> {
        Err("ad network unavailable on this host".to_string())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory ad queue that records requests, optionally failing every push.
pub struct MemoryAdQueue {
    requests: Rc<RefCell<Vec<AdSlotRequest>>>,
    failure: Option<String>,
}

impl MemoryAdQueue {
    /// Builds a queue whose pushes all fail with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            requests: Rc::default(),
            failure: Some(reason.into()),
        }
    }

    /// Returns every request pushed so far, including failed attempts.
    pub fn requests(&self) -> Vec<AdSlotRequest> {
        self.requests.borrow().clone()
    }
}

impl AdQueue for MemoryAdQueue {
    fn enqueue(&self, request: &AdSlotRequest) -> Result<(), String> {
        self.requests.borrow_mut().push(request.clone());
        match &self.failure {
            Some(reason) => Err(reason.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
/// Inspector for targets without a DOM: every slot looks untouched.
pub struct NoopAdSlotInspector;

impl AdSlotInspector for NoopAdSlotInspector {
    fn observe(&self, _slot_dom_id: &str) -> AdSlotObservation {
        AdSlotObservation::untouched()
    }
}

#[derive(Debug, Clone, Default)]
/// Inspector that replays a scripted sequence of observations, then repeats the last one.
pub struct ScriptedAdSlotInspector {
    script: Rc<RefCell<VecDeque<AdSlotObservation>>>,
    last: Rc<RefCell<AdSlotObservation>>,
    reads: Rc<Cell<usize>>,
}

impl ScriptedAdSlotInspector {
    /// Builds an inspector that returns `observations` in order.
    pub fn new(observations: impl IntoIterator<Item = AdSlotObservation>) -> Self {
        Self {
            script: Rc::new(RefCell::new(observations.into_iter().collect())),
            last: Rc::default(),
            reads: Rc::default(),
        }
    }

    /// Returns how many times the slot was observed.
    pub fn reads(&self) -> usize {
        self.reads.get()
    }
}

impl AdSlotInspector for ScriptedAdSlotInspector {
    fn observe(&self, _slot_dom_id: &str) -> AdSlotObservation {
        self.reads.set(self.reads.get() + 1);
        if let Some(next) = self.script.borrow_mut().pop_front() {
            *self.last.borrow_mut() = next;
        }
        self.last.borrow().clone()
    }
}
