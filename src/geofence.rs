//! Geofence engine — edge-detected enter/exit from raw containment tests.
//!
//! Each fence gets a two-state machine fed once per incoming fix:
//!
//! ```text
//!            contained
//!   OUTSIDE ───────────▶ INSIDE      emits Entered
//!      ▲                   │
//!      └───────────────────┘         emits Exited
//!          !contained
//! ```
//!
//! Any sample that repeats the current verdict is silent, so edges strictly
//! alternate.  There is no hysteresis band: a fix sitting on the radius can
//! flicker across samples and each crossing is reported.
//!
//! The engine takes `&mut self` on every update.  Callers that receive fixes
//! on several threads must funnel them through one consumer (see
//! [`events`](crate::events)).

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::geo::{FENCE_NAME_LEN, Fence, FenceId, MAX_FENCES, Point, contains};

// ---------------------------------------------------------------------------
// Per-fence state machine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FenceState {
    Outside,
    Inside,
}

/// A containment transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Entered,
    Exited,
}

/// How a monitor treats the very first sample it sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FenceInit {
    /// Start `Outside`; a first sample that is inside emits `Entered`.
    #[default]
    AssumeOutside,
    /// Adopt the first sample's verdict silently; edges start from the second.
    FirstFix,
}

/// Two-state containment tracker for one fence.
#[derive(Debug, Clone, Copy)]
pub struct FenceMonitor {
    state: FenceState,
    primed: bool,
    init: FenceInit,
}

impl FenceMonitor {
    pub fn new(init: FenceInit) -> Self {
        Self {
            state: FenceState::Outside,
            primed: false,
            init,
        }
    }

    /// Feed one containment verdict.  Returns the edge, if any.
    pub fn observe(&mut self, contained: bool) -> Option<Edge> {
        if !self.primed {
            self.primed = true;
            if self.init == FenceInit::FirstFix {
                self.state = if contained {
                    FenceState::Inside
                } else {
                    FenceState::Outside
                };
                return None;
            }
        }

        match (self.state, contained) {
            (FenceState::Outside, true) => {
                self.state = FenceState::Inside;
                Some(Edge::Entered)
            }
            (FenceState::Inside, false) => {
                self.state = FenceState::Outside;
                Some(Edge::Exited)
            }
            _ => None,
        }
    }

    pub fn state(&self) -> FenceState {
        self.state
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// One edge on one fence, produced by [`GeofenceEngine::evaluate`].
#[derive(Debug, Clone, PartialEq)]
pub struct FenceTransition {
    pub fence: FenceId,
    pub name: heapless::String<FENCE_NAME_LEN>,
    pub edge: Edge,
}

struct FenceSlot {
    fence: Fence,
    monitor: FenceMonitor,
}

/// Owns every configured fence together with its containment state.
pub struct GeofenceEngine {
    slots: heapless::Vec<FenceSlot, MAX_FENCES>,
}

impl GeofenceEngine {
    /// Build an engine over `fences`.  Configuration validation rejects
    /// more than [`MAX_FENCES`]; any excess passed here is logged and dropped.
    pub fn new(fences: impl IntoIterator<Item = Fence>, init: FenceInit) -> Self {
        let mut slots = heapless::Vec::new();
        let mut dropped = 0usize;
        for fence in fences {
            let slot = FenceSlot {
                fence,
                monitor: FenceMonitor::new(init),
            };
            if slots.push(slot).is_err() {
                dropped += 1;
            }
        }
        if dropped > 0 {
            warn!(
                "Geofence engine full ({} max), dropped {} fence(s)",
                MAX_FENCES, dropped
            );
        }
        info!("Geofence engine: {} fence(s), init={:?}", slots.len(), init);
        Self { slots }
    }

    /// Test `point` against every fence and return the transitions, in
    /// fence order.
    pub fn evaluate(&mut self, point: Point) -> heapless::Vec<FenceTransition, MAX_FENCES> {
        let mut out = heapless::Vec::new();
        for (idx, slot) in self.slots.iter_mut().enumerate() {
            let inside = contains(&slot.fence, point);
            if let Some(edge) = slot.monitor.observe(inside) {
                debug!(
                    "Fence '{}' {:?} at ({:.6}, {:.6})",
                    slot.fence.name,
                    edge,
                    point.lat(),
                    point.lng()
                );
                // Capacity equals the slot count, so this cannot overflow.
                let _ = out.push(FenceTransition {
                    fence: FenceId(idx as u8),
                    name: slot.fence.name.clone(),
                    edge,
                });
            }
        }
        out
    }

    /// Current state of one fence.
    pub fn state(&self, id: FenceId) -> Option<FenceState> {
        self.slots.get(id.0 as usize).map(|s| s.monitor.state())
    }

    pub fn fence(&self, id: FenceId) -> Option<&Fence> {
        self.slots.get(id.0 as usize).map(|s| &s.fence)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
