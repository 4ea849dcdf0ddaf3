//! Callback-driven inbound event queue.
//!
//! Items are produced by:
//! - the positioning subsystem (fixes, driving events, raw sentences)
//! - the radio subsystem (URCs)
//!
//! and consumed by a single [`TrackerService`](crate::app::service::TrackerService),
//! which processes them one at a time in FIFO order.
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────────┐     ┌──────────────────┐
//! │ GNSS callbacks  │────▶│                  │     │                  │
//! │ (any thread)    │     │  InboundQueue    │────▶│  TrackerService  │
//! │ Modem callbacks │────▶│  (bounded MPSC)  │     │  (one consumer)  │
//! │ (any thread)    │     │                  │     │                  │
//! └─────────────────┘     └──────────────────┘     └──────────────────┘
//! ```
//!
//! The single consumer is what gives the geofence engine its single-writer
//! guarantee.  Producers never block: a full queue drops the item.
//!
//! Raw sentences are gated here, on the producer side, so that a chatty
//! receiver cannot fill the queue with lines the service would discard and
//! push out fixes or URCs.

use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use crate::classify::{Severity, Urc, UrcParam};
use crate::error::GeoError;
use crate::geo::Point;

/// Maximum number of pending items.
pub const INBOUND_DEPTH: usize = 32;

/// Position sample copied out of the upstream fix record.  Only latitude and
/// longitude are used; the coordinates are validated when consumed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fix {
    pub lat: f64,
    pub lng: f64,
}

impl Fix {
    pub fn point(&self) -> Result<Point, GeoError> {
        Point::new(self.lat, self.lng)
    }
}

/// One item delivered by an external subsystem.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Fix(Fix),
    /// Raw driving-event code.
    Driving(i32),
    Urc(Urc),
    Sentence(String),
}

/// Bounded multi-producer queue shared between subsystem callbacks and the
/// processing loop.
pub struct InboundQueue {
    channel: Channel<CriticalSectionRawMutex, Inbound, INBOUND_DEPTH>,
    /// Raw sentences are only queued when the consumer will report them.
    sentences: AtomicBool,
}

impl Default for InboundQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl InboundQueue {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            sentences: AtomicBool::new(false),
        }
    }

    /// Match the producer-side gate to the service verbosity.  Sentences
    /// are admitted only at [`Severity::Debug`].
    pub fn set_verbosity(&self, verbosity: Severity) {
        self.sentences
            .store(verbosity >= Severity::Debug, Ordering::Relaxed);
    }

    /// Whether [`push_sentence`](Self::push_sentence) currently queues.
    pub fn accepts_sentences(&self) -> bool {
        self.sentences.load(Ordering::Relaxed)
    }

    /// Enqueue an item.  Returns `false` if the queue is full (item dropped).
    pub fn push(&self, item: Inbound) -> bool {
        match self.channel.try_send(item) {
            Ok(()) => true,
            Err(_) => {
                warn!("Inbound queue full, dropping item");
                false
            }
        }
    }

    /// Fix callback.
    pub fn push_fix(&self, lat: f64, lng: f64) -> bool {
        self.push(Inbound::Fix(Fix { lat, lng }))
    }

    /// Driving-event callback.
    pub fn push_driving_event(&self, code: i32) -> bool {
        self.push(Inbound::Driving(code))
    }

    /// URC callback.  Decodes at the boundary so the queue only ever holds
    /// typed notifications.
    pub fn push_urc(&self, code: u32, param: UrcParam) -> bool {
        self.push(Inbound::Urc(Urc::decode(code, param)))
    }

    /// Raw sentence callback.  Returns `false` without queueing while the
    /// gate is closed.
    pub fn push_sentence(&self, line: &str) -> bool {
        if !self.accepts_sentences() {
            return false;
        }
        self.push(Inbound::Sentence(line.into()))
    }

    /// Dequeue without waiting.
    pub fn try_pop(&self) -> Option<Inbound> {
        self.channel.try_receive().ok()
    }

    /// Wait for the next item.
    pub async fn pop(&self) -> Inbound {
        self.channel.receive().await
    }

    /// Hand every pending item to `handler`, in FIFO order.
    pub fn drain(&self, mut handler: impl FnMut(Inbound)) {
        while let Some(item) = self.try_pop() {
            handler(item);
        }
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}
