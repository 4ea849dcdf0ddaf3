//! Application core — pure domain logic, zero I/O.
//!
//! This module contains the business rules of the tracker: geofence edge
//! detection, event classification and report dispatch.  All interaction
//! with the positioning and radio subsystems happens through **port
//! traits** defined in [`ports`], keeping this layer testable without
//! real peripherals.

pub mod events;
pub mod ports;
pub mod service;
