//! Vehicle tracker library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection.  Device bring-up lives in the binary.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod classify;
pub mod config;
pub mod error;
pub mod events;
pub mod geo;
pub mod geofence;

mod text;
