//! Pet vitals core: time-based stat decay and player actions.
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`tick`] | Lazy decay since the last observation, with backdated and per-call caps |
//! | [`action`] | Feed / play / rest deltas applied on top of a fresh tick |
//! | [`pet`] | The pet record and its invariants |
//! | [`mood`] | Low-stat mood flags for display |
//! | [`store`] | `PetStore` trait and the SQLite implementation |
//! | [`service`] | Load, tick or act, save, record |
//! | [`event`] | Event log payloads |
//! | [`clock`] | System and fixed clocks |
//! | [`config`] | Adoption defaults and mood thresholds |

pub mod action;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod mood;
pub mod pet;
pub mod service;
pub mod store;
pub mod tick;
pub mod types;
