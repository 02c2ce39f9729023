//! Capacity/demand reconciliation for contact-centre staffing.
//!
//! For every day of a month, decomposes an annual contact forecast into
//! demand minutes, converts them into a required headcount using the
//! region's labor rules, and compares that against the roster.

pub mod config;
pub mod engine;
pub mod error;
pub mod forecast;
pub mod iso_week;
pub mod reconcile;
pub mod regulation;
pub mod roster;
pub mod source;
pub mod store;
pub mod types;
