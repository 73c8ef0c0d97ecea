//! Bandstand - booking marketplace for musicians and venues
//!
//! Musicians and venues keep profiles, venues are found through multi-criteria
//! search, and the two sides negotiate bookings through a small state machine
//! with a message thread.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
