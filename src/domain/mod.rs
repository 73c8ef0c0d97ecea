//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `musician` - Musician profile aggregate
//! - `venue` - Venue profile aggregate and search criteria
//! - `booking` - Booking lifecycle state machine and message thread
//! - `profile` - Errors raised by the profile service

pub mod booking;
pub mod foundation;
pub mod musician;
pub mod profile;
pub mod venue;
