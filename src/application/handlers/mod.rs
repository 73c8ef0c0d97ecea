//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations. Each
//! handler takes its ports as `Arc<dyn Port>` and receives the caller
//! explicitly.

pub mod booking;
pub mod profile;
pub mod venue;
