//! HTTP middleware for axum.
//!
//! - `identity` - Bearer-token resolution and the `Caller` extractor

pub mod identity;

pub use identity::{identity_middleware, Caller, IdentityState};
