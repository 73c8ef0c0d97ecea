//! Adapters - Implementations of port interfaces.
//!
//! - `memory` / `postgres` - document stores
//! - `storage` - store decorators (timeouts)
//! - `repositories` - aggregate repositories over the document store
//! - `identity` - bearer token resolution
//! - `clock` - system and fixed clocks
//! - `http` - axum REST API

pub mod clock;
pub mod http;
pub mod identity;
pub mod memory;
pub mod postgres;
pub mod repositories;
pub mod storage;
