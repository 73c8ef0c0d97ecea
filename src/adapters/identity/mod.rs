//! Identity adapters.

mod static_provider;

pub use static_provider::StaticIdentityProvider;
