//! Identity port.
//!
//! Resolves a bearer credential into the caller context handed to every
//! operation. Authentication itself happens outside this crate.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::CallerContext;

/// Errors resolving a credential.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityError {
    #[error("Missing credential")]
    MissingCredential,

    #[error("Invalid credential")]
    InvalidCredential,

    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),
}

/// Resolves credentials into callers.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves a raw bearer token (without the `Bearer ` prefix).
    ///
    /// # Errors
    ///
    /// - `InvalidCredential` if the token is unknown or malformed
    /// - `Unavailable` on transient provider failures
    async fn resolve(&self, token: &str) -> Result<CallerContext, IdentityError>;
}
