//! Static identity provider.
//!
//! Maps fixed bearer tokens to callers. Used in development (tokens come from
//! configuration) and in tests. Production deployments put a real identity
//! provider behind the same port.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{CallerContext, UserId, UserType, ValidationError};
use crate::ports::{IdentityError, IdentityProvider};

/// Identity provider backed by a fixed token table.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    tokens: HashMap<String, CallerContext>,
}

impl StaticIdentityProvider {
    /// Creates an empty provider that rejects every token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a token resolving to the given caller.
    pub fn with_caller(mut self, token: impl Into<String>, caller: CallerContext) -> Self {
        self.tokens.insert(token.into(), caller);
        self
    }

    /// Parses `token:user_id:user_type` entries.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first malformed entry.
    pub fn from_entries<I, S>(entries: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut provider = Self::new();
        for entry in entries {
            let entry = entry.as_ref();
            let mut parts = entry.splitn(3, ':');
            let (Some(token), Some(user_id), Some(user_type)) =
                (parts.next(), parts.next(), parts.next())
            else {
                return Err(ValidationError::invalid_format(
                    "auth.tokens",
                    format!("expected token:user_id:user_type, got '{}'", entry),
                ));
            };
            if token.trim().is_empty() {
                return Err(ValidationError::empty_field("auth.tokens.token"));
            }
            let caller = CallerContext::new(UserId::new(user_id)?, user_type.parse::<UserType>()?);
            provider = provider.with_caller(token.trim(), caller);
        }
        Ok(provider)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn resolve(&self, token: &str) -> Result<CallerContext, IdentityError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(IdentityError::MissingCredential);
        }
        self.tokens
            .get(token)
            .cloned()
            .ok_or(IdentityError::InvalidCredential)
    }
}
