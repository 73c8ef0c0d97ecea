//! Authentication configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;
use super::server::Environment;

/// Authentication configuration
///
/// Bearer tokens are resolved by a static table in development and staging.
/// Entries take the form `token:user_id:user_type`, comma-separated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Static token table
    pub tokens: Option<Secret<String>>,
}

impl AuthConfig {
    /// Individual `token:user_id:user_type` entries
    pub fn token_entries(&self) -> Vec<String> {
        self.tokens
            .as_ref()
            .map(|tokens| {
                tokens
                    .expose_secret()
                    .split(',')
                    .map(|entry| entry.trim().to_string())
                    .filter(|entry| !entry.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Validate authentication configuration
    ///
    /// Static tokens are a development aid and are refused in production.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let entries = self.token_entries();
        if *environment == Environment::Production && !entries.is_empty() {
            return Err(ValidationError::StaticTokensInProduction);
        }
        for entry in &entries {
            if entry.split(':').count() != 3 {
                let token = entry.split(':').next().unwrap_or_default();
                return Err(ValidationError::InvalidAuthToken(format!("{}:...", token)));
            }
        }
        Ok(())
    }
}
