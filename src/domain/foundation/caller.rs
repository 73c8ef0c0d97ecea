//! Caller context passed explicitly into every core operation.
//!
//! The core never reads ambient session state. Whoever hosts it (HTTP
//! adapter, tests, jobs) resolves the caller once and hands the context to
//! each handler.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{UserId, ValidationError};

/// Which side of the marketplace an account belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Musician,
    Venue,
}

impl UserType {
    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Musician => "musician",
            UserType::Venue => "venue",
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for UserType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "musician" => Ok(UserType::Musician),
            "venue" => Ok(UserType::Venue),
            other => Err(ValidationError::invalid_format(
                "user_type",
                format!("expected 'musician' or 'venue', got '{}'", other),
            )),
        }
    }
}

/// The authenticated caller of an operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerContext {
    /// The user executing this operation.
    pub user_id: UserId,

    /// Declared account type of the user.
    pub user_type: UserType,

    /// Links related operations across a single request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl CallerContext {
    /// Creates a caller context.
    pub fn new(user_id: UserId, user_type: UserType) -> Self {
        Self {
            user_id,
            user_type,
            correlation_id: None,
        }
    }

    /// Shorthand for a musician caller.
    pub fn musician(user_id: UserId) -> Self {
        Self::new(user_id, UserType::Musician)
    }

    /// Shorthand for a venue caller.
    pub fn venue(user_id: UserId) -> Self {
        Self::new(user_id, UserType::Venue)
    }

    /// Sets the correlation ID.
    pub fn with_correlation_id(mut self, correlation_id: impl Into<String>) -> Self {
        self.correlation_id = Some(correlation_id.into());
        self
    }

    /// Returns the correlation ID, if any.
    pub fn correlation_id(&self) -> Option<&str> {
        self.correlation_id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[test]
    fn user_type_parses_case_insensitively() {
        assert_eq!("Musician".parse::<UserType>().unwrap(), UserType::Musician);
        assert_eq!(" venue ".parse::<UserType>().unwrap(), UserType::Venue);
        assert!("promoter".parse::<UserType>().is_err());
    }

    #[test]
    fn user_type_serializes_snake_case() {
        assert_eq!(serde_json::to_string(&UserType::Venue).unwrap(), "\"venue\"");
    }

    #[test]
    fn caller_context_carries_correlation_id() {
        let caller = CallerContext::musician(user("u1")).with_correlation_id("req-42");
        assert_eq!(caller.user_type, UserType::Musician);
        assert_eq!(caller.correlation_id(), Some("req-42"));
    }

    #[test]
    fn caller_context_without_correlation_id() {
        let caller = CallerContext::venue(user("u2"));
        assert_eq!(caller.correlation_id(), None);
    }
}
