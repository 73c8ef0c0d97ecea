//! Profile-specific error types.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, UserType, ValidationError};

/// Errors raised by profile operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{kind} profile not found: {id}")]
    NotFound { kind: UserType, id: String },

    #[error("User already has a {0} profile")]
    AlreadyExists(UserType),

    #[error("Permission denied")]
    Forbidden,

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl ProfileError {
    pub fn not_found(kind: UserType, id: impl ToString) -> Self {
        ProfileError::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        ProfileError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ProfileError::Validation(_) => ErrorCode::ValidationFailed,
            ProfileError::NotFound {
                kind: UserType::Musician,
                ..
            } => ErrorCode::MusicianNotFound,
            ProfileError::NotFound {
                kind: UserType::Venue,
                ..
            } => ErrorCode::VenueNotFound,
            ProfileError::AlreadyExists(_) => ErrorCode::ProfileAlreadyExists,
            ProfileError::Forbidden => ErrorCode::Forbidden,
            ProfileError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for ProfileError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => {
                let field = err.detail("field").unwrap_or("unknown").to_string();
                ProfileError::Validation(ValidationError::invalid_format(field, err.message))
            }
            ErrorCode::Forbidden => ProfileError::Forbidden,
            ErrorCode::ProfileAlreadyExists => match err
                .detail("user_type")
                .and_then(|t| t.parse::<UserType>().ok())
            {
                Some(kind) => ProfileError::AlreadyExists(kind),
                None => ProfileError::Infrastructure(err.to_string()),
            },
            _ => ProfileError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_code_depends_on_kind() {
        assert_eq!(
            ProfileError::not_found(UserType::Venue, "v1").code(),
            ErrorCode::VenueNotFound
        );
        assert_eq!(
            ProfileError::not_found(UserType::Musician, "m1").to_string(),
            "musician profile not found: m1"
        );
    }

    #[test]
    fn validation_domain_error_keeps_field() {
        let err: ProfileError = DomainError::validation("bio", "too short").into();
        match err {
            ProfileError::Validation(inner) => assert_eq!(inner.field(), "bio"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn already_exists_keeps_profile_kind() {
        let err: ProfileError = DomainError::new(ErrorCode::ProfileAlreadyExists, "taken")
            .with_detail("user_type", "venue")
            .into();
        assert_eq!(err, ProfileError::AlreadyExists(UserType::Venue));
    }
}
