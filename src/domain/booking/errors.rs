//! Booking-specific error types.

use thiserror::Error;

use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, MusicianId, Timestamp, TransitionRejected, ValidationError,
    VenueId,
};

use super::BookingStatus;

/// Errors raised by booking operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    #[error("Booking not found: {0}")]
    NotFound(BookingId),

    #[error("Musician not found: {0}")]
    MusicianNotFound(MusicianId),

    #[error("Venue not found: {0}")]
    VenueNotFound(VenueId),

    #[error("Caller is not a party to this booking")]
    Forbidden,

    #[error("Cannot transition booking from {current} to {attempted}")]
    InvalidTransition {
        current: BookingStatus,
        attempted: BookingStatus,
    },

    #[error("Confirmed date {0} is not one of the proposed dates")]
    InvalidDate(Timestamp),

    #[error("Booking cannot be completed before its confirmed date {confirmed_date}")]
    PrematureCompletion { confirmed_date: Timestamp },

    #[error("Booking {0} was modified concurrently")]
    ConcurrentModification(BookingId),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl BookingError {
    pub fn forbidden() -> Self {
        BookingError::Forbidden
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        BookingError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::NotFound(_) => ErrorCode::BookingNotFound,
            BookingError::MusicianNotFound(_) => ErrorCode::MusicianNotFound,
            BookingError::VenueNotFound(_) => ErrorCode::VenueNotFound,
            BookingError::Forbidden => ErrorCode::Forbidden,
            BookingError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            BookingError::InvalidDate(_) => ErrorCode::InvalidDate,
            BookingError::PrematureCompletion { .. } => ErrorCode::PrematureCompletion,
            BookingError::ConcurrentModification(_) => ErrorCode::ConcurrentModification,
            BookingError::Validation(_) => ErrorCode::ValidationFailed,
            BookingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns true if re-reading the booking and retrying may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, BookingError::ConcurrentModification(_))
    }
}

impl From<TransitionRejected<BookingStatus>> for BookingError {
    fn from(err: TransitionRejected<BookingStatus>) -> Self {
        BookingError::InvalidTransition {
            current: err.current,
            attempted: err.attempted,
        }
    }
}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ValidationFailed => {
                let field = err.detail("field").unwrap_or("unknown").to_string();
                BookingError::Validation(ValidationError::invalid_format(field, err.message))
            }
            ErrorCode::Forbidden => BookingError::Forbidden,
            _ => BookingError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_rejection_names_both_states() {
        let err: BookingError = TransitionRejected {
            current: BookingStatus::Completed,
            attempted: BookingStatus::Cancelled,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Cannot transition booking from completed to cancelled"
        );
        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
    }

    #[test]
    fn only_concurrent_modification_is_retryable() {
        assert!(BookingError::ConcurrentModification(BookingId::new()).is_retryable());
        assert!(!BookingError::Forbidden.is_retryable());
    }

    #[test]
    fn validation_domain_errors_keep_the_field() {
        let err: BookingError = DomainError::new(ErrorCode::ValidationFailed, "too long")
            .with_detail("field", "message")
            .into();
        match err {
            BookingError::Validation(v) => assert_eq!(v.field(), "message"),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn infrastructure_domain_errors_are_wrapped() {
        let err: BookingError = DomainError::new(ErrorCode::StoreUnavailable, "timed out").into();
        assert!(matches!(err, BookingError::Infrastructure(_)));
    }
}
