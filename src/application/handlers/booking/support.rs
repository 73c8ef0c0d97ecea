//! Load/persist helpers shared by the booking transition handlers.

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::{BookingId, DomainError, ErrorCode};
use crate::ports::{BookingRepository, ExpectedState};

/// Translates a repository error for the given booking.
pub(super) fn repository_error(err: DomainError, id: BookingId) -> BookingError {
    match err.code {
        ErrorCode::ConcurrentModification => BookingError::ConcurrentModification(id),
        ErrorCode::BookingNotFound => BookingError::NotFound(id),
        _ => err.into(),
    }
}

/// Loads a booking, failing with `NotFound` if absent.
pub(super) async fn load(
    repository: &dyn BookingRepository,
    id: BookingId,
) -> Result<Booking, BookingError> {
    repository
        .find_by_id(&id)
        .await
        .map_err(|e| repository_error(e, id))?
        .ok_or(BookingError::NotFound(id))
}

/// Persists a mutated booking conditioned on the state it was read in.
pub(super) async fn persist(
    repository: &dyn BookingRepository,
    booking: &Booking,
    expected: ExpectedState,
) -> Result<(), BookingError> {
    repository
        .update(booking, expected)
        .await
        .map_err(|e| repository_error(e, *booking.id()))
}
