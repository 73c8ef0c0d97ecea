//! Booking repository port.
//!
//! Writes are conditional: an update carries the status and revision the
//! caller read, and is applied only if the stored booking still has them.

use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, DomainError, UserId};

/// The state an update expects to find in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpectedState {
    pub status: BookingStatus,
    pub revision: u64,
}

impl ExpectedState {
    /// Captures the state of a booking as read.
    pub fn of(booking: &Booking) -> Self {
        Self {
            status: booking.status(),
            revision: booking.revision(),
        }
    }
}

/// Repository port for bookings.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Saves a new booking.
    async fn create(&self, booking: &Booking) -> Result<(), DomainError>;

    /// Finds a booking by id.
    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError>;

    /// Lists bookings the user is a party to, newest first, optionally
    /// restricted to one status.
    async fn find_by_party(
        &self,
        user_id: &UserId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, DomainError>;

    /// Persists a mutated booking if the stored copy still matches `expected`.
    ///
    /// # Errors
    ///
    /// - `ConcurrentModification` if the stored status or revision changed
    /// - `BookingNotFound` if the booking no longer exists
    async fn update(&self, booking: &Booking, expected: ExpectedState) -> Result<(), DomainError>;
}
