//! CancelBookingHandler - Command handler for withdrawing a booking.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::{BookingId, CallerContext};
use crate::ports::{BookingRepository, Clock, ExpectedState};

use super::support::{load, persist};

/// Command to cancel a pending or accepted booking.
#[derive(Debug, Clone)]
pub struct CancelBookingCommand {
    pub booking_id: BookingId,
}

/// Handler for cancelling bookings.
pub struct CancelBookingHandler {
    repository: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
}

impl CancelBookingHandler {
    pub fn new(repository: Arc<dyn BookingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        cmd: CancelBookingCommand,
        caller: &CallerContext,
    ) -> Result<Booking, BookingError> {
        let mut booking = load(self.repository.as_ref(), cmd.booking_id).await?;
        let expected = ExpectedState::of(&booking);

        booking.cancel(&caller.user_id, self.clock.now())?;

        persist(self.repository.as_ref(), &booking, expected).await?;

        tracing::info!(
            booking_id = %booking.id(),
            previous_status = %expected.status,
            user_id = %caller.user_id,
            "Booking cancelled"
        );

        Ok(booking)
    }
}
