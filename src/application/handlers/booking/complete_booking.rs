//! CompleteBookingHandler - Command handler for marking a booking performed.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::{BookingId, CallerContext};
use crate::ports::{BookingRepository, Clock, ExpectedState};

use super::support::{load, persist};

/// Command to complete an accepted booking.
#[derive(Debug, Clone)]
pub struct CompleteBookingCommand {
    pub booking_id: BookingId,
}

/// Handler for completing bookings.
pub struct CompleteBookingHandler {
    repository: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
}

impl CompleteBookingHandler {
    pub fn new(repository: Arc<dyn BookingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        cmd: CompleteBookingCommand,
        caller: &CallerContext,
    ) -> Result<Booking, BookingError> {
        let mut booking = load(self.repository.as_ref(), cmd.booking_id).await?;
        let expected = ExpectedState::of(&booking);

        booking.complete(&caller.user_id, self.clock.now())?;

        persist(self.repository.as_ref(), &booking, expected).await?;

        tracing::info!(
            booking_id = %booking.id(),
            user_id = %caller.user_id,
            "Booking completed"
        );

        Ok(booking)
    }
}
