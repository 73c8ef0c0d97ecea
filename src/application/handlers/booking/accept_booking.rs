//! AcceptBookingHandler - Command handler for accepting a pending booking.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::{BookingId, CallerContext, TimeOfDay, Timestamp};
use crate::ports::{BookingRepository, Clock, ExpectedState};

use super::support::{load, persist};

/// Command to accept a booking for one of its proposed dates.
#[derive(Debug, Clone)]
pub struct AcceptBookingCommand {
    pub booking_id: BookingId,
    pub confirmed_date: Timestamp,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// Handler for accepting bookings.
pub struct AcceptBookingHandler {
    repository: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
}

impl AcceptBookingHandler {
    pub fn new(repository: Arc<dyn BookingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        cmd: AcceptBookingCommand,
        caller: &CallerContext,
    ) -> Result<Booking, BookingError> {
        let mut booking = load(self.repository.as_ref(), cmd.booking_id).await?;
        let expected = ExpectedState::of(&booking);

        booking.accept(
            &caller.user_id,
            cmd.confirmed_date,
            cmd.start_time,
            cmd.end_time,
            self.clock.now(),
        )?;

        persist(self.repository.as_ref(), &booking, expected).await?;

        tracing::info!(
            booking_id = %booking.id(),
            confirmed_date = %cmd.confirmed_date,
            user_id = %caller.user_id,
            "Booking accepted"
        );

        Ok(booking)
    }
}
