//! PostBookingMessageHandler - Command handler for appending to a booking thread.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::{BookingId, CallerContext};
use crate::ports::{BookingRepository, Clock, ExpectedState};

use super::support::{load, persist};

/// Command to post a message on a booking.
#[derive(Debug, Clone)]
pub struct PostBookingMessageCommand {
    pub booking_id: BookingId,
    pub message: String,
}

/// Handler for posting booking messages.
///
/// Messages are accepted in every status, so parties can still talk after a
/// booking is completed, rejected or cancelled.
pub struct PostBookingMessageHandler {
    repository: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
}

impl PostBookingMessageHandler {
    pub fn new(repository: Arc<dyn BookingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        cmd: PostBookingMessageCommand,
        caller: &CallerContext,
    ) -> Result<Booking, BookingError> {
        let mut booking = load(self.repository.as_ref(), cmd.booking_id).await?;
        let expected = ExpectedState::of(&booking);

        booking.post_message(&caller.user_id, &cmd.message, self.clock.now())?;

        persist(self.repository.as_ref(), &booking, expected).await?;

        tracing::debug!(
            booking_id = %booking.id(),
            sender_id = %caller.user_id,
            messages = booking.message_history().len(),
            "Booking message posted"
        );

        Ok(booking)
    }
}
