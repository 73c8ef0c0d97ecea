//! RejectBookingHandler - Command handler for declining a pending booking.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::{BookingId, CallerContext};
use crate::ports::{BookingRepository, Clock, ExpectedState};

use super::support::{load, persist};

/// Command to reject a booking.
#[derive(Debug, Clone)]
pub struct RejectBookingCommand {
    pub booking_id: BookingId,
    pub reason: Option<String>,
}

/// Handler for rejecting bookings.
pub struct RejectBookingHandler {
    repository: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
}

impl RejectBookingHandler {
    pub fn new(repository: Arc<dyn BookingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(
        &self,
        cmd: RejectBookingCommand,
        caller: &CallerContext,
    ) -> Result<Booking, BookingError> {
        let mut booking = load(self.repository.as_ref(), cmd.booking_id).await?;
        let expected = ExpectedState::of(&booking);

        booking.reject(&caller.user_id, cmd.reason.as_deref(), self.clock.now())?;

        persist(self.repository.as_ref(), &booking, expected).await?;

        tracing::info!(
            booking_id = %booking.id(),
            user_id = %caller.user_id,
            with_reason = cmd.reason.is_some(),
            "Booking rejected"
        );

        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::super::support::fixtures::*;
    use super::*;
    use crate::domain::booking::{BookingStatus, SYSTEM_SENDER};

    #[tokio::test]
    async fn reject_stores_system_message() {
        let fx = Fixture::new();
        let booking = fx.pending().await;
        let handler = RejectBookingHandler::new(fx.repository.clone(), fx.clock());

        handler
            .handle(
                RejectBookingCommand {
                    booking_id: *booking.id(),
                    reason: Some("We're closed for renovation".to_string()),
                },
                &venue(),
            )
            .await
            .unwrap();

        let stored = fx.stored(&booking).await;
        assert_eq!(stored.status(), BookingStatus::Rejected);
        assert_eq!(stored.message_history().len(), 1);
        assert_eq!(stored.message_history()[0].sender_id, SYSTEM_SENDER);
    }

    #[tokio::test]
    async fn rejecting_twice_is_invalid_transition() {
        let fx = Fixture::new();
        let booking = fx.pending().await;
        let handler = RejectBookingHandler::new(fx.repository.clone(), fx.clock());
        let cmd = RejectBookingCommand {
            booking_id: *booking.id(),
            reason: None,
        };

        handler.handle(cmd.clone(), &venue()).await.unwrap();
        let err = handler.handle(cmd, &venue()).await.unwrap_err();
        assert_eq!(
            err,
            BookingError::InvalidTransition {
                current: BookingStatus::Rejected,
                attempted: BookingStatus::Rejected,
            }
        );
    }
}
