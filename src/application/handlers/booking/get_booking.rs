//! GetBookingHandler - Query handler for a single booking.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::{BookingId, CallerContext};
use crate::ports::BookingRepository;

use super::support::load;

/// Query for a booking by id.
#[derive(Debug, Clone)]
pub struct GetBookingQuery {
    pub booking_id: BookingId,
}

/// Handler for reading a booking. Only parties may read it.
pub struct GetBookingHandler {
    repository: Arc<dyn BookingRepository>,
}

impl GetBookingHandler {
    pub fn new(repository: Arc<dyn BookingRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: GetBookingQuery,
        caller: &CallerContext,
    ) -> Result<Booking, BookingError> {
        let booking = load(self.repository.as_ref(), query.booking_id).await?;
        booking.ensure_party(&caller.user_id)?;
        Ok(booking)
    }
}
