//! ListBookingsHandler - Query handler for the caller's bookings.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError, BookingStatus};
use crate::domain::foundation::CallerContext;
use crate::ports::BookingRepository;

/// Query for bookings the caller is a party to.
#[derive(Debug, Clone, Default)]
pub struct ListBookingsQuery {
    pub status: Option<BookingStatus>,
}

/// Handler for listing bookings, newest first.
pub struct ListBookingsHandler {
    repository: Arc<dyn BookingRepository>,
}

impl ListBookingsHandler {
    pub fn new(repository: Arc<dyn BookingRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        query: ListBookingsQuery,
        caller: &CallerContext,
    ) -> Result<Vec<Booking>, BookingError> {
        Ok(self
            .repository
            .find_by_party(&caller.user_id, query.status)
            .await?)
    }
}
