//! HTTP DTOs for booking endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::booking::{Booking, BookingMessage, BookingStatus};
use crate::domain::foundation::{
    BookingId, MusicianId, PaymentTerms, TimeOfDay, Timestamp, UserId, UserType, VenueId,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to propose a booking.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub musician_id: MusicianId,
    pub venue_id: VenueId,
    pub proposed_dates: Vec<Timestamp>,
    #[serde(default)]
    pub payment_terms: Option<PaymentTerms>,
}

/// Request to accept a booking.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptBookingRequest {
    pub confirmed_date: Timestamp,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// Request to reject a booking.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RejectBookingRequest {
    #[serde(default)]
    pub reason: Option<String>,
}

/// Request to post a message.
#[derive(Debug, Clone, Deserialize)]
pub struct PostMessageRequest {
    pub message: String,
}

/// Query parameters for listing bookings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListBookingsParams {
    pub status: Option<BookingStatus>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A booking as returned to its parties.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: BookingId,
    pub musician_id: MusicianId,
    pub venue_id: VenueId,
    pub musician_user_id: UserId,
    pub venue_user_id: UserId,
    pub status: BookingStatus,
    pub proposed_dates: Vec<Timestamp>,
    pub confirmed_date: Option<Timestamp>,
    pub start_time: Option<TimeOfDay>,
    pub end_time: Option<TimeOfDay>,
    pub payment_terms: PaymentTerms,
    pub initiated_by: UserType,
    pub message_history: Vec<BookingMessage>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: *booking.id(),
            musician_id: *booking.musician_id(),
            venue_id: *booking.venue_id(),
            musician_user_id: booking.musician_user_id().clone(),
            venue_user_id: booking.venue_user_id().clone(),
            status: booking.status(),
            proposed_dates: booking.proposed_dates().to_vec(),
            confirmed_date: booking.confirmed_date().copied(),
            start_time: booking.start_time(),
            end_time: booking.end_time(),
            payment_terms: booking.payment_terms().clone(),
            initiated_by: booking.initiated_by(),
            message_history: booking.message_history().to_vec(),
            created_at: *booking.created_at(),
            updated_at: *booking.updated_at(),
        }
    }
}

/// Booking list wrapper.
#[derive(Debug, Clone, Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingResponse>,
    pub total: usize,
}

impl From<Vec<Booking>> for BookingListResponse {
    fn from(bookings: Vec<Booking>) -> Self {
        let bookings: Vec<BookingResponse> = bookings.into_iter().map(Into::into).collect();
        Self {
            total: bookings.len(),
            bookings,
        }
    }
}
