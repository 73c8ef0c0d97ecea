//! HTTP handlers for booking endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::booking_error;
use crate::adapters::http::middleware::Caller;
use crate::adapters::http::retry::retry_on_conflict;
use crate::application::handlers::booking::{
    AcceptBookingCommand, AcceptBookingHandler, CancelBookingCommand, CancelBookingHandler,
    CompleteBookingCommand, CompleteBookingHandler, CreateBookingCommand, CreateBookingHandler,
    GetBookingHandler, GetBookingQuery, ListBookingsHandler, ListBookingsQuery,
    PostBookingMessageCommand, PostBookingMessageHandler, RejectBookingCommand,
    RejectBookingHandler,
};
use crate::domain::booking::{Booking, BookingError};
use crate::domain::foundation::BookingId;

use super::dto::{
    AcceptBookingRequest, BookingListResponse, BookingResponse, CreateBookingRequest,
    ListBookingsParams, PostMessageRequest, RejectBookingRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct BookingHandlers {
    pub create: Arc<CreateBookingHandler>,
    pub accept: Arc<AcceptBookingHandler>,
    pub reject: Arc<RejectBookingHandler>,
    pub cancel: Arc<CancelBookingHandler>,
    pub complete: Arc<CompleteBookingHandler>,
    pub post_message: Arc<PostBookingMessageHandler>,
    pub get: Arc<GetBookingHandler>,
    pub list: Arc<ListBookingsHandler>,
    /// Attempts per state-changing request, including the first.
    pub max_attempts: u32,
}

fn respond(status: StatusCode, result: Result<Booking, BookingError>) -> Response {
    match result {
        Ok(booking) => (status, Json(BookingResponse::from(booking))).into_response(),
        Err(e) => booking_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/bookings - Propose a booking
pub async fn create_booking(
    State(handlers): State<BookingHandlers>,
    Caller(caller): Caller,
    Json(req): Json<CreateBookingRequest>,
) -> Response {
    let cmd = CreateBookingCommand {
        musician_id: req.musician_id,
        venue_id: req.venue_id,
        proposed_dates: req.proposed_dates,
        payment_terms: req.payment_terms,
    };
    respond(StatusCode::CREATED, handlers.create.handle(cmd, &caller).await)
}

/// GET /api/bookings - List the caller's bookings
pub async fn list_bookings(
    State(handlers): State<BookingHandlers>,
    Caller(caller): Caller,
    Query(params): Query<ListBookingsParams>,
) -> Response {
    let query = ListBookingsQuery {
        status: params.status,
    };
    match handlers.list.handle(query, &caller).await {
        Ok(bookings) => (StatusCode::OK, Json(BookingListResponse::from(bookings))).into_response(),
        Err(e) => booking_error(e),
    }
}

/// GET /api/bookings/:id - Get a booking
pub async fn get_booking(
    State(handlers): State<BookingHandlers>,
    Caller(caller): Caller,
    Path(booking_id): Path<BookingId>,
) -> Response {
    let query = GetBookingQuery { booking_id };
    respond(StatusCode::OK, handlers.get.handle(query, &caller).await)
}

/// POST /api/bookings/:id/accept - Accept a pending booking
pub async fn accept_booking(
    State(handlers): State<BookingHandlers>,
    Caller(caller): Caller,
    Path(booking_id): Path<BookingId>,
    Json(req): Json<AcceptBookingRequest>,
) -> Response {
    let cmd = AcceptBookingCommand {
        booking_id,
        confirmed_date: req.confirmed_date,
        start_time: req.start_time,
        end_time: req.end_time,
    };
    let (handler, caller) = (&handlers.accept, &caller);
    let result = retry_on_conflict(handlers.max_attempts, move || {
        handler.handle(cmd.clone(), caller)
    })
    .await;
    respond(StatusCode::OK, result)
}

/// POST /api/bookings/:id/reject - Reject a pending booking
pub async fn reject_booking(
    State(handlers): State<BookingHandlers>,
    Caller(caller): Caller,
    Path(booking_id): Path<BookingId>,
    req: Option<Json<RejectBookingRequest>>,
) -> Response {
    let cmd = RejectBookingCommand {
        booking_id,
        reason: req.and_then(|Json(req)| req.reason),
    };
    let (handler, caller) = (&handlers.reject, &caller);
    let result = retry_on_conflict(handlers.max_attempts, move || {
        handler.handle(cmd.clone(), caller)
    })
    .await;
    respond(StatusCode::OK, result)
}

/// POST /api/bookings/:id/cancel - Cancel a pending or accepted booking
pub async fn cancel_booking(
    State(handlers): State<BookingHandlers>,
    Caller(caller): Caller,
    Path(booking_id): Path<BookingId>,
) -> Response {
    let cmd = CancelBookingCommand { booking_id };
    let (handler, caller) = (&handlers.cancel, &caller);
    let result = retry_on_conflict(handlers.max_attempts, move || {
        handler.handle(cmd.clone(), caller)
    })
    .await;
    respond(StatusCode::OK, result)
}

/// POST /api/bookings/:id/complete - Mark an accepted booking performed
pub async fn complete_booking(
    State(handlers): State<BookingHandlers>,
    Caller(caller): Caller,
    Path(booking_id): Path<BookingId>,
) -> Response {
    let cmd = CompleteBookingCommand { booking_id };
    let (handler, caller) = (&handlers.complete, &caller);
    let result = retry_on_conflict(handlers.max_attempts, move || {
        handler.handle(cmd.clone(), caller)
    })
    .await;
    respond(StatusCode::OK, result)
}

/// POST /api/bookings/:id/messages - Post a message on a booking
pub async fn post_message(
    State(handlers): State<BookingHandlers>,
    Caller(caller): Caller,
    Path(booking_id): Path<BookingId>,
    Json(req): Json<PostMessageRequest>,
) -> Response {
    let cmd = PostBookingMessageCommand {
        booking_id,
        message: req.message,
    };
    let (handler, caller) = (&handlers.post_message, &caller);
    let result = retry_on_conflict(handlers.max_attempts, move || {
        handler.handle(cmd.clone(), caller)
    })
    .await;
    respond(StatusCode::CREATED, result)
}
