//! HTTP routes for booking endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    accept_booking, cancel_booking, complete_booking, create_booking, get_booking, list_bookings,
    post_message, reject_booking, BookingHandlers,
};

/// Creates the booking router with all endpoints.
pub fn booking_routes(handlers: BookingHandlers) -> Router {
    Router::new()
        .route("/", post(create_booking).get(list_bookings))
        .route("/:id", get(get_booking))
        .route("/:id/accept", post(accept_booking))
        .route("/:id/reject", post(reject_booking))
        .route("/:id/cancel", post(cancel_booking))
        .route("/:id/complete", post(complete_booking))
        .route("/:id/messages", post(post_message))
        .with_state(handlers)
}
