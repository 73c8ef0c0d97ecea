//! HTTP adapter for booking endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AcceptBookingRequest, BookingListResponse, BookingResponse, CreateBookingRequest,
    ListBookingsParams, PostMessageRequest, RejectBookingRequest,
};
pub use handlers::BookingHandlers;
pub use routes::booking_routes;
