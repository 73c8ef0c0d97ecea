//! Booking command and query handlers.

mod accept_booking;
mod cancel_booking;
mod complete_booking;
mod create_booking;
mod get_booking;
mod list_bookings;
mod post_booking_message;
mod reject_booking;
mod support;

pub use accept_booking::{AcceptBookingCommand, AcceptBookingHandler};
pub use cancel_booking::{CancelBookingCommand, CancelBookingHandler};
pub use complete_booking::{CompleteBookingCommand, CompleteBookingHandler};
pub use create_booking::{CreateBookingCommand, CreateBookingHandler};
pub use get_booking::{GetBookingHandler, GetBookingQuery};
pub use list_bookings::{ListBookingsHandler, ListBookingsQuery};
pub use post_booking_message::{PostBookingMessageCommand, PostBookingMessageHandler};
pub use reject_booking::{RejectBookingCommand, RejectBookingHandler};
