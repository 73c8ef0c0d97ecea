//! Booking lifecycle domain.
//!
//! Contains the booking aggregate, its status state machine and message
//! thread, and the errors booking operations raise.

mod aggregate;
mod errors;
mod message;
mod status;

pub use aggregate::{Booking, BookingProposal};
pub use errors::BookingError;
pub use message::{validate_message_text, BookingMessage, MAX_MESSAGE_LENGTH, SYSTEM_SENDER};
pub use status::BookingStatus;
