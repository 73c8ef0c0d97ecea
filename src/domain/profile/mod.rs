//! Profile service errors shared by musician and venue profile handlers.

mod errors;

pub use errors::ProfileError;
