//! Repository adapters implemented over the `DocumentStore` port.

mod booking_repository;
mod musician_repository;
mod profile_owner;
mod venue_repository;

pub use booking_repository::DocumentBookingRepository;
pub use musician_repository::DocumentMusicianRepository;
pub use venue_repository::DocumentVenueRepository;
