//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (write) are kept apart from query handlers (read).

pub mod handlers;

pub use handlers::booking::{
    AcceptBookingCommand, AcceptBookingHandler, CancelBookingCommand, CancelBookingHandler,
    CompleteBookingCommand, CompleteBookingHandler, CreateBookingCommand, CreateBookingHandler,
    GetBookingHandler, GetBookingQuery, ListBookingsHandler, ListBookingsQuery,
    PostBookingMessageCommand, PostBookingMessageHandler, RejectBookingCommand,
    RejectBookingHandler,
};
pub use handlers::profile::{
    CreateMusicianProfileCommand, CreateMusicianProfileHandler, CreateMusicianProfileRequest,
    CreateVenueProfileCommand, CreateVenueProfileHandler, CreateVenueProfileRequest,
    GetMusicianProfileHandler, GetMusicianProfileQuery, GetVenueProfileHandler,
    GetVenueProfileQuery, UpdateMusicianProfileCommand, UpdateMusicianProfileHandler,
    UpdateMusicianProfileRequest, UpdateVenueProfileCommand, UpdateVenueProfileHandler,
    UpdateVenueProfileRequest,
};
pub use handlers::venue::{QueryPlan, SearchError, SearchVenuesHandler};
