//! Venue profile domain and search criteria.

mod aggregate;
mod search;
mod values;
mod venue_type;

pub use aggregate::{Venue, VenueDraft, VenuePatch};
pub use search::{CapacityRange, SortDirection, VenueSearchCriteria, VenueSortField};
pub use values::{AvailabilitySlot, Coordinates, Location};
pub use venue_type::VenueType;
