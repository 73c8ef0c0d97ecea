//! Venue search handlers.

mod query_plan;
mod search_venues;

pub use query_plan::QueryPlan;
pub use search_venues::{SearchError, SearchVenuesHandler};
