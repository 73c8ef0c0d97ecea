//! SearchVenuesHandler - Query handler for multi-criteria venue search.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::venue::{Venue, VenueSearchCriteria};
use crate::ports::{collections, from_document, DocumentStore, StoreError};

use super::QueryPlan;

/// Errors raised by venue search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Venue query failed: {0}")]
    Query(#[from] StoreError),
}

impl SearchError {
    pub fn code(&self) -> ErrorCode {
        match self {
            SearchError::Validation(_) => ErrorCode::ValidationFailed,
            SearchError::Query(StoreError::QueryRejected(_)) => ErrorCode::QueryRejected,
            SearchError::Query(StoreError::Malformed(_)) => ErrorCode::DatabaseError,
            SearchError::Query(_) => ErrorCode::StoreUnavailable,
        }
    }
}

/// Handler for venue search. Search is read-only and never retried here.
pub struct SearchVenuesHandler {
    store: Arc<dyn DocumentStore>,
}

impl SearchVenuesHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, criteria: VenueSearchCriteria) -> Result<Vec<Venue>, SearchError> {
        let criteria = criteria.normalized()?;
        let plan = QueryPlan::build(&criteria, self.store.capabilities());

        let docs = self.store.query(collections::VENUES, plan.pushed()).await?;
        let fetched = docs.len();
        let venues = plan
            .finish(docs)
            .into_iter()
            .map(from_document::<Venue>)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(
            fetched,
            returned = venues.len(),
            residual_predicates = plan.residual().len(),
            fully_pushed = plan.is_fully_pushed(),
            "Venue search executed"
        );

        Ok(venues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDocumentStore;
    use crate::adapters::repositories::DocumentVenueRepository;
    use crate::domain::foundation::{Timestamp, UserId, VenueId};
    use crate::domain::venue::{CapacityRange, Location, SortDirection, VenueDraft, VenueSortField};
    use crate::ports::{QueryCapabilities, VenueRepository};

    fn venue(n: usize, city: &str, capacity: u32) -> Venue {
        Venue::create(
            VenueId::new(),
            UserId::new(format!("venue-{}", n)).unwrap(),
            VenueDraft {
                name: format!("Venue {}", n),
                venue_type: None,
                description: "A room with a stage, lights and enough floor space to dance."
                    .to_string(),
                location: Location {
                    address: format!("{} Main St", n),
                    city: city.to_string(),
                    state: "TX".to_string(),
                    zip_code: "78701".to_string(),
                    coordinates: None,
                },
                capacity,
                amenities: vec![],
                media_urls: vec![],
                payment_terms: Default::default(),
                availability: vec![],
            },
            Timestamp::parse_iso("2024-01-01T00:00:00Z").unwrap().plus_days(n as i64),
        )
        .unwrap()
    }

    async fn seeded(capabilities: QueryCapabilities) -> Arc<InMemoryDocumentStore> {
        let store = Arc::new(InMemoryDocumentStore::with_capabilities(capabilities));
        let repo = DocumentVenueRepository::new(store.clone());
        for (n, capacity) in [50, 120, 300, 500].into_iter().enumerate() {
            repo.create(&venue(n, "Austin", capacity)).await.unwrap();
        }
        repo.create(&venue(9, "Dallas", 200)).await.unwrap();
        store
    }

    #[tokio::test]
    async fn capacity_range_sorted_descending() {
        let store = seeded(QueryCapabilities::full()).await;
        let handler = SearchVenuesHandler::new(store);

        let venues = handler
            .handle(VenueSearchCriteria {
                city: Some("Austin".to_string()),
                capacity: CapacityRange {
                    min: Some(100),
                    max: Some(400),
                },
                sort_by: Some(VenueSortField::Capacity),
                sort_direction: SortDirection::Desc,
                ..Default::default()
            })
            .await
            .unwrap();

        let capacities: Vec<u32> = venues.iter().map(Venue::capacity).collect();
        assert_eq!(capacities, vec![300, 120]);
    }

    #[tokio::test]
    async fn inverted_range_is_validation_error() {
        let store = seeded(QueryCapabilities::full()).await;
        let err = SearchVenuesHandler::new(store)
            .handle(VenueSearchCriteria {
                capacity: CapacityRange {
                    min: Some(400),
                    max: Some(100),
                },
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn cap_applies_after_in_memory_sort() {
        let store = seeded(QueryCapabilities::restricted()).await;
        let venues = SearchVenuesHandler::new(store)
            .handle(VenueSearchCriteria {
                capacity: CapacityRange {
                    min: Some(100),
                    max: None,
                },
                sort_by: Some(VenueSortField::CreatedAt),
                sort_direction: SortDirection::Desc,
                max_results: Some(2),
                ..Default::default()
            })
            .await
            .unwrap();

        let names: Vec<&str> = venues.iter().map(Venue::name).collect();
        assert_eq!(names, vec!["Venue 9", "Venue 3"]);
    }

    #[test]
    fn store_failures_map_to_codes() {
        assert_eq!(
            SearchError::from(StoreError::Unavailable("timeout".into())).code(),
            ErrorCode::StoreUnavailable
        );
        assert_eq!(
            SearchError::from(StoreError::QueryRejected("too many".into())).code(),
            ErrorCode::QueryRejected
        );
    }
}
