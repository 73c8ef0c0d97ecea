//! Splits a venue search between the store and the caller.
//!
//! Predicates are offered to the store one at a time in a fixed order; any
//! that would push the query past the store's [`QueryCapabilities`] are kept
//! back and evaluated in memory. The combined result is the same as running
//! the whole conjunction in memory.

use crate::domain::venue::{SortDirection, VenueSearchCriteria};
use crate::ports::{Document, DocumentQuery, Predicate, QueryCapabilities, SortSpec};

/// Document paths the search filters on.
mod paths {
    pub const CITY: &str = "location.city";
    pub const STATE: &str = "location.state";
    pub const CAPACITY: &str = "capacity";
    pub const AMENITIES: &str = "amenities";
}

/// A venue query split into a pushed-down part and an in-memory remainder.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pushed: DocumentQuery,
    residual: Vec<Predicate>,
    client_sort: Option<SortSpec>,
    client_limit: Option<usize>,
}

impl QueryPlan {
    /// Builds a plan for normalized criteria against the given capabilities.
    pub fn build(criteria: &VenueSearchCriteria, capabilities: QueryCapabilities) -> Self {
        let mut pushed = DocumentQuery::new();
        let mut residual = Vec::new();

        for predicate in predicates(criteria) {
            let trial = pushed.clone().filter(predicate.clone());
            if capabilities.admit(&trial).is_ok() {
                pushed = trial;
            } else {
                residual.push(predicate);
            }
        }

        let mut client_sort = None;
        if let Some(field) = criteria.sort_by {
            let sort = match criteria.sort_direction {
                SortDirection::Asc => SortSpec::asc(field.field_path()),
                SortDirection::Desc => SortSpec::desc(field.field_path()),
            };
            let trial = pushed.clone().order_by(sort.clone());
            if capabilities.admit(&trial).is_ok() {
                pushed = trial;
            } else {
                client_sort = Some(sort);
            }
        }

        // The row cap may only go to the store when the store sees the whole
        // query; otherwise it would cut rows before in-memory filtering.
        let limit = criteria.max_results.map(|n| n as usize);
        let mut client_limit = None;
        if let Some(limit) = limit {
            if residual.is_empty() && client_sort.is_none() {
                pushed = pushed.limit(limit);
            } else {
                client_limit = Some(limit);
            }
        }

        Self {
            pushed,
            residual,
            client_sort,
            client_limit,
        }
    }

    /// The query to send to the store.
    pub fn pushed(&self) -> &DocumentQuery {
        &self.pushed
    }

    /// Predicates evaluated in memory.
    pub fn residual(&self) -> &[Predicate] {
        &self.residual
    }

    /// Returns true if everything runs in the store.
    pub fn is_fully_pushed(&self) -> bool {
        self.residual.is_empty() && self.client_sort.is_none() && self.client_limit.is_none()
    }

    /// Finishes the query over the documents the store returned.
    pub fn finish(&self, docs: Vec<Document>) -> Vec<Document> {
        let mut docs: Vec<Document> = docs
            .into_iter()
            .filter(|doc| self.residual.iter().all(|p| p.matches(doc)))
            .collect();

        if let Some(sort) = &self.client_sort {
            docs.sort_by(|a, b| sort.compare(a, b));
        }
        if let Some(limit) = self.client_limit {
            docs.truncate(limit);
        }
        docs
    }
}

/// Conjunctive predicates for the criteria, in push-down priority order.
fn predicates(criteria: &VenueSearchCriteria) -> Vec<Predicate> {
    let mut predicates = Vec::new();
    if let Some(city) = &criteria.city {
        predicates.push(Predicate::eq(paths::CITY, city.as_str()));
    }
    if let Some(state) = &criteria.state {
        predicates.push(Predicate::eq(paths::STATE, state.as_str()));
    }
    if let Some(min) = criteria.capacity.min {
        predicates.push(Predicate::gte(paths::CAPACITY, min));
    }
    if let Some(max) = criteria.capacity.max {
        predicates.push(Predicate::lte(paths::CAPACITY, max));
    }
    for amenity in &criteria.amenities {
        predicates.push(Predicate::array_contains(paths::AMENITIES, amenity.as_str()));
    }
    predicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::venue::{CapacityRange, VenueSortField};
    use serde_json::json;

    fn criteria() -> VenueSearchCriteria {
        VenueSearchCriteria {
            city: Some("Austin".to_string()),
            capacity: CapacityRange {
                min: Some(100),
                max: Some(400),
            },
            amenities: vec!["stage".to_string(), "pa".to_string()],
            sort_by: Some(VenueSortField::CreatedAt),
            max_results: Some(2),
            ..Default::default()
        }
    }

    fn doc(value: serde_json::Value) -> Document {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn full_store_takes_everything() {
        let plan = QueryPlan::build(&criteria(), QueryCapabilities::full());
        assert!(plan.is_fully_pushed());
        assert_eq!(plan.pushed().predicates.len(), 5);
        assert_eq!(plan.pushed().limit, Some(2));
    }

    #[test]
    fn restricted_store_keeps_second_amenity_and_sort_in_memory() {
        let plan = QueryPlan::build(&criteria(), QueryCapabilities::restricted());

        assert_eq!(plan.residual().len(), 1);
        assert_eq!(plan.residual()[0].field, "amenities");
        assert_eq!(plan.pushed().sort, None);
        assert_eq!(plan.pushed().limit, None);
        assert!(!plan.is_fully_pushed());
    }

    #[test]
    fn restricted_store_accepts_sort_on_range_field() {
        let mut c = criteria();
        c.amenities.clear();
        c.sort_by = Some(VenueSortField::Capacity);

        let plan = QueryPlan::build(&c, QueryCapabilities::restricted());
        assert!(plan.is_fully_pushed());
        assert_eq!(plan.pushed().sort, Some(SortSpec::asc("capacity")));
    }

    #[test]
    fn finish_filters_before_sorting_and_capping() {
        let plan = QueryPlan::build(&criteria(), QueryCapabilities::restricted());
        let docs = vec![
            doc(json!({"createdAt": "2024-03-01T00:00:00.000Z", "amenities": ["stage"]})),
            doc(json!({"createdAt": "2024-02-01T00:00:00.000Z", "amenities": ["stage", "pa"]})),
            doc(json!({"createdAt": "2024-01-01T00:00:00.000Z", "amenities": ["pa", "stage"]})),
            doc(json!({"createdAt": "2024-04-01T00:00:00.000Z", "amenities": ["pa", "stage"]})),
        ];

        let out = plan.finish(docs);
        let dates: Vec<_> = out.iter().map(|d| d["createdAt"].as_str().unwrap()).collect();
        assert_eq!(dates, ["2024-01-01T00:00:00.000Z", "2024-02-01T00:00:00.000Z"]);
    }

    #[test]
    fn empty_criteria_is_an_open_listing() {
        let plan = QueryPlan::build(&VenueSearchCriteria::default(), QueryCapabilities::restricted());
        assert_eq!(plan.pushed(), &DocumentQuery::new());
        assert!(plan.is_fully_pushed());
    }
}
