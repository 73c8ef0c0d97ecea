//! BookingRepository over the document store.
//!
//! Updates are applied with `update_if`, conditioned on the status and
//! revision the caller read.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, UserId};
use crate::ports::{
    collections, from_document, to_document, BookingRepository, DocumentQuery, DocumentStore,
    ExpectedState, Predicate, StoreError,
};

/// Document-backed implementation of [`BookingRepository`].
#[derive(Clone)]
pub struct DocumentBookingRepository {
    store: Arc<dyn DocumentStore>,
}

impl DocumentBookingRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    async fn find_where(
        &self,
        party_field: &str,
        user_id: &UserId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, DomainError> {
        let mut query = DocumentQuery::new().filter(Predicate::eq(party_field, user_id.as_str()));
        if let Some(status) = status {
            query = query.filter(Predicate::eq("status", status.as_str()));
        }
        let docs = self.store.query(collections::BOOKINGS, &query).await?;
        docs.into_iter()
            .map(|doc| from_document(doc).map_err(DomainError::from))
            .collect()
    }
}

#[async_trait]
impl BookingRepository for DocumentBookingRepository {
    async fn create(&self, booking: &Booking) -> Result<(), DomainError> {
        let doc = to_document(booking)?;
        self.store
            .create(collections::BOOKINGS, &booking.id().to_string(), doc)
            .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &BookingId) -> Result<Option<Booking>, DomainError> {
        let doc = self
            .store
            .get(collections::BOOKINGS, &id.to_string())
            .await?;
        Ok(doc.map(from_document).transpose()?)
    }

    async fn find_by_party(
        &self,
        user_id: &UserId,
        status: Option<BookingStatus>,
    ) -> Result<Vec<Booking>, DomainError> {
        let as_musician = self.find_where("musicianUserId", user_id, status).await?;
        let as_venue = self.find_where("venueUserId", user_id, status).await?;

        let mut seen = HashSet::new();
        let mut bookings: Vec<Booking> = as_musician
            .into_iter()
            .chain(as_venue)
            .filter(|b| seen.insert(*b.id()))
            .collect();
        bookings.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(bookings)
    }

    async fn update(&self, booking: &Booking, expected: ExpectedState) -> Result<(), DomainError> {
        let id = booking.id().to_string();
        let preconditions = [
            Predicate::eq("status", expected.status.as_str()),
            Predicate::eq("revision", expected.revision),
        ];
        let doc = to_document(booking)?;

        match self
            .store
            .update_if(collections::BOOKINGS, &id, &preconditions, doc)
            .await
        {
            Ok(()) => Ok(()),
            Err(StoreError::PreconditionFailed { .. }) => Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!("Booking {} was modified concurrently", id),
            )
            .with_detail("booking_id", id)),
            Err(StoreError::NotFound { .. }) => Err(DomainError::new(
                ErrorCode::BookingNotFound,
                format!("Booking not found: {}", id),
            )),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryDocumentStore;
    use crate::domain::booking::BookingProposal;
    use crate::domain::foundation::{MusicianId, PaymentTerms, Timestamp, UserType, VenueId};

    fn now() -> Timestamp {
        Timestamp::parse_iso("2024-05-01T12:00:00Z").unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    fn booking(musician: &str, venue: &str, created: Timestamp) -> Booking {
        Booking::propose(
            BookingId::new(),
            BookingProposal {
                musician_id: MusicianId::new(),
                venue_id: VenueId::new(),
                musician_user_id: user(musician),
                venue_user_id: user(venue),
                proposed_dates: vec![now().plus_days(30)],
                payment_terms: PaymentTerms::default(),
                initiated_by: UserType::Musician,
            },
            created,
        )
        .unwrap()
    }

    fn repo() -> DocumentBookingRepository {
        DocumentBookingRepository::new(Arc::new(InMemoryDocumentStore::new()))
    }

    #[tokio::test]
    async fn find_by_party_covers_both_sides_newest_first() {
        let repo = repo();
        let older = booking("m1", "v1", now());
        let newer = booking("m2", "m1", now().plus_secs(10));
        let other = booking("m3", "v3", now());
        for b in [&older, &newer, &other] {
            repo.create(b).await.unwrap();
        }

        let found = repo.find_by_party(&user("m1"), None).await.unwrap();
        let ids: Vec<_> = found.iter().map(|b| *b.id()).collect();
        assert_eq!(ids, vec![*newer.id(), *older.id()]);
    }

    #[tokio::test]
    async fn find_by_party_filters_status() {
        let repo = repo();
        let mut b = booking("m1", "v1", now());
        repo.create(&b).await.unwrap();
        let expected = ExpectedState::of(&b);
        b.cancel(&user("m1"), now()).unwrap();
        repo.update(&b, expected).await.unwrap();

        let pending = repo
            .find_by_party(&user("v1"), Some(BookingStatus::Pending))
            .await
            .unwrap();
        let cancelled = repo
            .find_by_party(&user("v1"), Some(BookingStatus::Cancelled))
            .await
            .unwrap();
        assert!(pending.is_empty());
        assert_eq!(cancelled.len(), 1);
    }

    #[tokio::test]
    async fn stale_update_is_concurrent_modification() {
        let repo = repo();
        let original = booking("m1", "v1", now());
        repo.create(&original).await.unwrap();
        let expected = ExpectedState::of(&original);

        let mut first = original.clone();
        first.cancel(&user("m1"), now()).unwrap();
        repo.update(&first, expected).await.unwrap();

        let mut second = original.clone();
        second.reject(&user("v1"), None, now()).unwrap();
        let err = repo.update(&second, expected).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ConcurrentModification);

        let stored = repo.find_by_id(original.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn cancel_clears_stored_confirmation() {
        let repo = repo();
        let mut b = booking("m1", "v1", now());
        repo.create(&b).await.unwrap();

        let expected = ExpectedState::of(&b);
        let date = b.proposed_dates()[0];
        b.accept(
            &user("v1"),
            date,
            "20:00".parse().unwrap(),
            "22:00".parse().unwrap(),
            now(),
        )
        .unwrap();
        repo.update(&b, expected).await.unwrap();

        let expected = ExpectedState::of(&b);
        b.cancel(&user("m1"), now()).unwrap();
        repo.update(&b, expected).await.unwrap();

        let stored = repo.find_by_id(b.id()).await.unwrap().unwrap();
        assert!(stored.confirmed_date().is_none());
        assert!(stored.start_time().is_none());
    }
}
