//! CreateBookingHandler - Command handler for proposing a booking.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError, BookingProposal};
use crate::domain::foundation::{
    BookingId, CallerContext, MusicianId, PaymentTerms, Timestamp, UserType, VenueId,
};
use crate::ports::{BookingRepository, Clock, MusicianRepository, VenueRepository};

/// Command to propose a booking between a musician and a venue.
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub musician_id: MusicianId,
    pub venue_id: VenueId,
    pub proposed_dates: Vec<Timestamp>,
    /// Terms offered with the proposal. Defaults to the venue's standing terms.
    pub payment_terms: Option<PaymentTerms>,
}

/// Handler for proposing bookings.
pub struct CreateBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    musicians: Arc<dyn MusicianRepository>,
    venues: Arc<dyn VenueRepository>,
    clock: Arc<dyn Clock>,
}

impl CreateBookingHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        musicians: Arc<dyn MusicianRepository>,
        venues: Arc<dyn VenueRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            bookings,
            musicians,
            venues,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateBookingCommand,
        caller: &CallerContext,
    ) -> Result<Booking, BookingError> {
        // 1. Load both parties
        let (musician, venue) = futures::try_join!(
            self.musicians.find_by_id(&cmd.musician_id),
            self.venues.find_by_id(&cmd.venue_id),
        )?;
        let musician = musician.ok_or(BookingError::MusicianNotFound(cmd.musician_id))?;
        let venue = venue.ok_or(BookingError::VenueNotFound(cmd.venue_id))?;

        // 2. Authorize - caller must own the profile on its own side
        let owns_side = match caller.user_type {
            UserType::Musician => musician.is_owned_by(&caller.user_id),
            UserType::Venue => venue.is_owned_by(&caller.user_id),
        };
        if !owns_side {
            return Err(BookingError::Forbidden);
        }

        // 3. Propose
        let proposal = BookingProposal {
            musician_id: *musician.id(),
            venue_id: *venue.id(),
            musician_user_id: musician.user_id().clone(),
            venue_user_id: venue.user_id().clone(),
            proposed_dates: cmd.proposed_dates,
            payment_terms: cmd
                .payment_terms
                .unwrap_or_else(|| venue.payment_terms().clone()),
            initiated_by: caller.user_type,
        };
        let booking = Booking::propose(BookingId::new(), proposal, self.clock.now())?;

        // 4. Persist
        self.bookings.create(&booking).await?;

        tracing::info!(
            booking_id = %booking.id(),
            musician_id = %booking.musician_id(),
            venue_id = %booking.venue_id(),
            initiated_by = %booking.initiated_by(),
            "Booking proposed"
        );

        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::memory::InMemoryDocumentStore;
    use crate::adapters::repositories::{
        DocumentBookingRepository, DocumentMusicianRepository, DocumentVenueRepository,
    };
    use crate::domain::booking::BookingStatus;
    use crate::domain::foundation::{Percentage, UserId};
    use crate::domain::musician::{Musician, MusicianDraft};
    use crate::domain::venue::{Location, Venue, VenueDraft};

    fn now() -> Timestamp {
        Timestamp::parse_iso("2024-05-01T12:00:00Z").unwrap()
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    struct Setup {
        handler: CreateBookingHandler,
        musician: Musician,
        venue: Venue,
    }

    async fn setup() -> Setup {
        let store = Arc::new(InMemoryDocumentStore::new());
        let musicians = Arc::new(DocumentMusicianRepository::new(store.clone()));
        let venues = Arc::new(DocumentVenueRepository::new(store.clone()));
        let bookings = Arc::new(DocumentBookingRepository::new(store));

        let musician = Musician::create(
            MusicianId::new(),
            user("m-user"),
            MusicianDraft {
                name: "Night Owls".to_string(),
                bio: "Late-night jazz quartet covering Monk, Mingus and originals.".to_string(),
                ..Default::default()
            },
            now(),
        )
        .unwrap();
        let venue = Venue::create(
            VenueId::new(),
            user("v-user"),
            VenueDraft {
                name: "Blue Door".to_string(),
                venue_type: None,
                description: "Forty-seat listening room with a grand piano and no TVs at all."
                    .to_string(),
                location: Location {
                    address: "9 Elm St".to_string(),
                    city: "Chicago".to_string(),
                    state: "IL".to_string(),
                    zip_code: "60601".to_string(),
                    coordinates: None,
                },
                capacity: 40,
                amenities: vec![],
                media_urls: vec![],
                payment_terms: PaymentTerms {
                    guaranteed_amount: Some(25_000),
                    revenue_split: Some(Percentage::try_new(70).unwrap()),
                    other: None,
                },
                availability: vec![],
            },
            now(),
        )
        .unwrap();
        musicians.create(&musician).await.unwrap();
        venues.create(&venue).await.unwrap();

        Setup {
            handler: CreateBookingHandler::new(
                bookings,
                musicians,
                venues,
                Arc::new(FixedClock::new(now())),
            ),
            musician,
            venue,
        }
    }

    fn command(setup: &Setup) -> CreateBookingCommand {
        CreateBookingCommand {
            musician_id: *setup.musician.id(),
            venue_id: *setup.venue.id(),
            proposed_dates: vec![now().plus_days(14)],
            payment_terms: None,
        }
    }

    #[tokio::test]
    async fn musician_proposes_booking_with_venue_terms() {
        let setup = setup().await;
        let booking = setup
            .handler
            .handle(command(&setup), &CallerContext::musician(user("m-user")))
            .await
            .unwrap();

        assert_eq!(booking.status(), BookingStatus::Pending);
        assert_eq!(booking.initiated_by(), UserType::Musician);
        assert_eq!(booking.venue_user_id(), &user("v-user"));
        assert_eq!(booking.payment_terms(), setup.venue.payment_terms());
    }

    #[tokio::test]
    async fn venue_may_initiate() {
        let setup = setup().await;
        let booking = setup
            .handler
            .handle(command(&setup), &CallerContext::venue(user("v-user")))
            .await
            .unwrap();
        assert_eq!(booking.initiated_by(), UserType::Venue);
    }

    #[tokio::test]
    async fn caller_must_own_their_side() {
        let setup = setup().await;
        let result = setup
            .handler
            .handle(command(&setup), &CallerContext::musician(user("v-user")))
            .await;
        assert_eq!(result.unwrap_err(), BookingError::Forbidden);
    }

    #[tokio::test]
    async fn missing_venue_is_not_found() {
        let setup = setup().await;
        let missing = VenueId::new();
        let cmd = CreateBookingCommand {
            venue_id: missing,
            ..command(&setup)
        };
        let result = setup
            .handler
            .handle(cmd, &CallerContext::musician(user("m-user")))
            .await;
        assert_eq!(result.unwrap_err(), BookingError::VenueNotFound(missing));
    }

    #[tokio::test]
    async fn past_dates_are_rejected() {
        let setup = setup().await;
        let cmd = CreateBookingCommand {
            proposed_dates: vec![now().minus_days(1)],
            ..command(&setup)
        };
        let result = setup
            .handler
            .handle(cmd, &CallerContext::musician(user("m-user")))
            .await;
        assert!(matches!(result, Err(BookingError::Validation(_))));
    }
}
