//! Booking aggregate.
//!
//! A booking is a negotiated engagement between one musician and one venue.
//! All transitions are pure: they take the current time explicitly and either
//! mutate the aggregate completely or leave it untouched.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BookingId, MusicianId, PaymentTerms, StateMachine, TimeOfDay, Timestamp, UserId, UserType,
    ValidationError, VenueId,
};

use super::message::{validate_message_text, SYSTEM_SENDER};
use super::{BookingError, BookingMessage, BookingStatus};

/// Input for a new booking proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingProposal {
    pub musician_id: MusicianId,
    pub venue_id: VenueId,
    pub musician_user_id: UserId,
    pub venue_user_id: UserId,
    pub proposed_dates: Vec<Timestamp>,
    pub payment_terms: PaymentTerms,
    pub initiated_by: UserType,
}

/// Booking aggregate.
///
/// # Invariants
///
/// - `proposed_dates` is non-empty and duplicate free, fixed at creation
/// - `confirmed_date`, `start_time`, `end_time` are present iff the status is
///   accepted or completed
/// - `message_history` only grows and its timestamps never decrease
/// - `revision` increases by one with every successful mutation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    id: BookingId,
    musician_id: MusicianId,
    venue_id: VenueId,
    musician_user_id: UserId,
    venue_user_id: UserId,
    status: BookingStatus,
    proposed_dates: Vec<Timestamp>,
    #[serde(default)]
    confirmed_date: Option<Timestamp>,
    #[serde(default)]
    start_time: Option<TimeOfDay>,
    #[serde(default)]
    end_time: Option<TimeOfDay>,
    #[serde(default)]
    payment_terms: PaymentTerms,
    initiated_by: UserType,
    #[serde(default)]
    message_history: Vec<BookingMessage>,
    #[serde(default)]
    revision: u64,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Booking {
    /// Creates a pending booking.
    ///
    /// # Errors
    ///
    /// `Validation` if no dates are proposed, a date repeats, a date lies in
    /// the past, or the payment terms are invalid.
    pub fn propose(
        id: BookingId,
        proposal: BookingProposal,
        now: Timestamp,
    ) -> Result<Self, BookingError> {
        if proposal.proposed_dates.is_empty() {
            return Err(ValidationError::empty_field("proposedDates").into());
        }
        for (i, date) in proposal.proposed_dates.iter().enumerate() {
            if proposal.proposed_dates[..i].contains(date) {
                return Err(ValidationError::invalid_format(
                    "proposedDates",
                    format!("{} is proposed more than once", date),
                )
                .into());
            }
            if date.is_before(&now) {
                return Err(ValidationError::invalid_format(
                    "proposedDates",
                    format!("{} is in the past", date),
                )
                .into());
            }
        }
        let payment_terms = proposal.payment_terms.normalized()?;

        Ok(Self {
            id,
            musician_id: proposal.musician_id,
            venue_id: proposal.venue_id,
            musician_user_id: proposal.musician_user_id,
            venue_user_id: proposal.venue_user_id,
            status: BookingStatus::Pending,
            proposed_dates: proposal.proposed_dates,
            confirmed_date: None,
            start_time: None,
            end_time: None,
            payment_terms,
            initiated_by: proposal.initiated_by,
            message_history: Vec::new(),
            revision: 0,
            created_at: now,
            updated_at: now,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &BookingId {
        &self.id
    }

    pub fn musician_id(&self) -> &MusicianId {
        &self.musician_id
    }

    pub fn venue_id(&self) -> &VenueId {
        &self.venue_id
    }

    pub fn musician_user_id(&self) -> &UserId {
        &self.musician_user_id
    }

    pub fn venue_user_id(&self) -> &UserId {
        &self.venue_user_id
    }

    pub fn status(&self) -> BookingStatus {
        self.status
    }

    pub fn proposed_dates(&self) -> &[Timestamp] {
        &self.proposed_dates
    }

    pub fn confirmed_date(&self) -> Option<&Timestamp> {
        self.confirmed_date.as_ref()
    }

    pub fn start_time(&self) -> Option<TimeOfDay> {
        self.start_time
    }

    pub fn end_time(&self) -> Option<TimeOfDay> {
        self.end_time
    }

    pub fn payment_terms(&self) -> &PaymentTerms {
        &self.payment_terms
    }

    pub fn initiated_by(&self) -> UserType {
        self.initiated_by
    }

    pub fn message_history(&self) -> &[BookingMessage] {
        &self.message_history
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the side the user is on, if they are a party.
    pub fn party_role(&self, user_id: &UserId) -> Option<UserType> {
        if &self.musician_user_id == user_id {
            Some(UserType::Musician)
        } else if &self.venue_user_id == user_id {
            Some(UserType::Venue)
        } else {
            None
        }
    }

    pub fn is_party(&self, user_id: &UserId) -> bool {
        self.party_role(user_id).is_some()
    }

    /// Fails with `Forbidden` unless the user is a party.
    pub fn ensure_party(&self, user_id: &UserId) -> Result<UserType, BookingError> {
        self.party_role(user_id).ok_or(BookingError::Forbidden)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Transitions
    // ─────────────────────────────────────────────────────────────────────────

    /// Accepts the booking for one of the proposed dates.
    pub fn accept(
        &mut self,
        actor: &UserId,
        confirmed_date: Timestamp,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        now: Timestamp,
    ) -> Result<(), BookingError> {
        self.ensure_party(actor)?;
        let next = self.status.transition_to(BookingStatus::Accepted)?;
        if !self.proposed_dates.contains(&confirmed_date) {
            return Err(BookingError::InvalidDate(confirmed_date));
        }
        if start_time == end_time {
            return Err(ValidationError::invalid_format(
                "endTime",
                "startTime and endTime must differ",
            )
            .into());
        }

        self.status = next;
        self.confirmed_date = Some(confirmed_date);
        self.start_time = Some(start_time);
        self.end_time = Some(end_time);
        self.touch(now);
        Ok(())
    }

    /// Rejects a pending booking, recording the reason as a system message.
    pub fn reject(
        &mut self,
        actor: &UserId,
        reason: Option<&str>,
        now: Timestamp,
    ) -> Result<(), BookingError> {
        self.ensure_party(actor)?;
        let next = self.status.transition_to(BookingStatus::Rejected)?;
        let note = match reason.map(str::trim).filter(|r| !r.is_empty()) {
            Some(reason) => Some(validate_message_text(&format!(
                "Booking rejected: {}",
                reason
            ))?),
            None => None,
        };

        self.status = next;
        if let Some(note) = note {
            self.append(SYSTEM_SENDER.to_string(), note, now);
        }
        self.touch(now);
        Ok(())
    }

    /// Cancels a pending or accepted booking. Clears any confirmation.
    pub fn cancel(&mut self, actor: &UserId, now: Timestamp) -> Result<(), BookingError> {
        self.ensure_party(actor)?;
        let next = self.status.transition_to(BookingStatus::Cancelled)?;

        self.status = next;
        self.confirmed_date = None;
        self.start_time = None;
        self.end_time = None;
        self.touch(now);
        Ok(())
    }

    /// Marks an accepted booking as performed once its date has arrived.
    pub fn complete(&mut self, actor: &UserId, now: Timestamp) -> Result<(), BookingError> {
        self.ensure_party(actor)?;
        let next = self.status.transition_to(BookingStatus::Completed)?;
        let confirmed_date = self
            .confirmed_date
            .ok_or_else(|| BookingError::infrastructure("accepted booking has no confirmed date"))?;
        if confirmed_date.is_after(&now) {
            return Err(BookingError::PrematureCompletion { confirmed_date });
        }

        self.status = next;
        self.touch(now);
        Ok(())
    }

    /// Appends a message from a party. Allowed in every status.
    pub fn post_message(
        &mut self,
        sender: &UserId,
        text: &str,
        now: Timestamp,
    ) -> Result<(), BookingError> {
        self.ensure_party(sender)?;
        let text = validate_message_text(text)?;

        self.append(sender.to_string(), text, now);
        self.touch(now);
        Ok(())
    }

    fn append(&mut self, sender_id: String, message: String, now: Timestamp) {
        let timestamp = match self.message_history.last() {
            Some(last) if last.timestamp.is_after(&now) => last.timestamp,
            _ => now,
        };
        self.message_history.push(BookingMessage {
            sender_id,
            message,
            timestamp,
        });
    }

    fn touch(&mut self, now: Timestamp) {
        self.updated_at = now;
        self.revision += 1;
    }
}
