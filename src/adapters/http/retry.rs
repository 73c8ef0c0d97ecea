//! Bounded re-run of booking operations that lost a write race.
//!
//! Handlers re-read the booking on every call, so running the whole
//! operation again is enough to pick up the competing write. A retry that
//! then hits a state the operation no longer applies to surfaces that error
//! as-is.

use std::future::Future;

use crate::domain::booking::BookingError;

/// Runs `operation` up to `max_attempts` times while it fails with a
/// retryable error.
pub async fn retry_on_conflict<T, F, Fut>(max_attempts: u32, mut operation: F) -> Result<T, BookingError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, BookingError>>,
{
    let max_attempts = max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match operation().await {
            Err(err) if err.is_retryable() && attempt < max_attempts => {
                tracing::warn!(attempt, max_attempts, error = %err, "Retrying booking write");
                attempt += 1;
            }
            result => return result,
        }
    }
}
