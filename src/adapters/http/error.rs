//! Error bodies and status mapping shared by every endpoint.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::SearchError;
use crate::domain::booking::BookingError;
use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::profile::ProfileError;

/// JSON error body.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        let code = match resource_type {
            "Musician" => ErrorCode::MusicianNotFound,
            "Venue" => ErrorCode::VenueNotFound,
            _ => ErrorCode::BookingNotFound,
        };
        Self::new(code, format!("{} not found: {}", resource_type, id))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }
}

/// HTTP status for an error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
        ErrorCode::InvalidDate => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::MusicianNotFound | ErrorCode::VenueNotFound | ErrorCode::BookingNotFound => {
            StatusCode::NOT_FOUND
        }
        ErrorCode::InvalidStateTransition
        | ErrorCode::PrematureCompletion
        | ErrorCode::ConcurrentModification
        | ErrorCode::ProfileAlreadyExists => StatusCode::CONFLICT,
        ErrorCode::QueryRejected | ErrorCode::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn respond(code: ErrorCode, message: String, details: Option<serde_json::Value>) -> Response {
    let status = status_for(code);
    if status.is_server_error() {
        tracing::error!(code = %code, error = %message, "Request failed");
    }
    let body = ErrorResponse {
        code: code.to_string(),
        message,
        details,
    };
    (status, Json(body)).into_response()
}

fn validation_details(err: &ValidationError) -> serde_json::Value {
    serde_json::json!({ "field": err.field() })
}

/// Maps a booking error to its response.
pub fn booking_error(error: BookingError) -> Response {
    let details = match &error {
        BookingError::InvalidTransition { current, attempted } => Some(serde_json::json!({
            "current": current,
            "attempted": attempted,
        })),
        BookingError::Validation(inner) => Some(validation_details(inner)),
        _ => None,
    };
    respond(error.code(), error.to_string(), details)
}

/// Maps a profile error to its response.
pub fn profile_error(error: ProfileError) -> Response {
    let details = match &error {
        ProfileError::Validation(inner) => Some(validation_details(inner)),
        _ => None,
    };
    respond(error.code(), error.to_string(), details)
}

/// Maps a search error to its response.
pub fn search_error(error: SearchError) -> Response {
    let details = match &error {
        SearchError::Validation(inner) => Some(validation_details(inner)),
        SearchError::Query(_) => None,
    };
    respond(error.code(), error.to_string(), details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::BookingStatus;
    use crate::domain::foundation::{BookingId, Timestamp, UserType};

    #[test]
    fn booking_errors_map_to_statuses() {
        let cases = [
            (BookingError::Forbidden, StatusCode::FORBIDDEN),
            (BookingError::NotFound(BookingId::new()), StatusCode::NOT_FOUND),
            (
                BookingError::InvalidDate(Timestamp::from_unix_secs(0).unwrap()),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                BookingError::InvalidTransition {
                    current: BookingStatus::Completed,
                    attempted: BookingStatus::Cancelled,
                },
                StatusCode::CONFLICT,
            ),
            (
                BookingError::ConcurrentModification(BookingId::new()),
                StatusCode::CONFLICT,
            ),
            (
                BookingError::Validation(ValidationError::empty_field("message")),
                StatusCode::BAD_REQUEST,
            ),
        ];
        for (error, status) in cases {
            assert_eq!(booking_error(error).status(), status);
        }
    }

    #[test]
    fn profile_already_exists_is_conflict() {
        let response = profile_error(ProfileError::AlreadyExists(UserType::Musician));
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn unavailable_store_is_503() {
        let response = search_error(SearchError::Query(
            crate::ports::StoreError::Unavailable("timed out".to_string()),
        ));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
