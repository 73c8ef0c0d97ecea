//! Booking message thread.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, ValidationError};

/// Sender id used for messages the system writes into a thread.
pub const SYSTEM_SENDER: &str = "system";

/// Maximum length of a single message.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// A single entry in a booking's message history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingMessage {
    pub sender_id: String,
    pub message: String,
    pub timestamp: Timestamp,
}

impl BookingMessage {
    pub fn is_system(&self) -> bool {
        self.sender_id == SYSTEM_SENDER
    }
}

/// Validates message text and returns it trimmed.
pub fn validate_message_text(text: &str) -> Result<String, ValidationError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ValidationError::empty_field("message"));
    }
    let len = text.chars().count();
    if len > MAX_MESSAGE_LENGTH {
        return Err(ValidationError::too_long("message", MAX_MESSAGE_LENGTH, len));
    }
    Ok(text.to_string())
}
