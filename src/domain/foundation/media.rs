//! Typed media references attached to profiles.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Maximum length of a media caption.
pub const MAX_CAPTION_LENGTH: usize = 280;

/// Kind of media attached to a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Image,
    Video,
    Audio,
}

/// A typed media reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaItem {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

impl MediaItem {
    /// Creates an image reference.
    pub fn image(url: impl Into<String>) -> Self {
        Self {
            media_type: MediaType::Image,
            url: url.into(),
            caption: None,
        }
    }

    /// Validates the URL and caption.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(ValidationError::empty_field("mediaUrls.url"));
        }
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ValidationError::invalid_format(
                "mediaUrls.url",
                "must be an http(s) URL",
            ));
        }
        if let Some(caption) = &self.caption {
            let len = caption.chars().count();
            if len > MAX_CAPTION_LENGTH {
                return Err(ValidationError::too_long(
                    "mediaUrls.caption",
                    MAX_CAPTION_LENGTH,
                    len,
                ));
            }
        }
        Ok(())
    }
}
