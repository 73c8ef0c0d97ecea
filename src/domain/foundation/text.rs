//! Text helpers shared by profile fields.

use super::ValidationError;

/// Minimum length of a musician bio or venue description.
pub const MIN_PROFILE_TEXT_LENGTH: usize = 50;

/// Requires a non-blank value and returns it trimmed.
pub fn require_non_blank(field: &str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

/// Requires at least `min` characters (Unicode scalar values, not bytes).
pub fn require_min_chars(field: &str, value: &str, min: usize) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if len < min {
        return Err(ValidationError::too_short(field, min, len));
    }
    Ok(())
}

/// Normalizes a tag list into a set: trims, lowercases, drops blanks and
/// duplicates while keeping first-seen order.
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn require_non_blank_trims() {
        assert_eq!(require_non_blank("name", "  The Band ").unwrap(), "The Band");
        assert!(require_non_blank("name", "   ").is_err());
    }

    #[test]
    fn require_min_chars_counts_characters() {
        let text = "é".repeat(50);
        assert!(require_min_chars("bio", &text, 50).is_ok());
        assert!(require_min_chars("bio", "short", 50).is_err());
    }

    #[test]
    fn normalize_tags_dedupes_and_keeps_order() {
        let tags = normalize_tags(["Jazz", " blues", "jazz", "", "Funk"]);
        assert_eq!(tags, vec!["jazz", "blues", "funk"]);
    }
}
