//! Birthday Payload
//!
//! The one message the server sends: a name, a date of birth and a theme
//! identifier, as a JSON text frame. Parsing degrades gracefully - a
//! malformed frame becomes an absent payload, never an error the caller
//! has to handle.

use serde::{Deserialize, Serialize};

use crate::theme::Theme;

/// Birthday data received from the server.
///
/// `name` is displayed as-is, `dob` is epoch milliseconds (unvalidated;
/// zero and future values are allowed), `theme` is resolved lazily via
/// [`Theme::from_identifier`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthdayPayload {
    /// Display name of the baby
    pub name: String,
    /// Date of birth, epoch milliseconds
    pub dob: i64,
    /// Theme identifier, validated only at resolution time
    pub theme: String,
}

impl BirthdayPayload {
    /// Parse a text frame from the wire.
    ///
    /// Returns `None` on malformed JSON or missing/mistyped fields.
    /// Unknown extra fields are ignored.
    #[must_use]
    pub fn from_frame(text: &str) -> Option<Self> {
        match serde_json::from_str(text) {
            Ok(payload) => Some(payload),
            Err(err) => {
                tracing::warn!("discarding malformed birthday frame: {err}");
                None
            }
        }
    }

    /// Resolve the visual theme, falling back to pelican
    #[must_use]
    pub fn theme(&self) -> Theme {
        Theme::from_identifier(&self.theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parses_well_formed_frame() {
        let payload =
            BirthdayPayload::from_frame(r#"{"name":"Nanit","dob":1685826000000,"theme":"pelican"}"#)
                .unwrap();
        assert_eq!(payload.name, "Nanit");
        assert_eq!(payload.dob, 1_685_826_000_000);
        assert_eq!(payload.theme, "pelican");
        assert_eq!(payload.theme(), Theme::Pelican);
    }

    #[test]
    fn test_invalid_structure_is_none() {
        assert_eq!(
            BirthdayPayload::from_frame(r#"{"invalid":"json structure"}"#),
            None
        );
    }

    #[test]
    fn test_malformed_json_is_none() {
        assert_eq!(BirthdayPayload::from_frame("not json at all"), None);
        assert_eq!(BirthdayPayload::from_frame(""), None);
    }

    #[test]
    fn test_mistyped_field_is_none() {
        assert_eq!(
            BirthdayPayload::from_frame(r#"{"name":"A","dob":"yesterday","theme":"fox"}"#),
            None
        );
    }

    #[test]
    fn test_missing_field_is_none() {
        assert_eq!(
            BirthdayPayload::from_frame(r#"{"name":"A","dob":0}"#),
            None
        );
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let payload = BirthdayPayload::from_frame(
            r#"{"name":"A","dob":0,"theme":"elephant","extra":true}"#,
        )
        .unwrap();
        assert_eq!(payload.theme(), Theme::Elephant);
    }

    #[test]
    fn test_unrecognized_theme_resolves_to_pelican() {
        let payload =
            BirthdayPayload::from_frame(r#"{"name":"A","dob":0,"theme":"dinosaur"}"#).unwrap();
        assert_eq!(payload.theme(), Theme::Pelican);
    }
}
