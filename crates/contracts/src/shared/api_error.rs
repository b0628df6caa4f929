use serde::{Deserialize, Serialize};

/// Error body returned by the backend on non-2xx responses.
///
/// Spring controllers answer either `{"message": ...}` or `{"error": ...}`,
/// sometimes both; `message` wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.trim().is_empty())
            .or(self.error.filter(|e| !e.trim().is_empty()))
    }

    /// Extract a user-facing message from a raw response body.
    ///
    /// Falls back to the trimmed body when it is short plain text
    /// (several endpoints answer with a bare string). Markup, such as a
    /// proxy error page, is never returned.
    pub fn message_from_text(text: &str) -> Option<String> {
        if let Ok(body) = serde_json::from_str::<ErrorBody>(text) {
            if let Some(message) = body.into_message() {
                return Some(message);
            }
        }
        let trimmed = text.trim();
        let plain = !trimmed.starts_with('{') && !looks_like_markup(trimmed);
        if !trimmed.is_empty() && plain && trimmed.len() <= 200 {
            return Some(trimmed.to_string());
        }
        None
    }
}

fn looks_like_markup(text: &str) -> bool {
    text.starts_with('<') || (text.contains('<') && (text.contains("/>") || text.contains("</")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_preferred_over_error() {
        let text = r#"{"message":"Slot already booked","error":"Conflict"}"#;
        assert_eq!(
            ErrorBody::message_from_text(text).as_deref(),
            Some("Slot already booked")
        );
    }

    #[test]
    fn test_error_field_fallback() {
        let text = r#"{"error":"Bad Request","status":400}"#;
        assert_eq!(ErrorBody::message_from_text(text).as_deref(), Some("Bad Request"));
    }

    #[test]
    fn test_plain_text_body() {
        assert_eq!(
            ErrorBody::message_from_text("Facility not found").as_deref(),
            Some("Facility not found")
        );
        assert_eq!(ErrorBody::message_from_text("   "), None);
        assert_eq!(ErrorBody::message_from_text("{broken json"), None);
    }

    #[test]
    fn test_markup_body_is_not_a_message() {
        let page = "<html><body><h1>502 Bad Gateway</h1></body></html>";
        assert_eq!(ErrorBody::message_from_text(page), None);
        assert_eq!(ErrorBody::message_from_text("Gateway error: <b>upstream</b>"), None);
        assert_eq!(
            ErrorBody::message_from_text("Price must be < 10000").as_deref(),
            Some("Price must be < 10000")
        );
    }
}
