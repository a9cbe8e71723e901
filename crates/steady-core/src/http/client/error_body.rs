//! Extraction of server messages from error response bodies

use serde_json::Value;

/// Longest slice of a non-JSON body carried into an error message
const MAX_BODY_CHARS: usize = 200;

/// Best-effort human message for an error response.
///
/// Recognises `message`, `error` (string or object with `message`),
/// `errors[0].message` and `error_description`; falls back to the trimmed
/// body text, then to the canonical reason phrase.
pub(crate) fn server_message(status: u16, body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        if let Some(message) = message_from_json(&value) {
            return message;
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if !text.is_empty() {
        return truncate(text, MAX_BODY_CHARS);
    }

    reqwest::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown status")
        .to_string()
}

fn message_from_json(value: &Value) -> Option<String> {
    let candidates = [
        value.get("message"),
        value.get("error").and_then(|e| e.get("message")),
        value.get("error"),
        value
            .get("errors")
            .and_then(|errors| errors.get(0))
            .and_then(|first| first.get("message")),
        value.get("error_description"),
    ];

    candidates
        .into_iter()
        .flatten()
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|message| !message.is_empty())
        .map(str::to_string)
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => format!("{}...", &text[..index]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_error_shapes() {
        assert_eq!(server_message(400, br#"{"message":"bad input"}"#), "bad input");
        assert_eq!(server_message(401, br#"{"error":"invalid_token"}"#), "invalid_token");
        assert_eq!(
            server_message(422, br#"{"error":{"message":"field missing","code":7}}"#),
            "field missing"
        );
        assert_eq!(
            server_message(400, br#"{"errors":[{"message":"first"},{"message":"second"}]}"#),
            "first"
        );
        assert_eq!(
            server_message(401, br#"{"error_description":"token expired"}"#),
            "token expired"
        );
    }

    #[test]
    fn test_plain_text_body() {
        assert_eq!(server_message(502, b"  upstream unavailable \n"), "upstream unavailable");
    }

    #[test]
    fn test_long_body_truncated() {
        let body = "x".repeat(500);
        let message = server_message(500, body.as_bytes());
        assert_eq!(message.len(), MAX_BODY_CHARS + 3);
        assert!(message.ends_with("..."));
    }

    #[test]
    fn test_empty_body_uses_reason_phrase() {
        assert_eq!(server_message(404, b""), "Not Found");
        assert_eq!(server_message(503, b"{}"), "{}");
        assert_eq!(server_message(799, b""), "Unknown status");
    }
}
