// web_app/model/error.rs - Errors that travel from the backend to the browser
//
// `ApiError` is serializable so it can cross the server-function boundary
// intact; the client needs to tell a 401 apart from every other failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ApiError {
    /// Token missing, expired, or rejected (HTTP 401)
    #[error("Your session has expired. Please log in again.")]
    Unauthorized,

    /// Request rejected with a message meant for the user (HTTP 400/422)
    #[error("{0}")]
    Validation(String),

    #[error("Not found")]
    NotFound,

    #[error("The server took too long to respond")]
    Timeout,

    #[error("Could not reach the server: {0}")]
    Network(String),

    #[error("Request failed ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    /// JSON form carried inside a server-function error message
    pub fn to_wire(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.to_string())
    }

    /// Inverse of `to_wire`; text that is not an encoded `ApiError` becomes `Network`
    pub fn from_wire(message: &str) -> Self {
        serde_json::from_str(message).unwrap_or_else(|_| ApiError::Network(message.to_string()))
    }

    /// Classify a non-success backend response
    pub fn from_response(status: u16, body: &str) -> Self {
        let parsed: Option<Value> = serde_json::from_str(body).ok();
        let message = parsed.as_ref().and_then(server_error_message);

        match status {
            401 => ApiError::Unauthorized,
            404 => ApiError::NotFound,
            400 | 409 | 422 => ApiError::Validation(
                message.unwrap_or_else(|| "The request was rejected by the server".to_string()),
            ),
            408 | 504 => ApiError::Timeout,
            _ => ApiError::Status {
                status,
                message: message.unwrap_or_else(|| truncate(body, 200)),
            },
        }
    }
}

/// User-facing message from a backend error body
///
/// A top-level `message` wins; otherwise the first field error of
/// `{"errors": {"field": ["msg", ...]}}` is used.
pub fn server_error_message(body: &Value) -> Option<String> {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string);

    message.or_else(|| {
        body.get("errors")
            .and_then(Value::as_object)
            .and_then(|errors| errors.values().next())
            .and_then(|messages| match messages {
                Value::Array(list) => list.first().and_then(Value::as_str).map(str::to_string),
                Value::String(s) => Some(s.clone()),
                _ => None,
            })
    })
}

fn truncate(text: &str, max_chars: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_401_is_unauthorized_regardless_of_body() {
        assert_eq!(ApiError::from_response(401, "<html>nope</html>"), ApiError::Unauthorized);
    }

    #[test]
    fn test_message_wins_over_field_errors() {
        let body = r#"{"message": "Email already registered", "errors": {"email": ["Email already taken."]}}"#;
        assert_eq!(
            ApiError::from_response(422, body),
            ApiError::Validation("Email already registered".to_string())
        );
    }

    #[test]
    fn test_first_field_error_without_message() {
        let body = r#"{"errors": {"email": ["Email already taken."], "phone": ["Phone required."]}}"#;
        assert_eq!(
            ApiError::from_response(422, body),
            ApiError::Validation("Email already taken.".to_string())
        );
    }

    #[test]
    fn test_message_used_without_field_errors() {
        let body = r#"{"message": "Invalid credentials"}"#;
        assert_eq!(
            ApiError::from_response(400, body),
            ApiError::Validation("Invalid credentials".to_string())
        );
    }

    #[test]
    fn test_serde_round_trip_keeps_variant() {
        let err = ApiError::Status { status: 503, message: "down".to_string() };
        let json = serde_json::to_string(&err).unwrap();
        let back: ApiError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);

        let json = serde_json::to_string(&ApiError::Unauthorized).unwrap();
        assert_eq!(serde_json::from_str::<ApiError>(&json).unwrap(), ApiError::Unauthorized);
    }

    #[test]
    fn test_plain_text_wire_message_is_network_error() {
        assert_eq!(
            ApiError::from_wire("error sending request"),
            ApiError::Network("error sending request".to_string())
        );
        assert_eq!(ApiError::from_wire(&ApiError::Timeout.to_wire()), ApiError::Timeout);
    }
}
