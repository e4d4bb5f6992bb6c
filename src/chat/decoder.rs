//! Maps raw server responses onto typed results.
//!
//! Every response goes through [`decode`]: authentication failures are
//! recognised first (by status or by the server's error text), other
//! non-success answers become [`ChatError::Request`], and only then is the
//! body parsed into the expected shape.

use serde::Deserialize;
use serde_json::Value;

use crate::core::models::{DeleteResult, Message};
use crate::errors::ChatError;

/// Error text the server uses when a request carries no valid session.
pub const AUTH_REQUIRED_MESSAGE: &str = "You must be logged in to do this.";

const AUTH_REQUIRED_MARKER: &str = "must be logged in";

/// Expected shape of a successful response body.
pub trait SuccessShape: Sized {
    /// # Errors
    ///
    /// Returns [`ChatError::Decode`] if the body does not match the shape.
    fn from_body(body: &Value) -> Result<Self, ChatError>;
}

impl SuccessShape for Message {
    fn from_body(body: &Value) -> Result<Self, ChatError> {
        let message = body
            .get("message")
            .ok_or_else(|| ChatError::Decode("missing field `message` in envelope".to_string()))?;
        Ok(Message::deserialize(message)?)
    }
}

impl SuccessShape for DeleteResult {
    fn from_body(body: &Value) -> Result<Self, ChatError> {
        Ok(DeleteResult::deserialize(body)?)
    }
}

/// Ack-only operations: any well-formed 2xx answer is success.
impl SuccessShape for () {
    fn from_body(_body: &Value) -> Result<Self, ChatError> {
        Ok(())
    }
}

/// Decode a response with the given HTTP `status` and `body` into `T`.
///
/// # Errors
///
/// - [`ChatError::Auth`] on 401 or a "must be logged in" error body
/// - [`ChatError::Request`] on any other non-2xx status, or a 2xx envelope
///   with `"success": false`
/// - [`ChatError::Decode`] when a 2xx body does not match `T`
pub fn decode<T: SuccessShape>(status: u16, body: &Value) -> Result<T, ChatError> {
    check_status(status, body)?;
    T::from_body(body)
}

/// Classify the response without looking at the success payload.
///
/// # Errors
///
/// Returns the failure the response represents, if any.
pub fn check_status(status: u16, body: &Value) -> Result<(), ChatError> {
    if status == 401 || is_auth_failure(body) {
        return Err(ChatError::Auth {
            message: error_message(body).unwrap_or_else(|| AUTH_REQUIRED_MESSAGE.to_string()),
        });
    }

    if !(200..300).contains(&status) {
        return Err(ChatError::Request {
            status,
            message: error_message(body),
        });
    }

    if body.get("success").and_then(Value::as_bool) == Some(false) {
        return Err(ChatError::Request {
            status,
            message: error_message(body),
        });
    }

    Ok(())
}

/// Whether the body reports a missing or invalid session.
#[must_use]
pub fn is_auth_failure(body: &Value) -> bool {
    ["error", "message"]
        .iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_str))
        .any(|text| text.to_ascii_lowercase().contains(AUTH_REQUIRED_MARKER))
}

/// Server-provided error text: `error`, then `message`, then a raw text body.
#[must_use]
pub fn error_message(body: &Value) -> Option<String> {
    let text = match body {
        Value::String(raw) => Some(raw.as_str()),
        Value::Object(_) => body
            .get("error")
            .and_then(Value::as_str)
            .or_else(|| body.get("message").and_then(Value::as_str)),
        _ => None,
    };

    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(ToString::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message_envelope() -> Value {
        json!({
            "ts": 1_511_443_964_798_i64,
            "channel": "general",
            "message": {
                "_id": "messageId",
                "rid": "GENERAL",
                "msg": "Sending message with @here and https://github.com #general",
                "alias": "alias",
                "emoji": ":smirk:",
                "avatar": "http://site.com/logo.png",
                "parseUrls": true,
                "groupable": false,
                "ts": 1_511_443_964_798_i64,
                "_updatedAt": 1_511_443_964_808_i64,
                "u": {"_id": "userId", "username": "username", "name": "Name"},
                "urls": [{"url": "https://github.com"}],
                "mentions": [{"_id": "here", "username": "here"}],
                "channels": [{"_id": "GENERAL", "name": "general"}]
            },
            "success": true
        })
    }

    #[test]
    fn test_decode_message_envelope() {
        let message: Message = decode(200, &message_envelope()).unwrap();

        assert_eq!(message.id, "messageId");
        assert_eq!(message.room_id, "GENERAL");
        assert_eq!(message.alias.as_deref(), Some("alias"));
        assert_eq!(message.emoji.as_deref(), Some(":smirk:"));
        assert_eq!(message.parse_urls, Some(true));
        assert_eq!(message.groupable, Some(false));
        assert_eq!(message.timestamp, 1_511_443_964_798);
        assert_eq!(message.updated_at, 1_511_443_964_808);
        assert_eq!(message.sender.username, "username");
        assert_eq!(message.urls.as_ref().map(Vec::len), Some(1));
        assert_eq!(message.channels.as_ref().unwrap()[0].name, "general");
    }

    #[test]
    fn test_decode_is_idempotent() {
        let body = message_envelope();
        let first: Message = decode(200, &body).unwrap();
        let second: Message = decode(200, &body).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_room_id_is_decode_error() {
        let mut body = message_envelope();
        body["message"].as_object_mut().unwrap().remove("rid");

        let err = decode::<Message>(200, &body).unwrap_err();
        match err {
            ChatError::Decode(msg) => assert!(msg.contains("rid")),
            other => panic!("Expected Decode, got: {other:?}"),
        }
    }

    #[test]
    fn test_missing_sender_is_decode_error() {
        let mut body = message_envelope();
        body["message"].as_object_mut().unwrap().remove("u");

        assert!(matches!(
            decode::<Message>(200, &body),
            Err(ChatError::Decode(_))
        ));
    }

    #[test]
    fn test_missing_envelope_is_decode_error() {
        assert!(matches!(
            decode::<Message>(200, &json!({"success": true})),
            Err(ChatError::Decode(_))
        ));
        assert!(matches!(
            decode::<Message>(200, &Value::Null),
            Err(ChatError::Decode(_))
        ));
    }

    #[test]
    fn test_float_timestamp_names_accepted_forms() {
        let mut body = message_envelope();
        body["message"]["ts"] = json!(1.511_443_964_798e12);

        match decode::<Message>(200, &body).unwrap_err() {
            ChatError::Decode(msg) => assert!(msg.contains("epoch milliseconds"), "{msg}"),
            other => panic!("Expected Decode, got: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_type_is_decode_error() {
        let mut body = message_envelope();
        body["message"]["ts"] = json!("yesterday");

        assert!(matches!(
            decode::<Message>(200, &body),
            Err(ChatError::Decode(_))
        ));
    }

    #[test]
    fn test_401_is_auth_error() {
        let body = json!({"status": "error", "message": AUTH_REQUIRED_MESSAGE});
        let err = decode::<()>(401, &body).unwrap_err();

        assert!(err.is_auth());
        match err {
            ChatError::Auth { message } => assert_eq!(message, AUTH_REQUIRED_MESSAGE),
            other => panic!("Expected Auth, got: {other:?}"),
        }
    }

    #[test]
    fn test_401_without_body_is_auth_error() {
        assert!(decode::<()>(401, &Value::Null).unwrap_err().is_auth());
    }

    #[test]
    fn test_auth_text_wins_over_status() {
        let body = json!({"success": false, "error": "You must be logged in to do this."});

        assert!(decode::<()>(403, &body).unwrap_err().is_auth());
        assert!(decode::<()>(200, &body).unwrap_err().is_auth());
    }

    #[test]
    fn test_other_failures_are_request_errors() {
        let body = json!({"success": false, "error": "The required \"roomId\" param is missing."});
        let err = decode::<Message>(400, &body).unwrap_err();

        match err {
            ChatError::Request { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(
                    message.as_deref(),
                    Some("The required \"roomId\" param is missing.")
                );
            }
            other => panic!("Expected Request, got: {other:?}"),
        }
    }

    #[test]
    fn test_request_error_message_fallbacks() {
        match decode::<()>(502, &Value::String("Bad Gateway".to_string())).unwrap_err() {
            ChatError::Request { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message.as_deref(), Some("Bad Gateway"));
            }
            other => panic!("Expected Request, got: {other:?}"),
        }

        match decode::<()>(500, &Value::Null).unwrap_err() {
            ChatError::Request { message, .. } => assert!(message.is_none()),
            other => panic!("Expected Request, got: {other:?}"),
        }
    }

    #[test]
    fn test_success_false_on_2xx_is_request_error() {
        let body = json!({"success": false, "error": "error-action-not-allowed"});

        match decode::<DeleteResult>(200, &body).unwrap_err() {
            ChatError::Request { status, message } => {
                assert_eq!(status, 200);
                assert_eq!(message.as_deref(), Some("error-action-not-allowed"));
            }
            other => panic!("Expected Request, got: {other:?}"),
        }
    }

    #[test]
    fn test_decode_delete_result() {
        let body = json!({"id": "messageId", "ts": 1_511_443_964_815_i64, "success": true});
        let result: DeleteResult = decode(200, &body).unwrap();

        assert_eq!(
            result,
            DeleteResult {
                id: "messageId".to_string(),
                timestamp: 1_511_443_964_815,
                success: true,
            }
        );
    }

    #[test]
    fn test_ack_accepts_any_success_body() {
        assert!(decode::<()>(200, &json!({"success": true})).is_ok());
        assert!(decode::<()>(200, &Value::Null).is_ok());
        assert!(decode::<()>(204, &Value::String("ok".to_string())).is_ok());
    }
}
