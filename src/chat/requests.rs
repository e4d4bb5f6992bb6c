//! Wire payloads for the chat endpoints.

use std::path::Path;

use bytes::Bytes;
use mime_guess::Mime;
use serde_json::{Value, json};

use crate::errors::ChatError;
use crate::utils::mime::{canonicalize_mime, guess_mime};

pub const POST_MESSAGE_PATH: &str = "/api/v1/chat.postMessage";
pub const DELETE_MESSAGE_PATH: &str = "/api/v1/chat.delete";
pub const UPDATE_MESSAGE_PATH: &str = "/api/v1/chat.update";
const UPLOAD_PATH_PREFIX: &str = "/api/v1/rooms.upload/";

/// Build the JSON payload for `chat.postMessage`.
#[must_use]
pub fn build_post_message_payload(
    room_id: &str,
    text: &str,
    alias: Option<&str>,
    emoji: Option<&str>,
    avatar: Option<&str>,
) -> Value {
    let mut payload = json!({
        "roomId": room_id,
        "text": text,
    });

    if let Some(a) = alias {
        payload["alias"] = Value::String(a.to_string());
    }

    if let Some(e) = emoji {
        payload["emoji"] = Value::String(e.to_string());
    }

    if let Some(a) = avatar {
        payload["avatar"] = Value::String(a.to_string());
    }

    payload
}

/// Build the JSON payload for `chat.delete`.
#[must_use]
pub fn build_delete_message_payload(room_id: &str, msg_id: &str, as_user: bool) -> Value {
    json!({
        "roomId": room_id,
        "msgId": msg_id,
        "asUser": as_user,
    })
}

/// Build the JSON payload for `chat.update`.
#[must_use]
pub fn build_update_message_payload(room_id: &str, text: &str, msg_id: &str) -> Value {
    json!({
        "roomId": room_id,
        "msgId": msg_id,
        "text": text,
    })
}

#[must_use]
pub fn upload_path(room_id: &str) -> String {
    format!("{UPLOAD_PATH_PREFIX}{}", urlencoding::encode(room_id))
}

/// A file to attach to a room.
///
/// `content` is reference-counted, so cloning an `UploadFile` does not copy
/// the file bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub mime_type: String,
    pub content: Bytes,
}

impl UploadFile {
    /// # Errors
    ///
    /// Returns [`ChatError::InvalidUpload`] if `mime_type` is not a valid
    /// MIME type once canonicalized.
    pub fn new(
        file_name: impl Into<String>,
        mime_type: &str,
        content: impl Into<Bytes>,
    ) -> Result<Self, ChatError> {
        let mime_type = canonicalize_mime(mime_type);
        mime_type
            .parse::<Mime>()
            .map_err(|e| ChatError::InvalidUpload(format!("bad MIME type `{mime_type}`: {e}")))?;

        Ok(Self {
            file_name: file_name.into(),
            mime_type,
            content: content.into(),
        })
    }

    /// Read a local file, guessing its MIME type from the extension when
    /// `mime_type` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::InvalidUpload`] if the file cannot be read or
    /// the given MIME type is invalid.
    pub async fn from_path(path: &Path, mime_type: Option<&str>) -> Result<Self, ChatError> {
        let content = tokio::fs::read(path).await.map_err(|e| {
            ChatError::InvalidUpload(format!("cannot read {}: {e}", path.display()))
        })?;
        let file_name = path
            .file_name()
            .map_or_else(|| "upload".to_string(), |n| n.to_string_lossy().into_owned());
        let mime = mime_type.map_or_else(|| guess_mime(path), ToString::to_string);

        Self::new(file_name, &mime, content)
    }
}

/// Multipart body for `rooms.upload`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    pub file: UploadFile,
    pub msg: Option<String>,
    pub description: Option<String>,
}

impl UploadForm {
    #[must_use]
    pub fn new(file: UploadFile, msg: Option<&str>, description: Option<&str>) -> Self {
        Self {
            file,
            msg: msg.map(ToString::to_string),
            description: description.map(ToString::to_string),
        }
    }
}
