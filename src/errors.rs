use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    /// The server rejected the caller's credentials (HTTP 401 or a
    /// "must be logged in" application error).
    #[error("Not authenticated: {message}")]
    Auth { message: String },

    #[error("Request failed with HTTP {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Request {
        status: u16,
        message: Option<String>,
    },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Failed to reach chat server: {0}")]
    Transport(String),

    /// An upload was rejected locally before anything was sent.
    #[error("Invalid upload: {0}")]
    InvalidUpload(String),
}

impl ChatError {
    #[must_use]
    pub const fn is_auth(&self) -> bool {
        matches!(self, ChatError::Auth { .. })
    }

    /// True when the request never got an answer from the server.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, ChatError::Transport(_))
    }
}

impl From<reqwest::Error> for ChatError {
    fn from(error: reqwest::Error) -> Self {
        ChatError::Transport(error.to_string())
    }
}

impl From<serde_json::Error> for ChatError {
    fn from(error: serde_json::Error) -> Self {
        ChatError::Decode(error.to_string())
    }
}
