//! Chat API client
//!
//! One method per chat verb. Each call reads the current token from the
//! injected store, performs a single POST and decodes the answer.

use std::sync::Arc;

use tracing::{debug, warn};

use super::decoder::{SuccessShape, decode};
use super::requests::{
    DELETE_MESSAGE_PATH, POST_MESSAGE_PATH, UPDATE_MESSAGE_PATH, UploadFile, UploadForm,
    build_delete_message_payload, build_post_message_payload, build_update_message_payload,
    upload_path,
};
use super::transport::{ApiRequest, ReqwestTransport, Transport};
use crate::core::config::ClientConfig;
use crate::core::models::{DeleteResult, Message};
use crate::core::token_store::TokenStore;
use crate::errors::ChatError;

#[derive(Clone)]
pub struct ChatClient {
    transport: Arc<dyn Transport>,
    tokens: Arc<dyn TokenStore>,
}

impl ChatClient {
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { transport, tokens }
    }

    /// # Errors
    ///
    /// Returns [`ChatError::Transport`] if the HTTP client cannot be built.
    pub fn from_config(
        config: &ClientConfig,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self, ChatError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), tokens))
    }

    async fn call<T: SuccessShape>(&self, request: ApiRequest) -> Result<T, ChatError> {
        let path = request.path.clone();
        let token = self.tokens.get().await;
        if token.is_none() {
            debug!("No token available for {}, sending unauthenticated", path);
        }

        let result = match self.transport.execute(request, token.as_ref()).await {
            Ok(resp) => decode::<T>(resp.status, &resp.body),
            Err(e) => Err(e),
        };

        match &result {
            Err(e @ ChatError::Auth { .. }) => warn!("{} rejected credentials: {}", path, e),
            Err(e) => warn!("{} failed: {}", path, e),
            Ok(_) => debug!("{} succeeded", path),
        }

        result
    }

    /// Post a new message to a room.
    ///
    /// # Errors
    ///
    /// Returns [`ChatError::Auth`] when the server rejects the credentials,
    /// [`ChatError::Request`] for other failures, [`ChatError::Decode`] if
    /// the answer is not a message envelope and [`ChatError::Transport`]
    /// when the server cannot be reached.
    pub async fn send_message(
        &self,
        room_id: &str,
        text: &str,
        alias: Option<&str>,
        emoji: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<Message, ChatError> {
        let payload = build_post_message_payload(room_id, text, alias, emoji, avatar);
        self.call(ApiRequest::json(POST_MESSAGE_PATH, payload)).await
    }

    /// Upload a file to a room, optionally with a message and description.
    ///
    /// The file's content buffer is shared with the request, not copied.
    ///
    /// # Errors
    ///
    /// Same as [`ChatClient::send_message`], minus decoding: any 2xx answer
    /// is success.
    pub async fn upload_file(
        &self,
        room_id: &str,
        file: &UploadFile,
        msg: Option<&str>,
        description: Option<&str>,
    ) -> Result<(), ChatError> {
        let form = UploadForm::new(file.clone(), msg, description);
        self.call(ApiRequest::multipart(upload_path(room_id), form)).await
    }

    /// Delete a message. `as_user` attributes the deletion to the
    /// authenticated user instead of using elevated privileges.
    ///
    /// # Errors
    ///
    /// See [`ChatClient::send_message`].
    pub async fn delete_message(
        &self,
        room_id: &str,
        msg_id: &str,
        as_user: bool,
    ) -> Result<DeleteResult, ChatError> {
        let payload = build_delete_message_payload(room_id, msg_id, as_user);
        self.call(ApiRequest::json(DELETE_MESSAGE_PATH, payload)).await
    }

    /// Replace the text of an existing message.
    ///
    /// The server may omit `urls` and `mentions` from the returned message.
    ///
    /// # Errors
    ///
    /// See [`ChatClient::send_message`].
    pub async fn update_message(
        &self,
        room_id: &str,
        text: &str,
        message_id: &str,
    ) -> Result<Message, ChatError> {
        let payload = build_update_message_payload(room_id, text, message_id);
        self.call(ApiRequest::json(UPDATE_MESSAGE_PATH, payload)).await
    }
}
