//! HTTP transport used by [`ChatClient`](super::ChatClient).

use async_trait::async_trait;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use tracing::debug;

use super::requests::UploadForm;
use crate::core::config::ClientConfig;
use crate::core::models::Token;
use crate::errors::ChatError;

pub const USER_ID_HEADER: &str = "X-User-Id";
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Json(Value),
    Multipart(UploadForm),
}

/// One POST to the chat API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub path: String,
    pub body: RequestBody,
}

impl ApiRequest {
    #[must_use]
    pub fn json(path: impl Into<String>, body: Value) -> Self {
        Self {
            path: path.into(),
            body: RequestBody::Json(body),
        }
    }

    #[must_use]
    pub fn multipart(path: impl Into<String>, form: UploadForm) -> Self {
        Self {
            path: path.into(),
            body: RequestBody::Multipart(form),
        }
    }
}

/// Status and fully-read body of a server answer.
///
/// Non-JSON bodies are kept as `Value::String`; an empty body is `Value::Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

impl RawResponse {
    #[must_use]
    pub fn from_text(status: u16, text: &str) -> Self {
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
        };
        Self { status, body }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `request`, attaching `token` when present.
    ///
    /// Only connection-level failures are errors here; every status the
    /// server answers with comes back as a [`RawResponse`].
    async fn execute(
        &self,
        request: ApiRequest,
        token: Option<&Token>,
    ) -> Result<RawResponse, ChatError>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    server_url: String,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns [`ChatError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self::with_client(client, &config.server_url))
    }

    #[must_use]
    pub fn with_client(client: Client, server_url: &str) -> Self {
        Self {
            client,
            server_url: server_url.trim_end_matches('/').to_string(),
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }
}

fn build_form(form: UploadForm) -> Result<Form, ChatError> {
    let length = form.file.content.len() as u64;
    let part = Part::stream_with_length(form.file.content, length)
        .file_name(form.file.file_name)
        .mime_str(&form.file.mime_type)
        .map_err(|e| ChatError::InvalidUpload(format!("bad MIME type: {e}")))?;

    let mut multipart = Form::new().part("file", part);

    if let Some(msg) = form.msg {
        multipart = multipart.text("msg", msg);
    }

    if let Some(description) = form.description {
        multipart = multipart.text("description", description);
    }

    Ok(multipart)
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(
        &self,
        request: ApiRequest,
        token: Option<&Token>,
    ) -> Result<RawResponse, ChatError> {
        let url = self.url_for(&request.path);
        let mut builder = self.client.post(&url);

        if let Some(t) = token {
            builder = builder
                .header(USER_ID_HEADER, &t.user_id)
                .header(AUTH_TOKEN_HEADER, &t.auth_token);
        }

        builder = match request.body {
            RequestBody::Json(payload) => builder.json(&payload),
            RequestBody::Multipart(form) => builder.multipart(build_form(form)?),
        };

        debug!("POST {}", url);

        let resp = builder.send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;

        #[cfg(feature = "debug-logs")]
        tracing::info!("Response from {} ({}): {}", request.path, status, text);

        Ok(RawResponse::from_text(status, &text))
    }
}
