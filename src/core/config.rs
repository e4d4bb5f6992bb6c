use std::env;
use std::time::Duration;

use url::Url;

use super::models::Token;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub user_id: Option<String>,
    pub auth_token: Option<String>,
}

impl ClientConfig {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// # Errors
    ///
    /// Returns an error if `server_url` is not an absolute http(s) URL.
    pub fn new(server_url: impl Into<String>) -> Result<Self, String> {
        let server_url = server_url.into();
        let parsed = Url::parse(&server_url).map_err(|e| format!("server url {server_url}: {e}"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(format!(
                "server url {server_url}: unsupported scheme {}",
                parsed.scheme()
            ));
        }

        Ok(Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            user_agent: format!("chatline/{}", env!("CARGO_PKG_VERSION")),
            user_id: None,
            auth_token: None,
        })
    }

    /// # Errors
    ///
    /// Returns an error naming the variable that is missing or malformed.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a caller-supplied lookup.
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable that is missing or malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_url =
            lookup("CHAT_SERVER_URL").ok_or_else(|| "CHAT_SERVER_URL: not set".to_string())?;
        let mut config =
            Self::new(server_url).map_err(|e| format!("CHAT_SERVER_URL: {e}"))?;

        if let Some(raw) = lookup("CHAT_TIMEOUT_SECS") {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|e| format!("CHAT_TIMEOUT_SECS: {e}"))?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(agent) = lookup("CHAT_USER_AGENT") {
            config.user_agent = agent;
        }

        config.user_id = lookup("CHAT_USER_ID");
        config.auth_token = lookup("CHAT_AUTH_TOKEN");

        Ok(config)
    }

    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    #[must_use]
    pub fn credentials(mut self, user_id: impl Into<String>, auth_token: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self.auth_token = Some(auth_token.into());
        self
    }

    /// The configured token, present only when both halves are set.
    #[must_use]
    pub fn token(&self) -> Option<Token> {
        match (&self.user_id, &self.auth_token) {
            (Some(user_id), Some(auth_token)) => Some(Token::new(user_id, auth_token)),
            _ => None,
        }
    }
}
