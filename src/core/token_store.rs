use async_trait::async_trait;
use tokio::sync::RwLock;

use super::config::ClientConfig;
use super::models::Token;

/// Source of the credentials attached to each request.
///
/// The client asks for the token on every call and never caches it, so a
/// store may rotate credentials at any time.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self) -> Option<Token>;
}

/// Store holding one fixed token (or none).
#[derive(Debug, Clone, Default)]
pub struct StaticTokenStore {
    token: Option<Token>,
}

impl StaticTokenStore {
    #[must_use]
    pub fn new(token: Token) -> Self {
        Self { token: Some(token) }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self { token: None }
    }

    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            token: config.token(),
        }
    }
}

#[async_trait]
impl TokenStore for StaticTokenStore {
    async fn get(&self) -> Option<Token> {
        self.token.clone()
    }
}

/// Store whose token can be replaced or cleared while clients hold it.
#[derive(Debug, Default)]
pub struct SharedTokenStore {
    token: RwLock<Option<Token>>,
}

impl SharedTokenStore {
    #[must_use]
    pub fn new(token: Option<Token>) -> Self {
        Self {
            token: RwLock::new(token),
        }
    }

    pub async fn set(&self, token: Token) {
        *self.token.write().await = Some(token);
    }

    pub async fn clear(&self) {
        *self.token.write().await = None;
    }
}

#[async_trait]
impl TokenStore for SharedTokenStore {
    async fn get(&self) -> Option<Token> {
        self.token.read().await.clone()
    }
}
