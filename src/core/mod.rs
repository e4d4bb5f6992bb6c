//! Configuration, data model and credential storage

pub mod config;
pub mod models;
pub mod token_store;

pub use config::ClientConfig;
pub use models::{ChannelRef, DeleteResult, Message, Token, UrlRef, UserRef};
pub use token_store::{SharedTokenStore, StaticTokenStore, TokenStore};
