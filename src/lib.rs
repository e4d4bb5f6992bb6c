//! chatline - an async client SDK for a chat server's REST API.
//!
//! The crate covers four chat verbs (post, upload, delete and update a
//! message). Every call is a single authenticated round trip whose JSON
//! answer is decoded into typed models, with failures reported through one
//! error taxonomy (`ChatError`: auth, request, decode, transport).
//!
//! # Architecture
//!
//! - `core` holds the data model, configuration and token stores
//! - `chat::requests` builds wire payloads
//! - `chat::transport` sends them (reqwest by default, swappable via the `Transport` trait)
//! - `chat::decoder` turns raw answers into typed values or errors
//! - `chat::ChatClient` ties these together
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use chatline::chat::ChatClient;
//! use chatline::core::{ClientConfig, StaticTokenStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     chatline::setup_logging();
//!
//!     let config = ClientConfig::new("https://chat.example.com")?
//!         .credentials("userId", "authToken");
//!     let tokens = Arc::new(StaticTokenStore::from_config(&config));
//!     let client = ChatClient::from_config(&config, tokens)?;
//!
//!     let message = client
//!         .send_message("GENERAL", "Hello @here", None, None, None)
//!         .await?;
//!     println!("posted {} at {}", message.id, message.timestamp);
//!
//!     client.update_message("GENERAL", "Hello again", &message.id).await?;
//!     client.delete_message("GENERAL", &message.id, true).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod chat;
pub mod core;
pub mod errors;
pub mod utils;

pub use chat::ChatClient;
pub use errors::ChatError;

/// Configure structured JSON logging.
///
/// The level comes from `RUST_LOG` and defaults to `info`. Calling this more
/// than once leaves the first subscriber in place.
///
/// # Example
///
/// ```
/// chatline::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
