//! Chat REST API: request builders, response decoding, transport and client

pub mod client;
pub mod decoder;
pub mod requests;
pub mod transport;

// Re-export main types for convenience
pub use client::ChatClient;
pub use decoder::{AUTH_REQUIRED_MESSAGE, SuccessShape, decode};
pub use requests::{UploadFile, UploadForm};
pub use transport::{ApiRequest, RawResponse, RequestBody, ReqwestTransport, Transport};
