//! gigachat - GigaChat API client
//!
//! This library provides a client for the GigaChat conversational-AI API
//! with automatic OAuth token lifecycle management: the bearer token is
//! acquired eagerly at construction, tracked against its expiry, and
//! transparently refreshed inside a 60-second safety margin before every
//! authenticated call.
//!
//! # Example
//!
//! ```no_run
//! use gigachat::{Client, Credentials, Session, TrustConfig};
//!
//! # async fn example() -> Result<(), gigachat::Error> {
//! let trust = TrustConfig::from_pem_file("russian_trusted_root_ca.cer")?;
//! let session = Session::new(trust)?;
//! let credentials = Credentials::new("base64-key", "GIGACHAT_API_PERS");
//! let client = Client::connect(session, credentials).await?;
//!
//! let models = client.list_models().await?;
//! println!("{}", models.text().await?);
//!
//! client.close();
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod error;
pub mod tls;
pub mod types;

// Re-export primary types at crate root for convenience
pub use api::{DEFAULT_MODEL, Session};
pub use auth::Credentials;
pub use client::Client;
pub use error::Error;
pub use tls::TrustConfig;
pub use types::ApiUrl;

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
