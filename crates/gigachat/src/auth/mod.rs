//! Authentication types and token lifecycle management.
//!
//! The credential exchange trades a long-lived authorization key for a
//! short-lived bearer token; [`TokenManager`] keeps the current token and
//! refreshes it before every call that would otherwise carry a stale one.

mod credentials;
mod manager;
mod token;

pub use credentials::Credentials;
pub use token::AccessToken;

pub(crate) use manager::TokenManager;
