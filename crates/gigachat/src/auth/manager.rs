//! Token lifecycle management.

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::api::{OauthTokenResponse, Session};
use crate::error::{AuthError, Error};

use super::credentials::Credentials;
use super::token::{AccessToken, Token};

/// Owns the current bearer token and refreshes it on demand.
///
/// Every authenticated call goes through [`TokenManager::ensure_valid`]
/// first; there is no background refresh timer. Token state lives behind a
/// `tokio::sync::RwLock`: fresh-token reads take the read lock, and the
/// refresh path holds the write lock across the credential exchange so
/// concurrent stale observers wait for one exchange instead of each
/// issuing their own.
#[derive(Debug)]
pub(crate) struct TokenManager {
    current: RwLock<Option<Token>>,
}

impl TokenManager {
    pub(crate) fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Perform a credential exchange and replace the stored token.
    ///
    /// The only producer of tokens. On failure the previously stored token
    /// (if any) is left untouched.
    #[instrument(skip_all)]
    pub(crate) async fn acquire(
        &self,
        session: &Session,
        credentials: &Credentials,
    ) -> Result<AccessToken, Error> {
        let mut current = self.current.write().await;
        let token = exchange(session, credentials).await?;
        let access = token.access.clone();
        *current = Some(token);
        Ok(access)
    }

    /// Return a token valid for at least the refresh margin, exchanging
    /// credentials for a new one if the stored token is stale or absent.
    #[instrument(skip_all)]
    pub(crate) async fn ensure_valid(
        &self,
        session: &Session,
        credentials: &Credentials,
    ) -> Result<AccessToken, Error> {
        let now = Utc::now().timestamp();

        {
            let current = self.current.read().await;
            if let Some(token) = current.as_ref() {
                if token.is_fresh_at(now) {
                    return Ok(token.access.clone());
                }
            }
        }

        let mut current = self.current.write().await;

        // Another caller may have refreshed while we waited for the lock
        if let Some(token) = current.as_ref() {
            if token.is_fresh_at(now) {
                return Ok(token.access.clone());
            }
        }

        info!("access token stale or absent, refreshing");
        let token = exchange(session, credentials).await?;
        let access = token.access.clone();
        *current = Some(token);
        Ok(access)
    }
}

/// Run the credential exchange and validate the response into a [`Token`].
async fn exchange(session: &Session, credentials: &Credentials) -> Result<Token, Error> {
    let response = session.credential_exchange(credentials).await?;
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(AuthError::ExchangeFailed {
            status: status.as_u16(),
            body,
        }
        .into());
    }

    let parsed: OauthTokenResponse = match serde_json::from_str(&body) {
        Ok(parsed) => parsed,
        Err(_) => return Err(AuthError::TokenMissing { body }.into()),
    };

    match (parsed.access_token, parsed.expires_at) {
        (Some(access), Some(expires_at)) if !access.is_empty() => {
            debug!(expires_at, "token acquired");
            Ok(Token::new(access, expires_at))
        }
        _ => Err(AuthError::TokenMissing { body }.into()),
    }
}
