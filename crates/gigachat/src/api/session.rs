//! HTTP session owning the connection state and trust material.

use std::sync::atomic::{AtomicBool, Ordering};

use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Serialize;
use tracing::{debug, instrument, trace};
use uuid::Uuid;

use crate::auth::{AccessToken, Credentials};
use crate::error::Error;
use crate::tls::TrustConfig;
use crate::types::ApiUrl;

use super::wire::{API_BASE_URL, OAUTH_URL};

/// The HTTP session shared by every request a client makes.
///
/// One connection pool serves both the credential exchange and the API
/// calls; it validates server certificates exclusively against the pinned
/// [`TrustConfig`] and supports overlapping in-flight requests. The session
/// lives for the whole client lifetime and stops accepting requests once
/// [`Session::close`] has been called.
#[derive(Debug)]
pub struct Session {
    http: reqwest::Client,
    oauth_url: ApiUrl,
    api_url: ApiUrl,
    closed: AtomicBool,
}

impl Session {
    /// Create a session against the production GigaChat endpoints.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(trust: TrustConfig) -> Result<Self, Error> {
        let oauth_url = ApiUrl::new(OAUTH_URL)?;
        let api_url = ApiUrl::new(API_BASE_URL)?;
        Self::with_endpoints(oauth_url, api_url, trust)
    }

    /// Create a session against explicit endpoints.
    ///
    /// The production endpoints are fixed; this constructor exists for
    /// self-hosted gateways and tests.
    pub fn with_endpoints(
        oauth_url: ApiUrl,
        api_url: ApiUrl,
        trust: TrustConfig,
    ) -> Result<Self, Error> {
        let builder = reqwest::Client::builder()
            .user_agent(concat!("gigachat/", env!("CARGO_PKG_VERSION")));
        let http = trust.apply(builder).build()?;

        Ok(Self {
            http,
            oauth_url,
            api_url,
            closed: AtomicBool::new(false),
        })
    }

    /// Returns the API base URL this session is configured for.
    pub fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Mark the session closed. Idempotent.
    ///
    /// Every subsequent operation fails with [`Error::SessionClosed`].
    /// Connection resources are released when the session is dropped; do
    /// not close while calls are still in flight.
    pub fn close(&self) {
        self.closed.store(true, Ordering::Release);
    }

    /// Whether [`Session::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    fn ensure_open(&self) -> Result<(), Error> {
        if self.is_closed() {
            Err(Error::SessionClosed)
        } else {
            Ok(())
        }
    }

    /// Trade caller credentials for a bearer token.
    ///
    /// Form-encoded POST to the OAuth endpoint with a fresh `RqUID`
    /// correlation identifier per request. The raw response is returned;
    /// status handling and body validation happen in the token manager.
    #[instrument(skip(self, credentials), fields(url = %self.oauth_url))]
    pub(crate) async fn credential_exchange(
        &self,
        credentials: &Credentials,
    ) -> Result<reqwest::Response, Error> {
        self.ensure_open()?;

        let rquid = Uuid::new_v4();
        debug!(%rquid, scope = credentials.scope(), "credential exchange");

        let response = self
            .http
            .post(self.oauth_url.as_str())
            .header(ACCEPT, "application/json")
            .header("RqUID", rquid.to_string())
            .header(
                AUTHORIZATION,
                format!("Basic {}", credentials.authorization_key()),
            )
            .form(&[("scope", credentials.scope())])
            .send()
            .await?;

        trace!(status = %response.status(), "exchange response");
        Ok(response)
    }

    /// Make an authenticated GET request to an API path.
    #[instrument(skip(self, token), fields(api = %self.api_url))]
    pub(crate) async fn get(
        &self,
        path: &str,
        token: &AccessToken,
    ) -> Result<reqwest::Response, Error> {
        self.ensure_open()?;

        let url = self.api_url.endpoint(path);
        debug!(path, "API GET");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", token.as_str()))
            .send()
            .await?;

        trace!(status = %response.status(), "API response");
        Ok(response)
    }

    /// Make an authenticated POST request with a JSON body to an API path.
    #[instrument(skip(self, body, token), fields(api = %self.api_url))]
    pub(crate) async fn post_json<B>(
        &self,
        path: &str,
        body: &B,
        token: &AccessToken,
    ) -> Result<reqwest::Response, Error>
    where
        B: Serialize,
    {
        self.ensure_open()?;

        let url = self.api_url.endpoint(path);
        debug!(path, "API POST");

        let response = self
            .http
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", token.as_str()))
            .json(body)
            .send()
            .await?;

        trace!(status = %response.status(), "API response");
        Ok(response)
    }
}
