//! The authenticated GigaChat client.

use tracing::{info, instrument};

use crate::api::{
    CHAT_COMPLETIONS, ChatCompletionRequest, ChatMessage, MODELS, ROLE_SYSTEM, ROLE_USER, Session,
};
use crate::auth::{Credentials, TokenManager};
use crate::error::Error;

/// An authenticated GigaChat API client.
///
/// The only component application code touches. Construction eagerly
/// performs the credential exchange, so a `Client` value always starts with
/// a valid token; every domain operation re-checks token freshness before
/// issuing its request and refreshes transparently when the token is within
/// 60 seconds of expiry.
///
/// Domain operations return the raw [`reqwest::Response`] unmodified; the
/// client interprets HTTP statuses only for the credential exchange itself.
///
/// # Example
///
/// ```no_run
/// use gigachat::{Client, Credentials, Session, TrustConfig};
///
/// # async fn example() -> Result<(), gigachat::Error> {
/// let trust = TrustConfig::from_pem_file("russian_trusted_root_ca.cer")?;
/// let session = Session::new(trust)?;
/// let credentials = Credentials::new("base64-key", "GIGACHAT_API_PERS");
/// let client = Client::connect(session, credentials).await?;
///
/// let response = client
///     .send_chat(gigachat::DEFAULT_MODEL, "What is borrowing?", "Answer briefly.")
///     .await?;
/// println!("{}", response.text().await?);
///
/// client.close();
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Client {
    session: Session,
    credentials: Credentials,
    tokens: TokenManager,
}

impl Client {
    /// Authenticate and create a new client.
    ///
    /// Performs the credential exchange immediately and fails fast, so no
    /// client value exists without a valid token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Auth`] if the exchange is rejected or its response
    /// lacks the token fields, or a transport error if the endpoint is
    /// unreachable.
    #[instrument(skip_all)]
    pub async fn connect(session: Session, credentials: Credentials) -> Result<Self, Error> {
        info!("creating authenticated client");

        let tokens = TokenManager::new();
        tokens.acquire(&session, &credentials).await?;

        Ok(Self {
            session,
            credentials,
            tokens,
        })
    }

    /// List the models available to this account.
    ///
    /// The response is passed through unparsed.
    pub async fn list_models(&self) -> Result<reqwest::Response, Error> {
        let token = self
            .tokens
            .ensure_valid(&self.session, &self.credentials)
            .await?;
        self.session.get(MODELS, &token).await
    }

    /// Send a two-message chat completion: a system-role entry carrying
    /// `system_prompt` followed by a user-role entry carrying
    /// `user_message`. Streaming is disabled.
    ///
    /// Pass [`DEFAULT_MODEL`](crate::DEFAULT_MODEL) as `model` when the
    /// caller has no preference. The response is passed through unparsed.
    pub async fn send_chat(
        &self,
        model: &str,
        user_message: &str,
        system_prompt: &str,
    ) -> Result<reqwest::Response, Error> {
        let token = self
            .tokens
            .ensure_valid(&self.session, &self.credentials)
            .await?;

        let request = ChatCompletionRequest {
            model,
            messages: vec![
                ChatMessage {
                    role: ROLE_SYSTEM,
                    content: system_prompt,
                },
                ChatMessage {
                    role: ROLE_USER,
                    content: user_message,
                },
            ],
            stream: false,
            update_interval: 0,
        };

        self.session.post_json(CHAT_COMPLETIONS, &request, &token).await
    }

    /// Close the underlying session. Idempotent.
    ///
    /// Subsequent domain calls fail with [`Error::SessionClosed`]. Do not
    /// close while calls are still in flight.
    pub fn close(&self) {
        self.session.close();
    }
}
