//! Endpoint constants and request/response wire types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoints
// ============================================================================

/// Credential exchange endpoint.
pub(crate) const OAUTH_URL: &str = "https://ngw.devices.sberbank.ru:9443/api/v2/oauth";

/// API base URL.
pub(crate) const API_BASE_URL: &str = "https://gigachat.devices.sberbank.ru/api/v1";

/// Models listing path.
pub(crate) const MODELS: &str = "models";

/// Chat completion path.
pub(crate) const CHAT_COMPLETIONS: &str = "chat/completions";

/// Model requested when the caller has no preference.
pub const DEFAULT_MODEL: &str = "GigaChat";

// ============================================================================
// Wire Types
// ============================================================================

/// Response from the credential exchange.
///
/// Both fields are optional so that missing-field responses can be reported
/// as an authentication error rather than a decode error.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct OauthTokenResponse {
    pub access_token: Option<String>,
    /// Absolute expiry, Unix seconds.
    pub expires_at: Option<i64>,
}

/// Request body for a chat completion.
#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub stream: bool,
    pub update_interval: u32,
}

/// A single conversation entry.
#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

pub(crate) const ROLE_SYSTEM: &str = "system";
pub(crate) const ROLE_USER: &str = "user";
