//! Bearer token types and freshness rules.

use std::fmt;

/// Safety buffer before a token's stated expiry during which it is treated
/// as already stale. Absorbs clock skew and in-flight request latency so a
/// token is never attached to a request within seconds of server-side
/// expiry.
pub(crate) const REFRESH_MARGIN_SECS: i64 = 60;

/// An access token for authenticated API requests.
///
/// Access tokens are short-lived and used to authenticate requests to the
/// GigaChat API.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone)]
pub struct AccessToken(pub(crate) String);

impl AccessToken {
    /// Create a new access token.
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the token value for use in authorization headers.
    ///
    /// # Security
    ///
    /// Use only when constructing HTTP authorization headers.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A bearer token paired with its absolute expiry instant.
///
/// The two fields are produced and replaced together by a successful
/// credential exchange; they are never updated independently.
#[derive(Clone, Debug)]
pub(crate) struct Token {
    pub(crate) access: AccessToken,
    pub(crate) expires_at: i64,
}

impl Token {
    pub(crate) fn new(access: impl Into<String>, expires_at: i64) -> Self {
        Self {
            access: AccessToken::new(access),
            expires_at,
        }
    }

    /// Whether the token is still usable at `now` (Unix seconds), leaving
    /// the refresh margin intact.
    pub(crate) fn is_fresh_at(&self, now: i64) -> bool {
        now < self.expires_at - REFRESH_MARGIN_SECS
    }
}
