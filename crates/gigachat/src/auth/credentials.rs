//! Caller credentials type.

use std::fmt;

/// Credentials for the GigaChat credential exchange.
///
/// This type holds the authorization key (the Base64 client-id/secret pair
/// issued in the developer portal, sent as a Basic-auth value) and the API
/// scope selecting the tier, e.g. `GIGACHAT_API_PERS`.
///
/// # Security
///
/// The authorization key is never exposed in Debug output to prevent
/// accidental logging.
///
/// # Example
///
/// ```
/// use gigachat::Credentials;
///
/// let creds = Credentials::new("base64-key-here", "GIGACHAT_API_PERS");
/// assert_eq!(creds.scope(), "GIGACHAT_API_PERS");
/// ```
pub struct Credentials {
    authorization_key: String,
    scope: String,
}

impl Credentials {
    /// Create new credentials.
    ///
    /// # Arguments
    ///
    /// * `authorization_key` - The Base64 authorization key from the portal
    /// * `scope` - The API scope (e.g. `GIGACHAT_API_PERS`)
    pub fn new(authorization_key: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            authorization_key: authorization_key.into(),
            scope: scope.into(),
        }
    }

    /// Returns the API scope.
    pub fn scope(&self) -> &str {
        &self.scope
    }

    /// Returns the authorization key.
    ///
    /// # Security
    ///
    /// Use this only when constructing the exchange request's Basic-auth
    /// header. Never log or display this value.
    pub(crate) fn authorization_key(&self) -> &str {
        &self.authorization_key
    }
}

// Intentionally hide the key in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("authorization_key", &"[REDACTED]")
            .field("scope", &self.scope)
            .finish()
    }
}

// Clone is intentionally implemented to allow credentials to be reused,
// but the type is not Copy to make credential passing explicit.
impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self {
            authorization_key: self.authorization_key.clone(),
            scope: self.scope.clone(),
        }
    }
}
