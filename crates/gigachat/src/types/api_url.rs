//! Endpoint URL type.

use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated API endpoint URL.
///
/// This type ensures the URL is absolute, uses HTTPS (or HTTP for
/// localhost), and is properly normalized for path joining.
///
/// # Example
///
/// ```
/// use gigachat::ApiUrl;
///
/// let api = ApiUrl::new("https://gigachat.devices.sberbank.ru/api/v1").unwrap();
/// assert_eq!(api.endpoint("models"),
///            "https://gigachat.devices.sberbank.ru/api/v1/models");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new endpoint URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the full URL for a path beneath this base.
    pub fn endpoint(&self, path: &str) -> String {
        // The url crate keeps a trailing slash on root paths, so trim
        // before joining
        let base = self.0.as_str().trim_end_matches('/');
        format!("{}/{}", base, path)
    }

    /// Returns the URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        // Must be absolute
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        // Must be HTTPS (or HTTP for localhost)
        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "::1");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        // Must have a host
        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://gigachat.devices.sberbank.ru/api/v1").unwrap();
        assert_eq!(api.host(), Some("gigachat.devices.sberbank.ru"));
    }

    #[test]
    fn valid_https_url_with_port() {
        let api = ApiUrl::new("https://ngw.devices.sberbank.ru:9443/api/v2/oauth").unwrap();
        assert_eq!(api.host(), Some("ngw.devices.sberbank.ru"));
    }

    #[test]
    fn valid_localhost_http() {
        let api = ApiUrl::new("http://127.0.0.1:8080").unwrap();
        assert_eq!(api.host(), Some("127.0.0.1"));
    }

    #[test]
    fn endpoint_construction() {
        let api = ApiUrl::new("https://gigachat.devices.sberbank.ru/api/v1").unwrap();
        assert_eq!(
            api.endpoint("chat/completions"),
            "https://gigachat.devices.sberbank.ru/api/v1/chat/completions"
        );
    }

    #[test]
    fn endpoint_on_root_url_has_single_slash() {
        let api = ApiUrl::new("http://localhost:8080").unwrap();
        assert_eq!(api.endpoint("models"), "http://localhost:8080/models");
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ApiUrl::new("http://gigachat.devices.sberbank.ru").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/api/v1/models").is_err());
    }
}
