//! Pinned TLS trust configuration.

use std::fmt;
use std::path::Path;

use reqwest::Certificate;

use crate::error::{Error, TrustError};

/// The pinned root certificate authority used to validate the API server.
///
/// GigaChat endpoints present certificates chained to the Russian Trusted
/// Root CA, which is not in the default trust stores. The caller supplies
/// that certificate once; every connection the [`Session`](crate::Session)
/// makes validates against it exclusively. There is no way to disable
/// verification.
#[derive(Clone)]
pub struct TrustConfig {
    certificate: Certificate,
}

impl TrustConfig {
    /// Load the root certificate from a PEM file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not contain a
    /// valid certificate.
    pub fn from_pem_file(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let pem = std::fs::read(path).map_err(|source| TrustError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_pem(&pem)
    }

    /// Load the root certificate from PEM bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes do not contain a valid certificate.
    pub fn from_pem(pem: &[u8]) -> Result<Self, Error> {
        // Certificate::from_pem on the rustls backend accepts input with no
        // certificate blocks at all; parse as a bundle, which rejects such
        // input, and pin the first certificate found.
        let certificates = Certificate::from_pem_bundle(pem).map_err(|e| TrustError::Parse {
            message: e.to_string(),
        })?;
        let certificate =
            certificates
                .into_iter()
                .next()
                .ok_or_else(|| TrustError::Parse {
                    message: "no certificate found in PEM input".to_string(),
                })?;
        Ok(Self { certificate })
    }

    /// Apply this trust configuration to an HTTP client builder.
    ///
    /// Built-in roots are disabled so the pinned certificate is the only
    /// accepted trust anchor.
    pub(crate) fn apply(&self, builder: reqwest::ClientBuilder) -> reqwest::ClientBuilder {
        builder
            .tls_built_in_root_certs(false)
            .add_root_certificate(self.certificate.clone())
    }
}

impl fmt::Debug for TrustConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrustConfig").finish_non_exhaustive()
    }
}
