//! HTTP client construction with an optional extra trust anchor.
//!
//! The GigaChat endpoints are signed by a national root CA that is not in
//! the usual system stores, so callers can pass its certificate path here.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::debug;

use crate::HttpSetupError;

#[derive(Debug, Clone)]
pub struct HttpSettings {
    /// PEM or DER certificate added to the trusted roots.
    pub cert_path: Option<PathBuf>,
    pub connect_timeout: Duration,
    /// Whole-request bound; `None` leaves only the connect timeout.
    pub request_timeout: Option<Duration>,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            cert_path: None,
            connect_timeout: Duration::from_secs(30),
            request_timeout: None,
        }
    }
}

pub fn build_http_client(settings: &HttpSettings) -> Result<reqwest::Client, HttpSetupError> {
    let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);

    if let Some(timeout) = settings.request_timeout {
        builder = builder.timeout(timeout);
    }

    if let Some(path) = &settings.cert_path {
        builder = builder.add_root_certificate(load_certificate(path)?);
        debug!(cert = %path.display(), "added trust anchor");
    }

    builder
        .build()
        .map_err(|e| HttpSetupError::Build(e.to_string()))
}

fn load_certificate(path: &Path) -> Result<reqwest::Certificate, HttpSetupError> {
    let bytes = std::fs::read(path).map_err(|source| HttpSetupError::Certificate {
        path: path.to_path_buf(),
        source,
    })?;

    let parsed = if bytes.starts_with(b"-----BEGIN") {
        reqwest::Certificate::from_pem(&bytes)
    } else {
        reqwest::Certificate::from_der(&bytes)
    };

    parsed.map_err(|e| HttpSetupError::InvalidCertificate {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
