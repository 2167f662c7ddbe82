//! Expiry-aware token cache with serialized refresh.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::AuthError;

use super::config::OAuthConfig;
use super::token::{parse_token_response, AccessToken, TokenSlot};

/// Source of bearer tokens for the completion transport.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<AccessToken, AuthError>;

    /// Drop the cached token so the next call refreshes.
    async fn invalidate(&self) {}
}

/// Holds one access token and refreshes it on demand.
///
/// The slot lock is held across the refresh, so concurrent callers wait
/// for the in-flight fetch and then reuse its token instead of issuing
/// their own.
pub struct TokenCache {
    config: OAuthConfig,
    http: reqwest::Client,
    slot: Mutex<TokenSlot>,
}

impl TokenCache {
    pub fn new(config: OAuthConfig, http: reqwest::Client) -> Self {
        Self {
            config,
            http,
            slot: Mutex::new(TokenSlot::default()),
        }
    }

    /// Return a usable token, fetching a new one if needed.
    pub async fn get_access_token(&self) -> Result<AccessToken, AuthError> {
        let mut slot = self.slot.lock().await;

        if let Some(token) = slot.usable_at(Utc::now()) {
            debug!("access token cache hit");
            return Ok(token);
        }

        let fresh = match self.fetch().await {
            Ok(fresh) => fresh,
            Err(e) => {
                warn!(error = %e, "token refresh failed, keeping previous token");
                return Err(e);
            }
        };

        if fresh.value.is_none() {
            // A response without a token leaves the slot as it was.
            let now = Utc::now();
            return match slot.token().filter(|t| now < t.expires_at) {
                Some(previous) => {
                    warn!("token response carried no access_token, reusing previous token");
                    Ok(previous)
                }
                None => Err(AuthError::MissingToken),
            };
        }
        *slot = fresh;

        let token = slot.token().ok_or(AuthError::MissingToken)?;
        info!(expires_at = %token.expires_at, "access token refreshed");
        Ok(token)
    }

    /// The cached token regardless of expiry.
    pub async fn cached_token(&self) -> Option<AccessToken> {
        self.slot.lock().await.token()
    }

    async fn fetch(&self) -> Result<TokenSlot, AuthError> {
        let rq_uid = giga_common::new_rq_uid();
        debug!(url = %self.config.token_url, rq_uid = %rq_uid, "token request");

        let response = self
            .http
            .post(&self.config.token_url)
            .header(
                AUTHORIZATION,
                format!("Basic {}", self.config.basic_credentials()),
            )
            .header("RqUID", rq_uid)
            .header(ACCEPT, "application/json")
            .form(&[("scope", self.config.scope.as_str())])
            .send()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            let body = text.chars().take(200).collect::<String>();
            return Err(AuthError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AuthError::Network(e.to_string()))?;

        parse_token_response(&body)
    }
}

#[async_trait]
impl TokenProvider for TokenCache {
    async fn access_token(&self) -> Result<AccessToken, AuthError> {
        self.get_access_token().await
    }

    async fn invalidate(&self) {
        let mut slot = self.slot.lock().await;
        slot.expires_at = chrono::DateTime::<Utc>::UNIX_EPOCH;
    }
}
