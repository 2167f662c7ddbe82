//! OAuth client-credentials token lifecycle.
//!
//! A `TokenCache` holds at most one access token and refreshes it from the
//! token endpoint when it is missing or within a minute of expiry.

mod cache;
mod config;
mod token;

pub use cache::{TokenCache, TokenProvider};
pub use config::OAuthConfig;
pub use token::{AccessToken, SAFETY_MARGIN_SECS};
