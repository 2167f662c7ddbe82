//! Types shared by every giga crate: the top-level error taxonomy and
//! identifier helpers.

pub mod errors;
pub mod id;

pub use errors::{ConfigError, GigaError};
pub use id::{new_correlation_id, new_rq_uid, SessionId};

pub type Result<T> = std::result::Result<T, GigaError>;
