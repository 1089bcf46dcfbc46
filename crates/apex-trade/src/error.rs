//! Trade account errors.

use thiserror::Error;

/// Trade account error type.
#[derive(Error, Debug)]
pub enum TradeError {
    /// Unknown email or wrong password. Deliberately does not say which.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// An operation needed a signed-in trade account.
    #[error("not signed in to a trade account")]
    NotAuthenticated,

    /// Unknown discount tier name.
    #[error("unknown discount tier: {0}")]
    UnknownTier(String),

    /// Local store error.
    #[error("storage error: {0}")]
    Cache(#[from] apex_cache::CacheError),

    /// Password hashing failed.
    #[error("password hashing failed: {0}")]
    Hashing(String),
}

impl TradeError {
    /// Check if this is an authentication failure the user can correct.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, TradeError::InvalidCredentials | TradeError::NotAuthenticated)
    }
}

impl From<argon2::password_hash::Error> for TradeError {
    fn from(e: argon2::password_hash::Error) -> Self {
        TradeError::Hashing(e.to_string())
    }
}
