//! Storefront errors.

use apex_cache::CacheError;
use apex_commerce::CommerceError;
use apex_trade::TradeError;
use thiserror::Error;

/// Storefront error type.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Lookup called with a blank registration.
    #[error("enter a registration to search")]
    EmptyRegistration,

    /// Registration not in the vehicle table.
    #[error("no vehicle found for registration {0}")]
    VehicleNotFound(String),

    /// Part number not in the catalog.
    #[error("part not found: {0}")]
    PartNotFound(String),

    /// Simulated call was aborted before it completed.
    #[error("operation cancelled")]
    Cancelled,

    /// Simulated call panicked.
    #[error("background task failed: {0}")]
    TaskFailed(String),

    #[error(transparent)]
    Commerce(#[from] CommerceError),

    #[error(transparent)]
    Trade(#[from] TradeError),

    #[error(transparent)]
    Cache(#[from] CacheError),
}

impl From<tokio::task::JoinError> for StorefrontError {
    fn from(e: tokio::task::JoinError) -> Self {
        if e.is_cancelled() {
            StorefrontError::Cancelled
        } else {
            StorefrontError::TaskFailed(e.to_string())
        }
    }
}
