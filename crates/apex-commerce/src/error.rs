//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in cart, catalog and checkout operations.
#[derive(Error, Debug)]
pub enum CommerceError {
    /// Quantity was zero or negative where a positive amount is required.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i64),

    /// Quantity exceeds maximum allowed.
    #[error("Quantity {0} exceeds maximum allowed ({1})")]
    QuantityExceedsLimit(i64, i64),

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Unknown delivery method identifier.
    #[error("Unknown delivery method: {0}")]
    UnknownDeliveryMethod(String),

    /// Unknown part sort option.
    #[error("Unknown sort option: {0}")]
    UnknownSort(String),

    /// Persisting or loading cart state failed.
    #[error("Storage error: {0}")]
    Storage(#[from] apex_cache::CacheError),
}
