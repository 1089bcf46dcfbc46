//! Checkout module.
//!
//! Delivery options, order totals, and order placement.

mod delivery;
mod order;

pub use delivery::DeliveryMethod;
pub use order::{Order, OrderSummary, PaymentTerms, TRADE_PAYMENT_TERMS_DAYS};
