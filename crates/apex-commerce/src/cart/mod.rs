//! Shopping cart module.
//!
//! Contains the line-item model, VAT pricing, and the persisted cart engine.

mod cart;
mod engine;
mod pricing;

pub use cart::{Cart, LineItem, NewLineItem, MAX_QUANTITY_PER_ITEM};
pub use engine::{CartEngine, CART_STORAGE_KEY};
pub use pricing::{CartPricing, LineItemPricing, VatDisplay, UK_VAT_RATE};
