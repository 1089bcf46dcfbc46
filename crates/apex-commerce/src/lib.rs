//! Cart, catalog and checkout logic for the Apex parts storefront.
//!
//! - **Cart**: line items keyed by part number, VAT-aware pricing, and the
//!   persisted session cart ([`cart::CartEngine`])
//! - **Catalog**: registration lookup, compatible parts, filtering
//! - **Checkout**: delivery options, order totals, order placement
//!
//! # Example
//!
//! ```rust,ignore
//! use apex_commerce::prelude::*;
//!
//! let mut cart = CartEngine::open(Cache::open(".apex")?)?;
//!
//! let catalog = MockCatalog::new();
//! let golf = catalog.vehicle(&Vrm::parse("AB12 CDE")).unwrap();
//! let pump = &catalog.compatible_parts(&golf.engine_code)[1];
//! cart.add_one(pump.to_line_item())?;
//!
//! println!("Total ({}): {}", cart.vat_display().label(), cart.total());
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;

pub use error::CommerceError;
pub use ids::*;
pub use money::{Currency, Money, Rate};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::{Currency, Money, Rate};

    // Cart
    pub use crate::cart::{
        Cart, CartEngine, CartPricing, LineItem, LineItemPricing, NewLineItem, VatDisplay,
        CART_STORAGE_KEY, MAX_QUANTITY_PER_ITEM, UK_VAT_RATE,
    };

    // Catalog
    pub use crate::catalog::{
        categories, format_vrm, CompatiblePart, MockCatalog, PartQuery, PartSort, Vehicle, Vrm,
    };

    // Checkout
    pub use crate::checkout::{DeliveryMethod, Order, OrderSummary, PaymentTerms};
}
