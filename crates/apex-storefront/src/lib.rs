//! Application layer for the Apex parts storefront.
//!
//! [`Storefront`] is the single owner of the cart and the trade session.
//! The mock services in [`vehicles`] stand in for the vehicle-data and
//! parts APIs, sleeping for the configured [`LatencyConfig`] before they
//! answer. Long-running calls can be wrapped in a [`ScopedTask`], which is
//! aborted when its owner drops it.
//!
//! # Example
//!
//! ```rust,ignore
//! use apex_storefront::prelude::*;
//!
//! let mut store = Storefront::open(Cache::open(".apex")?, LatencyConfig::default())?;
//!
//! let lookup = ScopedTask::spawn({
//!     let vehicles = store.vehicles();
//!     async move { vehicles.lookup_with_parts(&Vrm::parse("AB12CDE")).await }
//! });
//! let found = lookup.join().await??;
//! store.add_part(&found.parts[0].part_number, 1)?;
//!
//! let order = store.checkout(DeliveryMethod::Express).await?;
//! println!("{} total {}", order.number, order.summary.total);
//! ```

mod error;
mod latency;
mod store;
mod task;
pub mod vehicles;

pub use error::StorefrontError;
pub use latency::LatencyConfig;
pub use store::Storefront;
pub use task::ScopedTask;
pub use vehicles::{MockVehicleService, VehicleLookup, VehicleParts};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        LatencyConfig, MockVehicleService, ScopedTask, Storefront, StorefrontError,
        VehicleLookup, VehicleParts,
    };
    pub use apex_cache::Cache;
    pub use apex_commerce::prelude::*;
    pub use apex_trade::{RouteAccess, TradeAccount, TradeSession};
}
