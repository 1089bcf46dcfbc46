//! Catalog module.
//!
//! Vehicle registration lookup and the parts that fit each engine.

mod fixtures;
mod part;
mod query;
mod vehicle;

pub use fixtures::MockCatalog;
pub use part::CompatiblePart;
pub use query::{categories, PartQuery, PartSort};
pub use vehicle::{format_vrm, Vehicle, Vrm};
