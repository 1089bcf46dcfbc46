//! Trade accounts for the Apex storefront.
//!
//! Business customers sign in against a [`TradeDirectory`]; the resulting
//! [`TradeSession`] is persisted under `tradeUser` so it survives restarts.
//! [`RouteAccess`] decides what a trade-only page should render.

mod account;
mod directory;
mod error;
mod guard;
mod session;

pub use account::{DiscountTier, TradeAccount};
pub use directory::TradeDirectory;
pub use error::TradeError;
pub use guard::{RouteAccess, TRADE_LOGIN_PATH};
pub use session::{TradeSession, TRADE_SESSION_KEY};
