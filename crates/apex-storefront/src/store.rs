//! The application store: one cart and one trade session per process.

use std::sync::Arc;

use apex_cache::Cache;
use apex_commerce::cart::CartEngine;
use apex_commerce::catalog::MockCatalog;
use apex_commerce::checkout::{DeliveryMethod, Order};
use apex_trade::{RouteAccess, TradeAccount, TradeDirectory, TradeSession};

use crate::latency::{simulate, LatencyConfig};
use crate::vehicles::MockVehicleService;
use crate::StorefrontError;

/// Owns the session cart and trade session, and keeps them in step.
///
/// Created once at start-up and passed by reference to whatever drives
/// the storefront. Trade login state is fed to the cart on open and on
/// every login or logout, so a trade customer sees prices ex. VAT.
pub struct Storefront {
    cart: CartEngine,
    session: TradeSession,
    directory: Arc<TradeDirectory>,
    vehicles: MockVehicleService,
    latency: LatencyConfig,
}

impl Storefront {
    /// Restore cart and trade session from `cache`.
    pub fn open(cache: Cache, latency: LatencyConfig) -> Result<Self, StorefrontError> {
        let directory = Arc::new(TradeDirectory::demo()?);
        Self::with_directory(cache, latency, directory)
    }

    /// Like [`open`](Self::open) with a caller-supplied account directory.
    pub fn with_directory(
        cache: Cache,
        latency: LatencyConfig,
        directory: Arc<TradeDirectory>,
    ) -> Result<Self, StorefrontError> {
        let mut cart = CartEngine::open(cache.clone())?;
        let session = TradeSession::open(cache)?;
        cart.observe_trade_identity(session.is_authenticated());

        let vehicles = MockVehicleService::new(Arc::new(MockCatalog::new()), latency);

        tracing::debug!(
            lines = cart.items().len(),
            trade = session.is_authenticated(),
            "storefront opened"
        );

        Ok(Self {
            cart,
            session,
            directory,
            vehicles,
            latency,
        })
    }

    pub fn cart(&self) -> &CartEngine {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartEngine {
        &mut self.cart
    }

    pub fn session(&self) -> &TradeSession {
        &self.session
    }

    pub fn trade_user(&self) -> Option<&TradeAccount> {
        self.session.user()
    }

    /// Access decision for a trade-only page.
    pub fn trade_access(&self) -> RouteAccess {
        RouteAccess::check(&self.session)
    }

    /// Lookup service sharing this store's catalog and latency.
    pub fn vehicles(&self) -> MockVehicleService {
        self.vehicles.clone()
    }

    pub fn catalog(&self) -> &MockCatalog {
        self.vehicles.catalog()
    }

    pub fn latency(&self) -> LatencyConfig {
        self.latency
    }

    /// Add a catalogued part to the cart by its part number.
    pub fn add_part(&mut self, part_number: &str, quantity: i64) -> Result<(), StorefrontError> {
        let item = self
            .vehicles
            .catalog()
            .part_by_number(part_number)
            .map(|p| p.to_line_item())
            .ok_or_else(|| StorefrontError::PartNotFound(part_number.to_string()))?;
        self.cart.add_item(item, quantity)?;
        Ok(())
    }

    /// Sign in to a trade account after the simulated round trip.
    pub async fn login(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<TradeAccount, StorefrontError> {
        simulate(self.latency.login()).await;
        let account = self.session.login(&self.directory, email, password)?.clone();
        self.cart.observe_trade_identity(true);
        Ok(account)
    }

    pub fn logout(&mut self) -> Result<(), StorefrontError> {
        self.session.logout()?;
        self.cart.observe_trade_identity(false);
        Ok(())
    }

    /// Submit the cart as an order. Trade customers are invoiced on
    /// account; the cart is emptied on success.
    pub async fn checkout(&mut self, delivery: DeliveryMethod) -> Result<Order, StorefrontError> {
        if self.cart.is_empty() {
            return Err(apex_commerce::CommerceError::EmptyCart.into());
        }

        simulate(self.latency.checkout()).await;
        let placed_at_ms = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or_default();
        let account = self.session.user().map(|u| u.id.clone());
        Ok(Order::place(&mut self.cart, delivery, account, placed_at_ms)?)
    }
}

impl std::fmt::Debug for Storefront {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storefront")
            .field("cart", &self.cart)
            .field("session", &self.session)
            .field("latency", &self.latency)
            .finish_non_exhaustive()
    }
}
