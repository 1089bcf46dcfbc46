//! The session cart: line items plus display state, persisted on every
//! mutation.

use apex_cache::{Cache, CacheError};

use crate::cart::{Cart, CartPricing, LineItem, NewLineItem, VatDisplay};
use crate::error::CommerceError;
use crate::ids::PartId;
use crate::money::Money;

/// Storage key holding the serialized line items.
pub const CART_STORAGE_KEY: &str = "apex-cart";

/// Cart state for one browsing session.
///
/// Owns the [`Cart`], the VAT display toggle and the drawer visibility
/// flag. Every item mutation writes the full item list to the local store
/// under [`CART_STORAGE_KEY`]; display and visibility are session-only.
///
/// # Example
///
/// ```
/// use apex_cache::Cache;
/// use apex_commerce::cart::{CartEngine, NewLineItem};
/// use apex_commerce::money::Money;
///
/// let mut cart = CartEngine::open(Cache::in_memory()).unwrap();
/// cart.add_item(NewLineItem::new("P659", "Water Pump Assembly", "HEPU", Money::gbp(7850)), 1)
///     .unwrap();
/// assert_eq!(cart.total(), Money::gbp(9420));
/// ```
#[derive(Debug)]
pub struct CartEngine {
    cart: Cart,
    cache: Cache,
    vat_display: VatDisplay,
    is_open: bool,
    trade_identity: bool,
}

impl CartEngine {
    /// Restore the cart from `cache`, or start empty.
    ///
    /// Stored data that does not parse is logged and ignored; the stale
    /// value stays in place until the next mutation overwrites it. Backend
    /// read failures are returned.
    pub fn open(cache: Cache) -> Result<Self, CommerceError> {
        let items = match cache.get::<Vec<LineItem>>(CART_STORAGE_KEY) {
            Ok(items) => items.unwrap_or_default(),
            Err(CacheError::SerializeError(e)) => {
                tracing::warn!(error = %e, key = CART_STORAGE_KEY, "stored cart is malformed, starting empty");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        let (cart, dropped) = Cart::from_items(items);
        if dropped > 0 {
            tracing::warn!(dropped, "discarded invalid lines from stored cart");
        }
        tracing::debug!(lines = cart.unique_item_count(), "cart restored");

        Ok(Self {
            cart,
            cache,
            vat_display: VatDisplay::default(),
            is_open: false,
            trade_identity: false,
        })
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    /// Add `quantity` of a part and open the cart drawer.
    pub fn add_item(&mut self, item: NewLineItem, quantity: i64) -> Result<(), CommerceError> {
        let id = item.id.clone();
        let line_quantity = self.cart.add_item(item, quantity)?;
        tracing::debug!(id = %id, added = quantity, line_quantity, "cart add");
        self.is_open = true;
        self.persist()
    }

    /// Add a single unit of a part.
    pub fn add_one(&mut self, item: NewLineItem) -> Result<(), CommerceError> {
        self.add_item(item, 1)
    }

    /// Remove a line. Absent identities are a no-op. Returns whether a line
    /// was removed.
    pub fn remove_item(&mut self, id: &PartId) -> Result<bool, CommerceError> {
        let removed = self.cart.remove_item(id);
        tracing::debug!(id = %id, removed, "cart remove");
        self.persist()?;
        Ok(removed)
    }

    /// Replace a line's quantity; below 1 removes it. Returns whether the
    /// line existed.
    pub fn update_quantity(&mut self, id: &PartId, quantity: i64) -> Result<bool, CommerceError> {
        let found = self.cart.update_quantity(id, quantity)?;
        tracing::debug!(id = %id, quantity, found, "cart update");
        self.persist()?;
        Ok(found)
    }

    /// Empty the cart. Storage keeps an empty list rather than losing the
    /// key.
    pub fn clear(&mut self) -> Result<(), CommerceError> {
        self.cart.clear();
        tracing::debug!("cart cleared");
        self.persist()
    }

    /// Put lines back without writing them, after a failed clear.
    pub(crate) fn restore_items(&mut self, items: Vec<LineItem>) {
        self.cart = Cart::from_items(items).0;
    }

    pub fn vat_display(&self) -> VatDisplay {
        self.vat_display
    }

    pub fn show_vat(&self) -> bool {
        self.vat_display.includes_vat()
    }

    pub fn set_vat_display(&mut self, display: VatDisplay) {
        self.vat_display = display;
    }

    pub fn set_show_vat(&mut self, show_vat: bool) {
        self.set_vat_display(VatDisplay::from_show_vat(show_vat));
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn set_open(&mut self, open: bool) {
        self.is_open = open;
    }

    /// Feed the trade-identity presence signal.
    ///
    /// On the transition to present (including a first observation that
    /// is already present) the display switches to VAT-exclusive. Repeated
    /// "present" observations do not override a later manual toggle.
    pub fn observe_trade_identity(&mut self, present: bool) {
        if present && !self.trade_identity {
            tracing::debug!("trade identity present, defaulting to exc. VAT");
            self.vat_display = VatDisplay::Exclusive;
        }
        self.trade_identity = present;
    }

    /// Full pricing breakdown under the current display mode.
    pub fn pricing(&self) -> CartPricing {
        self.cart.calculate_pricing(self.vat_display)
    }

    pub fn subtotal(&self) -> Money {
        self.pricing().subtotal
    }

    pub fn vat_amount(&self) -> Money {
        self.pricing().vat_amount
    }

    pub fn total(&self) -> Money {
        self.pricing().total
    }

    pub fn item_count(&self) -> i64 {
        self.cart.item_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    fn persist(&self) -> Result<(), CommerceError> {
        self.cache.set(CART_STORAGE_KEY, self.cart.items())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apex_cache::{Backend, MemoryBackend};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn part(number: &str, pence: i64) -> NewLineItem {
        NewLineItem::new(number, format!("Part {}", number), "Bosch", Money::gbp(pence))
    }

    fn engine() -> (CartEngine, Cache) {
        let cache = Cache::in_memory();
        (CartEngine::open(cache.clone()).unwrap(), cache)
    }

    fn stored(cache: &Cache) -> Vec<LineItem> {
        cache.get(CART_STORAGE_KEY).unwrap().unwrap()
    }

    #[test]
    fn test_starts_empty_without_stored_cart() {
        let (cart, cache) = engine();
        assert!(cart.is_empty());
        assert!(!cart.is_open());
        assert!(cart.show_vat());
        assert!(!cache.exists(CART_STORAGE_KEY).unwrap());
    }

    #[test]
    fn test_distinct_adds_sum_prices() {
        let (mut cart, _) = engine();
        let prices = [1299, 7850, 4299, 5499];
        for (i, pence) in prices.iter().enumerate() {
            cart.add_one(part(&format!("P{}", i), *pence)).unwrap();
        }

        assert_eq!(cart.item_count(), prices.len() as i64);
        assert_eq!(cart.subtotal(), Money::gbp(prices.iter().sum()));
    }

    #[test]
    fn test_add_opens_drawer() {
        let (mut cart, _) = engine();
        cart.add_one(part("A", 1000)).unwrap();
        assert!(cart.is_open());

        cart.set_open(false);
        assert!(!cart.is_open());
    }

    #[test]
    fn test_rejected_add_does_not_open_drawer() {
        let (mut cart, _) = engine();
        assert!(cart.add_item(part("A", 1000), 0).is_err());
        assert!(!cart.is_open());
    }

    #[test]
    fn test_repeated_add_scenario() {
        let (mut cart, _) = engine();
        for _ in 0..3 {
            cart.add_one(part("A", 1000)).unwrap();
        }

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 3);
        assert_eq!(cart.subtotal(), Money::gbp(3000));
    }

    #[test]
    fn test_update_negative_removes_only_item() {
        let (mut cart, cache) = engine();
        cart.add_one(part("A", 1000)).unwrap();

        assert!(cart.update_quantity(&PartId::new("A"), -1).unwrap());
        assert!(cart.is_empty());
        assert!(stored(&cache).is_empty());
    }

    #[test]
    fn test_update_to_zero_drops_prior_quantity() {
        let (mut cart, _) = engine();
        cart.add_item(part("A", 1000), 4).unwrap();
        cart.add_item(part("B", 500), 2).unwrap();
        let before = cart.item_count();

        cart.update_quantity(&PartId::new("A"), 0).unwrap();
        assert_eq!(cart.item_count(), before - 4);
    }

    #[test]
    fn test_every_mutation_persists() {
        let (mut cart, cache) = engine();

        cart.add_item(part("A", 1000), 2).unwrap();
        assert_eq!(stored(&cache)[0].quantity, 2);

        cart.update_quantity(&PartId::new("A"), 5).unwrap();
        assert_eq!(stored(&cache)[0].quantity, 5);

        cart.add_one(part("B", 500)).unwrap();
        assert_eq!(stored(&cache).len(), 2);

        cart.remove_item(&PartId::new("A")).unwrap();
        assert_eq!(stored(&cache).len(), 1);
    }

    #[test]
    fn test_clear_persists_empty_list() {
        let (mut cart, cache) = engine();
        cart.add_item(part("A", 1000), 2).unwrap();
        cart.clear().unwrap();

        assert_eq!(cart.item_count(), 0);
        assert!(cart.subtotal().is_zero());
        assert!(cart.vat_amount().is_zero());
        assert!(cart.total().is_zero());
        assert_eq!(cache.get_raw(CART_STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_vat_toggle_changes_total_only() {
        let (mut cart, _) = engine();
        cart.add_one(part("A", 1000)).unwrap();
        cart.add_item(part("B", 500), 2).unwrap();
        assert_eq!(cart.total(), Money::gbp(2400));

        cart.set_show_vat(false);
        assert_eq!(cart.total(), Money::gbp(2000));
        assert_eq!(cart.subtotal(), Money::gbp(2000));
        assert_eq!(cart.vat_amount(), Money::gbp(400));
    }

    #[test]
    fn test_display_state_not_persisted() {
        let cache = Cache::in_memory();
        let mut cart = CartEngine::open(cache.clone()).unwrap();
        cart.add_one(part("A", 1000)).unwrap();
        cart.set_show_vat(false);

        let restored = CartEngine::open(cache).unwrap();
        assert_eq!(restored.item_count(), 1);
        assert!(restored.show_vat());
        assert!(!restored.is_open());
    }

    #[test]
    fn test_trade_identity_nudges_once() {
        let (mut cart, _) = engine();
        cart.observe_trade_identity(true);
        assert!(!cart.show_vat());

        cart.set_show_vat(true);
        cart.observe_trade_identity(true);
        assert!(cart.show_vat());

        cart.observe_trade_identity(false);
        cart.observe_trade_identity(true);
        assert!(!cart.show_vat());
    }

    #[test]
    fn test_malformed_storage_starts_empty() {
        let cache = Cache::in_memory();
        cache.set(CART_STORAGE_KEY, &serde_json::json!({"items": "nope"})).unwrap();

        let mut cart = CartEngine::open(cache.clone()).unwrap();
        assert!(cart.is_empty());

        cart.add_one(part("A", 1000)).unwrap();
        assert_eq!(stored(&cache).len(), 1);
    }

    #[test]
    fn test_restores_original_layout() {
        let cache = Cache::in_memory();
        cache
            .set(
                CART_STORAGE_KEY,
                &serde_json::json!([{
                    "id": "GDB1956",
                    "partNumber": "GDB1956",
                    "name": "Brake Pad Set Front",
                    "brand": "TRW",
                    "price": 54.99,
                    "quantity": 2,
                    "inStock": true
                }]),
            )
            .unwrap();

        let cart = CartEngine::open(cache).unwrap();
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.subtotal(), Money::gbp(10998));
    }

    /// Backend whose writes fail once `failing` is set.
    #[derive(Default)]
    struct FlakyBackend {
        inner: MemoryBackend,
        failing: Arc<AtomicBool>,
    }

    impl Backend for FlakyBackend {
        fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &[u8]) -> Result<(), CacheError> {
            if self.failing.load(Ordering::SeqCst) {
                return Err(CacheError::StoreError("quota exceeded".to_string()));
            }
            self.inner.set(key, value)
        }

        fn delete(&self, key: &str) -> Result<(), CacheError> {
            self.inner.delete(key)
        }

        fn keys(&self) -> Result<Vec<String>, CacheError> {
            self.inner.keys()
        }
    }

    #[test]
    fn test_storage_failure_is_reported() {
        let backend = FlakyBackend::default();
        let failing = backend.failing.clone();
        let mut cart = CartEngine::open(Cache::with_backend(backend)).unwrap();

        failing.store(true, Ordering::SeqCst);
        let result = cart.add_one(part("A", 1000));

        assert!(matches!(result, Err(CommerceError::Storage(_))));
        // In-memory state has moved on even though the write failed.
        assert_eq!(cart.item_count(), 1);
    }
}
