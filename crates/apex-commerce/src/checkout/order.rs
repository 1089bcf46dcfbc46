//! Order summary and placement.

use crate::cart::{CartEngine, CartPricing, LineItem, VatDisplay};
use crate::checkout::DeliveryMethod;
use crate::error::CommerceError;
use crate::ids::{OrderNumber, TradeAccountId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Days until a trade-account invoice falls due.
pub const TRADE_PAYMENT_TERMS_DAYS: u16 = 30;

/// How an order is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum PaymentTerms {
    /// Paid in full when the order is placed.
    PayOnOrder,
    /// Invoiced to a trade account.
    TradeAccount { days: u16 },
}

impl PaymentTerms {
    pub fn for_account(trade_account: Option<&TradeAccountId>) -> Self {
        match trade_account {
            Some(_) => PaymentTerms::TradeAccount {
                days: TRADE_PAYMENT_TERMS_DAYS,
            },
            None => PaymentTerms::PayOnOrder,
        }
    }

    pub fn description(&self) -> String {
        match self {
            PaymentTerms::PayOnOrder => "Payment on order".to_string(),
            PaymentTerms::TradeAccount { days } => {
                format!("Added to your trade account. Payment terms: {} days", days)
            }
        }
    }
}

/// Totals shown in the checkout sidebar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderSummary {
    /// Net subtotal.
    pub subtotal: Money,
    /// VAT on the goods.
    pub vat_amount: Money,
    pub delivery: DeliveryMethod,
    /// Delivery as charged under the display mode (grossed up when
    /// showing VAT).
    pub delivery_charge: Money,
    /// Cart total plus delivery charge.
    pub total: Money,
    pub vat_display: VatDisplay,
}

impl OrderSummary {
    /// Combine cart pricing with a delivery choice.
    pub fn new(pricing: &CartPricing, delivery: DeliveryMethod) -> Self {
        let delivery_charge = pricing
            .vat_display
            .present(delivery.price(), pricing.vat_rate);

        Self {
            subtotal: pricing.subtotal,
            vat_amount: pricing.vat_amount,
            delivery,
            delivery_charge,
            total: pricing.total + delivery_charge,
            vat_display: pricing.vat_display,
        }
    }
}

/// A placed order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub number: OrderNumber,
    /// Snapshot of the cart lines at placement.
    pub lines: Vec<LineItem>,
    pub summary: OrderSummary,
    pub payment_terms: PaymentTerms,
    /// Account the order was charged to, if any.
    pub trade_account: Option<TradeAccountId>,
    /// Unix timestamp (milliseconds) of placement.
    pub placed_at_ms: u64,
}

impl Order {
    /// Place an order for everything in `cart`, then clear it.
    ///
    /// The order number is derived from `placed_at_ms`. If the emptied
    /// cart cannot be saved, its lines are put back and the error is
    /// returned, so the order can be placed again.
    pub fn place(
        cart: &mut CartEngine,
        delivery: DeliveryMethod,
        trade_account: Option<TradeAccountId>,
        placed_at_ms: u64,
    ) -> Result<Order, CommerceError> {
        if cart.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        let summary = OrderSummary::new(&cart.pricing(), delivery);
        let order = Order {
            number: OrderNumber::from_millis(placed_at_ms),
            lines: cart.items().to_vec(),
            summary,
            payment_terms: PaymentTerms::for_account(trade_account.as_ref()),
            trade_account,
            placed_at_ms,
        };

        if let Err(e) = cart.clear() {
            tracing::warn!(order = %order.number, error = %e, "cart not cleared, order not placed");
            cart.restore_items(order.lines);
            return Err(e);
        }
        tracing::info!(
            order = %order.number,
            lines = order.lines.len(),
            total = %order.summary.total,
            "order placed"
        );
        Ok(order)
    }

    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{NewLineItem, CART_STORAGE_KEY};
    use apex_cache::{Backend, Cache, CacheError, MemoryBackend};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    fn cart_with_twenty_pounds() -> CartEngine {
        let mut cart = CartEngine::open(Cache::in_memory()).unwrap();
        cart.add_item(NewLineItem::new("A", "Part A", "INA", Money::gbp(1000)), 1)
            .unwrap();
        cart.add_item(NewLineItem::new("B", "Part B", "INA", Money::gbp(500)), 2)
            .unwrap();
        cart
    }

    #[test]
    fn test_summary_inclusive_grosses_up_delivery() {
        let cart = cart_with_twenty_pounds();
        let summary = OrderSummary::new(&cart.pricing(), DeliveryMethod::Express);

        assert_eq!(summary.delivery_charge, Money::gbp(719));
        assert_eq!(summary.total, Money::gbp(2400 + 719));
    }

    #[test]
    fn test_summary_exclusive_net_delivery() {
        let mut cart = cart_with_twenty_pounds();
        cart.set_show_vat(false);
        let summary = OrderSummary::new(&cart.pricing(), DeliveryMethod::Express);

        assert_eq!(summary.delivery_charge, Money::gbp(599));
        assert_eq!(summary.total, Money::gbp(2000 + 599));
    }

    #[test]
    fn test_free_delivery_adds_nothing() {
        let cart = cart_with_twenty_pounds();
        let summary = OrderSummary::new(&cart.pricing(), DeliveryMethod::Collection);
        assert_eq!(summary.total, Money::gbp(2400));
    }

    #[test]
    fn test_place_clears_cart() {
        let mut cart = cart_with_twenty_pounds();
        let order = Order::place(&mut cart, DeliveryMethod::Standard, None, 36).unwrap();

        assert_eq!(order.number.as_str(), "APX-10");
        assert_eq!(order.item_count(), 3);
        assert_eq!(order.payment_terms, PaymentTerms::PayOnOrder);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_trade_order_on_account_terms() {
        let mut cart = cart_with_twenty_pounds();
        let account = TradeAccountId::new("TRD-001");
        let order = Order::place(&mut cart, DeliveryMethod::Collection, Some(account), 1).unwrap();

        assert_eq!(
            order.payment_terms,
            PaymentTerms::TradeAccount {
                days: TRADE_PAYMENT_TERMS_DAYS
            }
        );
        assert!(order.payment_terms.description().contains("30 days"));
    }

    #[test]
    fn test_empty_cart_cannot_be_placed() {
        let mut cart = CartEngine::open(Cache::in_memory()).unwrap();
        assert!(matches!(
            Order::place(&mut cart, DeliveryMethod::Standard, None, 1),
            Err(CommerceError::EmptyCart)
        ));
    }

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
    fn test_failed_clear_keeps_lines_for_retry() {
        let backend = FlakyBackend::default();
        let failing = backend.failing.clone();
        let cache = Cache::with_backend(backend);
        let mut cart = CartEngine::open(cache.clone()).unwrap();
        cart.add_item(NewLineItem::new("A", "Part A", "INA", Money::gbp(1000)), 1)
            .unwrap();
        cart.add_item(NewLineItem::new("B", "Part B", "INA", Money::gbp(500)), 2)
            .unwrap();

        failing.store(true, Ordering::SeqCst);
        let result = Order::place(&mut cart, DeliveryMethod::Standard, None, 36);
        assert!(matches!(result, Err(CommerceError::Storage(_))));
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), Money::gbp(2000));

        failing.store(false, Ordering::SeqCst);
        let order = Order::place(&mut cart, DeliveryMethod::Standard, None, 36).unwrap();
        assert_eq!(order.item_count(), 3);
        assert!(cart.is_empty());
        let stored: Vec<LineItem> = cache.get(CART_STORAGE_KEY).unwrap().unwrap();
        assert!(stored.is_empty());
    }
}
