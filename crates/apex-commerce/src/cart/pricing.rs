//! Cart pricing calculations.

use crate::cart::Cart;
use crate::ids::PartId;
use crate::money::{Money, Rate};
use serde::{Deserialize, Serialize};

/// Standard UK VAT rate (20%).
pub const UK_VAT_RATE: Rate = Rate::from_percent(20);

/// Whether customer-facing totals include VAT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VatDisplay {
    /// Prices shown gross (retail default).
    #[default]
    Inclusive,
    /// Prices shown net (trade default).
    Exclusive,
}

impl VatDisplay {
    /// Map the UI's "show VAT" toggle.
    pub fn from_show_vat(show_vat: bool) -> Self {
        if show_vat {
            VatDisplay::Inclusive
        } else {
            VatDisplay::Exclusive
        }
    }

    pub fn includes_vat(&self) -> bool {
        matches!(self, VatDisplay::Inclusive)
    }

    /// Short label for totals, e.g. "inc. VAT".
    pub fn label(&self) -> &'static str {
        match self {
            VatDisplay::Inclusive => "inc. VAT",
            VatDisplay::Exclusive => "exc. VAT",
        }
    }

    /// Present a net amount under this display mode.
    pub fn present(&self, net: Money, rate: Rate) -> Money {
        match self {
            VatDisplay::Inclusive => net + net.apply_rate(rate),
            VatDisplay::Exclusive => net,
        }
    }
}

/// Complete pricing breakdown for a cart.
///
/// Always derived from the current items; never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Net subtotal.
    pub subtotal: Money,
    /// VAT on the subtotal.
    pub vat_amount: Money,
    /// Subtotal plus VAT when inclusive, else subtotal.
    pub total: Money,
    /// Sum of quantities.
    pub item_count: i64,
    /// VAT rate applied.
    pub vat_rate: Rate,
    /// Display mode the total was computed for.
    pub vat_display: VatDisplay,
    /// Per-line breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Derive pricing for `cart` at `rate` under `display`.
    pub fn compute(cart: &Cart, rate: Rate, display: VatDisplay) -> Self {
        let line_items: Vec<LineItemPricing> = cart
            .items()
            .iter()
            .map(|item| LineItemPricing {
                id: item.id.clone(),
                unit_price: item.unit_price,
                display_unit_price: display.present(item.unit_price, rate),
                quantity: item.quantity,
                line_total: item.line_total(),
            })
            .collect();

        let subtotal = cart.subtotal();
        let vat_amount = subtotal.apply_rate(rate);
        let total = if display.includes_vat() {
            subtotal + vat_amount
        } else {
            subtotal
        };

        Self {
            subtotal,
            vat_amount,
            total,
            item_count: cart.item_count(),
            vat_rate: rate,
            vat_display: display,
            line_items,
        }
    }

    /// Gross total regardless of display mode.
    pub fn gross_total(&self) -> Money {
        self.subtotal + self.vat_amount
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    pub id: PartId,
    /// Net unit price.
    pub unit_price: Money,
    /// Unit price under the active display mode.
    pub display_unit_price: Money,
    pub quantity: i64,
    /// Net line total.
    pub line_total: Money,
}
