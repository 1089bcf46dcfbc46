//! Cart and line item types.

use crate::cart::{CartPricing, VatDisplay, UK_VAT_RATE};
use crate::error::CommerceError;
use crate::ids::PartId;
use crate::money::{gbp_decimal, Currency, Money};
use serde::{Deserialize, Serialize};

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_ITEM: i64 = 9999;

/// A part as offered for adding to the cart: everything a line item holds
/// except the quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLineItem {
    pub id: PartId,
    pub part_number: String,
    pub name: String,
    pub brand: String,
    pub unit_price: Money,
    pub image: Option<String>,
    pub in_stock: bool,
}

impl NewLineItem {
    /// Describe a part keyed by its catalog number.
    pub fn new(
        part_number: impl Into<String>,
        name: impl Into<String>,
        brand: impl Into<String>,
        unit_price: Money,
    ) -> Self {
        let part_number = part_number.into();
        Self {
            id: PartId::new(part_number.clone()),
            part_number,
            name: name.into(),
            brand: brand.into(),
            unit_price,
            image: None,
            in_stock: true,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_in_stock(mut self, in_stock: bool) -> Self {
        self.in_stock = in_stock;
        self
    }

    fn into_line_item(self, quantity: i64) -> LineItem {
        LineItem {
            id: self.id,
            part_number: self.part_number,
            name: self.name,
            brand: self.brand,
            unit_price: self.unit_price,
            quantity,
            image: self.image,
            in_stock: self.in_stock,
        }
    }
}

/// One distinct part in the cart.
///
/// Field names and layout match the persisted `apex-cart` record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Line identity (the part's catalog number).
    pub id: PartId,
    pub part_number: String,
    pub name: String,
    pub brand: String,
    /// Net unit price.
    #[serde(rename = "price", with = "gbp_decimal")]
    pub unit_price: Money,
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub in_stock: bool,
}

impl LineItem {
    /// Net line total (unit price x quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.saturating_multiply(self.quantity)
    }
}

/// An ordered collection of line items.
///
/// Holds two invariants: every line has a quantity between 1 and
/// [`MAX_QUANTITY_PER_ITEM`], and the full pricing (subtotal, VAT, gross
/// total) is computable without overflow. Mutations that would break
/// either are rejected and leave the cart unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty GBP cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from previously persisted items.
    ///
    /// Lines with a quantity below 1 are dropped,
    /// quantities above the limit are capped, and repeated identities are
    /// merged. Returns the cart and the number of records discarded.
    pub fn from_items(items: Vec<LineItem>) -> (Self, usize) {
        let mut cart = Self::new();
        let dropped = cart.merge(items);
        (cart, dropped)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Add `quantity` of a part.
    ///
    /// An existing line with the same identity has its quantity increased;
    /// otherwise a new line is appended. Returns the line's resulting
    /// quantity.
    pub fn add_item(&mut self, item: NewLineItem, quantity: i64) -> Result<i64, CommerceError> {
        if quantity <= 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }

        if let Some(pos) = self.position(&item.id) {
            let previous = self.items[pos].quantity;
            let new_quantity = previous
                .checked_add(quantity)
                .ok_or(CommerceError::Overflow)?;
            check_limit(new_quantity)?;

            self.items[pos].quantity = new_quantity;
            if let Err(e) = self.ensure_priceable() {
                self.items[pos].quantity = previous;
                return Err(e);
            }
            return Ok(new_quantity);
        }

        check_limit(quantity)?;
        self.items.push(item.into_line_item(quantity));
        if let Err(e) = self.ensure_priceable() {
            self.items.pop();
            return Err(e);
        }
        Ok(quantity)
    }

    /// Set a line's quantity, replacing the prior value.
    ///
    /// A quantity below 1 removes the line. Returns whether a line with
    /// that identity existed.
    pub fn update_quantity(&mut self, id: &PartId, quantity: i64) -> Result<bool, CommerceError> {
        if quantity < 1 {
            return Ok(self.remove_item(id));
        }
        let Some(pos) = self.position(id) else {
            return Ok(false);
        };
        check_limit(quantity)?;

        let previous = self.items[pos].quantity;
        self.items[pos].quantity = quantity;
        if let Err(e) = self.ensure_priceable() {
            self.items[pos].quantity = previous;
            return Err(e);
        }
        Ok(true)
    }

    /// Remove a line. Returns whether it was present.
    pub fn remove_item(&mut self, id: &PartId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        self.items.len() < len_before
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total item count (sum of quantities).
    pub fn item_count(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get_item(&self, id: &PartId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Net subtotal across all lines.
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(Currency::GBP), |acc, i| acc + i.line_total())
    }

    /// Full pricing breakdown under the given VAT display.
    pub fn calculate_pricing(&self, display: VatDisplay) -> CartPricing {
        CartPricing::compute(self, UK_VAT_RATE, display)
    }

    /// Fold items into this cart the way a restore does: same identity
    /// merges (capped at the limit), invalid records are skipped. Returns
    /// the number of records skipped.
    pub fn merge(&mut self, items: impl IntoIterator<Item = LineItem>) -> usize {
        let mut dropped = 0;
        for mut item in items {
            if item.quantity < 1 {
                tracing::warn!(id = %item.id, quantity = item.quantity, "discarding invalid cart line");
                dropped += 1;
                continue;
            }

            if let Some(pos) = self.position(&item.id) {
                let previous = self.items[pos].quantity;
                self.items[pos].quantity = previous
                    .saturating_add(item.quantity)
                    .min(MAX_QUANTITY_PER_ITEM);
                if self.ensure_priceable().is_err() {
                    self.items[pos].quantity = previous;
                    dropped += 1;
                }
                continue;
            }

            item.quantity = item.quantity.min(MAX_QUANTITY_PER_ITEM);
            self.items.push(item);
            if self.ensure_priceable().is_err() {
                self.items.pop();
                dropped += 1;
            }
        }
        dropped
    }

    fn position(&self, id: &PartId) -> Option<usize> {
        self.items.iter().position(|i| &i.id == id)
    }

    /// Subtotal and gross total must both fit without overflow.
    fn ensure_priceable(&self) -> Result<(), CommerceError> {
        let subtotal = self
            .items
            .iter()
            .try_fold(Money::zero(Currency::GBP), |acc, i| {
                i.unit_price
                    .try_multiply(i.quantity)
                    .and_then(|line| acc.try_add(&line))
            })
            .ok_or(CommerceError::Overflow)?;
        subtotal
            .try_add(&subtotal.apply_rate(UK_VAT_RATE))
            .ok_or(CommerceError::Overflow)?;
        Ok(())
    }
}

fn check_limit(quantity: i64) -> Result<(), CommerceError> {
    if quantity > MAX_QUANTITY_PER_ITEM {
        return Err(CommerceError::QuantityExceedsLimit(
            quantity,
            MAX_QUANTITY_PER_ITEM,
        ));
    }
    Ok(())
}
