//! Parts offered against a vehicle.

use crate::cart::NewLineItem;
use crate::money::{gbp_decimal, Money};
use serde::{Deserialize, Serialize};

/// A part that fits a looked-up vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompatiblePart {
    pub id: String,
    pub name: String,
    pub brand: String,
    /// Catalog number; doubles as the cart line identity.
    pub part_number: String,
    /// Original-equipment numbers this part cross-references.
    pub oe_numbers: Vec<String>,
    #[serde(with = "gbp_decimal")]
    pub price: Money,
    /// Pre-discount price, when on offer.
    #[serde(default, with = "gbp_decimal::option", skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    pub in_stock: bool,
    pub stock_count: u32,
    pub category: String,
    pub is_oe_quality: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fitment_notes: Option<String>,
}

impl CompatiblePart {
    /// Amount saved against the original price, if discounted.
    pub fn savings(&self) -> Option<Money> {
        self.original_price
            .and_then(|original| original.try_subtract(&self.price))
            .filter(Money::is_positive)
    }

    pub fn is_on_offer(&self) -> bool {
        self.savings().is_some()
    }

    /// Stock is low when only a handful remain.
    pub fn is_low_stock(&self) -> bool {
        self.in_stock && self.stock_count < 5
    }

    /// Describe this part for adding to the cart.
    pub fn to_line_item(&self) -> NewLineItem {
        NewLineItem::new(&self.part_number, &self.name, &self.brand, self.price)
            .with_in_stock(self.in_stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turbo() -> CompatiblePart {
        CompatiblePart {
            id: "3".into(),
            name: "Turbocharger IS38".into(),
            brand: "BorgWarner".into(),
            part_number: "BW-06K145722H".into(),
            oe_numbers: vec!["06K145722H".into()],
            price: Money::gbp(125000),
            original_price: Some(Money::gbp(145000)),
            in_stock: true,
            stock_count: 3,
            category: "Engine".into(),
            is_oe_quality: true,
            fitment_notes: None,
        }
    }

    #[test]
    fn test_savings() {
        let part = turbo();
        assert_eq!(part.savings(), Some(Money::gbp(20000)));
        assert!(part.is_on_offer());
        assert!(part.is_low_stock());
    }

    #[test]
    fn test_no_savings_without_original_price() {
        let mut part = turbo();
        part.original_price = None;
        assert!(part.savings().is_none());

        part.original_price = Some(Money::gbp(100000));
        assert!(part.savings().is_none());
    }

    #[test]
    fn test_to_line_item_keys_by_part_number() {
        let item = turbo().to_line_item();
        assert_eq!(item.id.as_str(), "BW-06K145722H");
        assert_eq!(item.part_number, "BW-06K145722H");
        assert_eq!(item.unit_price, Money::gbp(125000));
    }
}
