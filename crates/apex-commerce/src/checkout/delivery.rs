//! Delivery options offered at checkout.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CommerceError;
use crate::money::Money;

/// A delivery option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMethod {
    #[default]
    Standard,
    Express,
    /// Collect from the trade counter.
    Collection,
}

impl DeliveryMethod {
    pub const ALL: [DeliveryMethod; 3] = [
        DeliveryMethod::Standard,
        DeliveryMethod::Express,
        DeliveryMethod::Collection,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            DeliveryMethod::Standard => "standard",
            DeliveryMethod::Express => "express",
            DeliveryMethod::Collection => "collection",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DeliveryMethod::Standard => "Standard Delivery",
            DeliveryMethod::Express => "Express Delivery",
            DeliveryMethod::Collection => "Trade Counter Collection",
        }
    }

    /// Net price of the option.
    pub fn price(&self) -> Money {
        match self {
            DeliveryMethod::Express => Money::gbp(599),
            DeliveryMethod::Standard | DeliveryMethod::Collection => Money::gbp(0),
        }
    }

    pub fn estimate(&self) -> &'static str {
        match self {
            DeliveryMethod::Standard => "2-3 working days",
            DeliveryMethod::Express => "Next working day",
            DeliveryMethod::Collection => "Ready in 2 hours",
        }
    }

    pub fn is_free(&self) -> bool {
        self.price().is_zero()
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for DeliveryMethod {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DeliveryMethod::ALL
            .into_iter()
            .find(|m| m.id().eq_ignore_ascii_case(s))
            .ok_or_else(|| CommerceError::UnknownDeliveryMethod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delivery_prices() {
        assert!(DeliveryMethod::Standard.is_free());
        assert!(DeliveryMethod::Collection.is_free());
        assert_eq!(DeliveryMethod::Express.price(), Money::gbp(599));
    }

    #[test]
    fn test_parse() {
        assert_eq!("express".parse::<DeliveryMethod>().unwrap(), DeliveryMethod::Express);
        assert_eq!("Collection".parse::<DeliveryMethod>().unwrap(), DeliveryMethod::Collection);
        assert!(matches!(
            "drone".parse::<DeliveryMethod>(),
            Err(CommerceError::UnknownDeliveryMethod(_))
        ));
    }
}
