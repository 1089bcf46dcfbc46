//! Trade account types.

use std::fmt;
use std::str::FromStr;

use apex_commerce::ids::TradeAccountId;
use apex_commerce::money::{gbp_decimal, Money, Rate};
use serde::{Deserialize, Serialize};

use crate::TradeError;

/// Trade discount band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl DiscountTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscountTier::Bronze => "bronze",
            DiscountTier::Silver => "silver",
            DiscountTier::Gold => "gold",
            DiscountTier::Platinum => "platinum",
        }
    }

    /// Discount off list price for this tier.
    pub fn discount(&self) -> Rate {
        match self {
            DiscountTier::Bronze => Rate::from_percent(15),
            DiscountTier::Silver => Rate::from_percent(20),
            DiscountTier::Gold => Rate::from_percent(25),
            DiscountTier::Platinum => Rate::from_percent(30),
        }
    }
}

impl fmt::Display for DiscountTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DiscountTier {
    type Err = TradeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bronze" => Ok(DiscountTier::Bronze),
            "silver" => Ok(DiscountTier::Silver),
            "gold" => Ok(DiscountTier::Gold),
            "platinum" => Ok(DiscountTier::Platinum),
            _ => Err(TradeError::UnknownTier(s.to_string())),
        }
    }
}

/// A signed-in business customer.
///
/// This is also the persisted `tradeUser` record, so it never carries a
/// password or hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeAccount {
    pub id: TradeAccountId,
    pub company_name: String,
    pub email: String,
    pub account_number: String,
    pub discount_tier: DiscountTier,
    #[serde(with = "gbp_decimal")]
    pub credit_limit: Money,
}

impl TradeAccount {
    /// List price after this account's tier discount.
    pub fn trade_price(&self, list_price: Money) -> Money {
        list_price - list_price.apply_rate(self.discount_tier.discount())
    }
}
