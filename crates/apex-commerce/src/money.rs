//! Money type for representing monetary values.
//!
//! Amounts are held as integer minor units (pence for GBP) so that sums of
//! line totals never drift the way floating-point prices do.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Mul, Sub};

/// Currency of an amount. The storefront trades in sterling only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    GBP,
}

impl Currency {
    /// Get the currency code (e.g., "GBP").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::GBP => "GBP",
        }
    }

    /// Get the currency symbol (e.g., "£").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::GBP => "\u{00a3}",
        }
    }

    /// Number of minor units per major unit.
    pub fn minor_per_major(&self) -> i64 {
        100
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A rate expressed in basis points (1/100th of a percent).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rate {
    basis_points: u32,
}

impl Rate {
    pub const fn from_basis_points(basis_points: u32) -> Self {
        Self { basis_points }
    }

    pub const fn from_percent(percent: u32) -> Self {
        Self::from_basis_points(percent * 100)
    }

    pub fn basis_points(&self) -> u32 {
        self.basis_points
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.basis_points % 100 == 0 {
            write!(f, "{}%", self.basis_points / 100)
        } else {
            write!(f, "{:.2}%", self.basis_points as f64 / 100.0)
        }
    }
}

/// A monetary value with currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in the smallest currency unit (e.g., pence).
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a GBP value from pence.
    pub fn gbp(pence: i64) -> Self {
        Self::new(pence, Currency::GBP)
    }

    /// Create a Money value from a decimal amount, rounding to the nearest
    /// minor unit.
    ///
    /// ```
    /// use apex_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(189.99, Currency::GBP);
    /// assert_eq!(price.amount_minor, 18999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_minor = (amount * currency.minor_per_major() as f64).round() as i64;
        Self::new(amount_minor, currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    pub fn is_positive(&self) -> bool {
        self.amount_minor > 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.amount_minor as f64 / self.currency.minor_per_major() as f64
    }

    /// Format as a display string (e.g., "£49.99").
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}{}", sign, self.currency.symbol(), self.abs_amount())
    }

    /// Format as a display string without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}{}", sign, self.abs_amount())
    }

    fn abs_amount(&self) -> String {
        let per = self.currency.minor_per_major().unsigned_abs();
        let abs = self.amount_minor.unsigned_abs();
        format!("{}.{:02}", abs / per, abs % per)
    }

    /// Try to add another Money value, returning None on overflow.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        self.amount_minor
            .checked_sub(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a quantity, clamping at the numeric bounds.
    pub fn saturating_multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_minor.saturating_mul(factor), self.currency)
    }

    /// The portion of this amount given by `rate`, rounded half away from
    /// zero to the nearest minor unit.
    ///
    /// ```
    /// use apex_commerce::money::{Money, Rate};
    /// let vat = Money::gbp(1299).apply_rate(Rate::from_percent(20));
    /// assert_eq!(vat.amount_minor, 260);
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        let product = self.amount_minor as i128 * rate.basis_points() as i128;
        let rounded = if product >= 0 {
            (product + 5_000) / 10_000
        } else {
            (product - 5_000) / 10_000
        };
        let clamped = rounded.clamp(i64::MIN as i128, i64::MAX as i128) as i64;
        Money::new(clamped, self.currency)
    }
}

impl Add for Money {
    type Output = Money;

    /// Saturating addition. Use `try_add` to detect overflow.
    fn add(self, other: Money) -> Money {
        Money::new(self.amount_minor.saturating_add(other.amount_minor), self.currency)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.amount_minor.saturating_sub(other.amount_minor), self.currency)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.saturating_multiply(factor)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Serde adapter that stores a GBP amount as a plain decimal number
/// (`189.99`), the layout used by persisted cart and account records.
pub mod gbp_decimal {
    use super::{Currency, Money};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(money: &Money, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(money.to_decimal())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if !value.is_finite() {
            return Err(de::Error::custom("price must be a finite number"));
        }
        Ok(Money::from_decimal(value, Currency::GBP))
    }

    /// Same layout for optional amounts.
    pub mod option {
        use super::super::{Currency, Money};
        use serde::{de, Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            money: &Option<Money>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match money {
                Some(m) => serializer.serialize_some(&m.to_decimal()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Money>, D::Error> {
            match Option::<f64>::deserialize(deserializer)? {
                Some(v) if !v.is_finite() => Err(de::Error::custom("price must be a finite number")),
                Some(v) => Ok(Some(Money::from_decimal(v, Currency::GBP))),
                None => Ok(None),
            }
        }
    }
}
