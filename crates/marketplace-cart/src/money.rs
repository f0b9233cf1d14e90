//! Money types for representing monetary values.
//!
//! Cart prices are exact decimals ([`Price`]) and carry no currency. Totals
//! are turned into [`Money`], integer minor units in the store's configured
//! currency, only when they are formatted.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::CartError;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    BRL,
    USD,
    EUR,
    GBP,
    JPY,
}

impl Currency {
    /// Get the currency code (e.g., "BRL").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::BRL => "BRL",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
        }
    }

    /// Get the currency symbol (e.g., "R$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::BRL => "R$",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., centavos for BRL).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "R$49.99").
    pub fn display(&self) -> String {
        let decimal = self.to_decimal();
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), decimal)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// A non-negative unit price.
///
/// Held as an exact decimal, so whatever the storefront app wrote (`12.5`,
/// `12.345`) reads back and writes out unchanged. Serialized as a plain JSON
/// number. Negative, NaN and infinite values are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero price.
    pub const ZERO: Price = Price(Decimal::ZERO);

    /// Create a price from hundredths (e.g., `1999` is `19.99`).
    pub fn from_cents(cents: u64) -> Self {
        Self(Decimal::from_i128_with_scale(i128::from(cents), 2))
    }

    /// Create a price from an exact decimal.
    pub fn new(amount: Decimal) -> Result<Self, CartError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(CartError::InvalidPrice(amount.to_string()));
        }
        if amount.is_zero() {
            return Ok(Self::ZERO);
        }
        Ok(Self(amount))
    }

    /// Create a price from a floating-point amount.
    ///
    /// The shortest decimal that reads back as `amount` is kept, so `12.345`
    /// stays `12.345`.
    pub fn from_decimal(amount: f64) -> Result<Self, CartError> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(CartError::InvalidPrice(amount.to_string()));
        }
        amount.to_string().parse()
    }

    /// The exact amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units, saturating at the maximum.
    pub fn times(&self, quantity: u32) -> Price {
        Price(
            self.0
                .checked_mul(Decimal::from(quantity))
                .unwrap_or(Decimal::MAX),
        )
    }

    /// Sum of two prices, saturating at the maximum.
    pub fn plus(&self, other: Price) -> Price {
        Price(self.0.checked_add(other.0).unwrap_or(Decimal::MAX))
    }

    /// Express this price in `currency`, rounding half away from zero to the
    /// currency's minor unit.
    pub fn to_money(&self, currency: Currency) -> Money {
        let places = currency.decimal_places();
        let minor = self
            .0
            .round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::from(10_i64.pow(places)))
            .unwrap_or(Decimal::MAX);
        let amount = i64::try_from(minor.trunc()).unwrap_or(i64::MAX);
        Money::new(amount, currency)
    }
}

impl FromStr for Price {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let amount = Decimal::from_str_exact(s.trim())
            .map_err(|_| CartError::InvalidPrice(s.to_string()))?;
        Price::new(amount)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.scale() <= 2 || self.0.round_dp(2) == self.0 {
            write!(f, "{:.2}", self.0)
        } else {
            write!(f, "{}", self.0.normalize())
        }
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let normalized = self.0.normalize();
        if normalized.scale() == 0 {
            if let Ok(whole) = u64::try_from(normalized) {
                return serializer.serialize_u64(whole);
            }
        }
        let float: f64 = normalized
            .to_string()
            .parse()
            .map_err(serde::ser::Error::custom)?;
        serializer.serialize_f64(float)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Price::from_decimal(amount).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_display() {
        assert_eq!(Money::new(4999, Currency::USD).display(), "$49.99");
        assert_eq!(Money::new(100, Currency::JPY).display(), "\u{00a5}100");
    }

    #[test]
    fn test_price_from_decimal() {
        assert_eq!(Price::from_decimal(10.0).unwrap(), Price::from_cents(1000));
        assert_eq!(Price::from_decimal(1299.9).unwrap(), Price::from_cents(129990));
        assert_eq!(
            Price::from_decimal(12.345).unwrap().amount(),
            Decimal::new(12345, 3)
        );
    }

    #[test]
    fn test_price_rejects_negative_and_nan() {
        assert!(matches!(
            Price::from_decimal(-1.0),
            Err(CartError::InvalidPrice(_))
        ));
        assert!(Price::from_decimal(f64::NAN).is_err());
        assert!(Price::from_decimal(f64::INFINITY).is_err());
        assert!("-0.5".parse::<Price>().is_err());
        assert!("abc".parse::<Price>().is_err());
    }

    #[test]
    fn test_price_parse_is_exact() {
        let price: Price = "49.90".parse().unwrap();
        assert_eq!(price, Price::from_cents(4990));
        let price: Price = " 0.125 ".parse().unwrap();
        assert_eq!(price.amount(), Decimal::new(125, 3));
    }

    #[test]
    fn test_price_json_is_a_plain_number() {
        assert_eq!(serde_json::to_string(&Price::from_cents(2000)).unwrap(), "20");
        assert_eq!(serde_json::to_string(&Price::from_cents(1250)).unwrap(), "12.5");

        let price: Price = serde_json::from_str("12.5").unwrap();
        assert_eq!(price, Price::from_cents(1250));
        let price: Price = serde_json::from_str("7").unwrap();
        assert_eq!(price, Price::from_cents(700));

        assert!(serde_json::from_str::<Price>("-3").is_err());
        assert!(serde_json::from_str::<Price>("\"12\"").is_err());
    }

    #[test]
    fn test_price_keeps_sub_cent_digits_through_json() {
        let price: Price = serde_json::from_str("12.345").unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "12.345");
        assert_eq!(price.to_string(), "12.345");
    }

    #[test]
    fn test_price_arithmetic_saturates() {
        assert_eq!(Price::from_cents(250).times(3), Price::from_cents(750));
        let max = Price::new(Decimal::MAX).unwrap();
        assert_eq!(max.times(2), max);
        assert_eq!(max.plus(Price::from_cents(1)), max);
    }

    #[test]
    fn test_price_to_money() {
        let price = Price::from_cents(1999);
        assert_eq!(price.to_money(Currency::BRL), Money::new(1999, Currency::BRL));
        assert_eq!(price.to_money(Currency::JPY), Money::new(20, Currency::JPY));

        let total = "12.345".parse::<Price>().unwrap().times(2);
        assert_eq!(total.to_money(Currency::BRL), Money::new(2469, Currency::BRL));
        let single: Price = "12.345".parse().unwrap();
        assert_eq!(single.to_money(Currency::BRL), Money::new(1235, Currency::BRL));
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_cents(1205).to_string(), "12.05");
        assert_eq!(Price::ZERO.to_string(), "0.00");
        assert_eq!(Price::from_cents(700).to_string(), "7.00");
    }
}
