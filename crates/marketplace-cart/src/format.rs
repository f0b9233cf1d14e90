//! Localized currency formatting.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Turns a monetary amount into a display string.
///
/// Implementations must be pure: same input, same output, no side effects.
/// Any `Fn(Money) -> String` closure is a formatter.
pub trait CurrencyFormatter: Send + Sync {
    /// Format `amount` for display.
    fn format(&self, amount: Money) -> String;
}

impl<F> CurrencyFormatter for F
where
    F: Fn(Money) -> String + Send + Sync,
{
    fn format(&self, amount: Money) -> String {
        self(amount)
    }
}

/// Display locale for monetary values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Locale {
    /// Brazilian Portuguese: `R$ 1.234,56`.
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    /// US English: `$1,234.56`.
    #[serde(rename = "en-US")]
    EnUs,
}

impl Locale {
    fn group_separator(&self) -> char {
        match self {
            Locale::PtBr => '.',
            Locale::EnUs => ',',
        }
    }

    fn decimal_separator(&self) -> char {
        match self {
            Locale::PtBr => ',',
            Locale::EnUs => '.',
        }
    }

    /// Text between the currency symbol and the digits.
    fn symbol_gap(&self) -> &'static str {
        match self {
            Locale::PtBr => "\u{a0}",
            Locale::EnUs => "",
        }
    }
}

/// Formats amounts with the separators and symbol placement of a [`Locale`].
///
/// ```
/// use marketplace_cart::format::{CurrencyFormatter, Locale, LocaleFormatter};
/// use marketplace_cart::money::{Currency, Money};
///
/// let pt = LocaleFormatter::new(Locale::PtBr);
/// assert_eq!(pt.format(Money::new(123456, Currency::BRL)), "R$\u{a0}1.234,56");
///
/// let en = LocaleFormatter::new(Locale::EnUs);
/// assert_eq!(en.format(Money::new(123456, Currency::USD)), "$1,234.56");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LocaleFormatter {
    locale: Locale,
}

impl LocaleFormatter {
    /// Create a formatter for `locale`.
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// The formatter's locale.
    pub fn locale(&self) -> Locale {
        self.locale
    }
}

impl CurrencyFormatter for LocaleFormatter {
    fn format(&self, amount: Money) -> String {
        let places = amount.currency.decimal_places();
        let divisor = 10_u64.pow(places);
        let magnitude = amount.amount_cents.unsigned_abs();

        let mut out = String::new();
        if amount.amount_cents < 0 {
            out.push('-');
        }
        out.push_str(amount.currency.symbol());
        out.push_str(self.locale.symbol_gap());
        out.push_str(&group_digits(magnitude / divisor, self.locale.group_separator()));
        if places > 0 {
            out.push(self.locale.decimal_separator());
            out.push_str(&format!(
                "{:0width$}",
                magnitude % divisor,
                width = places as usize
            ));
        }
        out
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}
