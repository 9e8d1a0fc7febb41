//! Locale-aware money formatting for display surfaces.

use serde::{Deserialize, Serialize};

use crate::ledger::Money;

/// Separators used when rendering amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self {
            decimal_separator: ',',
            grouping_separator: ' ',
        }
    }
}

/// Renders [`Money`] with thousands grouping, two decimals and a currency suffix,
/// e.g. `1 234,50 TND`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoneyFormat {
    pub locale: LocaleConfig,
    pub currency_suffix: String,
}

impl Default for MoneyFormat {
    fn default() -> Self {
        Self {
            locale: LocaleConfig::default(),
            currency_suffix: "TND".into(),
        }
    }
}

impl MoneyFormat {
    pub fn new(locale: LocaleConfig, currency_suffix: impl Into<String>) -> Self {
        Self {
            locale,
            currency_suffix: currency_suffix.into(),
        }
    }

    pub fn format(&self, value: Money) -> String {
        let number = self.format_number(value);
        if self.currency_suffix.is_empty() {
            number
        } else {
            format!("{} {}", number, self.currency_suffix)
        }
    }

    /// The number without the currency suffix.
    pub fn format_number(&self, value: Money) -> String {
        let (major, minor) = value.split_major_minor();
        let sign = if value.is_negative() { "-" } else { "" };
        format!(
            "{sign}{}{}{minor:02}",
            group_digits(major, self.locale.grouping_separator),
            self.locale.decimal_separator
        )
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_format_matches_french_locale() {
        let format = MoneyFormat::default();
        assert_eq!(format.format(Money::from_minor(123_456_789)), "1 234 567,89 TND");
        assert_eq!(format.format(Money::ZERO), "0,00 TND");
        assert_eq!(format.format(Money::from_minor(-6_000)), "-60,00 TND");
    }

    #[test]
    fn custom_separators_and_empty_suffix() {
        let format = MoneyFormat::new(
            LocaleConfig {
                decimal_separator: '.',
                grouping_separator: ',',
            },
            "",
        );
        assert_eq!(format.format(Money::from_minor(100_000)), "1,000.00");
        assert_eq!(format.format(Money::from_minor(99_999)), "999.99");
    }
}
