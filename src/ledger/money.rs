use std::{
    fmt,
    iter::Sum,
    ops::{Add, Neg, Sub},
};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::ValidationError;

/// Minor units per major currency unit.
pub const MINOR_PER_MAJOR: i64 = 100;

/// Largest magnitude accepted for a single amount, in major units.
pub const MAX_MAJOR_UNITS: i64 = 10_000_000_000_000;

/// Signed fixed-point money value held in integer minor units (cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(units: i64) -> Self {
        Self(units)
    }

    pub const fn minor_units(self) -> i64 {
        self.0
    }

    /// Converts a decimal value, rounding half away from zero to two places.
    /// Returns `None` for non-finite or out-of-range values.
    pub fn from_major(value: f64) -> Option<Self> {
        if !value.is_finite() || value.abs() > MAX_MAJOR_UNITS as f64 {
            return None;
        }
        Some(Self((value * MINOR_PER_MAJOR as f64).round() as i64))
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }

    pub fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Splits the magnitude into whole units and the two-digit remainder.
    pub fn split_major_minor(self) -> (u64, u64) {
        let magnitude = self.0.unsigned_abs();
        (
            magnitude / MINOR_PER_MAJOR as u64,
            magnitude % MINOR_PER_MAJOR as u64,
        )
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0.saturating_sub(rhs.0))
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (major, minor) = self.split_major_minor();
        let sign = if self.is_negative() { "-" } else { "" };
        write!(f, "{sign}{major}.{minor:02}")
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Money::from_major(value)
            .ok_or_else(|| de::Error::custom(format!("amount {value} is out of range")))
    }
}

/// A strictly positive magnitude. Direction lives on the transaction kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount(Money);

impl Amount {
    /// Normalizes to the absolute value and rejects zero.
    pub fn new(value: Money) -> Result<Self, ValidationError> {
        let magnitude = value.abs();
        if magnitude.is_zero() {
            return Err(ValidationError::NotPositive(value.to_string()));
        }
        if magnitude.minor_units() > MAX_MAJOR_UNITS * MINOR_PER_MAJOR {
            return Err(ValidationError::OutOfRange(value.to_string()));
        }
        Ok(Self(magnitude))
    }

    pub fn from_minor(units: i64) -> Result<Self, ValidationError> {
        Self::new(Money::from_minor(units))
    }

    /// Parses raw user input such as `"12.5"`, `"-5"` or `"12,50"`.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Missing);
        }
        let normalized = normalize_decimal_separator(trimmed);
        match parse_decimal(&normalized) {
            Parsed::Value(money) => Self::new(money).map_err(|err| match err {
                ValidationError::NotPositive(_) => ValidationError::NotPositive(trimmed.into()),
                ValidationError::OutOfRange(_) => ValidationError::OutOfRange(trimmed.into()),
                other => other,
            }),
            Parsed::TooLarge => Err(ValidationError::OutOfRange(trimmed.into())),
            Parsed::Invalid => Err(ValidationError::NotANumber(trimmed.into())),
        }
    }

    pub fn money(self) -> Money {
        self.0
    }

    pub fn minor_units(self) -> i64 {
        self.0.minor_units()
    }

    pub fn to_f64(self) -> f64 {
        self.0.to_f64()
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Stored positive values below half a cent are kept as one minor unit.
impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        if value.is_nan() || value <= 0.0 {
            return Err(de::Error::custom(format!(
                "stored amount {value} must be positive"
            )));
        }
        let money = Money::from_major(value)
            .ok_or_else(|| de::Error::custom(format!("amount {value} is out of range")))?;
        let money = if money.is_zero() {
            Money::from_minor(1)
        } else {
            money
        };
        Amount::new(money).map_err(de::Error::custom)
    }
}

enum Parsed {
    Value(Money),
    TooLarge,
    Invalid,
}

fn normalize_decimal_separator(text: &str) -> String {
    if !text.contains('.') && text.matches(',').count() == 1 {
        text.replace(',', ".")
    } else {
        text.to_string()
    }
}

fn parse_decimal(text: &str) -> Parsed {
    let (negative, body) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
    let plain = (!whole.is_empty() || !fraction.is_empty())
        && whole.bytes().all(|b| b.is_ascii_digit())
        && fraction.bytes().all(|b| b.is_ascii_digit());
    if !plain {
        return parse_scientific(text);
    }

    let whole = whole.trim_start_matches('0');
    if whole.len() > 14 {
        return Parsed::TooLarge;
    }
    let whole_units: i64 = if whole.is_empty() {
        0
    } else {
        match whole.parse() {
            Ok(value) => value,
            Err(_) => return Parsed::TooLarge,
        }
    };
    if whole_units > MAX_MAJOR_UNITS {
        return Parsed::TooLarge;
    }

    let digits: Vec<i64> = fraction.bytes().map(|b| i64::from(b - b'0')).collect();
    let mut cents = digits.first().copied().unwrap_or(0) * 10 + digits.get(1).copied().unwrap_or(0);
    if digits.get(2).copied().unwrap_or(0) >= 5 {
        cents += 1;
    }
    let units = whole_units * MINOR_PER_MAJOR + cents;
    Parsed::Value(Money::from_minor(if negative { -units } else { units }))
}

fn parse_scientific(text: &str) -> Parsed {
    let lowered = text.to_ascii_lowercase();
    if !lowered.contains('e') {
        return Parsed::Invalid;
    }
    match lowered.parse::<f64>() {
        Ok(value) if value.is_finite() => match Money::from_major(value) {
            Some(money) => Parsed::Value(money),
            None => Parsed::TooLarge,
        },
        Ok(_) => Parsed::TooLarge,
        Err(_) => Parsed::Invalid,
    }
}
