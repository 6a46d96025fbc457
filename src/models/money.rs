//! Money type for representing expense amounts
//!
//! Internally stores amounts in cents (i64) to avoid floating-point drift in
//! sums. Parsing rounds to two fractional digits using round-half-to-even.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// Symbol used by `Display` and by reports unless a caller supplies another
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

/// Represents a monetary amount stored as cents (hundredths of the currency unit)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Create a Money amount from cents
    ///
    /// # Examples
    /// ```
    /// use expense_tracker::models::Money;
    /// let amount = Money::from_cents(1050); // $10.50
    /// assert_eq!(amount.to_string(), "$10.50");
    /// ```
    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Largest amount a single expense or budget may carry (1,000,000,000.00)
    ///
    /// Keeps totals over any realistic number of expenses far inside `i64`.
    pub const MAX: Money = Money(100_000_000_000);

    /// Create a zero Money amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Get the amount in cents
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Get the whole dollars portion (truncated toward zero)
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Get the cents portion (0-99)
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Get the absolute value
    pub const fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Convert to a floating point number of currency units (e.g. 12.5)
    ///
    /// Used at the persistence boundary, where amounts are stored as numbers.
    pub fn to_f64(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Build an amount from a floating point number of currency units
    ///
    /// The value is rounded to whole cents with ties going to the even cent.
    pub fn from_f64(value: f64) -> Result<Self, MoneyParseError> {
        if !value.is_finite() {
            return Err(MoneyParseError::NotFinite(value.to_string()));
        }

        let cents = (value * 100.0).round_ties_even();
        if cents.abs() >= i64::MAX as f64 {
            return Err(MoneyParseError::OutOfRange(value.to_string()));
        }

        Ok(Self(cents as i64))
    }

    /// Parse an amount typed by a user or read from a file
    ///
    /// Accepts an optional sign, an optional leading `$`, digits and an optional
    /// fraction ("12", "12.5", "-0.125", ".75"). Fractions beyond two digits
    /// are rounded half-to-even on the exact decimal text, so "2.675" becomes
    /// 2.68 and "2.665" becomes 2.66. Exponent forms such as "1e3" go through
    /// [`Money::from_f64`].
    pub fn parse_amount(s: &str) -> Result<Self, MoneyParseError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(MoneyParseError::InvalidFormat(s.to_string()));
        }

        match parse_decimal_cents(trimmed) {
            Some(Ok(cents)) => Ok(Self(cents)),
            Some(Err(err)) => Err(err),
            None => {
                let value: f64 = trimmed
                    .parse()
                    .map_err(|_| MoneyParseError::InvalidFormat(s.to_string()))?;
                Self::from_f64(value)
            }
        }
    }

    /// Divide into `parts` equal shares, rounding half-to-even to the cent
    ///
    /// Returns zero when `parts` is zero.
    pub fn divide_rounded(&self, parts: usize) -> Self {
        if parts == 0 {
            return Self::zero();
        }

        let divisor = parts as i64;
        let quotient = self.0.div_euclid(divisor);
        let remainder = self.0.rem_euclid(divisor);
        let twice = remainder * 2;

        let round_up = twice > divisor || (twice == divisor && quotient % 2 != 0);
        Self(if round_up { quotient + 1 } else { quotient })
    }

    /// This amount as a percentage of `whole`; zero when `whole` is zero
    pub fn percent_of(&self, whole: Money) -> f64 {
        if whole.is_zero() {
            0.0
        } else {
            self.0 as f64 / whole.0 as f64 * 100.0
        }
    }

    /// Format as a bare decimal with two fractional digits ("12.50")
    pub fn format_plain(&self) -> String {
        if self.is_negative() {
            format!("-{}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            format!("{}.{:02}", self.dollars(), self.cents_part())
        }
    }

    /// Whether the amount is positive and no larger than [`Money::MAX`]
    pub const fn is_valid_amount(&self) -> bool {
        self.0 > 0 && self.0 <= Self::MAX.0
    }

    /// Format with a currency symbol
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        if self.is_negative() {
            format!(
                "-{}{}.{:02}",
                symbol,
                self.dollars().abs(),
                self.cents_part()
            )
        } else {
            format!("{}{}.{:02}", symbol, self.dollars(), self.cents_part())
        }
    }
}

/// Parse plain decimal text into cents
///
/// Returns `None` when the text is not a plain decimal, so the caller can try
/// other notations.
fn parse_decimal_cents(s: &str) -> Option<Result<i64, MoneyParseError>> {
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let rest = rest.strip_prefix('$').unwrap_or(rest);

    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, f),
        None => (rest, ""),
    };

    let all_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if (int_part.is_empty() && frac_part.is_empty()) || !all_digits(int_part) || !all_digits(frac_part)
    {
        return None;
    }

    let overflow = || MoneyParseError::OutOfRange(s.to_string());

    let whole: i64 = if int_part.is_empty() {
        0
    } else {
        match int_part.parse::<i64>() {
            Ok(v) => v,
            Err(_) => return Some(Err(overflow())),
        }
    };

    let digits: Vec<i64> = frac_part.bytes().map(|b| i64::from(b - b'0')).collect();
    let tenths = digits.first().copied().unwrap_or(0);
    let hundredths = digits.get(1).copied().unwrap_or(0);

    let mut cents = match whole
        .checked_mul(100)
        .and_then(|c| c.checked_add(tenths * 10 + hundredths))
    {
        Some(c) => c,
        None => return Some(Err(overflow())),
    };

    if let Some(&next) = digits.get(2) {
        let tail_nonzero = digits[3..].iter().any(|&d| d != 0);
        let round_up = next > 5 || (next == 5 && (tail_nonzero || cents % 2 != 0));
        if round_up {
            cents = match cents.checked_add(1) {
                Some(c) => c,
                None => return Some(Err(overflow())),
            };
        }
    }

    Some(Ok(if negative { -cents } else { cents }))
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with_symbol(DEFAULT_CURRENCY_SYMBOL))
    }
}

// Arithmetic saturates at the i64 bounds instead of wrapping or panicking.

impl Add for Money {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> std::iter::Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

/// Error type for money parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoneyParseError {
    InvalidFormat(String),
    NotFinite(String),
    OutOfRange(String),
}

impl fmt::Display for MoneyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneyParseError::InvalidFormat(s) => write!(f, "Invalid money format: {}", s),
            MoneyParseError::NotFinite(s) => write!(f, "Amount is not a finite number: {}", s),
            MoneyParseError::OutOfRange(s) => write!(f, "Amount out of range: {}", s),
        }
    }
}

impl std::error::Error for MoneyParseError {}
