//! Expense model
//!
//! An expense is a validated, immutable value: a calendar date, a positive
//! amount rounded to cents, a canonical category and a trimmed description.
//! Construction is the only way to obtain one, so every live instance is valid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::CategorySet;
use super::money::{Money, DEFAULT_CURRENCY_SYMBOL};
use crate::error::ValidationError;

/// Date format accepted for expense dates
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDate(input.to_string()))
}

/// A raw amount as it arrives from a prompt, a CSV cell or a JSON number
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AmountInput<'a> {
    Text(&'a str),
    Number(f64),
}

impl AmountInput<'_> {
    /// Parse into whole cents, rejecting anything that is not strictly positive
    /// after rounding or that exceeds [`Money::MAX`]
    pub fn to_money(&self) -> Result<Money, ValidationError> {
        let raw = || match self {
            Self::Text(s) => s.to_string(),
            Self::Number(n) => n.to_string(),
        };

        let amount = match self {
            Self::Text(s) => Money::parse_amount(s),
            Self::Number(n) => Money::from_f64(*n),
        }
        .map_err(|_| ValidationError::InvalidAmount(raw()))?;

        if !amount.is_valid_amount() {
            return Err(ValidationError::InvalidAmount(raw()));
        }
        Ok(amount)
    }
}

impl<'a> From<&'a str> for AmountInput<'a> {
    fn from(s: &'a str) -> Self {
        Self::Text(s)
    }
}

impl<'a> From<&'a String> for AmountInput<'a> {
    fn from(s: &'a String) -> Self {
        Self::Text(s.as_str())
    }
}

impl From<f64> for AmountInput<'_> {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

/// A single recorded expense
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expense {
    date: NaiveDate,
    amount: Money,
    category: String,
    description: String,
}

impl Expense {
    /// Create an expense from already-typed values
    ///
    /// The amount must be positive and at most [`Money::MAX`], and the category
    /// must resolve (ignoring case) against `categories`; the stored category
    /// is the canonical name.
    pub fn new(
        date: NaiveDate,
        amount: Money,
        category: &str,
        description: &str,
        categories: &CategorySet,
    ) -> Result<Self, ValidationError> {
        if !amount.is_valid_amount() {
            return Err(ValidationError::InvalidAmount(amount.format_plain()));
        }
        let category = categories.resolve(category)?.to_string();

        Ok(Self {
            date,
            amount,
            category,
            description: description.trim().to_string(),
        })
    }

    /// Create an expense from raw field values
    ///
    /// Fields are checked in order (date, amount, category) and the first
    /// failure is returned.
    pub fn parse<'a>(
        date: &str,
        amount: impl Into<AmountInput<'a>>,
        category: &str,
        description: &str,
        categories: &CategorySet,
    ) -> Result<Self, ValidationError> {
        let date = parse_date(date)?;
        let amount = amount.into().to_money()?;
        Self::new(date, amount, category, description, categories)
    }

    /// Rebuild an expense from its persisted record, re-running validation
    pub fn from_record(
        record: &ExpenseRecord,
        categories: &CategorySet,
    ) -> Result<Self, ValidationError> {
        Self::parse(
            &record.date,
            record.amount,
            &record.category,
            &record.description,
            categories,
        )
    }

    /// Flatten into the persisted record shape
    pub fn to_record(&self) -> ExpenseRecord {
        ExpenseRecord {
            date: self.date.format(DATE_FORMAT).to_string(),
            amount: self.amount.to_f64(),
            category: self.category.clone(),
            description: self.description.clone(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// One-line summary: `date | amount | category | description`
    pub fn format_line(&self, symbol: &str) -> String {
        format!(
            "{} | {} | {} | {}",
            self.date.format(DATE_FORMAT),
            self.amount.format_with_symbol(symbol),
            self.category,
            self.description
        )
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_line(DEFAULT_CURRENCY_SYMBOL))
    }
}

/// Flat serialized form of an expense
///
/// Field order is stable: date, amount, category, description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> CategorySet {
        CategorySet::default()
    }

    #[test]
    fn test_parse_valid_expense() {
        let exp = Expense::parse("2024-01-05", "50", "food & dining", "  Lunch  ", &categories())
            .unwrap();

        assert_eq!(exp.date(), NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(exp.amount(), Money::from_cents(5000));
        assert_eq!(exp.category(), "Food & Dining");
        assert_eq!(exp.description(), "Lunch");
    }

    #[test]
    fn test_amount_is_rounded() {
        let exp = Expense::parse("2024-01-05", "12.345", "Other", "", &categories()).unwrap();
        assert_eq!(exp.amount().cents(), 1234);

        let exp = Expense::parse("2024-01-05", 7.125, "Other", "", &categories()).unwrap();
        assert_eq!(exp.amount().cents(), 712);
    }

    #[test]
    fn test_invalid_date() {
        for bad in ["2024/01/05", "05-01-2024", "2024-13-01", "2024-02-30", "", "yesterday"] {
            let err = Expense::parse(bad, "10", "Other", "", &categories()).unwrap_err();
            assert_eq!(err, ValidationError::InvalidDate(bad.to_string()));
        }
    }

    #[test]
    fn test_invalid_amount() {
        for bad in ["0", "-5", "abc", "", "0.001", "nan"] {
            let err = Expense::parse("2024-01-05", bad, "Other", "", &categories()).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidAmount(_)),
                "expected InvalidAmount for {:?}",
                bad
            );
        }

        let err = Expense::parse("2024-01-05", -1.0, "Other", "", &categories()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAmount(_)));
    }

    #[test]
    fn test_amount_above_maximum() {
        let at_max = Expense::parse("2024-01-05", "1000000000", "Other", "", &categories());
        assert_eq!(at_max.unwrap().amount(), Money::MAX);

        for bad in ["1000000000.01", "50000000000000000"] {
            let err = Expense::parse("2024-01-05", bad, "Other", "", &categories()).unwrap_err();
            assert_eq!(err, ValidationError::InvalidAmount(bad.to_string()));
        }

        let err = Expense::parse("2024-01-05", 5e16, "Other", "", &categories()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAmount(_)));

        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        let too_big = Money::from_cents(Money::MAX.cents() + 1);
        assert!(Expense::new(date, too_big, "Other", "", &categories()).is_err());
    }

    #[test]
    fn test_invalid_category() {
        for bad in ["", "   ", "Groceries", "Foods & Dining"] {
            let err = Expense::parse("2024-01-05", "10", bad, "", &categories()).unwrap_err();
            assert_eq!(err, ValidationError::InvalidCategory(bad.to_string()));
        }
    }

    #[test]
    fn test_date_checked_before_amount() {
        let err = Expense::parse("bad", "bad", "bad", "", &categories()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate(_)));

        let err = Expense::parse("2024-01-05", "bad", "bad", "", &categories()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidAmount(_)));
    }

    #[test]
    fn test_every_case_variant_of_canonical_names() {
        let set = categories();
        for name in set.names() {
            for variant in [name.to_lowercase(), name.to_uppercase(), name.clone()] {
                let exp = Expense::parse("2024-01-05", "1", &variant, "", &set).unwrap();
                assert_eq!(exp.category(), name);
            }
        }
    }

    #[test]
    fn test_substituted_category_set() {
        let set = CategorySet::new(["Rent", "Pets"]);
        assert!(Expense::parse("2024-01-05", "1", "pets", "", &set).is_ok());
        assert!(Expense::parse("2024-01-05", "1", "Travel", "", &set).is_err());
    }

    #[test]
    fn test_record_conversion() {
        let exp = Expense::parse("2024-02-01", "20", "Food & Dining", "Snacks", &categories())
            .unwrap();
        let record = exp.to_record();

        assert_eq!(record.date, "2024-02-01");
        assert_eq!(record.amount, 20.0);

        let back = Expense::from_record(&record, &categories()).unwrap();
        assert_eq!(back, exp);
    }

    #[test]
    fn test_record_field_order() {
        let exp = Expense::parse("2024-02-01", "20.5", "Travel", "Bus", &categories()).unwrap();
        let json = serde_json::to_string(&exp.to_record()).unwrap();
        assert_eq!(
            json,
            r#"{"date":"2024-02-01","amount":20.5,"category":"Travel","description":"Bus"}"#
        );
    }

    #[test]
    fn test_display() {
        let exp = Expense::parse("2024-01-10", "30", "transportation", "Taxi", &categories())
            .unwrap();
        assert_eq!(exp.to_string(), "2024-01-10 | $30.00 | Transportation | Taxi");
        assert_eq!(
            exp.format_line("€"),
            "2024-01-10 | €30.00 | Transportation | Taxi"
        );
    }
}
