//! Domain model for income and expense transactions.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::common::Displayable;
use crate::errors::{BudgetError, Result};

/// Canonical format used when the core writes a timestamp back to text.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
/// Direction of a money movement. The amount itself is always non-negative.
pub enum TransactionType {
    Income,
    Expense,
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionType::Income => "Income",
            TransactionType::Expense => "Expense",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionType {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(TransactionType::Income),
            "expense" | "out" => Ok(TransactionType::Expense),
            other => Err(BudgetError::InvalidInput(format!(
                "unknown transaction type `{}` (use income or expense)",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// ISO-8601 timestamp as supplied by the data collaborator.
    pub date_time: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(
        kind: TransactionType,
        amount: Decimal,
        category: impl Into<String>,
        occurred_at: NaiveDateTime,
    ) -> Self {
        Self {
            id: None,
            date_time: occurred_at.format(TIMESTAMP_FORMAT).to_string(),
            kind,
            category: category.into(),
            description: String::new(),
            amount,
        }
    }

    pub fn income(amount: Decimal, category: impl Into<String>, at: NaiveDateTime) -> Self {
        Self::new(TransactionType::Income, amount, category, at)
    }

    pub fn expense(amount: Decimal, category: impl Into<String>, at: NaiveDateTime) -> Self {
        Self::new(TransactionType::Expense, amount, category, at)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Parses `date_time` into a local wall-clock instant. Returns `None` when
    /// the stored text is not a recognised ISO-8601 shape.
    pub fn occurred_at(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.date_time)
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Amount with the sign implied by the transaction type.
    pub fn signed_amount(&self) -> Decimal {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }

    /// Checks the boundary contract: amounts are never negative.
    pub fn validate(&self) -> Result<()> {
        if self.amount < Decimal::ZERO {
            return Err(BudgetError::Validation(format!(
                "transaction {} has a negative amount ({}); the type carries the sign",
                self.id.as_deref().unwrap_or("<new>"),
                self.amount
            )));
        }
        Ok(())
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        let category = if self.description.is_empty() {
            self.category.clone()
        } else {
            format!("{} ({})", self.category, self.description)
        };
        format!("{} {} [{}]", self.date_time, category, self.kind)
    }
}

/// Parses the timestamp shapes accepted at the boundary.
///
/// Offsets are honoured only to pick the wall-clock reading they describe; no
/// conversion into the local zone takes place. Date-only values map to midnight.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(with_offset) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(with_offset.naive_local());
    }
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn parses_supported_timestamp_shapes() {
        assert_eq!(
            parse_timestamp("2024-01-10T10:00:00"),
            Some(at(2024, 1, 10, 10, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-10T10:00"),
            Some(at(2024, 1, 10, 10, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2024-01-10 08:30:15"),
            Some(at(2024, 1, 10, 8, 30, 15))
        );
        assert_eq!(parse_timestamp("2024-01-10"), Some(at(2024, 1, 10, 0, 0, 0)));
        assert_eq!(
            parse_timestamp("2024-01-10T23:30:00-03:00"),
            Some(at(2024, 1, 10, 23, 30, 0))
        );
    }

    #[test]
    fn fractional_seconds_are_kept() {
        let parsed = parse_timestamp("2024-01-10T23:59:59.750").unwrap();
        assert_eq!(parsed.date(), NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
        assert_eq!(parsed.nanosecond(), 750_000_000);
    }

    #[test]
    fn rejects_malformed_timestamps() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2024-13-40"), None);
    }

    #[test]
    fn serde_uses_boundary_field_names() {
        let json = r#"{"id":"t1","dateTime":"2024-01-10T10:00:00","type":"INCOME","category":"Salary","amount":100}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert_eq!(txn.kind, TransactionType::Income);
        assert_eq!(txn.amount, Decimal::from(100));
        assert!(txn.description.is_empty());

        let value = serde_json::to_value(&txn).unwrap();
        assert_eq!(value["type"], "INCOME");
        assert_eq!(value["dateTime"], "2024-01-10T10:00:00");
    }

    #[test]
    fn signed_amount_follows_type() {
        let when = at(2024, 1, 12, 9, 0, 0);
        let expense = Transaction::expense(Decimal::from(40), "Groceries", when);
        assert_eq!(expense.signed_amount(), Decimal::from(-40));
        assert_eq!(expense.date_time, "2024-01-12T09:00:00");
    }

    #[test]
    fn validate_rejects_negative_amounts() {
        let when = at(2024, 1, 12, 9, 0, 0);
        let bad = Transaction::expense(Decimal::from(-5), "Groceries", when).with_id("x9");
        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("x9"));
        assert!(Transaction::income(Decimal::ZERO, "Gift", when).validate().is_ok());
    }

    #[test]
    fn parses_type_from_text() {
        assert_eq!(
            "Income".parse::<TransactionType>().unwrap(),
            TransactionType::Income
        );
        assert!("transfer".parse::<TransactionType>().is_err());
    }
}
