use std::{fmt, str::FromStr};

use serde::{de::Deserializer, Deserialize, Serialize};

use crate::errors::{BudgetError, Result};

/// Unit a period is resolved in.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Day,
    Week,
    #[default]
    Month,
    Year,
}

impl Granularity {
    pub const ALL: [Granularity; 4] = [
        Granularity::Day,
        Granularity::Week,
        Granularity::Month,
        Granularity::Year,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Granularity::Day => "day",
            Granularity::Week => "week",
            Granularity::Month => "month",
            Granularity::Year => "year",
        }
    }

    /// Parses `value`, degrading to [`Granularity::Month`] for anything
    /// unrecognised. This mirrors how period views have always treated unknown
    /// selections; callers that want rejection use `str::parse` instead.
    pub fn parse_or_default(value: &str) -> Self {
        value.parse().unwrap_or_else(|_| {
            tracing::warn!(
                granularity = value,
                "unknown granularity, falling back to month"
            );
            Granularity::Month
        })
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "day" | "daily" => Ok(Granularity::Day),
            "week" | "weekly" => Ok(Granularity::Week),
            "month" | "monthly" => Ok(Granularity::Month),
            "year" | "yearly" => Ok(Granularity::Year),
            other => Err(BudgetError::InvalidInput(format!(
                "unknown granularity `{}` (use day, week, month, or year)",
                other
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for Granularity {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .map(|raw| Granularity::parse_or_default(&raw))
            .unwrap_or_default())
    }
}

/// Presentation used when rendering a period label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LabelStyle {
    /// Long names, e.g. `Monday, 15 January 2024` or `January 2024`.
    #[default]
    Full,
    /// Short upper-cased names, e.g. `JAN 2024`.
    Abbreviated,
}

impl fmt::Display for LabelStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LabelStyle::Full => "full",
            LabelStyle::Abbreviated => "abbreviated",
        };
        f.write_str(label)
    }
}

impl FromStr for LabelStyle {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" | "long" => Ok(LabelStyle::Full),
            "abbreviated" | "abbr" | "short" => Ok(LabelStyle::Abbreviated),
            other => Err(BudgetError::InvalidInput(format!(
                "unknown label style `{}` (use full or abbreviated)",
                other
            ))),
        }
    }
}
