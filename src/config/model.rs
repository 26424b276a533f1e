use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::currency::LocaleConfig;
use crate::errors::{BudgetError, Result};
use crate::period::{Granularity, LabelStyle};

/// Stores user-configurable preferences for period views.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    pub locale: String,
    pub currency: String,
    #[serde(default)]
    pub currency_precision: Option<u8>,
    #[serde(default)]
    pub default_granularity: Granularity,
    #[serde(default)]
    pub label_style: LabelStyle,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Transactions file loaded on the previous run.
    pub last_transactions_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en-US".into(),
            currency: "USD".into(),
            currency_precision: None,
            default_granularity: Granularity::default(),
            label_style: LabelStyle::default(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            last_transactions_file: None,
        }
    }
}

impl Config {
    pub const KEYS: [&'static str; 6] = [
        "locale",
        "currency",
        "precision",
        "granularity",
        "label-style",
        "color",
    ];

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn locale_config(&self) -> LocaleConfig {
        LocaleConfig::from_tag(&self.locale)
    }

    /// Updates one preference from text, as typed in `config set`.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key.trim().to_ascii_lowercase().as_str() {
            "locale" => self.locale = non_empty(key, value)?.to_string(),
            "currency" => self.currency = non_empty(key, value)?.to_ascii_uppercase(),
            "precision" => {
                self.currency_precision = match value {
                    "" | "auto" | "default" => None,
                    raw => Some(raw.parse::<u8>().map_err(|_| {
                        BudgetError::InvalidInput(format!("invalid precision `{}`", raw))
                    })?),
                }
            }
            "granularity" => self.default_granularity = value.parse()?,
            "label-style" | "label_style" => self.label_style = value.parse()?,
            "color" => {
                self.ui_color_enabled = match value.to_ascii_lowercase().as_str() {
                    "on" | "true" | "yes" => true,
                    "off" | "false" | "no" => false,
                    other => {
                        return Err(BudgetError::InvalidInput(format!(
                            "invalid color setting `{}` (use on or off)",
                            other
                        )))
                    }
                }
            }
            other => {
                return Err(BudgetError::InvalidInput(format!(
                    "unknown config key `{}` (known: {})",
                    other,
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// Key/value rows for display.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("locale", self.locale.clone()),
            ("currency", self.currency.clone()),
            (
                "precision",
                self.currency_precision
                    .map(|value| value.to_string())
                    .unwrap_or_else(|| "auto".into()),
            ),
            ("granularity", self.default_granularity.to_string()),
            ("label-style", self.label_style.to_string()),
            (
                "color",
                if self.ui_color_enabled { "on" } else { "off" }.to_string(),
            ),
        ]
    }
}

fn non_empty<'a>(key: &str, value: &'a str) -> Result<&'a str> {
    if value.is_empty() {
        Err(BudgetError::InvalidInput(format!("`{}` cannot be empty", key)))
    } else {
        Ok(value)
    }
}
