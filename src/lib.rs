#![doc(test(attr(deny(warnings))))]

//! Budget Periods resolves calendar windows (day, week, month, year) around a
//! reference instant, totals transactions inside them, and steps between
//! neighbouring windows. Installment plans amortize a purchase over months.

pub mod cli;
pub mod config;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod period;
pub mod storage;
pub mod time;
pub mod utils;

use std::sync::Once;

pub use config::{Config, ConfigError, ConfigManager};
pub use domain::{InstallmentPlan, Transaction, TransactionType};
pub use errors::{BudgetError, Result};
pub use period::{Granularity, LabelStyle, PeriodAggregate, PeriodNavigator, PeriodWindow};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Periods tracing initialized.");
    });
}
