#![allow(dead_code)]

use std::sync::Mutex;

use budget_periods::{config::ConfigManager, domain::Transaction};
use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a config manager backed by a unique directory, returning the base path too.
pub fn setup_test_env() -> (ConfigManager, std::path::PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (config_manager, base)
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .expect("valid date")
        .and_hms_opt(h, min, s)
        .expect("valid time")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn income(amount: Decimal, category: &str, when: NaiveDateTime) -> Transaction {
    Transaction::income(amount, category, when)
}

pub fn expense(amount: Decimal, category: &str, when: NaiveDateTime) -> Transaction {
    Transaction::expense(amount, category, when)
}

/// A year of mixed transactions, a few per week.
pub fn sample_year() -> Vec<Transaction> {
    let mut transactions = Vec::new();
    let mut day = date(2024, 1, 1);
    let mut idx = 0i64;
    while day <= date(2024, 12, 31) {
        let when = day.and_hms_opt((idx % 24) as u32, 15, 0).expect("valid time");
        let txn = if idx % 5 == 0 {
            income(Decimal::new(250_000 + idx, 2), "Salary", when)
        } else {
            expense(Decimal::new(1_000 + idx * 7, 2), ["Food", "Rent", "Fun"][(idx % 3) as usize], when)
        };
        transactions.push(txn.with_id(format!("t{idx}")));
        day = day + chrono::Duration::days(2);
        idx += 1;
    }
    transactions
}
