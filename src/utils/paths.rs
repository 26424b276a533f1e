use dirs::home_dir;
use std::{env, path::PathBuf};

pub const HOME_ENV: &str = "BUDGET_PERIODS_HOME";
const DEFAULT_DIR_NAME: &str = ".budget_periods";

/// Returns the application data directory, defaulting to `~/.budget_periods`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
