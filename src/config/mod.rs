//! Persistent user preferences for the period shell.
//!
//! Owns the `Config` model plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;

use crate::utils::paths;

/// Manager rooted at the application data directory.
pub fn default_manager() -> Result<ConfigManager, ConfigError> {
    ConfigManager::with_base_dir(paths::app_data_dir())
}

