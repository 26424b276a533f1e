use std::{env, path::PathBuf, sync::Arc};

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{self, Config, ConfigManager},
    domain::{InstallmentPlan, Transaction},
    period::PeriodNavigator,
    time::{Clock, FixedClock, SystemClock},
};

use super::core::CliError;
use super::registry::CommandRegistry;

/// Pins the session clock to a calendar date, e.g. `2024-01-15`.
pub const TODAY_ENV: &str = "BUDGET_PERIODS_TODAY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub clock: Arc<dyn Clock>,
    pub navigator: PeriodNavigator,
    pub transactions: Vec<Transaction>,
    pub transactions_path: Option<PathBuf>,
    pub plans: Vec<InstallmentPlan>,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = config::default_manager()?;
        Ok(Self::with_parts(mode, manager, clock_from_env()?))
    }

    /// Builds a context from explicit collaborators. A config file that
    /// cannot be read falls back to defaults with a warning.
    pub fn with_parts(mode: CliMode, config_manager: ConfigManager, clock: Arc<dyn Clock>) -> Self {
        let config = config_manager.load().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "failed to load config, using defaults");
            Config::default()
        });
        let navigator = PeriodNavigator::new(Arc::clone(&clock), config.default_granularity)
            .with_label_style(config.label_style);

        let mut registry = CommandRegistry::new();
        super::commands::register_all(&mut registry);

        Self {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            clock,
            navigator,
            transactions: Vec::new(),
            transactions_path: None,
            plans: Vec::new(),
            last_command: None,
            running: true,
        }
    }
}

fn clock_from_env() -> Result<Arc<dyn Clock>, CliError> {
    match env::var(TODAY_ENV) {
        Ok(raw) => {
            let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
                CliError::Input(format!("{} must be YYYY-MM-DD (got `{}`)", TODAY_ENV, raw))
            })?;
            tracing::info!(%date, "session clock pinned");
            Ok(Arc::new(FixedClock::on_date(date)))
        }
        Err(_) => Ok(Arc::new(SystemClock)),
    }
}
