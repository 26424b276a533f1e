use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::config::Config;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View or update preferences",
        "config [show | set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] | ["show"] => {
            show(context);
            Ok(())
        }
        ["set", key, value @ ..] if !value.is_empty() => set(context, key, &value.join(" ")),
        _ => Err(CommandError::InvalidArguments(format!(
            "usage: config [show | set <key> <value>] (keys: {})",
            Config::KEYS.join(", ")
        ))),
    }
}

fn show(context: &ShellContext) {
    output::section("Configuration");
    let rows: Vec<(&str, String)> = context.config.entries();
    output::two_column(&rows);
    output::info(format!(
        "  stored at {}",
        context.config_manager.config_path().display()
    ));
}

fn set(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    context.config.set(key, value)?;
    match key.to_ascii_lowercase().as_str() {
        "granularity" => context
            .navigator
            .set_granularity(context.config.default_granularity),
        "label-style" | "label_style" => {
            context.navigator.set_label_style(context.config.label_style)
        }
        "color" if context.mode == CliMode::Interactive => {
            output::set_color_enabled(context.config.ui_color_enabled)
        }
        _ => {}
    }
    context.persist_config()?;
    output::success(format!("Configuration updated: {} = {}.", key, value));
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::cli::core::process_script;
    use crate::cli::core::test_support::script_context;
    use crate::period::{Granularity, LabelStyle};

    #[test]
    fn set_persists_and_updates_the_navigator() {
        let (mut context, _dir) = script_context(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        process_script(
            &mut context,
            &["config set granularity year", "config set label-style abbreviated"],
        )
        .unwrap();
        assert_eq!(context.navigator.granularity(), Granularity::Year);
        assert_eq!(context.navigator.label_style(), LabelStyle::Abbreviated);
        let stored = context.config_manager.load().unwrap();
        assert_eq!(stored.default_granularity, Granularity::Year);
    }
}
