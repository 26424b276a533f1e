use std::path::PathBuf;

use uuid::Uuid;

use crate::cli::core::{parse_amount_arg, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::domain::{parse_timestamp, Transaction, TransactionType};
use crate::storage;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record an income or expense",
            "add <income|expense> <amount> <category> [date] [description...]",
            cmd_add,
        ),
        CommandEntry::new(
            "load",
            "Load transactions from a JSON file",
            "load <path>",
            cmd_load,
        ),
        CommandEntry::new(
            "save",
            "Write session transactions to a JSON file",
            "save [path]",
            cmd_save,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [kind, amount, category, rest @ ..] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: add <income|expense> <amount> <category> [date] [description...]".into(),
        ));
    };
    let kind: TransactionType = kind.parse()?;
    let amount = parse_amount_arg(amount)?;

    let (occurred_at, description) = match rest.split_first() {
        Some((first, tail)) => match parse_timestamp(first) {
            Some(at) => (at, tail.join(" ")),
            None => (context.clock.now(), rest.join(" ")),
        },
        None => (context.clock.now(), String::new()),
    };

    let transaction = Transaction::new(kind, amount, *category, occurred_at)
        .with_id(Uuid::new_v4().to_string())
        .with_description(description);
    transaction.validate()?;

    output::success(format!(
        "Added {} {} in {} on {}.",
        kind,
        context.format_money(amount),
        transaction.category,
        transaction.date_time
    ));
    context.transactions.push(transaction);
    Ok(())
}

fn cmd_load(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: load <path>".into()))?;
    let path = PathBuf::from(raw);
    let transactions = storage::load_transactions(&path)?;
    output::success(format!(
        "Loaded {} transactions from {}.",
        transactions.len(),
        path.display()
    ));
    context.transactions = transactions;
    context.config.last_transactions_file = Some(path.clone());
    context.transactions_path = Some(path);
    context.persist_config()
}

fn cmd_save(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = match args.first() {
        Some(raw) => PathBuf::from(raw),
        None => context.transactions_path.clone().ok_or_else(|| {
            CommandError::InvalidArguments("no file loaded yet; use `save <path>`".into())
        })?,
    };
    storage::save_transactions(&path, &context.transactions)?;
    output::success(format!(
        "Saved {} transactions to {}.",
        context.transactions.len(),
        path.display()
    ));
    context.transactions_path = Some(path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::cli::core::test_support::script_context;
    use crate::cli::core::{process_script, CommandError};
    use crate::errors::BudgetError;

    #[test]
    fn save_then_load_round_trips_session() {
        let (mut context, dir) = script_context(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        let file = dir.path().join("march.json");
        let save = format!("save {}", file.display());
        let load = format!("load {}", file.display());
        process_script(&mut context, &["add expense 12.5 Coffee", save.as_str()]).unwrap();

        context.transactions.clear();
        process_script(&mut context, &[load.as_str()]).unwrap();
        assert_eq!(context.transactions.len(), 1);
        assert_eq!(context.config.last_transactions_file.as_deref(), Some(file.as_path()));
        assert_eq!(
            context.config_manager.load().unwrap().last_transactions_file,
            Some(file)
        );
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let (mut context, _dir) = script_context(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        let err = context.process_line("add expense -5 Coffee").unwrap_err();
        assert!(matches!(err, CommandError::Core(BudgetError::Validation(_))));
        assert!(context.transactions.is_empty());
    }

    #[test]
    fn save_without_path_needs_a_loaded_file() {
        let (mut context, _dir) = script_context(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        let err = context.process_line("save").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }
}
