use rust_decimal::Decimal;

use crate::cli::core::{parse_instant_arg, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::domain::TransactionType;
use crate::period::{Granularity, PeriodScope, PeriodWindow};

const RANGE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "period",
            "Show or change the period granularity",
            "period [day|week|month|year]",
            cmd_period,
        ),
        CommandEntry::new("next", "Move to the following period", "next", cmd_next),
        CommandEntry::new("prev", "Move to the preceding period", "prev", cmd_prev),
        CommandEntry::new("today", "Jump back to the current period", "today", cmd_today),
        CommandEntry::new(
            "goto",
            "Jump to the period containing a date",
            "goto <YYYY-MM-DD>",
            cmd_goto,
        ),
        CommandEntry::new(
            "summary",
            "Show totals for the current period",
            "summary",
            cmd_summary,
        ),
        CommandEntry::new(
            "list",
            "List transactions in the current period",
            "list",
            cmd_list,
        ),
        CommandEntry::new(
            "categories",
            "Break the current period down by category",
            "categories [income|expense]",
            cmd_categories,
        ),
    ]
}

fn announce(window: &PeriodWindow) {
    output::info(format!("Period: {}", window.label));
}

fn cmd_period(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        output::info(format!(
            "Granularity: {} (options: {})",
            context.navigator.granularity(),
            Granularity::ALL
                .iter()
                .map(|granularity| granularity.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        ));
        announce(&context.navigator.window());
        return Ok(());
    };
    let granularity: Granularity = raw.parse()?;
    context.navigator.set_granularity(granularity);
    announce(&context.navigator.window());
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let window = context.navigator.next();
    announce(&window);
    Ok(())
}

fn cmd_prev(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let window = context.navigator.previous();
    announce(&window);
    Ok(())
}

fn cmd_today(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let window = context.navigator.go_to_today();
    announce(&window);
    Ok(())
}

fn cmd_goto(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let raw = args
        .first()
        .ok_or_else(|| CommandError::InvalidArguments("usage: goto <YYYY-MM-DD>".into()))?;
    let reference = parse_instant_arg(raw)?;
    context.navigator.set_reference(reference);
    announce(&context.navigator.window());
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let aggregate = context.navigator.summarize(&context.transactions)?;
    let window = &aggregate.window;
    let scope = match window.scope(context.clock.now()) {
        PeriodScope::Past => "past",
        PeriodScope::Current => "current",
        PeriodScope::Future => "future",
    };

    output::section(&window.label);
    output::two_column(&[
        (
            "Range",
            format!(
                "{} .. {}",
                window.start.format(RANGE_FORMAT),
                window.end.format(RANGE_FORMAT)
            ),
        ),
        ("Scope", scope.to_string()),
        ("Income", context.format_money(aggregate.income)),
        ("Expense", context.format_money(aggregate.expense)),
        ("Balance", context.format_money(aggregate.balance)),
        ("Transactions", aggregate.transactions.len().to_string()),
    ]);

    if aggregate.unparseable > 0 {
        output::warning(format!(
            "{} transaction(s) skipped: unreadable timestamp.",
            aggregate.unparseable
        ));
    }

    let due: Vec<_> = context
        .plans
        .iter()
        .flat_map(|plan| {
            plan.due_in(window)
                .into_iter()
                .map(move |installment| (plan, installment))
        })
        .collect();
    if !due.is_empty() {
        output::info("Installments due:");
        for (plan, installment) in due {
            output::info(format!(
                "  {:<14} {}/{} on {}  {}",
                plan.category,
                installment.number,
                installment.of,
                installment.due_date,
                context.format_money(installment.amount)
            ));
        }
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let aggregate = context.navigator.summarize(&context.transactions)?;
    output::section(format!("Transactions: {}", aggregate.window.label));
    if aggregate.is_empty() {
        output::info("No transactions in this period.");
        return Ok(());
    }
    for txn in &aggregate.transactions {
        let detail = if txn.description.is_empty() {
            txn.category.clone()
        } else {
            format!("{} ({})", txn.category, txn.description)
        };
        output::info(format!(
            "  {}  {:<8} {:<28} {:>14}",
            txn.date_time,
            txn.kind.to_string(),
            detail,
            context.format_money(txn.signed_amount())
        ));
    }
    Ok(())
}

fn cmd_categories(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let kind = match args.first() {
        Some(raw) => raw.parse::<TransactionType>()?,
        None => TransactionType::Expense,
    };
    let aggregate = context.navigator.summarize(&context.transactions)?;
    let breakdown = aggregate.category_breakdown(kind)?;
    output::section(format!("{} by category: {}", kind, aggregate.window.label));
    if breakdown.is_empty() {
        output::info("Nothing recorded.");
        return Ok(());
    }
    let hundred = Decimal::ONE_HUNDRED;
    for row in breakdown {
        output::info(format!(
            "  {:<20} {:>14}  {:>3} txn  {:>6}%",
            row.category,
            context.format_money(row.total),
            row.count,
            (row.share * hundred).round_dp(1)
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::cli::core::process_script;
    use crate::cli::core::test_support::script_context;
    use crate::cli::core::CommandError;
    use crate::errors::BudgetError;

    #[test]
    fn goto_then_year_view() {
        let (mut context, _dir) = script_context(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        process_script(&mut context, &["goto 2023-07-04", "period year"]).unwrap();
        assert_eq!(context.navigator.window().label, "2023");
    }

    #[test]
    fn month_end_reference_clamps_when_stepping() {
        let (mut context, _dir) = script_context(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
        process_script(&mut context, &["next"]).unwrap();
        assert_eq!(
            context.navigator.reference().date(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn summary_reports_totals_that_do_not_fit() {
        let (mut context, _dir) = script_context(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        process_script(
            &mut context,
            &[
                "add income 79228162514264337593543950335 Windfall",
                "add income 1 Windfall",
            ],
        )
        .unwrap();
        for command in ["summary", "list", "categories income"] {
            let err = context.process_line(command).unwrap_err();
            assert!(matches!(err, CommandError::Core(BudgetError::Validation(_))));
        }
        // Moving away from the overflowing window works as usual.
        process_script(&mut context, &["next", "summary"]).unwrap();
    }
}
