use crate::cli::core::{
    parse_amount_arg, parse_date_arg, CommandError, CommandResult, ShellContext,
};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::domain::{Displayable, InstallmentPlan};

const USAGE: &str = "installments [<amount> <count> <start> [category] [description...]]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "installments",
        "Plan a purchase in monthly installments, or list tracked plans",
        USAGE,
        cmd_installments,
    )]
}

fn cmd_installments(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => list_plans(context),
        [amount, count, start, rest @ ..] => {
            let total = parse_amount_arg(amount)?;
            let count = count.parse::<u32>().map_err(|_| {
                CommandError::InvalidArguments(format!("invalid installment count `{}`", count))
            })?;
            let start = parse_date_arg(start)?;
            let (category, description) = match rest.split_first() {
                Some((category, tail)) => (category.to_string(), tail.join(" ")),
                None => ("Installments".to_string(), String::new()),
            };
            let plan =
                InstallmentPlan::new(total, count, start, category)?.with_description(description);
            print_schedule(context, &plan);
            context.plans.push(plan);
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(format!("usage: {}", USAGE))),
    }
}

fn print_schedule(context: &ShellContext, plan: &InstallmentPlan) {
    let today = context.clock.today();
    output::section(format!(
        "{} x {} ({})",
        plan.total_installments,
        context.format_money(plan.installment_value),
        plan.category
    ));
    for installment in plan.schedule() {
        let marker = if installment.due_date <= today { "due" } else { "" };
        output::info(format!(
            "  {:<18} {:>14}  {}",
            installment.display_label(),
            context.format_money(installment.amount),
            marker
        ));
    }
    output::two_column(&[
        ("Total", context.format_money(plan.total_amount)),
        ("Ends", plan.end_date().to_string()),
        (
            "Remaining",
            context.format_money(plan.remaining_balance(today)),
        ),
    ]);
}

fn list_plans(context: &ShellContext) -> CommandResult {
    if context.plans.is_empty() {
        output::info("No installment plans in this session.");
        return Ok(());
    }
    let today = context.clock.today();
    output::section("Installment plans");
    for plan in &context.plans {
        output::info(format!(
            "  {:<16} {}/{} due so far, {} remaining, ends {}",
            plan.category,
            plan.paid_through(today),
            plan.total_installments,
            context.format_money(plan.remaining_balance(today)),
            plan.end_date()
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::cli::core::test_support::script_context;
    use crate::cli::core::{process_script, CommandError};
    use crate::errors::BudgetError;

    #[test]
    fn plan_is_tracked_and_shows_in_its_months() {
        let (mut context, _dir) = script_context(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        process_script(&mut context, &["installments 100 3 2024-01-31 Laptop \"work machine\""])
            .unwrap();
        let plan = &context.plans[0];
        assert_eq!(plan.description, "work machine");
        assert_eq!(plan.installment_value, Decimal::new(3333, 2));

        process_script(&mut context, &["next"]).unwrap();
        let due = context.plans[0].due_in(&context.navigator.window());
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].due_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn single_installment_is_rejected() {
        let (mut context, _dir) = script_context(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        let err = context.process_line("installments 100 1 2024-01-31").unwrap_err();
        assert!(matches!(err, CommandError::Core(BudgetError::Validation(_))));
        let err = context.process_line("installments 100").unwrap_err();
        assert!(matches!(err, CommandError::InvalidArguments(_)));
    }

    #[test]
    fn oversized_installment_counts_are_rejected() {
        let (mut context, _dir) = script_context(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());
        for line in ["installments 100 601 2024-01-01", "installments 100 4000000000 2024-01-01"] {
            let err = context.process_line(line).unwrap_err();
            assert!(matches!(err, CommandError::Core(BudgetError::Validation(_))));
        }
        assert!(context.plans.is_empty());
    }
}
