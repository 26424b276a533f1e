mod common;

use budget_periods::domain::{Transaction, TransactionType};
use budget_periods::errors::BudgetError;
use budget_periods::period::{aggregate, resolve, Granularity};
use chrono::Datelike;
use common::{at, expense, income, sample_year};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn january_totals() {
    let transactions = vec![
        income(dec!(100), "Salary", at(2024, 1, 10, 9, 0, 0)),
        expense(dec!(40), "Food", at(2024, 1, 12, 18, 30, 0)),
    ];
    let window = resolve(at(2024, 1, 20, 0, 0, 0), Granularity::Month);
    let result = aggregate(&transactions, &window).unwrap();

    assert_eq!(result.income, dec!(100));
    assert_eq!(result.expense, dec!(40));
    assert_eq!(result.balance, dec!(60));
    assert_eq!(result.transactions.len(), 2);
}

#[test]
fn window_edges_are_inclusive_and_midnight_starts_the_next_period() {
    let transactions = vec![
        expense(dec!(1), "Edge", at(2024, 1, 1, 0, 0, 0)),
        expense(dec!(2), "Edge", at(2024, 1, 31, 23, 59, 59)),
        expense(dec!(4), "Edge", at(2024, 2, 1, 0, 0, 0)),
        expense(dec!(8), "Edge", at(2023, 12, 31, 23, 59, 59)),
    ];
    let window = resolve(at(2024, 1, 15, 0, 0, 0), Granularity::Month);
    let result = aggregate(&transactions, &window).unwrap();
    assert_eq!(result.expense, dec!(3));
}

#[test]
fn included_set_matches_the_window_predicate() {
    let transactions = sample_year();
    for granularity in Granularity::ALL {
        let window = resolve(at(2024, 6, 12, 12, 0, 0), granularity);
        let result = aggregate(&transactions, &window).unwrap();

        let expected = transactions
            .iter()
            .filter(|txn| txn.occurred_at().is_some_and(|when| window.contains(when)))
            .count();
        assert_eq!(result.transactions.len(), expected);
        for txn in &result.transactions {
            let when = txn.occurred_at().unwrap();
            assert!(window.start <= when && when <= window.end);
        }
    }
}

#[test]
fn balance_is_income_minus_expense() {
    let transactions = sample_year();
    let mut reference = at(2024, 1, 1, 0, 0, 0);
    while reference.year() == 2024 {
        for granularity in Granularity::ALL {
            let window = resolve(reference, granularity);
            let result = aggregate(&transactions, &window).unwrap();
            assert_eq!(result.balance, result.income - result.expense);
            assert!(result.income >= Decimal::ZERO);
            assert!(result.expense >= Decimal::ZERO);
        }
        reference += chrono::Duration::days(13);
    }
}

#[test]
fn aggregation_is_repeatable() {
    let transactions = sample_year();
    let window = resolve(at(2024, 3, 3, 3, 3, 3), Granularity::Week);
    assert_eq!(
        aggregate(&transactions, &window).unwrap(),
        aggregate(&transactions, &window).unwrap()
    );
}

#[test]
fn empty_and_out_of_range_inputs_give_zero_totals() {
    let window = resolve(at(2030, 1, 1, 0, 0, 0), Granularity::Year);
    let none: Vec<Transaction> = Vec::new();
    let result = aggregate(&none, &window).unwrap();
    assert!(result.is_empty());
    assert_eq!(result.balance, Decimal::ZERO);

    let year = sample_year();
    assert!(aggregate(&year, &window).unwrap().is_empty());
}

#[test]
fn unparseable_timestamps_are_skipped_and_counted() {
    let mut broken = expense(dec!(999), "Broken", at(2024, 1, 5, 0, 0, 0));
    broken.date_time = "05/01/2024".into();
    let transactions = vec![broken, income(dec!(10), "Gift", at(2024, 1, 5, 0, 0, 0))];
    let window = resolve(at(2024, 1, 5, 0, 0, 0), Granularity::Day);
    let result = aggregate(&transactions, &window).unwrap();
    assert_eq!(result.unparseable, 1);
    assert_eq!(result.balance, dec!(10));
}

#[test]
fn offsets_keep_their_wall_clock_reading() {
    let mut late = expense(dec!(5), "Taxi", at(2024, 1, 1, 0, 0, 0));
    late.date_time = "2024-01-31T23:30:00-08:00".into();
    let transactions = [late];
    let window = resolve(at(2024, 1, 10, 0, 0, 0), Granularity::Month);
    let result = aggregate(&transactions, &window).unwrap();
    assert_eq!(result.expense, dec!(5));
}

#[test]
fn category_breakdown_ranks_by_total() {
    let when = at(2024, 4, 2, 12, 0, 0);
    let transactions = vec![
        expense(dec!(30), "Food", when),
        expense(dec!(50), "Rent", when),
        expense(dec!(20), "Food", when),
        income(dec!(500), "Salary", when),
    ];
    let window = resolve(when, Granularity::Month);
    let result = aggregate(&transactions, &window).unwrap();
    let rows = result.category_breakdown(TransactionType::Expense).unwrap();

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category, "Food");
    assert_eq!(rows[0].total, dec!(50));
    assert_eq!(rows[0].count, 2);
    assert_eq!(rows[0].share, dec!(0.5));
    assert_eq!(rows[1].category, "Rent");
    assert_eq!(result.count_of(TransactionType::Income), 1);
    assert_eq!(result.total_of(TransactionType::Income), dec!(500));
}

#[test]
fn totals_beyond_the_decimal_range_are_an_error() {
    let when = at(2024, 4, 2, 12, 0, 0);
    let transactions = vec![
        expense(Decimal::MAX, "Yacht", when),
        expense(dec!(0.01), "Harbour fee", when),
    ];
    let window = resolve(when, Granularity::Month);
    assert!(matches!(
        aggregate(&transactions, &window),
        Err(BudgetError::Validation(_))
    ));

    // Outside the window the large amount is never summed.
    let next_month = resolve(at(2024, 5, 2, 12, 0, 0), Granularity::Month);
    assert!(aggregate(&transactions, &next_month).unwrap().is_empty());
}
