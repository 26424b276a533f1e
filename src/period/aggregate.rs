//! Reduces a transaction slice to the totals of one resolved window.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{Transaction, TransactionType};
use crate::errors::{BudgetError, Result};

use super::PeriodWindow;

const SHARE_PRECISION: u32 = 4;

/// Totals for one window. Borrowed transactions keep the caller's order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PeriodAggregate<'a> {
    pub window: PeriodWindow,
    pub transactions: Vec<&'a Transaction>,
    pub income: Decimal,
    pub expense: Decimal,
    pub balance: Decimal,
    /// Transactions skipped because their timestamp could not be parsed.
    pub unparseable: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Decimal,
    pub count: usize,
    /// Fraction of the type's total in `[0, 1]`, rounded to four places.
    pub share: Decimal,
}

/// Filters `transactions` to `window` and sums income and expense in one pass.
///
/// Fails with [`BudgetError::Validation`] when a running total would exceed
/// the decimal range.
pub fn aggregate<'a>(
    transactions: &'a [Transaction],
    window: &PeriodWindow,
) -> Result<PeriodAggregate<'a>> {
    let mut included = Vec::new();
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    let mut unparseable = 0usize;

    for txn in transactions {
        let Some(at) = txn.occurred_at() else {
            unparseable += 1;
            tracing::debug!(
                id = txn.id.as_deref().unwrap_or("<new>"),
                date_time = %txn.date_time,
                "skipping transaction with unparseable timestamp"
            );
            continue;
        };
        if !window.contains(at) {
            continue;
        }
        match txn.kind {
            TransactionType::Income => income = add_checked(income, txn.amount, &window.label)?,
            TransactionType::Expense => expense = add_checked(expense, txn.amount, &window.label)?,
        }
        included.push(txn);
    }

    tracing::debug!(
        label = %window.label,
        included = included.len(),
        unparseable,
        "aggregated period"
    );

    Ok(PeriodAggregate {
        window: window.clone(),
        transactions: included,
        income,
        expense,
        balance: income - expense,
        unparseable,
    })
}

fn add_checked(total: Decimal, amount: Decimal, label: &str) -> Result<Decimal> {
    total.checked_add(amount).ok_or_else(|| {
        BudgetError::Validation(format!("totals for {} exceed the supported range", label))
    })
}

impl PeriodAggregate<'_> {
    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn count_of(&self, kind: TransactionType) -> usize {
        self.transactions
            .iter()
            .filter(|txn| txn.kind == kind)
            .count()
    }

    pub fn total_of(&self, kind: TransactionType) -> Decimal {
        match kind {
            TransactionType::Income => self.income,
            TransactionType::Expense => self.expense,
        }
    }

    /// Groups the window's transactions of `kind` by category, largest first.
    pub fn category_breakdown(&self, kind: TransactionType) -> Result<Vec<CategoryTotal>> {
        let mut grouped: BTreeMap<&str, (Decimal, usize)> = BTreeMap::new();
        for txn in self.transactions.iter().filter(|txn| txn.kind == kind) {
            let entry = grouped.entry(txn.category.as_str()).or_default();
            entry.0 = add_checked(entry.0, txn.amount, &self.window.label)?;
            entry.1 += 1;
        }

        let kind_total = self.total_of(kind);
        let mut totals: Vec<CategoryTotal> = grouped
            .into_iter()
            .map(|(category, (total, count))| CategoryTotal {
                category: category.to_string(),
                total,
                count,
                share: if kind_total.is_zero() {
                    Decimal::ZERO
                } else {
                    (total / kind_total).round_dp(SHARE_PRECISION)
                },
            })
            .collect();
        totals.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.cmp(&b.category))
        });
        Ok(totals)
    }
}
