//! Installment plans: one total amortized into monthly payments.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Displayable;
use crate::errors::{BudgetError, Result};
use crate::period::calendar::shift_month;
use crate::period::PeriodWindow;

pub const MIN_INSTALLMENTS: u32 = 2;
/// Fifty years of monthly payments.
pub const MAX_INSTALLMENTS: u32 = 600;
const CENT_PRECISION: u32 = 2;

/// Splits `total` into `installments` cent-precise parts.
///
/// Every part but the last is `total / installments` truncated to cents; the
/// last part absorbs the remainder so the parts always sum to `total`. Zero
/// installments yields an empty split.
pub fn split_amount(total: Decimal, installments: u32) -> Vec<Decimal> {
    if installments == 0 {
        return Vec::new();
    }
    let base = (total / Decimal::from(installments))
        .round_dp_with_strategy(CENT_PRECISION, RoundingStrategy::ToZero);
    let mut parts = vec![base; installments as usize];
    let last = total - base * Decimal::from(installments - 1);
    if let Some(slot) = parts.last_mut() {
        *slot = last;
    }
    parts
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentPlan {
    pub id: Uuid,
    pub total_amount: Decimal,
    pub total_installments: u32,
    /// Regular payment; the final installment may carry up to a few extra cents.
    pub installment_value: Decimal,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Installment {
    /// 1-based position within the plan.
    pub number: u32,
    pub of: u32,
    pub due_date: NaiveDate,
    pub amount: Decimal,
}

impl Displayable for Installment {
    fn display_label(&self) -> String {
        format!("{}/{} due {}", self.number, self.of, self.due_date)
    }
}

impl InstallmentPlan {
    /// Creates a plan after checking the caller-facing contract: between
    /// [`MIN_INSTALLMENTS`] and [`MAX_INSTALLMENTS`] installments and a positive
    /// total expressed in whole cents.
    pub fn new(
        total_amount: Decimal,
        total_installments: u32,
        start_date: NaiveDate,
        category: impl Into<String>,
    ) -> Result<Self> {
        if total_installments < MIN_INSTALLMENTS {
            return Err(BudgetError::Validation(format!(
                "an installment plan needs at least {} installments (got {})",
                MIN_INSTALLMENTS, total_installments
            )));
        }
        if total_installments > MAX_INSTALLMENTS {
            return Err(BudgetError::Validation(format!(
                "an installment plan allows at most {} installments (got {})",
                MAX_INSTALLMENTS, total_installments
            )));
        }
        if total_amount <= Decimal::ZERO {
            return Err(BudgetError::Validation(format!(
                "installment total must be positive (got {})",
                total_amount
            )));
        }
        if total_amount.normalize().scale() > CENT_PRECISION {
            return Err(BudgetError::Validation(format!(
                "installment total {} has more than {} decimal places",
                total_amount, CENT_PRECISION
            )));
        }

        let installment_value = (total_amount / Decimal::from(total_installments))
            .round_dp_with_strategy(CENT_PRECISION, RoundingStrategy::ToZero);

        let plan = Self {
            id: Uuid::new_v4(),
            total_amount,
            total_installments,
            installment_value,
            category: category.into(),
            description: String::new(),
            start_date,
        };
        tracing::debug!(
            id = %plan.id,
            total = %plan.total_amount,
            installments = plan.total_installments,
            value = %plan.installment_value,
            "created installment plan"
        );
        Ok(plan)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Due date of installment `index` (0-based), counted from the start date
    /// so clamped short months never drift later installments.
    pub fn due_date(&self, index: u32) -> NaiveDate {
        shift_month(self.start_date, i32::try_from(index).unwrap_or(i32::MAX))
    }

    pub fn end_date(&self) -> NaiveDate {
        self.due_date(self.total_installments.saturating_sub(1))
    }

    pub fn final_installment_value(&self) -> Decimal {
        let regular = Decimal::from(self.total_installments.saturating_sub(1));
        self.total_amount - self.installment_value * regular
    }

    pub fn schedule(&self) -> Vec<Installment> {
        split_amount(self.total_amount, self.total_installments)
            .into_iter()
            .zip(0u32..)
            .map(|(amount, index)| Installment {
                number: index + 1,
                of: self.total_installments,
                due_date: self.due_date(index),
                amount,
            })
            .collect()
    }

    /// Installments falling due inside `window`.
    pub fn due_in(&self, window: &PeriodWindow) -> Vec<Installment> {
        self.schedule()
            .into_iter()
            .filter(|installment| window.contains_date(installment.due_date))
            .collect()
    }

    /// Number of installments due on or before `as_of`.
    pub fn paid_through(&self, as_of: NaiveDate) -> u32 {
        let count = self
            .schedule()
            .iter()
            .filter(|installment| installment.due_date <= as_of)
            .count();
        u32::try_from(count).unwrap_or(self.total_installments)
    }

    /// Sum of the installments still due after `as_of`.
    pub fn remaining_balance(&self, as_of: NaiveDate) -> Decimal {
        self.schedule()
            .iter()
            .filter(|installment| installment.due_date > as_of)
            .map(|installment| installment.amount)
            .sum()
    }
}
