//! Domain models consumed by the period core: transactions and installment plans.

pub mod common;
pub mod installment;
pub mod transaction;

pub use common::Displayable;
pub use installment::{
    split_amount, Installment, InstallmentPlan, MAX_INSTALLMENTS, MIN_INSTALLMENTS,
};
pub use transaction::{parse_timestamp, Transaction, TransactionType};
