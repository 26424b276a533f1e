pub mod json_backend;

use std::path::Path;

use crate::domain::Transaction;
use crate::errors::Result;

/// Abstraction over places transactions can be read from and written to.
pub trait TransactionStore: Send + Sync {
    fn load(&self) -> Result<Vec<Transaction>>;
    fn save(&self, transactions: &[Transaction]) -> Result<()>;
}

pub use json_backend::JsonTransactionFile;

/// Reads a JSON array of transactions, rejecting negative amounts.
pub fn load_transactions(path: &Path) -> Result<Vec<Transaction>> {
    JsonTransactionFile::new(path).load()
}

/// Writes transactions as pretty JSON, staging through a temporary file.
pub fn save_transactions(path: &Path, transactions: &[Transaction]) -> Result<()> {
    JsonTransactionFile::new(path).save(transactions)
}
