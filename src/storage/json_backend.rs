use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::domain::Transaction;
use crate::errors::{BudgetError, Result};

use super::TransactionStore;

const TMP_SUFFIX: &str = "tmp";

/// A transactions file holding a single JSON array.
#[derive(Debug, Clone)]
pub struct JsonTransactionFile {
    path: PathBuf,
}

impl JsonTransactionFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionStore for JsonTransactionFile {
    fn load(&self) -> Result<Vec<Transaction>> {
        let data = fs::read_to_string(&self.path).map_err(|err| {
            BudgetError::StorageError(format!("cannot read {}: {}", self.path.display(), err))
        })?;
        let transactions: Vec<Transaction> = serde_json::from_str(&data)?;
        for transaction in &transactions {
            transaction.validate()?;
        }
        tracing::info!(
            path = %self.path.display(),
            count = transactions.len(),
            "loaded transactions"
        );
        Ok(transactions)
    }

    fn save(&self, transactions: &[Transaction]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(transactions)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(
            path = %self.path.display(),
            count = transactions.len(),
            "saved transactions"
        );
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
