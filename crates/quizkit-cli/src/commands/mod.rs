pub mod export_exam;
pub mod import_exam;
pub mod init;
pub mod merge;
pub mod score;
pub mod stats;
pub mod validate;

use std::path::PathBuf;

use anyhow::Result;

use quizkit_store::{load_config_from, BankStore};

/// Open the bank named on the command line, or the one from the config.
pub(crate) fn open_bank(
    bank: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<BankStore> {
    let bank_path = match bank {
        Some(path) => path,
        None => load_config_from(config_path.as_deref())?.bank,
    };
    let store = BankStore::open(&bank_path)?;
    tracing::debug!(
        "opened bank {} ({} exercises)",
        bank_path.display(),
        store.exercise_count()
    );
    Ok(store)
}
