//! The `quizkit validate` command.

use std::path::PathBuf;

use anyhow::Result;

use quizkit_core::parser;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let banks = parser::load_banks(&bank_path)?;
    anyhow::ensure!(
        !banks.is_empty(),
        "no exercise banks found in {}",
        bank_path.display()
    );

    let mut total_warnings = 0;

    for bank in &banks {
        println!(
            "Bank: {} ({} exercises, {} quizzes, {} exams)",
            bank.name,
            bank.exercises.len(),
            bank.quizzes.len(),
            bank.exams.len()
        );

        let warnings = parser::validate_bank(bank);
        for w in &warnings {
            let prefix = w
                .subject
                .as_ref()
                .map(|subject| format!("  [{subject}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
