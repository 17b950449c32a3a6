//! The `quizkit export-exam` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizkit_core::serializer::serialize_exam_pretty;

pub async fn execute(
    exam_id: i64,
    bank: Option<PathBuf>,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let store = super::open_bank(bank, config_path)?;
    let exam = store.exam(exam_id).await?;
    let json = serialize_exam_pretty(&exam)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write exam to {}", path.display()))?;
            println!(
                "Exported exam {} ({} exercises) to {}",
                exam.id,
                exam.exercises.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }

    Ok(())
}
