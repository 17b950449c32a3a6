//! The `quizkit import-exam` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizkit_core::serializer::{deserialize_exam, serialize_exam_pretty};

pub async fn execute(
    input: PathBuf,
    bank: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read exam: {}", input.display()))?;
    let store = super::open_bank(bank, config_path)?;

    let exam = deserialize_exam(&content, &store)
        .await
        .with_context(|| format!("failed to resolve exam from {}", input.display()))?;

    eprintln!(
        "Resolved exam {} with {} exercises",
        exam.id,
        exam.exercises.len()
    );
    println!("{}", serialize_exam_pretty(&exam)?);

    Ok(())
}
