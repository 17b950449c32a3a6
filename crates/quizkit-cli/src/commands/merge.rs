//! The `quizkit merge` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use quizkit_core::merge::merge_exercises;
use quizkit_core::serializer::decode_exercises;

pub fn execute(input: PathBuf, output: Option<PathBuf>) -> Result<()> {
    let content = std::fs::read_to_string(&input)
        .with_context(|| format!("failed to read records: {}", input.display()))?;
    let records = decode_exercises(&content)
        .with_context(|| format!("invalid exercise records in {}", input.display()))?;

    let merged = merge_exercises(&records);
    let json = serde_json::to_string_pretty(&merged)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!(
                "Merged {} records into {} exercises: {}",
                records.len(),
                merged.len(),
                path.display()
            );
        }
        None => {
            eprintln!(
                "Merged {} records into {} exercises",
                records.len(),
                merged.len()
            );
            println!("{json}");
        }
    }

    Ok(())
}
