//! The `quizkit stats` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::Table;

use quizkit_core::results::{QuizResult, QuizSubmissionEntity};
use quizkit_core::statistics::summarize;
use quizkit_store::load_config_from;

pub fn execute(dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let dir = match dir {
        Some(dir) => dir,
        None => load_config_from(config_path.as_deref())?.output_dir,
    };

    let mut results = Vec::new();
    for entry in std::fs::read_dir(&dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let path = entry?.path();
        let is_submission = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("submission-") && name.ends_with(".json"));
        if !is_submission {
            continue;
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        match serde_json::from_str::<QuizSubmissionEntity>(&content) {
            Ok(entity) => results.push(QuizResult::from_entity(&entity)),
            Err(e) => tracing::warn!("skipping {}: {}", path.display(), e),
        }
    }

    if results.is_empty() {
        println!("No saved submissions in {}", dir.display());
        return Ok(());
    }

    let mut stats: Vec<_> = summarize(&results).into_values().collect();
    stats.sort_by_key(|s| s.quiz_id);

    let mut table = Table::new();
    table.set_header(vec!["Quiz", "Attempts", "Mean accuracy", "Best", "Mean time"]);
    for s in &stats {
        table.add_row(vec![
            s.quiz_id.to_string(),
            s.attempts.to_string(),
            format!("{:.1}%", s.mean_accuracy * 100.0),
            s.best_correct.to_string(),
            format!("{:.1}s", s.mean_time_ms as f64 / 1000.0),
        ]);
    }
    println!("{table}");

    Ok(())
}
