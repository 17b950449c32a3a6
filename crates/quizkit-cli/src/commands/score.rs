//! The `quizkit score` command.

use std::path::PathBuf;

use anyhow::{Context, Result};
use comfy_table::Table;

use quizkit_core::model::QuizSubmission;
use quizkit_core::results::QuizResult;
use quizkit_core::scoring::score_submission;
use quizkit_store::load_config_from;

pub fn execute(
    answers_path: PathBuf,
    quiz_id: Option<i64>,
    bank: Option<PathBuf>,
    format: String,
    save: bool,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let content = std::fs::read_to_string(&answers_path)
        .with_context(|| format!("failed to read submission: {}", answers_path.display()))?;
    let mut submission: QuizSubmission =
        serde_json::from_str(&content).context("failed to parse submission JSON")?;
    if let Some(id) = quiz_id {
        if id != submission.quiz_id {
            tracing::info!(
                "scoring submission for quiz {} against quiz {id}",
                submission.quiz_id
            );
        }
        submission.quiz_id = id;
    }

    let store = super::open_bank(bank, config_path.clone())?;
    let quiz = store.quiz(submission.quiz_id)?;

    let (started_at, ended_at) = submission.time_span(chrono::Utc::now());
    let entity = score_submission(&quiz, &submission, started_at, ended_at)?;
    let result = QuizResult::from_entity(&entity);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        _ => {
            let mut table = Table::new();
            table.set_header(vec!["Question", "Type", "Result"]);
            for answer in &entity.answers {
                let kind = quiz
                    .exercise(answer.question_id)
                    .map(|e| e.exercise_type().to_string())
                    .unwrap_or_else(|| "unknown".to_string());
                let verdict = if answer.is_correct { "correct" } else { "wrong" };
                table.add_row(vec![answer.question_id.to_string(), kind, verdict.to_string()]);
            }

            println!("Quiz: {} (id {})", quiz.title, quiz.id);
            println!("{table}");
            println!(
                "Score: {}/{} correct ({:.1}%) in {:.1}s",
                result.correct_answers,
                result.total_questions,
                result.accuracy() * 100.0,
                result.time_taken_ms as f64 / 1000.0
            );
        }
    }

    if save {
        let config = load_config_from(config_path.as_deref())?;
        std::fs::create_dir_all(&config.output_dir).with_context(|| {
            format!("failed to create {}", config.output_dir.display())
        })?;
        let path = config
            .output_dir
            .join(format!("submission-{}.json", entity.id));
        std::fs::write(&path, serde_json::to_string_pretty(&entity)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Saved submission to {}", path.display());
    }

    Ok(())
}
