//! Aggregate statistics over scored quiz attempts.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::results::QuizResult;

/// Statistics for all attempts at one quiz.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizStats {
    pub quiz_id: i64,
    /// Number of scored attempts.
    pub attempts: usize,
    /// Mean fraction of correct answers across attempts.
    pub mean_accuracy: f64,
    /// Highest number of correct answers in a single attempt.
    pub best_correct: u32,
    /// Mean time taken in milliseconds.
    pub mean_time_ms: u64,
}

/// Group results by quiz and compute per-quiz statistics.
pub fn summarize(results: &[QuizResult]) -> HashMap<i64, QuizStats> {
    let mut grouped: HashMap<i64, Vec<&QuizResult>> = HashMap::new();
    for r in results {
        grouped.entry(r.quiz_id).or_default().push(r);
    }

    grouped
        .into_iter()
        .map(|(quiz_id, group)| {
            let attempts = group.len();
            let mean_accuracy =
                group.iter().map(|r| r.accuracy()).sum::<f64>() / attempts as f64;
            let best_correct = group.iter().map(|r| r.correct_answers).max().unwrap_or(0);
            let total_time: u64 = group.iter().map(|r| r.time_taken_ms).sum();
            (
                quiz_id,
                QuizStats {
                    quiz_id,
                    attempts,
                    mean_accuracy,
                    best_correct,
                    mean_time_ms: total_time / attempts as u64,
                },
            )
        })
        .collect()
}
