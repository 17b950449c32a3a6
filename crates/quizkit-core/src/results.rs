//! Scored submission records and quiz results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::ExerciseId;

/// Outcome of one scored answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmissionEntity {
    #[serde(rename = "QuestionId")]
    pub question_id: ExerciseId,
    #[serde(rename = "IsCorrect")]
    pub is_correct: bool,
}

/// A scored quiz submission, ready to be persisted by the caller.
///
/// Created once per submission and never modified after scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSubmissionEntity {
    #[serde(rename = "Id")]
    pub id: Uuid,
    #[serde(rename = "QuizId")]
    pub quiz_id: i64,
    #[serde(rename = "StartTime")]
    pub started_at: DateTime<Utc>,
    #[serde(rename = "EndTime")]
    pub ended_at: DateTime<Utc>,
    #[serde(rename = "Answers")]
    pub answers: Vec<AnswerSubmissionEntity>,
}

/// Summary of a scored submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizResult {
    #[serde(rename = "QuizId")]
    pub quiz_id: i64,
    #[serde(rename = "TotalQuestions")]
    pub total_questions: u32,
    #[serde(rename = "CorrectAnswers")]
    pub correct_answers: u32,
    /// Wall-clock time between start and end, in milliseconds.
    #[serde(rename = "TimeTaken")]
    pub time_taken_ms: u64,
}

impl QuizResult {
    pub fn from_entity(entity: &QuizSubmissionEntity) -> Self {
        let correct = entity.answers.iter().filter(|a| a.is_correct).count();
        let elapsed = (entity.ended_at - entity.started_at).num_milliseconds();
        Self {
            quiz_id: entity.quiz_id,
            total_questions: entity.answers.len() as u32,
            correct_answers: correct as u32,
            time_taken_ms: elapsed.max(0) as u64,
        }
    }

    /// Fraction of correct answers in `[0.0, 1.0]`; 0.0 when nothing was answered.
    pub fn accuracy(&self) -> f64 {
        if self.total_questions == 0 {
            return 0.0;
        }
        self.correct_answers as f64 / self.total_questions as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn entity(flags: &[bool], seconds: i64) -> QuizSubmissionEntity {
        let started_at = Utc::now();
        QuizSubmissionEntity {
            id: Uuid::nil(),
            quiz_id: 4,
            started_at,
            ended_at: started_at + Duration::seconds(seconds),
            answers: flags
                .iter()
                .enumerate()
                .map(|(i, &is_correct)| AnswerSubmissionEntity {
                    question_id: i as i64,
                    is_correct,
                })
                .collect(),
        }
    }

    #[test]
    fn result_counts_correct_answers() {
        let result = QuizResult::from_entity(&entity(&[true, false, true], 90));
        assert_eq!(result.quiz_id, 4);
        assert_eq!(result.total_questions, 3);
        assert_eq!(result.correct_answers, 2);
        assert_eq!(result.time_taken_ms, 90_000);
        assert!((result.accuracy() - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn empty_submission_has_zero_accuracy() {
        let result = QuizResult::from_entity(&entity(&[], 0));
        assert_eq!(result.total_questions, 0);
        assert_eq!(result.accuracy(), 0.0);
    }

    #[test]
    fn result_wire_names() {
        let result = QuizResult::from_entity(&entity(&[true], 1));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["TotalQuestions"], 1);
        assert_eq!(value["CorrectAnswers"], 1);
        assert_eq!(value["TimeTaken"], 1000);
    }
}
