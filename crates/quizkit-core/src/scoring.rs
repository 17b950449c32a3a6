//! Answer validation and quiz submission scoring.
//!
//! [`score`] is a pure predicate: absent or out-of-range answer data is an
//! incorrect answer, never an error.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::model::{AnswerSubmission, Exercise, ExerciseKind, Quiz, QuizSubmission};
use crate::results::{AnswerSubmissionEntity, QuizSubmissionEntity};

/// Decide whether `answer` correctly answers `exercise`.
///
/// - multiple choice: the selected index is in range and names a correct choice
/// - fill in the blank: the written answer matches any possible answer,
///   ignoring case and surrounding whitespace
/// - flashcard: the written answer (empty when absent) equals the stored
///   answer, ignoring case
/// - association: both indices are in range of their lists and equal to
///   each other
pub fn score(exercise: &Exercise, answer: &AnswerSubmission) -> bool {
    match exercise.kind() {
        ExerciseKind::MultipleChoice { choices } => answer
            .selected_option_index
            .and_then(|index| checked_index(index, choices.len()))
            .is_some_and(|index| choices[index].is_correct),
        ExerciseKind::FillInTheBlank {
            possible_correct_answers,
        } => match &answer.written_answer {
            Some(written) => {
                let written = normalize(written);
                possible_correct_answers
                    .iter()
                    .any(|candidate| normalize(candidate) == written)
            }
            None => false,
        },
        ExerciseKind::Flashcard { answer: expected } => {
            let written = answer.written_answer.as_deref().unwrap_or_default();
            written.to_lowercase() == expected.to_lowercase()
        }
        ExerciseKind::Association {
            first_answers,
            second_answers,
        } => {
            let first = answer
                .selected_option_index
                .and_then(|i| checked_index(i, first_answers.len()));
            let second = answer
                .associated_pair_id
                .and_then(|i| checked_index(i, second_answers.len()));
            // Index equality only; pairs are stored position-aligned.
            matches!((first, second), (Some(a), Some(b)) if a == b)
        }
    }
}

fn checked_index(index: i64, len: usize) -> Option<usize> {
    usize::try_from(index).ok().filter(|&i| i < len)
}

fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Score every answer of a submission against `quiz`.
///
/// Answers are recorded in submission order. An answer to a question that is
/// not part of the quiz is recorded as incorrect.
pub fn score_submission(
    quiz: &Quiz,
    submission: &QuizSubmission,
    started_at: DateTime<Utc>,
    ended_at: DateTime<Utc>,
) -> EngineResult<QuizSubmissionEntity> {
    if submission.quiz_id != quiz.id {
        return Err(EngineError::invalid(format!(
            "submission targets quiz {} but was scored against quiz {}",
            submission.quiz_id, quiz.id
        )));
    }
    if ended_at < started_at {
        return Err(EngineError::invalid("submission ends before it starts"));
    }

    let answers = submission
        .answers
        .iter()
        .map(|answer| {
            let is_correct = match quiz.exercise(answer.question_id) {
                Some(exercise) => score(exercise, answer),
                None => {
                    tracing::warn!(
                        quiz_id = quiz.id,
                        question_id = answer.question_id,
                        "answer references a question outside the quiz"
                    );
                    false
                }
            };
            AnswerSubmissionEntity {
                question_id: answer.question_id,
                is_correct,
            }
        })
        .collect();

    Ok(QuizSubmissionEntity {
        id: Uuid::new_v4(),
        quiz_id: quiz.id,
        started_at,
        ended_at,
        answers,
    })
}
