//! Duplicate exercise reconciliation.
//!
//! Queries that join across tables return the same exercise several times,
//! each row carrying a slice of its answers. [`merge_exercises`] folds those
//! rows into one canonical exercise per id.

use std::borrow::Borrow;
use std::collections::HashMap;

use crate::model::{Exercise, ExerciseId, ExerciseKind};

/// Merge records sharing an id into one canonical exercise per id.
///
/// The first record seen for an id is cloned and becomes the canonical
/// instance; later records are folded into it:
///
/// - multiple choice: incoming distractors are appended, incoming correct
///   choices are dropped
/// - fill in the blank: incoming possible answers are appended
/// - association: both lists are appended in lockstep
/// - flashcard: later records are ignored
///
/// A later record whose variant differs from the canonical one is ignored.
/// Output keeps the order in which ids were first seen. Inputs are never
/// modified and outputs never alias them.
pub fn merge_exercises<E: Borrow<Exercise>>(records: &[E]) -> Vec<Exercise> {
    let mut index: HashMap<ExerciseId, usize> = HashMap::with_capacity(records.len());
    let mut merged: Vec<Exercise> = Vec::new();

    for record in records {
        let record = record.borrow();
        match index.get(&record.id()) {
            Some(&slot) => merge_into(&mut merged[slot], record),
            None => {
                index.insert(record.id(), merged.len());
                merged.push(record.clone());
            }
        }
    }

    tracing::debug!(
        input = records.len(),
        canonical = merged.len(),
        "merged exercise records"
    );
    merged
}

fn merge_into(canonical: &mut Exercise, incoming: &Exercise) {
    let id = canonical.id();
    match (canonical.kind_mut(), incoming.kind()) {
        (
            ExerciseKind::MultipleChoice { choices },
            ExerciseKind::MultipleChoice { choices: extra },
        ) => {
            choices.extend(extra.iter().filter(|c| !c.is_correct).cloned());
        }
        (
            ExerciseKind::FillInTheBlank {
                possible_correct_answers,
            },
            ExerciseKind::FillInTheBlank {
                possible_correct_answers: extra,
            },
        ) => {
            possible_correct_answers.extend(extra.iter().cloned());
        }
        (
            ExerciseKind::Association {
                first_answers,
                second_answers,
            },
            ExerciseKind::Association {
                first_answers: extra_first,
                second_answers: extra_second,
            },
        ) => {
            for (first, second) in extra_first.iter().zip(extra_second) {
                first_answers.push(first.clone());
                second_answers.push(second.clone());
            }
        }
        (ExerciseKind::Flashcard { .. }, ExerciseKind::Flashcard { .. }) => {}
        (kind, other) => {
            tracing::warn!(
                exercise_id = id,
                kept = %kind.exercise_type(),
                ignored = %other.exercise_type(),
                "duplicate exercise records disagree on variant, keeping first"
            );
        }
    }
}
