//! Typed exam serialization.
//!
//! Exams leave the engine as full exercise bodies tagged with a `"Type"`
//! discriminator, but come back as lists of exercise ids that are resolved
//! through an [`ExerciseStore`]. The two directions are deliberately not
//! inverses of each other; a round trip always goes through the store.

use std::sync::Arc;

use futures::stream::{self, StreamExt, TryStreamExt};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{EngineError, EngineResult};
use crate::model::{Choice, Difficulty, Exam, Exercise, ExerciseId, ExerciseKind, ExerciseType};
use crate::traits::ExerciseStore;

/// Outgoing exam shape: full exercise bodies.
#[derive(Debug, Serialize)]
pub struct ExamPayload<'a> {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "SectionId")]
    pub section_id: Option<i64>,
    #[serde(rename = "Exercises")]
    pub exercises: Vec<&'a Exercise>,
}

/// Incoming exam shape: exercise id references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamReference {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "SectionId", default)]
    pub section_id: Option<i64>,
    #[serde(rename = "Exercises", default)]
    pub exercises: Vec<ExerciseId>,
}

impl ExamReference {
    /// The id-reference form of an exam.
    pub fn of(exam: &Exam) -> Self {
        Self {
            id: exam.id,
            section_id: exam.section_id,
            exercises: exam.exercise_ids(),
        }
    }
}

/// Serialize an exam with full, discriminator-tagged exercise bodies.
pub fn serialize_exam(exam: &Exam) -> EngineResult<String> {
    Ok(serde_json::to_string(&exam_payload(exam))?)
}

/// Like [`serialize_exam`], but pretty-printed.
pub fn serialize_exam_pretty(exam: &Exam) -> EngineResult<String> {
    Ok(serde_json::to_string_pretty(&exam_payload(exam))?)
}

fn exam_payload(exam: &Exam) -> ExamPayload<'_> {
    ExamPayload {
        id: exam.id,
        section_id: exam.section_id,
        exercises: exam.exercises.iter().map(|e| e.as_ref()).collect(),
    }
}

/// Parse an id-reference exam and resolve every exercise through `store`.
pub async fn deserialize_exam(json: &str, store: &dyn ExerciseStore) -> EngineResult<Exam> {
    let reference: ExamReference = serde_json::from_str(json)?;
    resolve_exam(&reference, store).await
}

/// Resolve an id-reference exam through `store`.
///
/// Ids are looked up in order and the first failure aborts the whole
/// resolution; no partially populated exam is ever returned.
pub async fn resolve_exam(
    reference: &ExamReference,
    store: &dyn ExerciseStore,
) -> EngineResult<Exam> {
    let exercises: Vec<Arc<Exercise>> = stream::iter(reference.exercises.iter().copied())
        .then(|id| async move {
            store.get_by_id(id).await.inspect_err(|e| {
                tracing::warn!(
                    exam_id = reference.id,
                    exercise_id = id,
                    "cannot resolve exam exercise: {e}"
                );
            })
        })
        .try_collect()
        .await?;

    Ok(Exam::new(reference.id, reference.section_id, exercises))
}

/// Decode one full exercise body, dispatching on its `"Type"` field.
pub fn decode_exercise(value: Value) -> EngineResult<Exercise> {
    let Value::Object(mut body) = value else {
        return Err(EngineError::Malformed("exercise must be a JSON object".into()));
    };

    let tag = match body.remove("Type") {
        Some(Value::String(tag)) => tag,
        Some(other) => {
            return Err(EngineError::Malformed(format!(
                "exercise \"Type\" must be a string, got {other}"
            )))
        }
        None => return Err(EngineError::Malformed("exercise is missing \"Type\"".into())),
    };
    let exercise_type = tag.parse::<ExerciseType>()?;

    let id: ExerciseId = take(&mut body, "Id")?;
    let question: String = take(&mut body, "Question")?;
    let difficulty: Difficulty = take_or_default(&mut body, "Difficulty")?;

    let kind = match exercise_type {
        ExerciseType::MultipleChoice => ExerciseKind::MultipleChoice {
            choices: take::<Vec<Choice>>(&mut body, "Choices")?,
        },
        ExerciseType::FillInTheBlank => ExerciseKind::FillInTheBlank {
            possible_correct_answers: take(&mut body, "PossibleCorrectAnswers")?,
        },
        ExerciseType::Association => ExerciseKind::Association {
            first_answers: take(&mut body, "FirstAnswersList")?,
            second_answers: take(&mut body, "SecondAnswersList")?,
        },
        ExerciseType::Flashcard => ExerciseKind::Flashcard {
            answer: take(&mut body, "Answer")?,
        },
    };

    Exercise::new(id, question, difficulty, kind)
}

/// Decode a JSON array of full exercise bodies.
pub fn decode_exercises(json: &str) -> EngineResult<Vec<Exercise>> {
    let values: Vec<Value> = serde_json::from_str(json)?;
    values.into_iter().map(decode_exercise).collect()
}

fn take<T: serde::de::DeserializeOwned>(
    body: &mut serde_json::Map<String, Value>,
    field: &str,
) -> EngineResult<T> {
    let value = body
        .remove(field)
        .ok_or_else(|| EngineError::Malformed(format!("exercise is missing \"{field}\"")))?;
    serde_json::from_value(value)
        .map_err(|e| EngineError::Malformed(format!("field \"{field}\": {e}")))
}

fn take_or_default<T: serde::de::DeserializeOwned + Default>(
    body: &mut serde_json::Map<String, Value>,
    field: &str,
) -> EngineResult<T> {
    match body.remove(field) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(value) => serde_json::from_value(value)
            .map_err(|e| EngineError::Malformed(format!("field \"{field}\": {e}"))),
    }
}
