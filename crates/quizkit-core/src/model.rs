//! Core data model types for quizkit.
//!
//! Exercises form a closed set of four variants. Every exercise is validated
//! when it is built, so the rest of the engine can rely on the shape
//! invariants (non-empty question, non-empty payload, aligned association
//! lists) without re-checking them.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{EngineError, EngineResult};

/// Storage-assigned exercise identity.
pub type ExerciseId = i64;

/// How hard an exercise is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Normal => write!(f, "Normal"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" | "medium" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            other => Err(EngineError::invalid(format!("unknown difficulty: {other}"))),
        }
    }
}

/// One option of a multiple-choice exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    #[serde(rename = "Answer")]
    pub text: String,
    #[serde(rename = "IsCorrect", default)]
    pub is_correct: bool,
}

impl Choice {
    pub fn new(text: impl Into<String>, is_correct: bool) -> Self {
        Self {
            text: text.into(),
            is_correct,
        }
    }

    /// A choice that counts as a correct answer.
    pub fn correct(text: impl Into<String>) -> Self {
        Self::new(text, true)
    }

    /// A distractor choice.
    pub fn wrong(text: impl Into<String>) -> Self {
        Self::new(text, false)
    }
}

/// The wire discriminator naming an exercise variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExerciseType {
    MultipleChoice,
    FillInTheBlank,
    Association,
    Flashcard,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 4] = [
        ExerciseType::MultipleChoice,
        ExerciseType::FillInTheBlank,
        ExerciseType::Association,
        ExerciseType::Flashcard,
    ];

    /// The tag written into the `"Type"` field of serialized exercises.
    pub fn tag(self) -> &'static str {
        match self {
            ExerciseType::MultipleChoice => "MultipleChoice",
            ExerciseType::FillInTheBlank => "FillInTheBlank",
            ExerciseType::Association => "Association",
            ExerciseType::Flashcard => "Flashcard",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ExerciseType {
    type Err = EngineError;

    /// Accepts the wire tags (`"MultipleChoice"`) and their snake_case
    /// spelling (`"multiple_choice"`) used by bank files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MultipleChoice" | "multiple_choice" => Ok(ExerciseType::MultipleChoice),
            "FillInTheBlank" | "fill_in_the_blank" => Ok(ExerciseType::FillInTheBlank),
            "Association" | "association" => Ok(ExerciseType::Association),
            "Flashcard" | "flashcard" => Ok(ExerciseType::Flashcard),
            other => Err(EngineError::UnsupportedType(other.to_string())),
        }
    }
}

/// Variant-specific payload of an exercise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "Type")]
pub enum ExerciseKind {
    MultipleChoice {
        #[serde(rename = "Choices")]
        choices: Vec<Choice>,
    },
    FillInTheBlank {
        #[serde(rename = "PossibleCorrectAnswers")]
        possible_correct_answers: Vec<String>,
    },
    /// `first_answers[i]` pairs with `second_answers[i]`.
    Association {
        #[serde(rename = "FirstAnswersList")]
        first_answers: Vec<String>,
        #[serde(rename = "SecondAnswersList")]
        second_answers: Vec<String>,
    },
    Flashcard {
        #[serde(rename = "Answer")]
        answer: String,
    },
}

impl ExerciseKind {
    pub fn exercise_type(&self) -> ExerciseType {
        match self {
            ExerciseKind::MultipleChoice { .. } => ExerciseType::MultipleChoice,
            ExerciseKind::FillInTheBlank { .. } => ExerciseType::FillInTheBlank,
            ExerciseKind::Association { .. } => ExerciseType::Association,
            ExerciseKind::Flashcard { .. } => ExerciseType::Flashcard,
        }
    }

    fn validate(&self) -> Result<(), String> {
        match self {
            ExerciseKind::MultipleChoice { choices } => {
                if choices.is_empty() {
                    return Err("multiple choice needs at least one choice".into());
                }
                if choices.iter().any(|c| c.text.trim().is_empty()) {
                    return Err("choice text must not be empty".into());
                }
            }
            ExerciseKind::FillInTheBlank {
                possible_correct_answers,
            } => {
                if possible_correct_answers.is_empty() {
                    return Err("fill in the blank needs at least one possible answer".into());
                }
                if possible_correct_answers.iter().any(|a| a.trim().is_empty()) {
                    return Err("possible answers must not be empty".into());
                }
            }
            ExerciseKind::Association {
                first_answers,
                second_answers,
            } => {
                if first_answers.len() != second_answers.len() {
                    return Err(format!(
                        "association lists differ in length ({} vs {})",
                        first_answers.len(),
                        second_answers.len()
                    ));
                }
                if first_answers.is_empty() {
                    return Err("association needs at least one pair".into());
                }
            }
            ExerciseKind::Flashcard { answer } => {
                if answer.trim().is_empty() {
                    return Err("flashcard answer must not be empty".into());
                }
            }
        }
        Ok(())
    }
}

/// A validated exercise of any variant.
///
/// Fields are private so an `Exercise` can only exist in a valid shape; use
/// the constructors and accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exercise {
    #[serde(rename = "Id")]
    id: ExerciseId,
    #[serde(rename = "Question")]
    question: String,
    #[serde(rename = "Difficulty")]
    difficulty: Difficulty,
    #[serde(flatten)]
    kind: ExerciseKind,
}

impl Exercise {
    /// Build an exercise, validating the question and the variant payload.
    pub fn new(
        id: ExerciseId,
        question: impl Into<String>,
        difficulty: Difficulty,
        kind: ExerciseKind,
    ) -> EngineResult<Self> {
        let question = question.into();
        if question.trim().is_empty() {
            return Err(EngineError::invalid(format!(
                "exercise {id}: question must not be empty"
            )));
        }
        kind.validate()
            .map_err(|msg| EngineError::invalid(format!("exercise {id}: {msg}")))?;
        Ok(Self {
            id,
            question,
            difficulty,
            kind,
        })
    }

    pub fn multiple_choice(
        id: ExerciseId,
        question: impl Into<String>,
        difficulty: Difficulty,
        choices: Vec<Choice>,
    ) -> EngineResult<Self> {
        Self::new(id, question, difficulty, ExerciseKind::MultipleChoice { choices })
    }

    pub fn fill_in_the_blank(
        id: ExerciseId,
        question: impl Into<String>,
        difficulty: Difficulty,
        possible_correct_answers: Vec<String>,
    ) -> EngineResult<Self> {
        Self::new(
            id,
            question,
            difficulty,
            ExerciseKind::FillInTheBlank {
                possible_correct_answers,
            },
        )
    }

    pub fn association(
        id: ExerciseId,
        question: impl Into<String>,
        difficulty: Difficulty,
        first_answers: Vec<String>,
        second_answers: Vec<String>,
    ) -> EngineResult<Self> {
        Self::new(
            id,
            question,
            difficulty,
            ExerciseKind::Association {
                first_answers,
                second_answers,
            },
        )
    }

    pub fn flashcard(
        id: ExerciseId,
        question: impl Into<String>,
        difficulty: Difficulty,
        answer: impl Into<String>,
    ) -> EngineResult<Self> {
        Self::new(
            id,
            question,
            difficulty,
            ExerciseKind::Flashcard {
                answer: answer.into(),
            },
        )
    }

    pub fn id(&self) -> ExerciseId {
        self.id
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn kind(&self) -> &ExerciseKind {
        &self.kind
    }

    pub fn exercise_type(&self) -> ExerciseType {
        self.kind.exercise_type()
    }

    /// Mutable payload access for the merge engine. Callers must keep the
    /// variant invariants intact.
    pub(crate) fn kind_mut(&mut self) -> &mut ExerciseKind {
        &mut self.kind
    }
}

impl<'de> Deserialize<'de> for Exercise {
    /// Full exercise bodies are decoded through the discriminator-aware
    /// codec so that unknown `"Type"` tags and invalid payloads are rejected.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        crate::serializer::decode_exercise(value).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Exercise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} #{} ({}) \"{}\": ",
            self.exercise_type(),
            self.id,
            self.difficulty,
            self.question
        )?;
        match &self.kind {
            ExerciseKind::MultipleChoice { choices } => {
                let rendered: Vec<String> = choices
                    .iter()
                    .map(|c| {
                        if c.is_correct {
                            format!("{}*", c.text)
                        } else {
                            c.text.clone()
                        }
                    })
                    .collect();
                write!(f, "choices [{}]", rendered.join(", "))
            }
            ExerciseKind::FillInTheBlank {
                possible_correct_answers,
            } => write!(f, "answers [{}]", possible_correct_answers.join(", ")),
            ExerciseKind::Association {
                first_answers,
                second_answers,
            } => {
                let pairs: Vec<String> = first_answers
                    .iter()
                    .zip(second_answers)
                    .map(|(a, b)| format!("{a} <-> {b}"))
                    .collect();
                write!(f, "pairs [{}]", pairs.join(", "))
            }
            ExerciseKind::Flashcard { answer } => write!(f, "answer \"{answer}\""),
        }
    }
}

/// A quiz: a titled, ordered set of shared exercises.
#[derive(Debug, Clone)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    pub exercises: Vec<Arc<Exercise>>,
}

impl Quiz {
    pub fn new(id: i64, title: impl Into<String>, exercises: Vec<Arc<Exercise>>) -> Self {
        Self {
            id,
            title: title.into(),
            exercises,
        }
    }

    /// Look up one of this quiz's exercises by id.
    pub fn exercise(&self, id: ExerciseId) -> Option<&Exercise> {
        self.exercises
            .iter()
            .find(|e| e.id() == id)
            .map(|e| e.as_ref())
    }
}

/// An exam: an ordered set of shared exercises, optionally tied to a course
/// section.
#[derive(Debug, Clone)]
pub struct Exam {
    pub id: i64,
    pub section_id: Option<i64>,
    pub exercises: Vec<Arc<Exercise>>,
}

impl Exam {
    pub fn new(id: i64, section_id: Option<i64>, exercises: Vec<Arc<Exercise>>) -> Self {
        Self {
            id,
            section_id,
            exercises,
        }
    }

    pub fn exercise_ids(&self) -> Vec<ExerciseId> {
        self.exercises.iter().map(|e| e.id()).collect()
    }
}

/// One submitted answer. Only the fields relevant to the answered variant
/// are expected to be populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    #[serde(rename = "QuestionId")]
    pub question_id: ExerciseId,
    #[serde(
        rename = "SelectedOptionIndex",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub selected_option_index: Option<i64>,
    #[serde(
        rename = "WrittenAnswer",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub written_answer: Option<String>,
    #[serde(
        rename = "AssociatedPairId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub associated_pair_id: Option<i64>,
}

impl AnswerSubmission {
    /// An answer selecting option `index`.
    pub fn selected(question_id: ExerciseId, index: i64) -> Self {
        Self {
            question_id,
            selected_option_index: Some(index),
            ..Default::default()
        }
    }

    /// A free-text answer.
    pub fn written(question_id: ExerciseId, answer: impl Into<String>) -> Self {
        Self {
            question_id,
            written_answer: Some(answer.into()),
            ..Default::default()
        }
    }

    /// An association answer pairing `first` with `second`.
    pub fn paired(question_id: ExerciseId, first: i64, second: i64) -> Self {
        Self {
            question_id,
            selected_option_index: Some(first),
            associated_pair_id: Some(second),
            ..Default::default()
        }
    }
}

/// A full quiz submission request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSubmission {
    #[serde(rename = "QuizId")]
    pub quiz_id: i64,
    #[serde(rename = "Answers", default)]
    pub answers: Vec<AnswerSubmission>,
    #[serde(rename = "StartTime", default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(rename = "EndTime", default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

impl QuizSubmission {
    /// Start and end of the attempt, filling in whichever is missing.
    ///
    /// A single known endpoint stands in for the missing one, giving a
    /// zero-length attempt; with neither, both are `now`.
    pub fn time_span(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        match (self.started_at, self.ended_at) {
            (Some(start), Some(end)) => (start, end),
            (Some(start), None) => (start, start),
            (None, Some(end)) => (end, end),
            (None, None) => (now, now),
        }
    }
}
