//! quizkit-core — Exercise model, merge engine, scoring, and typed serialization.
//!
//! This crate defines the closed set of exercise variants and the pure
//! operations over them that the rest of quizkit builds on: reconciling
//! duplicate records, validating answers, and moving exams across the JSON
//! boundary through an [`ExerciseStore`](traits::ExerciseStore).

pub mod error;
pub mod merge;
pub mod model;
pub mod parser;
pub mod results;
pub mod scoring;
pub mod serializer;
pub mod statistics;
pub mod traits;

pub use error::{EngineError, EngineResult};
pub use merge::merge_exercises;
pub use model::{
    AnswerSubmission, Choice, Difficulty, Exam, Exercise, ExerciseId, ExerciseKind, ExerciseType,
    Quiz, QuizSubmission,
};
pub use scoring::{score, score_submission};
pub use traits::ExerciseStore;
