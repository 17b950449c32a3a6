//! Store backed by TOML exercise banks.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use quizkit_core::error::{EngineError, EngineResult};
use quizkit_core::model::{Exam, Exercise, ExerciseId, Quiz};
use quizkit_core::parser::{self, ExamDefinition, ExerciseBank, QuizDefinition};
use quizkit_core::serializer::{resolve_exam, ExamReference};
use quizkit_core::traits::ExerciseStore;

use crate::memory::InMemoryStore;

/// Canonical exercises, quizzes, and exams loaded from one or more banks.
///
/// Exercise records from every bank are merged by id before they are
/// stored, so quizzes and exams always see the canonical exercise.
pub struct BankStore {
    exercises: InMemoryStore,
    quizzes: Vec<QuizDefinition>,
    exams: Vec<ExamDefinition>,
}

impl BankStore {
    /// Load a bank file or a directory of bank files.
    pub fn open(path: &Path) -> Result<Self> {
        let banks = parser::load_banks(path)
            .with_context(|| format!("failed to load exercise bank: {}", path.display()))?;
        Ok(Self::from_banks(banks))
    }

    pub fn from_banks(banks: Vec<ExerciseBank>) -> Self {
        let mut records = Vec::new();
        let mut quizzes = Vec::new();
        let mut exams = Vec::new();
        for bank in banks {
            tracing::debug!(
                bank = %bank.id,
                exercises = bank.exercises.len(),
                "loaded exercise bank"
            );
            records.extend(bank.exercises);
            quizzes.extend(bank.quizzes);
            exams.extend(bank.exams);
        }

        Self {
            exercises: InMemoryStore::from_records(&records),
            quizzes,
            exams,
        }
    }

    /// Number of canonical exercises.
    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }

    pub fn quizzes(&self) -> &[QuizDefinition] {
        &self.quizzes
    }

    pub fn exams(&self) -> &[ExamDefinition] {
        &self.exams
    }

    /// Canonical exercise by id.
    pub fn exercise(&self, id: ExerciseId) -> Option<Arc<Exercise>> {
        self.exercises.get(id)
    }

    /// Build the quiz with `id`, sharing the stored exercises.
    pub fn quiz(&self, id: i64) -> Result<Quiz> {
        let definition = self
            .quizzes
            .iter()
            .find(|q| q.id == id)
            .with_context(|| format!("quiz {id} not found in bank"))?;

        let exercises = definition
            .exercise_ids
            .iter()
            .map(|&exercise_id| {
                self.exercises
                    .get(exercise_id)
                    .ok_or(EngineError::NotFound(exercise_id))
            })
            .collect::<EngineResult<Vec<_>>>()
            .with_context(|| format!("quiz {id} references a missing exercise"))?;

        Ok(Quiz::new(definition.id, definition.title.clone(), exercises))
    }

    /// Build the exam with `id` by resolving its exercise ids through the store.
    pub async fn exam(&self, id: i64) -> Result<Exam> {
        let definition = self
            .exams
            .iter()
            .find(|e| e.id == id)
            .with_context(|| format!("exam {id} not found in bank"))?;

        let reference = ExamReference {
            id: definition.id,
            section_id: definition.section_id,
            exercises: definition.exercise_ids.clone(),
        };
        resolve_exam(&reference, self)
            .await
            .with_context(|| format!("exam {id} references a missing exercise"))
    }
}

#[async_trait]
impl ExerciseStore for BankStore {
    async fn get_by_id(&self, id: ExerciseId) -> EngineResult<Arc<Exercise>> {
        self.exercises.get_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizkit_core::model::ExerciseKind;

    const BANK: &str = r#"
[bank]
id = "spanish"
name = "Spanish basics"

[[exercises]]
id = 1
type = "flashcard"
question = "Hola"
answer = "Hello"

[[exercises]]
id = 2
type = "multiple_choice"
question = "Gato means"
choices = [{ text = "Cat", correct = true }, { text = "Dog" }]

[[exercises]]
id = 2
type = "multiple_choice"
question = "Gato means"
choices = [{ text = "Cat", correct = true }, { text = "Bird" }]

[[quizzes]]
id = 10
title = "Warmup"
exercises = [1, 2]

[[quizzes]]
id = 11
exercises = [1, 3]

[[exams]]
id = 20
section_id = 2
exercises = [2, 1]

[[exams]]
id = 21
exercises = [404]
"#;

    fn write_bank() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spanish.toml");
        std::fs::write(&path, BANK).unwrap();
        (dir, path)
    }

    #[test]
    fn open_merges_duplicate_records() {
        let (_dir, path) = write_bank();
        let store = BankStore::open(&path).unwrap();
        assert_eq!(store.exercise_count(), 2);

        let merged = store.exercise(2).unwrap();
        let ExerciseKind::MultipleChoice { choices } = merged.kind() else {
            panic!("expected multiple choice");
        };
        let texts: Vec<&str> = choices.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["Cat", "Dog", "Bird"]);
    }

    #[test]
    fn quiz_shares_canonical_exercises() {
        let (_dir, path) = write_bank();
        let store = BankStore::open(&path).unwrap();
        let quiz = store.quiz(10).unwrap();
        assert_eq!(quiz.title, "Warmup");
        assert_eq!(quiz.exercises.len(), 2);
        assert!(Arc::ptr_eq(&quiz.exercises[0], &store.exercise(1).unwrap()));
    }

    #[test]
    fn quiz_with_missing_exercise_fails() {
        let (_dir, path) = write_bank();
        let store = BankStore::open(&path).unwrap();
        let err = store.quiz(11).unwrap_err();
        assert_eq!(
            err.downcast_ref::<EngineError>(),
            Some(&EngineError::NotFound(3))
        );
        assert!(store.quiz(99).is_err());
    }

    #[tokio::test]
    async fn exam_resolves_through_store() {
        let (_dir, path) = write_bank();
        let store = BankStore::open(&path).unwrap();
        let exam = store.exam(20).await.unwrap();
        assert_eq!(exam.section_id, Some(2));
        assert_eq!(exam.exercise_ids(), vec![2, 1]);

        let err = store.exam(21).await.unwrap_err();
        assert_eq!(
            err.downcast_ref::<EngineError>(),
            Some(&EngineError::NotFound(404))
        );
    }

    #[test]
    fn open_missing_path_fails() {
        assert!(BankStore::open(Path::new("/no/such/bank.toml")).is_err());
    }
}
