//! In-memory exercise store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;

use quizkit_core::error::{EngineError, EngineResult};
use quizkit_core::merge::merge_exercises;
use quizkit_core::model::{Exercise, ExerciseId};
use quizkit_core::traits::ExerciseStore;

/// A thread-safe map of canonical exercises.
///
/// Used as the backing store of [`BankStore`](crate::BankStore) and as a
/// stand-in for a real database in tests.
#[derive(Default)]
pub struct InMemoryStore {
    exercises: RwLock<HashMap<ExerciseId, Arc<Exercise>>>,
    /// Number of `get_by_id` calls served.
    lookups: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from raw records, merging duplicates first.
    pub fn from_records(records: &[Exercise]) -> Self {
        let store = Self::new();
        for exercise in merge_exercises(records) {
            store.insert(exercise);
        }
        store
    }

    /// Insert or replace an exercise, returning the one it replaced.
    pub fn insert(&self, exercise: Exercise) -> Option<Arc<Exercise>> {
        self.exercises
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(exercise.id(), Arc::new(exercise))
    }

    /// Synchronous lookup that does not count towards [`lookup_count`](Self::lookup_count).
    pub fn get(&self, id: ExerciseId) -> Option<Arc<Exercise>> {
        self.exercises
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.exercises
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored ids in ascending order.
    pub fn ids(&self) -> Vec<ExerciseId> {
        let mut ids: Vec<ExerciseId> = self
            .exercises
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        ids.sort_unstable();
        ids
    }

    /// Number of lookups served through the `ExerciseStore` trait.
    pub fn lookup_count(&self) -> u64 {
        self.lookups.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ExerciseStore for InMemoryStore {
    async fn get_by_id(&self, id: ExerciseId) -> EngineResult<Arc<Exercise>> {
        self.lookups.fetch_add(1, Ordering::Relaxed);
        let exercises = self
            .exercises
            .read()
            .map_err(|_| EngineError::Store("exercise map lock poisoned".into()))?;
        exercises.get(&id).cloned().ok_or(EngineError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizkit_core::model::{Difficulty, ExerciseKind};

    fn card(id: ExerciseId, answer: &str) -> Exercise {
        Exercise::flashcard(id, "Translate", Difficulty::Easy, answer).unwrap()
    }

    #[tokio::test]
    async fn lookup_hits_and_misses() {
        let store = InMemoryStore::new();
        store.insert(card(1, "one"));

        let found = store.get_by_id(1).await.unwrap();
        assert_eq!(found.id(), 1);
        assert_eq!(store.get_by_id(2).await.unwrap_err(), EngineError::NotFound(2));
        assert_eq!(store.lookup_count(), 2);
    }

    #[test]
    fn from_records_merges_duplicates() {
        let records = vec![
            Exercise::fill_in_the_blank(5, "Q", Difficulty::Easy, vec!["a".into()]).unwrap(),
            Exercise::fill_in_the_blank(5, "Q", Difficulty::Easy, vec!["b".into()]).unwrap(),
            card(6, "six"),
        ];
        let store = InMemoryStore::from_records(&records);
        assert_eq!(store.len(), 2);
        assert_eq!(store.ids(), vec![5, 6]);

        let merged = store.get(5).unwrap();
        let ExerciseKind::FillInTheBlank {
            possible_correct_answers,
        } = merged.kind()
        else {
            panic!("expected fill in the blank");
        };
        assert_eq!(possible_correct_answers.len(), 2);
    }

    #[test]
    fn insert_replaces() {
        let store = InMemoryStore::new();
        assert!(store.is_empty());
        assert!(store.insert(card(1, "one")).is_none());
        let previous = store.insert(card(1, "uno")).unwrap();
        assert_eq!(previous.kind(), card(1, "one").kind());
        assert_eq!(store.len(), 1);
    }
}
