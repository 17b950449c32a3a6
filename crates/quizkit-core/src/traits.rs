//! Storage collaborator seam.
//!
//! The engine never persists anything itself; exam reconstruction resolves
//! exercise ids through an [`ExerciseStore`] implemented in `quizkit-store`
//! or by the embedding application.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::EngineResult;
use crate::model::{Exercise, ExerciseId};

/// Read access to canonical exercises by id.
#[async_trait]
pub trait ExerciseStore: Send + Sync {
    /// Fetch the exercise with `id`.
    ///
    /// A missing record must be reported as
    /// [`EngineError::NotFound`](crate::error::EngineError::NotFound);
    /// other backend failures as
    /// [`EngineError::Store`](crate::error::EngineError::Store).
    async fn get_by_id(&self, id: ExerciseId) -> EngineResult<Arc<Exercise>>;
}
