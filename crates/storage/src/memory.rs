use std::collections::BTreeMap;
use std::sync::RwLock;

use fittrack_domain::{
    CreateError, DeleteError, Exercise, ReadError, StorageError, UpdateError, Workout, WorkoutID,
    WorkoutRepository,
};

/// Map-backed workout store. Exercises and sets are owned by their
/// workout, so deleting a record drops the whole subtree. Read order is
/// arbitrary; callers re-derive ordering through the view functions.
#[derive(Default)]
pub struct MemoryStorage {
    workouts: RwLock<BTreeMap<WorkoutID, Workout>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned() -> StorageError {
    StorageError::Other("poisoned lock".into())
}

impl WorkoutRepository for MemoryStorage {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        Ok(self
            .workouts
            .read()
            .map_err(|_| poisoned())?
            .values()
            .cloned()
            .collect())
    }

    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError> {
        let mut workouts = self.workouts.write().map_err(|_| poisoned())?;

        if workouts.contains_key(&workout.id) {
            return Err(CreateError::Conflict);
        }

        workouts.insert(workout.id, workout.clone());
        Ok(workout)
    }

    async fn replace_workout_exercises(
        &self,
        id: WorkoutID,
        exercises: Vec<Exercise>,
    ) -> Result<Workout, UpdateError> {
        let mut workouts = self.workouts.write().map_err(|_| poisoned())?;
        let workout = workouts.get_mut(&id).ok_or(UpdateError::NotFound)?;

        workout.replace_exercises(exercises);
        Ok(workout.clone())
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        let mut workouts = self.workouts.write().map_err(|_| poisoned())?;

        match workouts.remove(&id) {
            Some(_) => Ok(id),
            None => Err(DeleteError::NotFound),
        }
    }
}
