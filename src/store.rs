use std::sync::{Mutex, MutexGuard};

use chrono::{Duration, Utc};
use thiserror::Error;
use tracing::debug;

use crate::models::{Exercise, Workout, WorkoutDraft, WorkoutId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("workout store lock poisoned")]
    Poisoned,
}

struct StoreInner {
    workouts: Vec<Workout>,
    next_id: u64,
}

/// In-memory owner of every workout record.
///
/// The collection and the id counter live behind one mutex, so a `list`
/// running next to a `create` sees the record either fully appended or not
/// at all. Ids come from the counter and are never reused after a delete.
pub struct WorkoutStore {
    inner: Mutex<StoreInner>,
}

impl Default for WorkoutStore {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkoutStore {
    pub fn new() -> Self {
        Self::from_inner(StoreInner::default())
    }

    fn from_inner(inner: StoreInner) -> Self {
        Self {
            inner: Mutex::new(inner),
        }
    }

    /// A store holding two example workouts with ids "1" and "2".
    pub fn with_sample_data() -> Self {
        let mut inner = StoreInner::default();
        let now = Utc::now();
        let seeds = [
            WorkoutDraft::new(
                "Upper Body Workout",
                vec![
                    Exercise::new("Bench Press", 3, 10, Some(60.0)),
                    Exercise::new("Shoulder Press", 3, 12, Some(20.0)),
                    Exercise::new("Pull-ups", 3, 8, None),
                ],
            )
            .with_date(now)
            .with_duration(45),
            WorkoutDraft::new(
                "Leg Day",
                vec![
                    Exercise::new("Squats", 4, 8, Some(100.0)),
                    Exercise::new("Leg Press", 3, 12, Some(150.0)),
                    Exercise::new("Lunges", 3, 10, None),
                ],
            )
            .with_date(now - Duration::days(1))
            .with_duration(60),
        ];

        // Seeded before the mutex exists, through the same path as `create`.
        for draft in seeds {
            inner.insert(draft);
        }
        Self::from_inner(inner)
    }

    fn lock(&self) -> Result<MutexGuard<'_, StoreInner>, StoreError> {
        self.inner.lock().map_err(|_| StoreError::Poisoned)
    }

    /// All workouts in insertion order.
    pub fn list(&self) -> Result<Vec<Workout>, StoreError> {
        Ok(self.lock()?.workouts.clone())
    }

    pub fn get(&self, id: &str) -> Result<Option<Workout>, StoreError> {
        let inner = self.lock()?;
        Ok(inner
            .workouts
            .iter()
            .find(|workout| workout.id.as_str() == id)
            .cloned())
    }

    /// Assigns an id, applies the date and duration defaults and appends the
    /// workout to the end of the collection.
    pub fn create(&self, draft: WorkoutDraft) -> Result<Workout, StoreError> {
        let mut inner = self.lock()?;
        Ok(inner.insert(draft))
    }

    /// Returns `false` when no workout had this id.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut inner = self.lock()?;
        match inner.workouts.iter().position(|workout| workout.id.as_str() == id) {
            Some(index) => {
                inner.workouts.remove(index);
                debug!(id, "workout removed");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.lock()?.workouts.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl Default for StoreInner {
    fn default() -> Self {
        Self {
            workouts: Vec::new(),
            next_id: 1,
        }
    }
}

impl StoreInner {
    fn insert(&mut self, draft: WorkoutDraft) -> Workout {
        let id = WorkoutId::new(self.next_id.to_string());
        self.next_id += 1;

        let workout = Workout {
            id,
            name: draft.name,
            exercises: draft.exercises,
            date: draft.date.unwrap_or_else(Utc::now),
            duration: draft.duration.unwrap_or(0),
        };
        self.workouts.push(workout.clone());
        debug!(id = %workout.id, "workout stored");
        workout
    }
}
