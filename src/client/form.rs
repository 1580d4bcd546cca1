//! Editable state behind the "New Workout" screen.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{Exercise, WorkoutDraft};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Please enter a workout name")]
    MissingName,
    #[error("Please add at least one exercise")]
    NoExercises,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseRow {
    pub name: String,
    pub sets: u32,
    pub reps: u32,
    /// Kept as text so the field can be left blank.
    pub weight: String,
}

impl Default for ExerciseRow {
    fn default() -> Self {
        Self {
            name: String::new(),
            sets: 3,
            reps: 10,
            weight: String::new(),
        }
    }
}

impl ExerciseRow {
    fn to_exercise(&self) -> Exercise {
        let weight = self.weight.trim().parse::<f64>().ok().filter(|w| *w >= 0.0);
        Exercise::new(self.name.trim(), self.sets, self.reps, weight)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutForm {
    pub name: String,
    pub duration: String,
    pub exercises: Vec<ExerciseRow>,
}

impl Default for WorkoutForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            duration: String::new(),
            exercises: vec![ExerciseRow::default()],
        }
    }
}

impl WorkoutForm {
    pub fn add_exercise(&mut self) {
        self.exercises.push(ExerciseRow::default());
    }

    /// The last remaining row is never removed.
    pub fn remove_exercise(&mut self, index: usize) {
        if self.exercises.len() > 1 && index < self.exercises.len() {
            self.exercises.remove(index);
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build the request body. Rows with a blank name are dropped and an
    /// unreadable duration counts as zero.
    pub fn to_draft(&self, now: DateTime<Utc>) -> Result<WorkoutDraft, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }

        let exercises: Vec<Exercise> = self
            .exercises
            .iter()
            .filter(|row| !row.name.trim().is_empty())
            .map(ExerciseRow::to_exercise)
            .collect();
        if exercises.is_empty() {
            return Err(FormError::NoExercises);
        }

        let duration = self.duration.trim().parse::<u32>().unwrap_or(0);
        Ok(WorkoutDraft::new(name, exercises)
            .with_date(now)
            .with_duration(duration))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(name: &str, weight: &str) -> ExerciseRow {
        ExerciseRow {
            name: name.to_string(),
            weight: weight.to_string(),
            ..ExerciseRow::default()
        }
    }

    #[test]
    fn test_default_form_has_one_row() {
        let form = WorkoutForm::default();
        assert_eq!(form.exercises, vec![ExerciseRow::default()]);
        assert_eq!(form.exercises[0].sets, 3);
        assert_eq!(form.exercises[0].reps, 10);
    }

    #[test]
    fn test_missing_name() {
        let form = WorkoutForm {
            name: "   ".to_string(),
            exercises: vec![row("Squats", "")],
            ..WorkoutForm::default()
        };
        assert_eq!(form.to_draft(Utc::now()), Err(FormError::MissingName));
    }

    #[test]
    fn test_blank_rows_dropped() {
        let form = WorkoutForm {
            name: "Legs".to_string(),
            exercises: vec![row("", ""), row("Squats", "100"), row(" ", "5")],
            ..WorkoutForm::default()
        };
        let draft = form.to_draft(Utc::now()).unwrap();

        assert_eq!(draft.exercises, vec![Exercise::new("Squats", 3, 10, Some(100.0))]);
    }

    #[test]
    fn test_no_named_rows() {
        let form = WorkoutForm {
            name: "Legs".to_string(),
            ..WorkoutForm::default()
        };
        assert_eq!(form.to_draft(Utc::now()), Err(FormError::NoExercises));
        assert_eq!(FormError::NoExercises.to_string(), "Please add at least one exercise");
    }

    #[test]
    fn test_duration_and_date() {
        let now = Utc::now();
        let mut form = WorkoutForm {
            name: "Legs".to_string(),
            duration: "45".to_string(),
            exercises: vec![row("Squats", "")],
        };
        let draft = form.to_draft(now).unwrap();
        assert_eq!(draft.duration, Some(45));
        assert_eq!(draft.date, Some(now));
        assert_eq!(draft.exercises[0].weight, None);

        form.duration = "soon".to_string();
        assert_eq!(form.to_draft(now).unwrap().duration, Some(0));
    }

    #[test]
    fn test_add_and_remove_rows() {
        let mut form = WorkoutForm::default();
        form.remove_exercise(0);
        assert_eq!(form.exercises.len(), 1);

        form.add_exercise();
        form.add_exercise();
        form.exercises[2].name = "Lunges".to_string();
        form.remove_exercise(1);
        assert_eq!(form.exercises.len(), 2);
        assert_eq!(form.exercises[1].name, "Lunges");

        form.remove_exercise(7);
        assert_eq!(form.exercises.len(), 2);

        form.reset();
        assert_eq!(form, WorkoutForm::default());
    }
}
