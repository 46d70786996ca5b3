use std::collections::BTreeSet;

use chrono::{DateTime, Utc, Weekday};
use derive_more::Deref;
use uuid::Uuid;

use crate::{ExerciseID, Name, Reps};

/// Sorts weekdays Monday first and removes duplicates.
#[must_use]
pub fn normalized_weekdays(mut days: Vec<Weekday>) -> Vec<Weekday> {
    days.sort_by_key(Weekday::num_days_from_monday);
    days.dedup();
    days
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RoutineID(Uuid);

impl RoutineID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[must_use]
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }
}

impl From<Uuid> for RoutineID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for RoutineID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// A reusable template of exercises used to seed a new workout. Never
/// mutated by the session engine.
///
/// `scheduled_days` holds each weekday at most once, Monday first (see
/// [`normalized_weekdays`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Routine {
    pub id: RoutineID,
    pub name: Name,
    pub description: String,
    pub exercises: Vec<RoutineExercise>,
    pub scheduled_days: Vec<Weekday>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Routine {
    #[must_use]
    pub fn scheduled_for(&self, weekday: Weekday) -> bool {
        self.scheduled_days.contains(&weekday)
    }

    #[must_use]
    pub fn num_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.sets.max(1)).sum()
    }

    pub fn exercise_ids(&self) -> BTreeSet<ExerciseID> {
        self.exercises
            .iter()
            .map(|e| e.exercise_id)
            .collect::<BTreeSet<_>>()
    }
}

/// One exercise template within a routine: which exercise to perform and how
/// many sets of how many reps to seed.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutineExercise {
    pub exercise_id: ExerciseID,
    pub sets: u32,
    pub reps: Option<Reps>,
    pub notes: String,
}
