use std::collections::BTreeMap;

use chrono::{DateTime, Local, NaiveDate, Utc};
use derive_more::Deref;
use uuid::Uuid;

use crate::{ExerciseID, Name, Reps, RoutineID, Time, Weight};

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutID(Uuid);

impl WorkoutID {
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

impl From<Uuid> for WorkoutID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkoutExerciseID(Uuid);

impl WorkoutExerciseID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for WorkoutExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for WorkoutExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetID(Uuid);

impl SetID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for SetID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for SetID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// One logged attempt within an exercise.
///
/// Completion is terminal: once `completed` is set, the logged fields are
/// frozen and `completed_at` is never changed again.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutSet {
    pub id: SetID,
    pub weight: Option<Weight>,
    pub reps: Option<Reps>,
    pub duration: Option<Time>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub warmup: bool,
    pub dropset: bool,
    pub failure: bool,
}

impl WorkoutSet {
    #[must_use]
    pub fn seed(reps: Reps) -> Self {
        Self {
            id: SetID::new(),
            weight: None,
            reps: Some(reps),
            duration: None,
            completed: false,
            completed_at: None,
            warmup: false,
            dropset: false,
            failure: false,
        }
    }

    #[must_use]
    pub fn volume(&self) -> f32 {
        match (self.weight, self.reps) {
            #[allow(clippy::cast_precision_loss)]
            (Some(weight), Some(reps)) => f32::from(weight) * u32::from(reps) as f32,
            _ => 0.0,
        }
    }

    /// Applies a partial update. Completed sets are immutable and left
    /// untouched.
    pub fn apply(&mut self, update: &SetUpdate) {
        if self.completed {
            return;
        }
        if let Some(weight) = update.weight {
            self.weight = weight;
        }
        if let Some(reps) = update.reps {
            self.reps = reps;
        }
        if let Some(duration) = update.duration {
            self.duration = duration;
        }
        if let Some(warmup) = update.warmup {
            self.warmup = warmup;
        }
        if let Some(dropset) = update.dropset {
            self.dropset = dropset;
        }
        if let Some(failure) = update.failure {
            self.failure = failure;
        }
    }

    /// Marks the set as completed. A repeated call leaves the set unchanged,
    /// including its original completion time.
    pub fn complete(&mut self, completed_at: DateTime<Utc>) {
        if self.completed {
            return;
        }
        self.completed = true;
        self.completed_at = Some(completed_at);
    }
}

/// Partial update of a set's logged fields. `None` leaves a field unchanged,
/// `Some(None)` clears a value.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SetUpdate {
    pub weight: Option<Option<Weight>>,
    pub reps: Option<Option<Reps>>,
    pub duration: Option<Option<Time>>,
    pub warmup: Option<bool>,
    pub dropset: Option<bool>,
    pub failure: Option<bool>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutExercise {
    pub id: WorkoutExerciseID,
    pub exercise_id: ExerciseID,
    pub notes: String,
    pub superset_id: Option<Uuid>,
    pub sets: Vec<WorkoutSet>,
    pub rest_time: Time,
    pub order: u32,
}

impl WorkoutExercise {
    #[must_use]
    pub fn volume(&self) -> f32 {
        self.sets.iter().map(WorkoutSet::volume).sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub name: Name,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration: u32,
    pub notes: String,
    pub exercises: Vec<WorkoutExercise>,
    pub bodyweight: Option<Weight>,
    pub template_id: Option<RoutineID>,
}

impl Workout {
    /// Sum of weight × reps over all sets. Sets missing either field
    /// contribute nothing.
    #[must_use]
    pub fn total_volume(&self) -> f32 {
        self.exercises.iter().map(WorkoutExercise::volume).sum()
    }

    /// Sum of the durations of all time-based sets, in seconds.
    #[must_use]
    pub fn total_set_duration(&self) -> u32 {
        self.exercises
            .iter()
            .flat_map(|e| &e.sets)
            .filter_map(|s| s.duration)
            .map(u32::from)
            .sum()
    }

    #[must_use]
    pub fn volume_by_exercise(&self) -> BTreeMap<ExerciseID, f32> {
        let mut result: BTreeMap<ExerciseID, f32> = BTreeMap::new();
        for exercise in &self.exercises {
            *result.entry(exercise.exercise_id).or_insert(0.0) += exercise.volume();
        }
        result
    }

    /// The calendar day the workout was started, in the local time zone.
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.started_at.with_timezone(&Local).date_naive()
    }
}
