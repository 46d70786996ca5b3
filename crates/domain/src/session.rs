use chrono::{Utc, Weekday};
use log::{debug, warn};
use thiserror::Error;

use crate::{
    Exercise, Name, PersonalRecord, Reps, RestTimer, Routine, RoutineExercise, RoutineID, SetID,
    SetUpdate, Settings, SettingsUpdate, Workout, WorkoutExercise, WorkoutExerciseID, WorkoutID,
    WorkoutSet, history, routine::normalized_weekdays,
};

const DEFAULT_WORKOUT_NAME: &str = "Quick Workout";
const SEED_REPS: u32 = 8;

/// Sole owner of the active-workout lifecycle.
///
/// There is at most one workout in progress. All operations are synchronous
/// and total: when a precondition does not hold (no active workout, stale
/// exercise or set ID), the operation is a silent no-op, as the caller's
/// view may be out of date by one frame. The one exception is
/// [`start_workout`], which rejects a second start explicitly instead of
/// silently discarding the workout in progress.
///
/// [`start_workout`]: Session::start_workout
#[derive(Debug, Default)]
pub struct Session {
    active_workout: Option<Workout>,
    workouts: Vec<Workout>,
    routines: Vec<Routine>,
    personal_records: Vec<PersonalRecord>,
    settings: Settings,
    rest_timer: RestTimer,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("a workout is already in progress")]
    WorkoutInProgress,
}

/// The persisted part of the session state. The active workout and the rest
/// timer are ephemeral and not carried across restarts.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Snapshot {
    pub workouts: Vec<Workout>,
    pub routines: Vec<Routine>,
    pub personal_records: Vec<PersonalRecord>,
    pub settings: Settings,
}

impl Session {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            active_workout: None,
            workouts: snapshot.workouts,
            routines: snapshot.routines,
            personal_records: snapshot.personal_records,
            settings: snapshot.settings,
            rest_timer: RestTimer::default(),
        }
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            workouts: self.workouts.clone(),
            routines: self.routines.clone(),
            personal_records: self.personal_records.clone(),
            settings: self.settings.clone(),
        }
    }

    #[must_use]
    pub fn active_workout(&self) -> Option<&Workout> {
        self.active_workout.as_ref()
    }

    /// Completed workouts, most recent first.
    #[must_use]
    pub fn workouts(&self) -> &[Workout] {
        &self.workouts
    }

    #[must_use]
    pub fn routines(&self) -> &[Routine] {
        &self.routines
    }

    #[must_use]
    pub fn personal_records(&self) -> &[PersonalRecord] {
        &self.personal_records
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn rest_timer(&self) -> &RestTimer {
        &self.rest_timer
    }

    /// Starts a new workout, optionally seeded from a routine. An unknown
    /// `template_id` starts an empty workout instead.
    pub fn start_workout(
        &mut self,
        name: Option<Name>,
        template_id: Option<RoutineID>,
    ) -> Result<WorkoutID, SessionError> {
        if self.active_workout.is_some() {
            warn!("attempt to start a workout while one is in progress");
            return Err(SessionError::WorkoutInProgress);
        }

        let routine = template_id.and_then(|id| self.routines.iter().find(|r| r.id == id));
        let exercises = routine.map(|r| seeded_exercises(r, &self.settings));
        let template_id = routine.map(|r| r.id);

        let workout = Workout {
            id: WorkoutID::new(),
            name: name.unwrap_or_else(|| Name::new(DEFAULT_WORKOUT_NAME).unwrap()),
            started_at: Utc::now(),
            completed_at: None,
            duration: 0,
            notes: String::new(),
            exercises: exercises.unwrap_or_default(),
            bodyweight: None,
            template_id,
        };
        let id = workout.id;
        self.active_workout = Some(workout);
        Ok(id)
    }

    /// Appends an exercise from the catalog to the active workout, with one
    /// seed set. Orders are assigned strictly increasing and never reused
    /// after a removal.
    pub fn add_exercise(&mut self, exercise: &Exercise) {
        let rest_time = self.settings.default_rest_time;
        let Some(workout) = self.active_workout.as_mut() else {
            debug!("no active workout to add an exercise to");
            return;
        };
        let order = workout
            .exercises
            .iter()
            .map(|e| e.order + 1)
            .max()
            .unwrap_or(0);
        workout.exercises.push(WorkoutExercise {
            id: WorkoutExerciseID::new(),
            exercise_id: exercise.id,
            notes: String::new(),
            superset_id: None,
            sets: vec![WorkoutSet::seed(seed_reps())],
            rest_time,
            order,
        });
    }

    /// Removes an exercise from the active workout. The remaining orders are
    /// not renumbered; gaps are permitted.
    pub fn remove_exercise(&mut self, exercise_id: WorkoutExerciseID) {
        if let Some(workout) = self.active_workout.as_mut() {
            workout.exercises.retain(|e| e.id != exercise_id);
        }
    }

    pub fn add_set(&mut self, exercise_id: WorkoutExerciseID) {
        if let Some(exercise) = self.exercise_mut(exercise_id) {
            exercise.sets.push(WorkoutSet::seed(seed_reps()));
        }
    }

    pub fn remove_set(&mut self, exercise_id: WorkoutExerciseID, set_id: SetID) {
        if let Some(exercise) = self.exercise_mut(exercise_id) {
            exercise.sets.retain(|s| s.id != set_id);
        }
    }

    /// Applies a partial update to a set. Completed sets are immutable; the
    /// update is dropped.
    pub fn update_set(
        &mut self,
        exercise_id: WorkoutExerciseID,
        set_id: SetID,
        update: &SetUpdate,
    ) {
        if let Some(set) = self
            .exercise_mut(exercise_id)
            .and_then(|e| e.sets.iter_mut().find(|s| s.id == set_id))
        {
            set.apply(update);
        }
    }

    /// Marks a set as completed and starts the rest timer with the
    /// exercise's rest time. Completing an already completed set changes
    /// nothing, including the rest timer.
    pub fn complete_set(&mut self, exercise_id: WorkoutExerciseID, set_id: SetID) {
        let now = Utc::now();
        let Some(exercise) = self
            .active_workout
            .as_mut()
            .and_then(|w| w.exercises.iter_mut().find(|e| e.id == exercise_id))
        else {
            return;
        };
        let rest_time = exercise.rest_time;
        let Some(set) = exercise.sets.iter_mut().find(|s| s.id == set_id) else {
            return;
        };
        if set.completed {
            return;
        }
        set.complete(now);
        self.rest_timer.start(u32::from(rest_time));
    }

    /// Finishes the active workout: computes its duration, moves it to the
    /// front of the history, folds it into the personal records and stops
    /// the rest timer. Returns `None` while no workout is active.
    pub fn complete_workout(&mut self) -> Option<WorkoutID> {
        let Some(mut workout) = self.active_workout.take() else {
            debug!("no active workout to complete");
            return None;
        };
        let now = Utc::now();
        workout.completed_at = Some(now);
        workout.duration = u32::try_from((now - workout.started_at).num_seconds()).unwrap_or(0);
        history::update_personal_records(&mut self.personal_records, &workout);
        let id = workout.id;
        self.workouts.insert(0, workout);
        self.rest_timer.stop();
        Some(id)
    }

    /// Discards the active workout without writing to the history.
    pub fn cancel_workout(&mut self) {
        if self.active_workout.take().is_some() {
            debug!("workout cancelled");
        }
        self.rest_timer.stop();
    }

    pub fn create_routine(
        &mut self,
        name: Name,
        description: String,
        exercises: Vec<RoutineExercise>,
        scheduled_days: Vec<Weekday>,
    ) -> RoutineID {
        let now = Utc::now();
        let routine = Routine {
            id: RoutineID::new(),
            name,
            description,
            exercises,
            scheduled_days: normalized_weekdays(scheduled_days),
            created_at: now,
            updated_at: now,
        };
        let id = routine.id;
        self.routines.push(routine);
        id
    }

    pub fn delete_routine(&mut self, id: RoutineID) {
        self.routines.retain(|r| r.id != id);
    }

    pub fn update_settings(&mut self, update: SettingsUpdate) {
        self.settings.apply(update);
    }

    pub fn start_rest_timer(&mut self, seconds: u32) {
        self.rest_timer.start(seconds);
    }

    pub fn stop_rest_timer(&mut self) {
        self.rest_timer.stop();
    }

    pub fn tick_rest_timer(&mut self) {
        self.rest_timer.tick();
    }

    fn exercise_mut(&mut self, exercise_id: WorkoutExerciseID) -> Option<&mut WorkoutExercise> {
        self.active_workout
            .as_mut()?
            .exercises
            .iter_mut()
            .find(|e| e.id == exercise_id)
    }
}

fn seeded_exercises(routine: &Routine, settings: &Settings) -> Vec<WorkoutExercise> {
    routine
        .exercises
        .iter()
        .enumerate()
        .map(|(order, template)| {
            #[allow(clippy::cast_possible_truncation)]
            let order = order as u32;
            WorkoutExercise {
                id: WorkoutExerciseID::new(),
                exercise_id: template.exercise_id,
                notes: template.notes.clone(),
                superset_id: None,
                sets: (0..template.sets.max(1))
                    .map(|_| WorkoutSet::seed(template.reps.unwrap_or_else(seed_reps)))
                    .collect(),
                rest_time: settings.default_rest_time,
                order,
            }
        })
        .collect()
}

fn seed_reps() -> Reps {
    Reps::new(SEED_REPS).unwrap_or_default()
}
