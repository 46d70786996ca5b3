use std::collections::BTreeSet;

use chrono::{Datelike, Days, Duration, Local, NaiveDate};
use derive_more::Deref;
use uuid::Uuid;

use crate::{ExerciseID, Workout, WorkoutID};

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RecordID(Uuid);

impl RecordID {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl From<Uuid> for RecordID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for RecordID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Weight,
    Reps,
    Volume,
}

/// The best recorded value for an exercise across all completed workouts.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonalRecord {
    pub id: RecordID,
    pub exercise_id: ExerciseID,
    pub kind: RecordKind,
    pub value: f32,
    pub workout_id: WorkoutID,
    pub date: NaiveDate,
}

/// Number of consecutive calendar days with at least one workout, anchored
/// at today or, if today has no workout yet, at yesterday. Returns 0 when
/// neither day has a workout.
#[must_use]
pub fn streak(workouts: &[Workout]) -> u32 {
    streak_ending_on(
        &workouts.iter().map(Workout::date).collect::<BTreeSet<_>>(),
        Local::now().date_naive(),
    )
}

fn streak_ending_on(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let yesterday = today - Duration::days(1);
    let anchor = if days.contains(&today) {
        today
    } else if days.contains(&yesterday) {
        yesterday
    } else {
        return 0;
    };

    let mut streak = 1;
    let mut day = anchor - Duration::days(1);
    while days.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

/// Folds a completed workout into the personal record list. For every
/// exercise with a non-zero volume in the workout, the stored volume record
/// is replaced if the workout's value strictly exceeds it, or created if no
/// record exists yet. Records of other exercises are untouched.
pub fn update_personal_records(records: &mut Vec<PersonalRecord>, workout: &Workout) {
    for (exercise_id, volume) in workout.volume_by_exercise() {
        if volume <= 0.0 {
            continue;
        }
        match records
            .iter_mut()
            .find(|r| r.exercise_id == exercise_id && r.kind == RecordKind::Volume)
        {
            Some(record) => {
                if volume > record.value {
                    record.value = volume;
                    record.workout_id = workout.id;
                    record.date = workout.date();
                }
            }
            None => records.push(PersonalRecord {
                id: RecordID::new(),
                exercise_id,
                kind: RecordKind::Volume,
                value: volume,
                workout_id: workout.id,
                date: workout.date(),
            }),
        }
    }
}

/// Total volume per calendar day over the last `days` days, oldest first.
/// Days without workouts are reported as 0.
#[must_use]
pub fn volume_per_day(workouts: &[Workout], days: u64) -> Vec<(NaiveDate, f32)> {
    let today = Local::now().date_naive();
    let first = today
        .checked_sub_days(Days::new(days.saturating_sub(1)))
        .unwrap_or(today);

    first
        .iter_days()
        .take_while(|d| *d <= today)
        .map(|day| {
            (
                day,
                workouts
                    .iter()
                    .filter(|w| w.date() == day)
                    .map(Workout::total_volume)
                    .sum(),
            )
        })
        .collect()
}

/// Number of workouts started in the calendar week containing today.
#[must_use]
pub fn workouts_this_week(workouts: &[Workout]) -> usize {
    let this_week = Local::now().date_naive().iso_week();
    workouts
        .iter()
        .filter(|w| w.date().iso_week() == this_week)
        .count()
}

/// Number of workouts started in the calendar month containing today.
#[must_use]
pub fn workouts_this_month(workouts: &[Workout]) -> usize {
    let today = Local::now().date_naive();
    workouts
        .iter()
        .filter(|w| {
            let date = w.date();
            date.year() == today.year() && date.month() == today.month()
        })
        .count()
}

#[must_use]
pub fn total_volume(workouts: &[Workout]) -> f32 {
    workouts.iter().map(Workout::total_volume).sum()
}

/// Mean workout duration in seconds.
#[must_use]
pub fn avg_duration(workouts: &[Workout]) -> Option<f32> {
    if workouts.is_empty() {
        None
    } else {
        #[allow(clippy::cast_precision_loss)]
        Some(workouts.iter().map(|w| w.duration as f32).sum::<f32>() / workouts.len() as f32)
    }
}
