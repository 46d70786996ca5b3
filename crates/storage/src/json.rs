//! JSON representation of the persisted state.
//!
//! The stored objects deliberately use raw types. Fields missing from a
//! stored blob fall back to their defaults at every nesting level. Values
//! that fail domain validation when read back are coerced: invalid optional
//! values are dropped, invalid required values fall back to their default.
//! Only an invalid name makes the state unreadable.

use chrono::{DateTime, NaiveDate, Utc, Weekday};
use uuid::Uuid;

use liftlog_domain as domain;

use crate::StorageError;

pub fn encode(snapshot: &domain::Snapshot) -> Result<String, StorageError> {
    Ok(serde_json::to_string(&State::from(snapshot))?)
}

pub fn decode(value: &str) -> Result<domain::Snapshot, StorageError> {
    let state = serde_json::from_str::<State>(value)?;
    domain::Snapshot::try_from(state).map_err(|err| StorageError::InvalidData(err.to_string()))
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct State {
    pub workouts: Vec<Workout>,
    pub routines: Vec<Routine>,
    pub personal_records: Vec<PersonalRecord>,
    pub settings: Settings,
}

impl From<&domain::Snapshot> for State {
    fn from(value: &domain::Snapshot) -> Self {
        Self {
            workouts: value.workouts.iter().map(Workout::from).collect(),
            routines: value.routines.iter().map(Routine::from).collect(),
            personal_records: value
                .personal_records
                .iter()
                .map(PersonalRecord::from)
                .collect(),
            settings: Settings::from(&value.settings),
        }
    }
}

impl TryFrom<State> for domain::Snapshot {
    type Error = domain::NameError;

    fn try_from(value: State) -> Result<Self, Self::Error> {
        Ok(Self {
            workouts: value
                .workouts
                .into_iter()
                .map(domain::Workout::try_from)
                .collect::<Result<_, _>>()?,
            routines: value
                .routines
                .into_iter()
                .map(domain::Routine::try_from)
                .collect::<Result<_, _>>()?,
            personal_records: value
                .personal_records
                .into_iter()
                .map(domain::PersonalRecord::from)
                .collect(),
            settings: value.settings.into(),
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Workout {
    pub id: Uuid,
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub duration: u32,
    pub notes: String,
    pub exercises: Vec<WorkoutExercise>,
    pub bodyweight: Option<f32>,
    pub template_id: Option<Uuid>,
}

impl Default for Workout {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            name: String::from("Workout"),
            started_at: DateTime::UNIX_EPOCH,
            completed_at: None,
            duration: 0,
            notes: String::new(),
            exercises: vec![],
            bodyweight: None,
            template_id: None,
        }
    }
}

impl From<&domain::Workout> for Workout {
    fn from(value: &domain::Workout) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            started_at: value.started_at,
            completed_at: value.completed_at,
            duration: value.duration,
            notes: value.notes.clone(),
            exercises: value.exercises.iter().map(WorkoutExercise::from).collect(),
            bodyweight: value.bodyweight.map(f32::from),
            template_id: value.template_id.map(|id| *id),
        }
    }
}

impl TryFrom<Workout> for domain::Workout {
    type Error = domain::NameError;

    fn try_from(value: Workout) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            started_at: value.started_at,
            completed_at: value.completed_at,
            duration: value.duration,
            notes: value.notes,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::WorkoutExercise::from)
                .collect(),
            bodyweight: value.bodyweight.and_then(|w| domain::Weight::new(w).ok()),
            template_id: value.template_id.map(Into::into),
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct WorkoutExercise {
    pub id: Uuid,
    pub exercise_id: Uuid,
    pub notes: String,
    pub superset_id: Option<Uuid>,
    pub sets: Vec<WorkoutSet>,
    pub rest_time: u32,
    pub order: u32,
}

impl From<&domain::WorkoutExercise> for WorkoutExercise {
    fn from(value: &domain::WorkoutExercise) -> Self {
        Self {
            id: *value.id,
            exercise_id: *value.exercise_id,
            notes: value.notes.clone(),
            superset_id: value.superset_id,
            sets: value.sets.iter().map(WorkoutSet::from).collect(),
            rest_time: value.rest_time.into(),
            order: value.order,
        }
    }
}

impl From<WorkoutExercise> for domain::WorkoutExercise {
    fn from(value: WorkoutExercise) -> Self {
        Self {
            id: value.id.into(),
            exercise_id: value.exercise_id.into(),
            notes: value.notes,
            superset_id: value.superset_id,
            sets: value.sets.into_iter().map(domain::WorkoutSet::from).collect(),
            rest_time: domain::Time::new(value.rest_time).unwrap_or_default(),
            order: value.order,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct WorkoutSet {
    pub id: Uuid,
    pub weight: Option<f32>,
    pub reps: Option<u32>,
    pub duration: Option<u32>,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub warmup: bool,
    pub dropset: bool,
    pub failure: bool,
}

impl From<&domain::WorkoutSet> for WorkoutSet {
    fn from(value: &domain::WorkoutSet) -> Self {
        Self {
            id: *value.id,
            weight: value.weight.map(f32::from),
            reps: value.reps.map(u32::from),
            duration: value.duration.map(u32::from),
            completed: value.completed,
            completed_at: value.completed_at,
            warmup: value.warmup,
            dropset: value.dropset,
            failure: value.failure,
        }
    }
}

impl From<WorkoutSet> for domain::WorkoutSet {
    fn from(value: WorkoutSet) -> Self {
        Self {
            id: value.id.into(),
            weight: value.weight.and_then(|w| domain::Weight::new(w).ok()),
            reps: value.reps.and_then(|r| domain::Reps::new(r).ok()),
            duration: value.duration.and_then(|d| domain::Time::new(d).ok()),
            completed: value.completed,
            completed_at: value.completed_at,
            warmup: value.warmup,
            dropset: value.dropset,
            failure: value.failure,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Routine {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub exercises: Vec<RoutineExercise>,
    pub scheduled_days: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for Routine {
    fn default() -> Self {
        Self {
            id: Uuid::nil(),
            name: String::from("Routine"),
            description: String::new(),
            exercises: vec![],
            scheduled_days: vec![],
            created_at: DateTime::UNIX_EPOCH,
            updated_at: DateTime::UNIX_EPOCH,
        }
    }
}

impl From<&domain::Routine> for Routine {
    fn from(value: &domain::Routine) -> Self {
        Self {
            id: *value.id,
            name: value.name.to_string(),
            description: value.description.clone(),
            exercises: value.exercises.iter().map(RoutineExercise::from).collect(),
            scheduled_days: value
                .scheduled_days
                .iter()
                .map(|d| u8::try_from(d.num_days_from_monday()).unwrap_or(0))
                .collect(),
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl TryFrom<Routine> for domain::Routine {
    type Error = domain::NameError;

    fn try_from(value: Routine) -> Result<Self, Self::Error> {
        Ok(Self {
            id: value.id.into(),
            name: domain::Name::new(&value.name)?,
            description: value.description,
            exercises: value
                .exercises
                .into_iter()
                .map(domain::RoutineExercise::from)
                .collect(),
            scheduled_days: domain::normalized_weekdays(
                value
                    .scheduled_days
                    .into_iter()
                    .filter_map(|d| Weekday::try_from(d).ok())
                    .collect(),
            ),
            created_at: value.created_at,
            updated_at: value.updated_at,
        })
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct RoutineExercise {
    pub exercise_id: Uuid,
    pub sets: u32,
    pub reps: Option<u32>,
    pub notes: String,
}

impl From<&domain::RoutineExercise> for RoutineExercise {
    fn from(value: &domain::RoutineExercise) -> Self {
        Self {
            exercise_id: *value.exercise_id,
            sets: value.sets,
            reps: value.reps.map(u32::from),
            notes: value.notes.clone(),
        }
    }
}

impl From<RoutineExercise> for domain::RoutineExercise {
    fn from(value: RoutineExercise) -> Self {
        Self {
            exercise_id: value.exercise_id.into(),
            sets: value.sets,
            reps: value.reps.and_then(|r| domain::Reps::new(r).ok()),
            notes: value.notes,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PersonalRecord {
    pub id: Uuid,
    pub exercise_id: Uuid,
    pub kind: RecordKind,
    pub value: f32,
    pub workout_id: Uuid,
    pub date: NaiveDate,
}

impl From<&domain::PersonalRecord> for PersonalRecord {
    fn from(value: &domain::PersonalRecord) -> Self {
        Self {
            id: *value.id,
            exercise_id: *value.exercise_id,
            kind: value.kind.into(),
            value: value.value,
            workout_id: *value.workout_id,
            date: value.date,
        }
    }
}

impl From<PersonalRecord> for domain::PersonalRecord {
    fn from(value: PersonalRecord) -> Self {
        Self {
            id: value.id.into(),
            exercise_id: value.exercise_id.into(),
            kind: value.kind.into(),
            value: value.value,
            workout_id: value.workout_id.into(),
            date: value.date,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordKind {
    Weight,
    Reps,
    #[default]
    Volume,
}

impl From<domain::RecordKind> for RecordKind {
    fn from(value: domain::RecordKind) -> Self {
        match value {
            domain::RecordKind::Weight => RecordKind::Weight,
            domain::RecordKind::Reps => RecordKind::Reps,
            domain::RecordKind::Volume => RecordKind::Volume,
        }
    }
}

impl From<RecordKind> for domain::RecordKind {
    fn from(value: RecordKind) -> Self {
        match value {
            RecordKind::Weight => domain::RecordKind::Weight,
            RecordKind::Reps => domain::RecordKind::Reps,
            RecordKind::Volume => domain::RecordKind::Volume,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub name: String,
    pub units: Units,
    pub theme: Theme,
    pub default_rest_time: u32,
    pub show_warmup_sets: bool,
    pub sound_enabled: bool,
    pub haptic_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self::from(&domain::Settings::default())
    }
}

impl From<&domain::Settings> for Settings {
    fn from(value: &domain::Settings) -> Self {
        Self {
            name: value.name.clone(),
            units: value.units.into(),
            theme: value.theme.into(),
            default_rest_time: value.default_rest_time.into(),
            show_warmup_sets: value.show_warmup_sets,
            sound_enabled: value.sound_enabled,
            haptic_enabled: value.haptic_enabled,
        }
    }
}

impl From<Settings> for domain::Settings {
    fn from(value: Settings) -> Self {
        Self {
            name: value.name,
            units: value.units.into(),
            theme: value.theme.into(),
            default_rest_time: domain::Time::new(value.default_rest_time).unwrap_or_default(),
            show_warmup_sets: value.show_warmup_sets,
            sound_enabled: value.sound_enabled,
            haptic_enabled: value.haptic_enabled,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Metric,
    Imperial,
}

impl From<domain::Units> for Units {
    fn from(value: domain::Units) -> Self {
        match value {
            domain::Units::Metric => Units::Metric,
            domain::Units::Imperial => Units::Imperial,
        }
    }
}

impl From<Units> for domain::Units {
    fn from(value: Units) -> Self {
        match value {
            Units::Metric => domain::Units::Metric,
            Units::Imperial => domain::Units::Imperial,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    System,
    Light,
    Dark,
}

impl From<domain::Theme> for Theme {
    fn from(value: domain::Theme) -> Self {
        match value {
            domain::Theme::System => Theme::System,
            domain::Theme::Light => Theme::Light,
            domain::Theme::Dark => Theme::Dark,
        }
    }
}

impl From<Theme> for domain::Theme {
    fn from(value: Theme) -> Self {
        match value {
            Theme::System => domain::Theme::System,
            Theme::Light => domain::Theme::Light,
            Theme::Dark => domain::Theme::Dark,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::tests::data::SNAPSHOT;

    use super::*;

    #[test]
    fn test_state_try_from() {
        assert_eq!(
            domain::Snapshot::try_from(State::from(&*SNAPSHOT)),
            Ok(SNAPSHOT.clone())
        );
    }

    #[test]
    fn test_state_serde() {
        let obj = State::from(&*SNAPSHOT);
        let serialized = json!(obj);
        let deserialized: State = serde_json::from_value(serialized).unwrap();
        assert_eq!(deserialized, obj);
    }

    #[test]
    fn test_encode_decode() {
        let encoded = encode(&SNAPSHOT).unwrap();
        assert_eq!(decode(&encoded).unwrap(), *SNAPSHOT);
    }

    #[test]
    fn test_decode_empty_object_yields_defaults() {
        assert_eq!(decode("{}").unwrap(), domain::Snapshot::default());
    }

    #[test]
    fn test_decode_missing_settings_fields() {
        let snapshot = decode(r#"{"settings":{}}"#).unwrap();
        assert_eq!(snapshot.settings, domain::Settings::default());
    }

    #[test]
    fn test_decode_partial_settings() {
        let snapshot = decode(
            r#"{"settings":{"name":"Alice","units":"Imperial","default_rest_time":120}}"#,
        )
        .unwrap();
        assert_eq!(snapshot.settings.name, "Alice");
        assert_eq!(snapshot.settings.units, domain::Units::Imperial);
        assert_eq!(
            snapshot.settings.default_rest_time,
            domain::Time::new(120).unwrap()
        );
        assert_eq!(snapshot.settings.theme, domain::Theme::System);
        assert!(snapshot.settings.show_warmup_sets);
        assert!(snapshot.settings.sound_enabled);
        assert!(!snapshot.settings.haptic_enabled);
    }

    #[test]
    fn test_decode_partial_workout_entry() {
        let snapshot = decode(
            r#"{"workouts":[{"id":"00000000-0000-0000-0000-000000000001","name":"Push Day","duration":3600}]}"#,
        )
        .unwrap();
        assert_eq!(snapshot.workouts.len(), 1);

        let workout = &snapshot.workouts[0];
        assert_eq!(workout.name, domain::Name::new("Push Day").unwrap());
        assert_eq!(workout.duration, 3600);
        assert_eq!(workout.started_at, DateTime::UNIX_EPOCH);
        assert_eq!(workout.completed_at, None);
        assert_eq!(workout.exercises, vec![]);
        assert_eq!(workout.bodyweight, None);
        assert_eq!(workout.template_id, None);
    }

    #[test]
    fn test_decode_invalid_json() {
        assert!(matches!(
            decode("not json"),
            Err(crate::StorageError::Serialization(_))
        ));
    }

    #[test]
    fn test_decode_invalid_name() {
        let encoded = r#"{"workouts":[{"id":"00000000-0000-0000-0000-000000000001","name":"","started_at":"2026-08-30T10:00:00Z","completed_at":null,"duration":0,"notes":"","exercises":[],"bodyweight":null,"template_id":null}]}"#;
        assert!(matches!(
            decode(encoded),
            Err(crate::StorageError::InvalidData(_))
        ));
    }

    #[test]
    fn test_invalid_set_values_are_dropped() {
        let set = WorkoutSet {
            id: Uuid::nil(),
            weight: Some(-10.0),
            reps: Some(5000),
            duration: Some(30),
            completed: true,
            completed_at: None,
            warmup: false,
            dropset: false,
            failure: false,
        };
        let converted = domain::WorkoutSet::from(set);
        assert_eq!(converted.weight, None);
        assert_eq!(converted.reps, None);
        assert_eq!(converted.duration, Some(domain::Time::new(30).unwrap()));
    }

    #[test]
    fn test_invalid_scheduled_days_are_dropped() {
        let created_at = NaiveDate::from_ymd_opt(2026, 8, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
            .and_utc();
        let routine = Routine {
            id: Uuid::nil(),
            name: String::from("A"),
            description: String::new(),
            exercises: vec![],
            scheduled_days: vec![0, 6, 7, 255],
            created_at,
            updated_at: created_at,
        };
        let converted = domain::Routine::try_from(routine).unwrap();
        assert_eq!(converted.scheduled_days, vec![Weekday::Mon, Weekday::Sun]);
    }
}
