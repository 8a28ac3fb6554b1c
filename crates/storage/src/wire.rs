//! The sync envelope: wire-format representations of workout subtrees and
//! auth exchanges, plus conversions to and from the domain types. Pure
//! transcoding, no merge or conflict logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fittrack_domain::{
    ActivityKind, Duration, DurationError, Exercise, ExerciseID, RPE, RPEError, RemoteWorkoutID,
    Session, Set, SetID, SyncedWorkout, User, Workout, WorkoutID,
};

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserPayload,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserPayload {
    pub id: String,
    pub email: String,
}

impl From<AuthResponse> for Session {
    fn from(value: AuthResponse) -> Self {
        Session {
            token: value.token,
            user: User {
                id: value.user.id.into(),
                email: value.user.email,
            },
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PushResponse {
    pub id: String,
    pub message: String,
}

/// A workout subtree as pushed to the server. Dates are RFC 3339.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutPayload {
    pub workout_name: String,
    pub workout_date: DateTime<Utc>,
    pub duration_hours: u32,
    pub duration_minutes: u32,
    pub overall_rpe: f64,
    pub estimated_calories: u32,
    pub activity_type: String,
    pub exercises: Vec<ExercisePayload>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExercisePayload {
    pub name: String,
    pub notes: String,
    pub order: u32,
    pub sets: Vec<SetPayload>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SetPayload {
    pub weight: String,
    pub reps: String,
    pub rpe: Option<f64>,
}

impl From<&Workout> for WorkoutPayload {
    fn from(workout: &Workout) -> Self {
        Self {
            workout_name: workout.name.clone(),
            workout_date: workout.date,
            duration_hours: workout.duration.hours(),
            duration_minutes: workout.duration.minutes(),
            overall_rpe: f64::from(workout.rpe),
            estimated_calories: workout.estimated_calories,
            activity_type: workout.kind.to_string(),
            exercises: workout.exercises.iter().map(ExercisePayload::from).collect(),
        }
    }
}

impl From<&Exercise> for ExercisePayload {
    fn from(exercise: &Exercise) -> Self {
        Self {
            name: exercise.name.clone(),
            notes: exercise.notes.clone(),
            order: exercise.order,
            sets: exercise.sets.iter().map(SetPayload::from).collect(),
        }
    }
}

impl From<&Set> for SetPayload {
    fn from(set: &Set) -> Self {
        Self {
            weight: set.weight.clone(),
            reps: set.reps.clone(),
            rpe: set.rpe.map(f64::from),
        }
    }
}

/// A workout subtree as returned by the server, with server-assigned
/// identifiers and timestamps.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct WorkoutRecord {
    pub id: String,
    pub user_id: String,
    pub workout_name: String,
    pub workout_date: DateTime<Utc>,
    pub duration_hours: u32,
    pub duration_minutes: u32,
    pub overall_rpe: f64,
    pub estimated_calories: u32,
    pub activity_type: String,
    pub exercises: Vec<ExerciseRecord>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ExerciseRecord {
    pub id: String,
    pub workout_id: String,
    pub name: String,
    pub notes: String,
    pub order: u32,
    pub sets: Vec<SetRecord>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SetRecord {
    pub id: String,
    pub exercise_id: String,
    pub weight: String,
    pub reps: String,
    pub rpe: Option<f64>,
}

impl TryFrom<WorkoutRecord> for SyncedWorkout {
    type Error = EnvelopeError;

    fn try_from(record: WorkoutRecord) -> Result<Self, Self::Error> {
        #[allow(clippy::cast_possible_truncation)]
        let rpe = RPE::new(record.overall_rpe as f32)?;
        Ok(SyncedWorkout {
            id: RemoteWorkoutID::from(record.id),
            user_id: record.user_id.into(),
            created_at: record.created_at,
            updated_at: record.updated_at,
            workout: Workout {
                id: WorkoutID::new(),
                name: record.workout_name,
                date: record.workout_date,
                duration: Duration::new(record.duration_hours, record.duration_minutes)?,
                rpe,
                kind: ActivityKind::from(record.activity_type.as_str()),
                estimated_calories: record.estimated_calories,
                exercises: record
                    .exercises
                    .into_iter()
                    .map(Exercise::try_from)
                    .collect::<Result<_, _>>()?,
            },
        })
    }
}

impl TryFrom<ExerciseRecord> for Exercise {
    type Error = EnvelopeError;

    fn try_from(record: ExerciseRecord) -> Result<Self, Self::Error> {
        Ok(Exercise {
            id: ExerciseID::new(),
            name: record.name,
            notes: record.notes,
            order: record.order,
            sets: record
                .sets
                .into_iter()
                .map(Set::try_from)
                .collect::<Result<_, _>>()?,
        })
    }
}

impl TryFrom<SetRecord> for Set {
    type Error = EnvelopeError;

    fn try_from(record: SetRecord) -> Result<Self, Self::Error> {
        #[allow(clippy::cast_possible_truncation)]
        let rpe = record.rpe.map(|value| RPE::new(value as f32)).transpose()?;
        Ok(Set {
            id: SetID::new(),
            weight: record.weight,
            reps: record.reps,
            rpe,
        })
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum EnvelopeError {
    #[error(transparent)]
    Rpe(#[from] RPEError),
    #[error(transparent)]
    Duration(#[from] DurationError),
}
