use std::fmt;

use chrono::{DateTime, Utc};
use derive_more::Deref;
use thiserror::Error;
use uuid::Uuid;

use crate::{CreateError, DeleteError, RPE, ReadError, UpdateError, calories};

#[allow(async_fn_in_trait)]
pub trait WorkoutService {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError>;
    async fn replace_workout_exercises(
        &self,
        id: WorkoutID,
        exercises: Vec<Exercise>,
    ) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;

    async fn strength_workouts(&self, order: SortOrder) -> Result<Vec<Workout>, ReadError>;
    async fn cardio_workouts(&self, order: SortOrder) -> Result<Vec<Workout>, ReadError>;
    async fn training_summary(&self) -> Result<Summary, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait WorkoutRepository {
    async fn read_workouts(&self) -> Result<Vec<Workout>, ReadError>;
    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError>;
    async fn replace_workout_exercises(
        &self,
        id: WorkoutID,
        exercises: Vec<Exercise>,
    ) -> Result<Workout, UpdateError>;
    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError>;
}

/// A dated training session owning its entire exercise subtree.
///
/// `estimated_calories` is derived from duration and RPE on every save
/// and never edited directly.
#[derive(Debug, Clone, PartialEq)]
pub struct Workout {
    pub id: WorkoutID,
    pub name: String,
    pub date: DateTime<Utc>,
    pub duration: Duration,
    pub rpe: RPE,
    pub kind: ActivityKind,
    pub estimated_calories: u32,
    pub exercises: Vec<Exercise>,
}

impl Workout {
    #[must_use]
    pub fn new(
        name: &str,
        date: DateTime<Utc>,
        duration: Duration,
        rpe: RPE,
        kind: ActivityKind,
        exercises: Vec<Exercise>,
    ) -> Self {
        let mut workout = Self {
            id: WorkoutID::new(),
            name: kind.default_workout_name(name),
            date,
            duration,
            rpe,
            kind,
            estimated_calories: calories::estimate(duration.total_minutes(), rpe),
            exercises: Vec::new(),
        };
        workout.replace_exercises(exercises);
        workout
    }

    /// Discards the current exercise list wholesale and installs
    /// `exercises`, each stamped with its position as `order`. Updates are
    /// full-replace, never diffed.
    pub fn replace_exercises(&mut self, exercises: Vec<Exercise>) {
        self.exercises = exercises
            .into_iter()
            .enumerate()
            .map(|(position, exercise)| {
                #[allow(clippy::cast_possible_truncation)]
                Exercise {
                    name: self.kind.default_exercise_name(&exercise.name),
                    order: position as u32,
                    ..exercise
                }
            })
            .collect();
    }

    /// The edit-save path: re-applies name defaulting and recomputes the
    /// estimated calories.
    pub fn revise(&mut self, name: &str, date: DateTime<Utc>, duration: Duration, rpe: RPE) {
        self.name = self.kind.default_workout_name(name);
        self.date = date;
        self.duration = duration;
        self.rpe = rpe;
        self.estimated_calories = calories::estimate(duration.total_minutes(), rpe);
    }

    #[must_use]
    pub fn total_duration_minutes(&self) -> u32 {
        self.duration.total_minutes()
    }
}

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

/// A named, ordered group of sets within a workout. Cardio sessions use
/// the same shape for their intervals.
#[derive(Debug, Clone, PartialEq)]
pub struct Exercise {
    pub id: ExerciseID,
    pub name: String,
    pub notes: String,
    pub order: u32,
    pub sets: Vec<Set>,
}

impl Exercise {
    #[must_use]
    pub fn new(name: &str, notes: &str, sets: Vec<Set>) -> Self {
        Self {
            id: ExerciseID::new(),
            name: name.to_string(),
            notes: notes.to_string(),
            order: 0,
            sets,
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ExerciseID(Uuid);

impl ExerciseID {
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

impl From<Uuid> for ExerciseID {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl From<u128> for ExerciseID {
    fn from(value: u128) -> Self {
        Self(Uuid::from_bytes(value.to_be_bytes()))
    }
}

/// A single performance record. Values are unit-less raw text as entered:
/// strength sets store weight and reps, cardio intervals reuse the same
/// fields for distance and duration.
#[derive(Debug, Clone, PartialEq)]
pub struct Set {
    pub id: SetID,
    pub weight: String,
    pub reps: String,
    pub rpe: Option<RPE>,
}

impl Set {
    #[must_use]
    pub fn new(weight: &str, reps: &str, rpe: Option<RPE>) -> Self {
        Self {
            id: SetID::new(),
            weight: weight.to_string(),
            reps: reps.to_string(),
            rpe,
        }
    }
}

#[derive(Deref, Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SetID(Uuid);

impl SetID {
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

/// Classification of a workout as strength training or cardio.
///
/// Records created before the field existed carry `Unspecified` and are
/// treated as strength everywhere a decision has to be made.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ActivityKind {
    Strength,
    Cardio,
    #[default]
    Unspecified,
}

impl ActivityKind {
    #[must_use]
    pub fn is_strength(self) -> bool {
        matches!(self, ActivityKind::Strength | ActivityKind::Unspecified)
    }

    #[must_use]
    pub fn is_cardio(self) -> bool {
        matches!(self, ActivityKind::Cardio)
    }

    fn default_workout_name(self, name: &str) -> String {
        if name.is_empty() {
            match self {
                ActivityKind::Cardio => "Untitled Cardio",
                ActivityKind::Strength | ActivityKind::Unspecified => "Untitled Workout",
            }
            .to_string()
        } else {
            name.to_string()
        }
    }

    fn default_exercise_name(self, name: &str) -> String {
        if name.is_empty() {
            match self {
                ActivityKind::Cardio => "Unnamed Activity",
                ActivityKind::Strength | ActivityKind::Unspecified => "Unnamed Exercise",
            }
            .to_string()
        } else {
            name.to_string()
        }
    }
}

impl From<&str> for ActivityKind {
    fn from(value: &str) -> Self {
        match value {
            "strength" => ActivityKind::Strength,
            "cardio" => ActivityKind::Cardio,
            _ => ActivityKind::Unspecified,
        }
    }
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ActivityKind::Cardio => "cardio",
                ActivityKind::Strength | ActivityKind::Unspecified => "strength",
            }
        )
    }
}

/// Session length as entered, hours and minutes kept separate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Duration {
    hours: u32,
    minutes: u32,
}

impl Duration {
    pub fn new(hours: u32, minutes: u32) -> Result<Self, DurationError> {
        if hours > 23 {
            return Err(DurationError::HoursOutOfRange);
        }

        if minutes > 59 {
            return Err(DurationError::MinutesOutOfRange);
        }

        Ok(Self { hours, minutes })
    }

    #[must_use]
    pub fn hours(self) -> u32 {
        self.hours
    }

    #[must_use]
    pub fn minutes(self) -> u32 {
        self.minutes
    }

    #[must_use]
    pub fn total_minutes(self) -> u32 {
        self.hours * 60 + self.minutes
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum DurationError {
    #[error("Hours must be in the range 0 to 23")]
    HoursOutOfRange,
    #[error("Minutes must be in the range 0 to 59")]
    MinutesOutOfRange,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    NewestFirst,
    OldestFirst,
}

impl SortOrder {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::NewestFirst => SortOrder::OldestFirst,
            SortOrder::OldestFirst => SortOrder::NewestFirst,
        }
    }
}

/// Workouts with strength or unspecified kind, sorted by date. Ties keep
/// their original order.
#[must_use]
pub fn strength_view(workouts: &[Workout], order: SortOrder) -> Vec<&Workout> {
    sorted_by_date(
        workouts.iter().filter(|w| w.kind.is_strength()).collect(),
        order,
    )
}

/// Workouts with cardio kind, sorted by date. Ties keep their original
/// order.
#[must_use]
pub fn cardio_view(workouts: &[Workout], order: SortOrder) -> Vec<&Workout> {
    sorted_by_date(
        workouts.iter().filter(|w| w.kind.is_cardio()).collect(),
        order,
    )
}

fn sorted_by_date(mut workouts: Vec<&Workout>, order: SortOrder) -> Vec<&Workout> {
    match order {
        SortOrder::NewestFirst => workouts.sort_by(|a, b| b.date.cmp(&a.date)),
        SortOrder::OldestFirst => workouts.sort_by(|a, b| a.date.cmp(&b.date)),
    }
    workouts
}

/// Aggregate counters over a workout collection.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub workouts: usize,
    pub total_minutes: u32,
    pub total_calories: u32,
}

#[must_use]
pub fn summary(workouts: &[Workout]) -> Summary {
    Summary {
        workouts: workouts.len(),
        total_minutes: workouts.iter().map(Workout::total_duration_minutes).sum(),
        total_calories: workouts.iter().map(|w| w.estimated_calories).sum(),
    }
}
