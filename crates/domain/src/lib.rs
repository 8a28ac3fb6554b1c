#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod calories;

mod error;
mod rpe;
mod service;
mod session;
mod user;
mod workout;

pub use error::{CreateError, DeleteError, ReadError, StorageError, SyncError, UpdateError};
pub use rpe::{RPE, RPEError};
pub use service::Service;
pub use session::{
    RemoteWorkoutID, Session, SessionRepository, SessionService, SyncRepository, SyncService,
    SyncedWorkout,
};
pub use user::{User, UserID};
pub use workout::{
    ActivityKind, Duration, DurationError, Exercise, ExerciseID, Set, SetID, SortOrder, Summary,
    Workout, WorkoutID, WorkoutRepository, WorkoutService, cardio_view, strength_view, summary,
};
