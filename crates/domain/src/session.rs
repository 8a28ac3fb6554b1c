use chrono::{DateTime, Utc};
use derive_more::{AsRef, Display};

use crate::{CreateError, DeleteError, ReadError, SyncError, User, UserID, Workout};

#[allow(async_fn_in_trait)]
pub trait SessionService {
    async fn register(&mut self, email: &str, password: &str) -> Result<Session, CreateError>;
    async fn login(&mut self, email: &str, password: &str) -> Result<Session, ReadError>;
    fn session(&self) -> Option<&Session>;
    fn logout(&mut self);
}

#[allow(async_fn_in_trait)]
pub trait SyncService {
    async fn push_workout(&mut self, workout: &Workout) -> Result<RemoteWorkoutID, SyncError>;
    async fn pull_workouts(&mut self) -> Result<Vec<SyncedWorkout>, SyncError>;
    async fn delete_remote_workout(
        &mut self,
        id: &RemoteWorkoutID,
    ) -> Result<RemoteWorkoutID, DeleteError>;
}

#[allow(async_fn_in_trait)]
pub trait SessionRepository {
    async fn register(&self, email: &str, password: &str) -> Result<Session, CreateError>;
    async fn login(&self, email: &str, password: &str) -> Result<Session, ReadError>;
}

#[allow(async_fn_in_trait)]
pub trait SyncRepository {
    async fn push_workout(
        &self,
        session: &Session,
        workout: &Workout,
    ) -> Result<RemoteWorkoutID, SyncError>;
    async fn pull_workouts(&self, session: &Session) -> Result<Vec<SyncedWorkout>, SyncError>;
    async fn delete_remote_workout(
        &self,
        session: &Session,
        id: &RemoteWorkoutID,
    ) -> Result<RemoteWorkoutID, DeleteError>;
}

/// Authenticated context for remote calls. Passed explicitly into every
/// authenticated request; its lifecycle is owned by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Server-assigned identifier of a pushed workout.
#[derive(AsRef, Debug, Display, Default, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct RemoteWorkoutID(String);

impl From<String> for RemoteWorkoutID {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for RemoteWorkoutID {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A workout as returned by the server, carrying the metadata that is
/// absent before the first push.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncedWorkout {
    pub id: RemoteWorkoutID,
    pub user_id: UserID,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub workout: Workout,
}
