use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use fittrack_domain::{
    CreateError, DeleteError, ReadError, RemoteWorkoutID, Session, SessionRepository,
    StorageError, SyncError, SyncRepository, SyncedWorkout, Workout,
};

use crate::wire::{AuthResponse, Credentials, ErrorResponse, MessageResponse, PushResponse,
    WorkoutPayload, WorkoutRecord};

/// Client for the remote account API. One request in flight per call, no
/// retries: a failed call surfaces its error and must be re-invoked.
pub struct RestStorage {
    base_url: String,
    client: Client,
}

impl RestStorage {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    async fn fetch<T>(&self, request: RequestBuilder) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = match request.send().await {
            Ok(response) => response,
            Err(err) if err.is_builder() => return Err(ApiError::InvalidUrl),
            Err(_) => return Err(ApiError::NoConnection),
        };

        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        let body = response.bytes().await.map_err(|_| ApiError::NoConnection)?;

        if status.is_client_error() || status.is_server_error() {
            return Err(match serde_json::from_slice::<ErrorResponse>(&body) {
                Ok(response) => ApiError::Server(response.error),
                Err(_) => ApiError::Server(format!("server error: {status}")),
            });
        }

        if body.is_empty() {
            return Err(ApiError::NoData);
        }

        serde_json::from_slice(&body).map_err(|err| ApiError::Decode(Box::new(err)))
    }
}

impl SessionRepository for RestStorage {
    async fn register(&self, email: &str, password: &str) -> Result<Session, CreateError> {
        let response: AuthResponse = self
            .fetch(
                self.client
                    .post(self.url("/auth/register"))
                    .json(&Credentials {
                        email: email.to_string(),
                        password: password.to_string(),
                    }),
            )
            .await
            .map_err(StorageError::from)?;
        Ok(response.into())
    }

    async fn login(&self, email: &str, password: &str) -> Result<Session, ReadError> {
        let response: AuthResponse = self
            .fetch(self.client.post(self.url("/auth/login")).json(&Credentials {
                email: email.to_string(),
                password: password.to_string(),
            }))
            .await
            .map_err(StorageError::from)?;
        Ok(response.into())
    }
}

impl SyncRepository for RestStorage {
    async fn push_workout(
        &self,
        session: &Session,
        workout: &Workout,
    ) -> Result<RemoteWorkoutID, SyncError> {
        let response: PushResponse = self
            .fetch(
                self.client
                    .post(self.url("/workouts"))
                    .bearer_auth(&session.token)
                    .json(&WorkoutPayload::from(workout)),
            )
            .await
            .map_err(StorageError::from)?;
        Ok(RemoteWorkoutID::from(response.id))
    }

    async fn pull_workouts(&self, session: &Session) -> Result<Vec<SyncedWorkout>, SyncError> {
        let records: Vec<WorkoutRecord> = self
            .fetch(
                self.client
                    .get(self.url("/workouts"))
                    .bearer_auth(&session.token),
            )
            .await
            .map_err(StorageError::from)?;
        records
            .into_iter()
            .map(|record| {
                SyncedWorkout::try_from(record).map_err(|err| {
                    SyncError::from(StorageError::from(ApiError::Decode(Box::new(err))))
                })
            })
            .collect()
    }

    async fn delete_remote_workout(
        &self,
        session: &Session,
        id: &RemoteWorkoutID,
    ) -> Result<RemoteWorkoutID, DeleteError> {
        let _: MessageResponse = self
            .fetch(
                self.client
                    .delete(self.url(&format!("/workouts/{id}")))
                    .bearer_auth(&session.token),
            )
            .await
            .map_err(StorageError::from)?;
        Ok(id.clone())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("invalid URL")]
    InvalidUrl,
    #[error("no data received from server")]
    NoData,
    #[error("failed to decode server response")]
    Decode(#[source] Box<dyn std::error::Error + Send + Sync>),
    #[error("{0}")]
    Server(String),
    #[error("session expired")]
    Unauthorized,
    #[error("no connection")]
    NoConnection,
}

impl From<ApiError> for StorageError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::NoConnection => StorageError::NoConnection,
            ApiError::Unauthorized => StorageError::NoSession,
            ApiError::Server(message) => StorageError::Rejected(message),
            other => StorageError::Other(Box::new(other)),
        }
    }
}
