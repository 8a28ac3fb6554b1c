use log::{debug, error};

use crate::{
    CreateError, DeleteError, Exercise, ReadError, RemoteWorkoutID, Session, SessionRepository,
    SessionService, SortOrder, StorageError, Summary, SyncError, SyncRepository, SyncService,
    SyncedWorkout, UpdateError, Workout, WorkoutID, WorkoutRepository, WorkoutService,
    cardio_view, strength_view, summary,
};

/// Application layer over a repository. Owns the session context and
/// performs the implicit logout when the server reports the session
/// invalid. Failed calls are surfaced to the caller and never retried.
pub struct Service<R> {
    repository: R,
    session: Option<Session>,
}

impl<R> Service<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            session: None,
        }
    }
}

macro_rules! log_on_error {
    ($func: expr, $error: ident, $action: literal, $entity: literal) => {{
        let result = $func.await;
        match result {
            Ok(_) => {}
            Err(ref err) => match err {
                $error::Storage(crate::StorageError::NoConnection) => {
                    debug!("failed to {} {}: {err}", $action, $entity);
                }
                _ => {
                    error!("failed to {} {}: {err}", $action, $entity);
                }
            },
        }
        result
    }};
}

macro_rules! discard_session_on_rejection {
    ($self: ident, $result: ident, $error: ident) => {
        if matches!(
            $result,
            Err($error::Storage(crate::StorageError::NoSession))
        ) {
            $self.session = None;
        }
    };
}

impl<R: SessionRepository> SessionService for Service<R> {
    async fn register(&mut self, email: &str, password: &str) -> Result<Session, CreateError> {
        let result = log_on_error!(
            self.repository.register(email, password),
            CreateError,
            "register",
            "account"
        );
        if let Ok(ref session) = result {
            self.session = Some(session.clone());
        }
        result
    }

    async fn login(&mut self, email: &str, password: &str) -> Result<Session, ReadError> {
        let result = log_on_error!(
            self.repository.login(email, password),
            ReadError,
            "create",
            "session"
        );
        if let Ok(ref session) = result {
            self.session = Some(session.clone());
        }
        result
    }

    fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    fn logout(&mut self) {
        self.session = None;
    }
}

impl<R: SyncRepository> SyncService for Service<R> {
    async fn push_workout(&mut self, workout: &Workout) -> Result<RemoteWorkoutID, SyncError> {
        let Some(session) = &self.session else {
            return Err(SyncError::Storage(StorageError::NoSession));
        };
        let result = log_on_error!(
            self.repository.push_workout(session, workout),
            SyncError,
            "push",
            "workout"
        );
        discard_session_on_rejection!(self, result, SyncError);
        result
    }

    async fn pull_workouts(&mut self) -> Result<Vec<SyncedWorkout>, SyncError> {
        let Some(session) = &self.session else {
            return Err(SyncError::Storage(StorageError::NoSession));
        };
        let result = log_on_error!(
            self.repository.pull_workouts(session),
            SyncError,
            "pull",
            "workouts"
        );
        discard_session_on_rejection!(self, result, SyncError);
        result
    }

    async fn delete_remote_workout(
        &mut self,
        id: &RemoteWorkoutID,
    ) -> Result<RemoteWorkoutID, DeleteError> {
        let Some(session) = &self.session else {
            return Err(DeleteError::Storage(StorageError::NoSession));
        };
        let result = log_on_error!(
            self.repository.delete_remote_workout(session, id),
            DeleteError,
            "delete",
            "remote workout"
        );
        discard_session_on_rejection!(self, result, DeleteError);
        result
    }
}

impl<R: WorkoutRepository> WorkoutService for Service<R> {
    async fn get_workouts(&self) -> Result<Vec<Workout>, ReadError> {
        log_on_error!(self.repository.read_workouts(), ReadError, "get", "workouts")
    }

    async fn create_workout(&self, workout: Workout) -> Result<Workout, CreateError> {
        log_on_error!(
            self.repository.create_workout(workout),
            CreateError,
            "create",
            "workout"
        )
    }

    async fn replace_workout_exercises(
        &self,
        id: WorkoutID,
        exercises: Vec<Exercise>,
    ) -> Result<Workout, UpdateError> {
        log_on_error!(
            self.repository.replace_workout_exercises(id, exercises),
            UpdateError,
            "modify",
            "workout"
        )
    }

    async fn delete_workout(&self, id: WorkoutID) -> Result<WorkoutID, DeleteError> {
        log_on_error!(
            self.repository.delete_workout(id),
            DeleteError,
            "delete",
            "workout"
        )
    }

    async fn strength_workouts(&self, order: SortOrder) -> Result<Vec<Workout>, ReadError> {
        Ok(strength_view(&self.get_workouts().await?, order)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn cardio_workouts(&self, order: SortOrder) -> Result<Vec<Workout>, ReadError> {
        Ok(cardio_view(&self.get_workouts().await?, order)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn training_summary(&self) -> Result<Summary, ReadError> {
        Ok(summary(&self.get_workouts().await?))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::{ActivityKind, Duration, RPE, User};

    use super::*;

    struct FakeRepository {
        reject_with: Option<StorageError>,
    }

    impl FakeRepository {
        fn accepting() -> Self {
            Self { reject_with: None }
        }

        fn rejecting(error: StorageError) -> Self {
            Self {
                reject_with: Some(error),
            }
        }

        fn session() -> Session {
            Session {
                token: String::from("token"),
                user: User {
                    id: "u-1".into(),
                    email: String::from("a@example.com"),
                },
            }
        }

        fn storage_error(&self) -> StorageError {
            match self.reject_with.as_ref().unwrap() {
                StorageError::NoConnection => StorageError::NoConnection,
                StorageError::NoSession => StorageError::NoSession,
                StorageError::Rejected(message) => StorageError::Rejected(message.clone()),
                StorageError::Other(error) => StorageError::Other(error.to_string().into()),
            }
        }
    }

    impl SessionRepository for FakeRepository {
        async fn register(&self, _email: &str, _password: &str) -> Result<Session, CreateError> {
            match self.reject_with {
                None => Ok(Self::session()),
                Some(_) => Err(CreateError::Storage(self.storage_error())),
            }
        }

        async fn login(&self, _email: &str, _password: &str) -> Result<Session, ReadError> {
            match self.reject_with {
                None => Ok(Self::session()),
                Some(_) => Err(ReadError::Storage(self.storage_error())),
            }
        }
    }

    impl SyncRepository for FakeRepository {
        async fn push_workout(
            &self,
            _session: &Session,
            _workout: &Workout,
        ) -> Result<RemoteWorkoutID, SyncError> {
            match self.reject_with {
                None => Ok("w-1".into()),
                Some(_) => Err(SyncError::Storage(self.storage_error())),
            }
        }

        async fn pull_workouts(&self, _session: &Session) -> Result<Vec<SyncedWorkout>, SyncError> {
            match self.reject_with {
                None => Ok(vec![]),
                Some(_) => Err(SyncError::Storage(self.storage_error())),
            }
        }

        async fn delete_remote_workout(
            &self,
            _session: &Session,
            id: &RemoteWorkoutID,
        ) -> Result<RemoteWorkoutID, DeleteError> {
            match self.reject_with {
                None => Ok(id.clone()),
                Some(_) => Err(DeleteError::Storage(self.storage_error())),
            }
        }
    }

    fn workout() -> Workout {
        Workout::new(
            "Push Day",
            Utc.with_ymd_and_hms(2025, 11, 9, 18, 30, 0).unwrap(),
            Duration::new(1, 30).unwrap(),
            RPE::SEVEN,
            ActivityKind::Strength,
            vec![],
        )
    }

    #[tokio::test]
    async fn test_login_stores_session() {
        let mut service = Service::new(FakeRepository::accepting());

        assert!(service.session().is_none());
        let session = service.login("a@example.com", "secret").await.unwrap();
        assert_eq!(service.session(), Some(&session));

        service.logout();
        assert!(service.session().is_none());
    }

    #[tokio::test]
    async fn test_register_stores_session() {
        let mut service = Service::new(FakeRepository::accepting());

        let session = service.register("a@example.com", "secret").await.unwrap();
        assert_eq!(service.session(), Some(&session));
    }

    #[tokio::test]
    async fn test_push_workout_requires_session() {
        let mut service = Service::new(FakeRepository::accepting());

        assert!(matches!(
            service.push_workout(&workout()).await,
            Err(SyncError::Storage(StorageError::NoSession))
        ));
    }

    #[tokio::test]
    async fn test_push_workout() {
        let mut service = Service::new(FakeRepository::accepting());

        service.login("a@example.com", "secret").await.unwrap();
        assert_eq!(
            service.push_workout(&workout()).await.unwrap(),
            "w-1".into()
        );
    }

    #[tokio::test]
    async fn test_invalid_session_is_discarded() {
        let mut service = Service::new(FakeRepository::accepting());
        service.login("a@example.com", "secret").await.unwrap();

        let mut service = Service {
            repository: FakeRepository::rejecting(StorageError::NoSession),
            session: service.session,
        };

        assert!(service.push_workout(&workout()).await.is_err());
        assert!(service.session().is_none());
    }

    #[rstest]
    #[case(StorageError::NoConnection)]
    #[case(StorageError::Rejected(String::from("bad request")))]
    #[tokio::test]
    async fn test_other_errors_keep_session(#[case] error: StorageError) {
        let mut service = Service::new(FakeRepository::accepting());
        service.login("a@example.com", "secret").await.unwrap();

        let mut service = Service {
            repository: FakeRepository::rejecting(error),
            session: service.session,
        };

        assert!(service.pull_workouts().await.is_err());
        assert!(service.session().is_some());
    }
}
