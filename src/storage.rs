use async_trait::async_trait;
use sql_middleware::middleware::ConfigAndPool;
use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::model::{
    AppSettings, Course, Player, Round, RoundAndLastSaved, delete_course_from_db,
    delete_player_from_db, delete_round_from_db, get_course_from_db, get_courses_from_db,
    get_player_from_db, get_players_from_db, get_round_from_db, get_rounds_from_db,
    get_settings_from_db, insert_course_in_db, insert_player_in_db, save_settings_in_db,
    upsert_round_in_db,
};

#[derive(Debug, Clone)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for StorageError {}

impl From<String> for StorageError {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for StorageError {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Persistence seam for everything the app keeps. The scoring engine and the
/// handlers only see this trait, so tests can run against any backing store.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn list_rounds(&self) -> Result<Vec<Round>, StorageError>;
    async fn get_round(&self, round_id: i64) -> Result<Option<RoundAndLastSaved>, StorageError>;
    /// Upsert keyed by `round_id`; 0 inserts. Returns the persisted id.
    async fn save_round(&self, round: &Round) -> Result<i64, StorageError>;
    async fn delete_round(&self, round_id: i64) -> Result<(), StorageError>;
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError>;
    async fn get_course(&self, course_id: i64) -> Result<Option<Course>, StorageError>;
    async fn insert_course(&self, course: &Course) -> Result<i64, StorageError>;
    async fn delete_course(&self, course_id: i64) -> Result<(), StorageError>;
    async fn list_players(&self) -> Result<Vec<Player>, StorageError>;
    async fn get_player(&self, player_id: i64) -> Result<Option<Player>, StorageError>;
    async fn insert_player(&self, name: &str) -> Result<(), StorageError>;
    async fn delete_player(&self, player_id: i64) -> Result<(), StorageError>;
    async fn get_settings(&self) -> Result<AppSettings, StorageError>;
    async fn save_settings(&self, settings: AppSettings) -> Result<(), StorageError>;
}

#[derive(Clone)]
pub struct SqlStorage {
    config_and_pool: ConfigAndPool,
}

impl SqlStorage {
    #[must_use]
    pub fn new(config_and_pool: ConfigAndPool) -> Self {
        Self { config_and_pool }
    }

    #[must_use]
    pub fn config_and_pool(&self) -> &ConfigAndPool {
        &self.config_and_pool
    }
}

#[async_trait]
impl Storage for SqlStorage {
    async fn list_rounds(&self) -> Result<Vec<Round>, StorageError> {
        get_rounds_from_db(&self.config_and_pool)
            .await
            .map_err(|e| StorageError::new(e.to_string()))
    }

    async fn get_round(&self, round_id: i64) -> Result<Option<RoundAndLastSaved>, StorageError> {
        get_round_from_db(&self.config_and_pool, round_id)
            .await
            .map_err(|e| StorageError::new(e.to_string()))
    }

    async fn save_round(&self, round: &Round) -> Result<i64, StorageError> {
        upsert_round_in_db(&self.config_and_pool, round)
            .await
            .map_err(|e| StorageError::new(e.to_string()))
    }

    async fn delete_round(&self, round_id: i64) -> Result<(), StorageError> {
        delete_round_from_db(&self.config_and_pool, round_id)
            .await
            .map_err(|e| StorageError::new(e.to_string()))
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        get_courses_from_db(&self.config_and_pool)
            .await
            .map_err(|e| StorageError::new(e.to_string()))
    }

    async fn get_course(&self, course_id: i64) -> Result<Option<Course>, StorageError> {
        get_course_from_db(&self.config_and_pool, course_id)
            .await
            .map_err(|e| StorageError::new(e.to_string()))
    }

    async fn insert_course(&self, course: &Course) -> Result<i64, StorageError> {
        insert_course_in_db(&self.config_and_pool, course)
            .await
            .map_err(|e| StorageError::new(e.to_string()))
    }

    async fn delete_course(&self, course_id: i64) -> Result<(), StorageError> {
        delete_course_from_db(&self.config_and_pool, course_id)
            .await
            .map_err(|e| StorageError::new(e.to_string()))
    }

    async fn list_players(&self) -> Result<Vec<Player>, StorageError> {
        get_players_from_db(&self.config_and_pool)
            .await
            .map_err(|e| StorageError::new(e.to_string()))
    }

    async fn get_player(&self, player_id: i64) -> Result<Option<Player>, StorageError> {
        get_player_from_db(&self.config_and_pool, player_id)
            .await
            .map_err(|e| StorageError::new(e.to_string()))
    }

    async fn insert_player(&self, name: &str) -> Result<(), StorageError> {
        insert_player_in_db(&self.config_and_pool, name)
            .await
            .map_err(|e| StorageError::new(e.to_string()))
    }

    async fn delete_player(&self, player_id: i64) -> Result<(), StorageError> {
        delete_player_from_db(&self.config_and_pool, player_id)
            .await
            .map_err(|e| StorageError::new(e.to_string()))
    }

    async fn get_settings(&self) -> Result<AppSettings, StorageError> {
        get_settings_from_db(&self.config_and_pool)
            .await
            .map_err(|e| StorageError::new(e.to_string()))
    }

    async fn save_settings(&self, settings: AppSettings) -> Result<(), StorageError> {
        save_settings_in_db(&self.config_and_pool, settings)
            .await
            .map_err(|e| StorageError::new(e.to_string()))
    }
}

/// One async mutex per round id. Every mutation of a round runs its whole
/// load-modify-save cycle under that round's lock, so a slow earlier write
/// can never clobber a later one. Locks for different rounds stay independent.
#[derive(Clone, Default)]
pub struct RoundLocks {
    locks: Arc<RwLock<HashMap<i64, Arc<Mutex<()>>>>>,
}

impl RoundLocks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock_for(&self, round_id: i64) -> Arc<Mutex<()>> {
        if let Some(lock) = self.locks.read().await.get(&round_id) {
            return lock.clone();
        }

        let mut map = self.locks.write().await;
        map.entry(round_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the lock entry once a round is deleted.
    pub async fn forget(&self, round_id: i64) {
        self.locks.write().await.remove(&round_id);
    }
}
