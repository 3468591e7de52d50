use crate::storage::StorageError;
use sql_middleware::SqlMiddlewareDbError;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum PartrackError {
    #[error("db error: {0}")]
    Db(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("{0}")]
    Other(String),
}

impl From<StorageError> for PartrackError {
    fn from(err: StorageError) -> Self {
        Self::Db(err.to_string())
    }
}

impl From<SqlMiddlewareDbError> for PartrackError {
    fn from(err: SqlMiddlewareDbError) -> Self {
        Self::Db(err.to_string())
    }
}

impl From<serde_json::Error> for PartrackError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<std::num::ParseIntError> for PartrackError {
    fn from(err: std::num::ParseIntError) -> Self {
        Self::Parse(err.to_string())
    }
}

impl From<String> for PartrackError {
    fn from(err: String) -> Self {
        Self::Other(err)
    }
}

impl From<&str> for PartrackError {
    fn from(err: &str) -> Self {
        Self::Other(err.to_string())
    }
}
