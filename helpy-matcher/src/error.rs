//! Errors surfaced by criteria, the pipeline and the engine.

use helpy_core::{JobId, StoreError};
use thiserror::Error;

/// Errors that may occur while matching helpers to a job.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("job not found: {0}")]
    JobNotFound(JobId),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("invalid job data: {0}")]
    InvalidJobData(String),

    #[error("directory unavailable: {0}")]
    Directory(String),

    #[error("unknown matching criterion: {0}")]
    UnknownCriterion(String),
}

impl From<StoreError> for MatchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::JobNotFound(id) => Self::JobNotFound(id),
            StoreError::UserNotFound(email) => Self::UserNotFound(email),
            StoreError::InvalidJobData(msg) => Self::InvalidJobData(msg),
            StoreError::Unavailable(msg) => Self::Directory(msg),
        }
    }
}
