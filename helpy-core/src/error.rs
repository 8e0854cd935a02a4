//! Error types for the job store and user directory.

use thiserror::Error;

use crate::types::JobId;

/// Errors that may occur while reading or writing jobs and users.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("job not found: {0}")]
    JobNotFound(JobId),

    #[error("user not found: {0}")]
    UserNotFound(String),

    #[error("invalid job data: {0}")]
    InvalidJobData(String),

    #[error("store is unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn invalid_job_data(message: impl Into<String>) -> Self {
        Self::InvalidJobData(message.into())
    }
}
