//! Seed data loading for the in-memory stores.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::directory::InMemoryUserDirectory;
use crate::jobs::InMemoryJobStore;
use crate::types::{Job, User};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Users and jobs loaded at startup.
#[derive(Debug, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub jobs: Vec<Job>,
}

impl Seed {
    pub fn from_json(s: &str) -> Result<Self, SeedError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SeedError> {
        let s = fs::read_to_string(path)?;
        Self::from_json(&s)
    }

    /// Copy the seed into the given stores.
    pub async fn apply(self, directory: &InMemoryUserDirectory, jobs: &InMemoryJobStore) {
        let (user_count, job_count) = (self.users.len(), self.jobs.len());
        for user in self.users {
            directory.upsert(user).await;
        }
        for job in self.jobs {
            jobs.insert(job).await;
        }
        info!(users = user_count, jobs = job_count, "seed data applied");
    }
}
