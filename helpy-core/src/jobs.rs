//! Job store: lifecycle and queries for posted jobs.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use tokio::sync::RwLock;
use tracing::info;

use crate::error::StoreError;
use crate::types::{Job, JobId, JobQuery, JobStatus, NewJob};

/// Persistence interface for jobs.
#[async_trait]
pub trait JobStore: Send + Sync + 'static {
    async fn get(&self, id: JobId) -> Result<Job, StoreError>;

    /// Jobs matching `query`, ordered by id.
    async fn list(&self, query: &JobQuery) -> Result<Vec<Job>, StoreError>;

    async fn create(&self, job: NewJob) -> Result<Job, StoreError>;

    /// Replace the client-supplied fields of a job. Status, helper and creation date are kept.
    async fn update(&self, id: JobId, job: NewJob) -> Result<Job, StoreError>;

    async fn delete(&self, id: JobId) -> Result<(), StoreError>;

    /// Move a job to `CLOSED`. Closing a closed job is a no-op.
    async fn close(&self, id: JobId) -> Result<Job, StoreError>;

    /// Record `email` as the job's helper. An open job moves to `IN_PROGRESS`.
    async fn assign_helper(&self, id: JobId, email: &str) -> Result<Job, StoreError>;
}

#[derive(Debug)]
struct JobStoreState {
    next_id: JobId,
    jobs: BTreeMap<JobId, Job>,
}

impl Default for JobStoreState {
    fn default() -> Self {
        Self {
            next_id: 1,
            jobs: BTreeMap::new(),
        }
    }
}

impl JobStoreState {
    #[inline]
    fn get_mut(&mut self, id: JobId) -> Result<&mut Job, StoreError> {
        self.jobs.get_mut(&id).ok_or(StoreError::JobNotFound(id))
    }
}

/// Job store held in memory. Ids are assigned sequentially starting at 1.
#[derive(Clone, Default)]
pub struct InMemoryJobStore {
    state: Arc<RwLock<JobStoreState>>,
}

impl fmt::Debug for InMemoryJobStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryJobStore")
            .field("state", &"<RwLock<JobStoreState>>")
            .finish()
    }
}

impl InMemoryJobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully-formed job, keeping its id. Used when loading seed data.
    pub async fn insert(&self, job: Job) {
        let mut state = self.state.write().await;
        if job.id >= state.next_id {
            state.next_id = job.id + 1;
        }
        state.jobs.insert(job.id, job);
    }

    /// Create a job with an explicit creation date.
    pub async fn create_on(&self, job: NewJob, created: NaiveDate) -> Job {
        let mut state = self.state.write().await;
        let id = state.next_id;
        state.next_id += 1;
        let job = Job::from_new(id, job, created);
        state.jobs.insert(id, job.clone());
        job
    }
}

#[async_trait]
impl JobStore for InMemoryJobStore {
    async fn get(&self, id: JobId) -> Result<Job, StoreError> {
        let state = self.state.read().await;
        state.jobs.get(&id).cloned().ok_or(StoreError::JobNotFound(id))
    }

    async fn list(&self, query: &JobQuery) -> Result<Vec<Job>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .jobs
            .values()
            .filter(|job| query.matches(job))
            .cloned()
            .collect())
    }

    async fn create(&self, job: NewJob) -> Result<Job, StoreError> {
        let job = self.create_on(job, Utc::now().date_naive()).await;
        info!(job_id = job.id, author = %job.author, "job created");
        Ok(job)
    }

    async fn update(&self, id: JobId, job: NewJob) -> Result<Job, StoreError> {
        let mut state = self.state.write().await;
        let existing = state.get_mut(id)?;
        existing.title = job.title;
        existing.description = job.description;
        existing.author = job.author;
        existing.due_date = job.due_date;
        existing.categories = job.categories;
        existing.tags = job.tags;
        Ok(existing.clone())
    }

    async fn delete(&self, id: JobId) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        state
            .jobs
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::JobNotFound(id))
    }

    async fn close(&self, id: JobId) -> Result<Job, StoreError> {
        let mut state = self.state.write().await;
        let job = state.get_mut(id)?;
        job.status = JobStatus::Closed;
        info!(job_id = id, "job closed");
        Ok(job.clone())
    }

    async fn assign_helper(&self, id: JobId, email: &str) -> Result<Job, StoreError> {
        let mut state = self.state.write().await;
        let job = state.get_mut(id)?;
        job.matched_helper = Some(email.to_string());
        if job.status == JobStatus::Open {
            job.status = JobStatus::InProgress;
        }
        info!(job_id = id, helper = %email, status = %job.status, "helper assigned");
        Ok(job.clone())
    }
}
