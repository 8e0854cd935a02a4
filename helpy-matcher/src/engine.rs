//! Matching engine: the entry point used by the job layer.

use std::fmt;
use std::sync::Arc;

use helpy_core::{Job, JobId, JobStore, UserDirectory};
use tracing::{debug, info};

use crate::error::MatchError;
use crate::pipeline::MatchingPipeline;
use crate::pool::{CandidatePool, DEFAULT_PARALLEL_THRESHOLD};

/// Resolves jobs and candidates, then runs the pipeline.
///
/// Holds only shared handles and the immutable pipeline; every call reads a
/// fresh snapshot and nothing is cached between calls.
#[derive(Clone)]
pub struct MatchingEngine {
    jobs: Arc<dyn JobStore>,
    directory: Arc<dyn UserDirectory>,
    pipeline: Arc<MatchingPipeline>,
    parallel_threshold: usize,
}

impl fmt::Debug for MatchingEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchingEngine")
            .field("jobs", &"<dyn JobStore>")
            .field("directory", &"<dyn UserDirectory>")
            .field("pipeline", &self.pipeline.names())
            .field("parallel_threshold", &self.parallel_threshold)
            .finish()
    }
}

impl MatchingEngine {
    pub fn new(
        jobs: Arc<dyn JobStore>,
        directory: Arc<dyn UserDirectory>,
        pipeline: MatchingPipeline,
    ) -> Self {
        Self {
            jobs,
            directory,
            pipeline: Arc::new(pipeline),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    /// Pool size from which criteria filter in parallel.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Helpers eligible for the job with id `job_id`.
    ///
    /// An empty set is a valid answer. Fails only when the job does not exist
    /// or its data cannot be evaluated.
    pub async fn find_potential_helpers(&self, job_id: JobId) -> Result<CandidatePool, MatchError> {
        let job = self.jobs.get(job_id).await?;
        self.find_potential_helpers_for(&job).await
    }

    /// Same as [`find_potential_helpers`](Self::find_potential_helpers) for a job snapshot.
    pub async fn find_potential_helpers_for(&self, job: &Job) -> Result<CandidatePool, MatchError> {
        if job.status.is_closed() {
            debug!(job_id = job.id, "job is closed, no helpers suggested");
            return Ok(CandidatePool::new());
        }

        let pool = CandidatePool::from_users(self.directory.find_helper_eligible().await?)
            .with_parallel_threshold(self.parallel_threshold);
        let candidates = pool.len();
        let helpers = self.pipeline.run(job, pool)?;

        info!(
            job_id = job.id,
            candidates,
            matched = helpers.len(),
            "potential helpers computed"
        );
        Ok(helpers)
    }

    /// Record `user_email` as the job's helper.
    ///
    /// The assignment is authoritative: the user need not satisfy the
    /// matching criteria, but both the user and the job must exist.
    pub async fn assign_helper(&self, job_id: JobId, user_email: &str) -> Result<Job, MatchError> {
        let user = self.directory.find_by_id(user_email).await?;
        self.jobs.get(job_id).await?;
        let job = self.jobs.assign_helper(job_id, &user.email).await?;
        info!(job_id, helper = %user.email, "helper assigned to job");
        Ok(job)
    }
}
