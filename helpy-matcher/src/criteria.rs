//! Matching criteria.
//!
//! A criterion narrows a [`CandidatePool`] for a given [`Job`]. Criteria hold no
//! per-request state, so one instance is shared by every match request.

use std::fmt;
use std::sync::Arc;

use helpy_core::Job;
use tracing::trace;

use crate::error::MatchError;
use crate::pool::CandidatePool;

/// A single filter over (job, candidate).
pub trait MatchCriterion: fmt::Debug + Send + Sync {
    /// Stable name used in configuration and logs.
    fn name(&self) -> &'static str;

    /// Return the subset of `candidates` satisfying this criterion.
    ///
    /// An empty pool yields an empty pool. Job data the criterion cannot
    /// evaluate yields [`MatchError::InvalidJobData`].
    fn filter(&self, job: &Job, candidates: CandidatePool) -> Result<CandidatePool, MatchError>;
}

/// Criterion names accepted by [`criterion_by_name`].
pub mod criterion_names {
    pub const WEEKDAY: &str = "weekday";
    pub const CATEGORY: &str = "category";
    pub const TAG: &str = "tag";

    pub const ALL: [&str; 3] = [WEEKDAY, CATEGORY, TAG];
}

/// Build a criterion from its configured name.
pub fn criterion_by_name(name: &str) -> Result<Arc<dyn MatchCriterion>, MatchError> {
    match name.trim().to_ascii_lowercase().as_str() {
        criterion_names::WEEKDAY => Ok(Arc::new(WeekdayCriterion)),
        criterion_names::CATEGORY => Ok(Arc::new(CategoryCriterion)),
        criterion_names::TAG => Ok(Arc::new(TagCriterion)),
        _ => Err(MatchError::UnknownCriterion(name.to_string())),
    }
}

/// Keeps helpers available on the weekday the job is due.
#[derive(Debug, Default, Clone, Copy)]
pub struct WeekdayCriterion;

impl MatchCriterion for WeekdayCriterion {
    fn name(&self) -> &'static str {
        criterion_names::WEEKDAY
    }

    fn filter(&self, job: &Job, candidates: CandidatePool) -> Result<CandidatePool, MatchError> {
        if candidates.is_empty() {
            return Ok(candidates);
        }
        let day = job.due_weekday()?;
        trace!(job_id = job.id, weekday = %day, "filtering by due weekday");
        Ok(candidates.retain(|user| user.is_available_on(day)))
    }
}

/// Keeps helpers sharing at least one category with the job.
#[derive(Debug, Default, Clone, Copy)]
pub struct CategoryCriterion;

impl MatchCriterion for CategoryCriterion {
    fn name(&self) -> &'static str {
        criterion_names::CATEGORY
    }

    fn filter(&self, job: &Job, candidates: CandidatePool) -> Result<CandidatePool, MatchError> {
        Ok(candidates.retain(|user| !user.categories.is_disjoint(&job.categories)))
    }
}

/// Keeps helpers sharing at least one tag with the job.
#[derive(Debug, Default, Clone, Copy)]
pub struct TagCriterion;

impl MatchCriterion for TagCriterion {
    fn name(&self) -> &'static str {
        criterion_names::TAG
    }

    fn filter(&self, job: &Job, candidates: CandidatePool) -> Result<CandidatePool, MatchError> {
        Ok(candidates.retain(|user| !user.tags.is_disjoint(&job.tags)))
    }
}
