//! Ordered composition of criteria.

use std::sync::Arc;

use helpy_core::Job;
use tracing::debug;

use crate::criteria::{criterion_by_name, MatchCriterion};
use crate::error::MatchError;
use crate::pool::CandidatePool;

/// Criteria applied left to right, each narrowing the previous stage's output.
///
/// Every stage returns a subset of its input, so the order only affects how
/// quickly the pool shrinks. Put the most selective criteria first.
#[derive(Debug, Clone, Default)]
pub struct MatchingPipeline {
    criteria: Vec<Arc<dyn MatchCriterion>>,
}

impl MatchingPipeline {
    pub fn new(criteria: Vec<Arc<dyn MatchCriterion>>) -> Self {
        Self { criteria }
    }

    pub fn builder() -> MatchingPipelineBuilder {
        MatchingPipelineBuilder::default()
    }

    /// Build a pipeline from configured criterion names, in order.
    pub fn from_names<I, S>(names: I) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let criteria = names
            .into_iter()
            .map(|name| criterion_by_name(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(criteria))
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.criteria.iter().map(|c| c.name()).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Run every stage over `pool`. Stops at the first stage that leaves nobody.
    pub fn run(&self, job: &Job, pool: CandidatePool) -> Result<CandidatePool, MatchError> {
        let mut current = pool;
        for criterion in &self.criteria {
            if current.is_empty() {
                debug!(job_id = job.id, stage = criterion.name(), "pool empty, skipping remaining stages");
                break;
            }
            let before = current.len();
            current = criterion.filter(job, current)?;
            debug!(
                job_id = job.id,
                stage = criterion.name(),
                before,
                after = current.len(),
                "matching stage applied"
            );
        }
        Ok(current)
    }
}

/// Incremental construction of a [`MatchingPipeline`].
#[derive(Debug, Default)]
pub struct MatchingPipelineBuilder {
    criteria: Vec<Arc<dyn MatchCriterion>>,
}

impl MatchingPipelineBuilder {
    pub fn with<C: MatchCriterion + 'static>(mut self, criterion: C) -> Self {
        self.criteria.push(Arc::new(criterion));
        self
    }

    pub fn build(self) -> MatchingPipeline {
        MatchingPipeline::new(self.criteria)
    }
}
