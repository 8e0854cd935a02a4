use std::fmt;
use std::sync::Arc;

use helpy_core::{JobStore, UserDirectory};
use helpy_matcher::{MatchingEngine, MatchingPipeline};

/// Shared application state passed to every route handler.
#[derive(Clone)]
pub struct AppState {
    pub jobs: Arc<dyn JobStore>,
    pub directory: Arc<dyn UserDirectory>,
    pub engine: MatchingEngine,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire the stores and the matching pipeline into one state container.
    pub fn new(
        jobs: Arc<dyn JobStore>,
        directory: Arc<dyn UserDirectory>,
        pipeline: MatchingPipeline,
        parallel_threshold: usize,
    ) -> Self {
        let engine = MatchingEngine::new(jobs.clone(), directory.clone(), pipeline)
            .with_parallel_threshold(parallel_threshold);
        Self {
            jobs,
            directory,
            engine,
        }
    }
}
