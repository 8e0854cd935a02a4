//! Turn a resolved [`Config`] into application state.

use std::sync::Arc;

use helpy_config::Config;
use helpy_core::{InMemoryJobStore, InMemoryUserDirectory, Seed, SeedError};
use helpy_matcher::{MatchError, MatchingPipeline};
use thiserror::Error;

use crate::state::AppState;

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("failed to load seed data: {0}")]
    Seed(#[from] SeedError),
    #[error("invalid matching configuration: {0}")]
    Matching(#[from] MatchError),
}

/// Build the pipeline named by `matching.criteria`.
pub fn pipeline_from_config(cfg: &Config) -> Result<MatchingPipeline, MatchError> {
    MatchingPipeline::from_names(&cfg.matching.criteria)
}

/// Create the in-memory stores, apply the seed file if one is configured, and
/// build the state shared by the handlers.
pub async fn build_state(cfg: &Config) -> Result<AppState, BootstrapError> {
    let pipeline = pipeline_from_config(cfg)?;
    let directory = InMemoryUserDirectory::new();
    let jobs = InMemoryJobStore::new();

    if let Some(path) = &cfg.directory.seed_path {
        tracing::info!(seed_path = %path, "loading seed data");
        Seed::load(path)?.apply(&directory, &jobs).await;
    }

    tracing::info!(
        criteria = ?pipeline.names(),
        parallel_threshold = cfg.matching.parallel_threshold,
        "matching pipeline configured"
    );

    Ok(AppState::new(
        Arc::new(jobs),
        Arc::new(directory),
        pipeline,
        cfg.matching.parallel_threshold,
    ))
}
