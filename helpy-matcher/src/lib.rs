//! Helper matching engine.
//!
//! Given a job, computes the set of helper-eligible users who can take it by
//! running a pipeline of independent criteria over the user population.
//!
//! # Architecture
//!
//! - [`MatchCriterion`] - One filter strategy (weekday, category, tag, ...)
//! - [`MatchingPipeline`] - Ordered criteria applied as successive intersections
//! - [`MatchingEngine`] - Resolves job and candidates, then runs the pipeline
//! - [`CandidatePool`] - Deduplicated set of users passed between stages
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use helpy_core::{InMemoryJobStore, InMemoryUserDirectory};
//! use helpy_matcher::{MatchingEngine, MatchingPipeline, WeekdayCriterion};
//!
//! #[tokio::main]
//! async fn main() {
//!     let pipeline = MatchingPipeline::builder().with(WeekdayCriterion).build();
//!     let engine = MatchingEngine::new(
//!         Arc::new(InMemoryJobStore::new()),
//!         Arc::new(InMemoryUserDirectory::new()),
//!         pipeline,
//!     );
//!
//!     match engine.find_potential_helpers(1).await {
//!         Ok(helpers) => println!("{} helpers", helpers.len()),
//!         Err(e) => eprintln!("matching failed: {e}"),
//!     }
//! }
//! ```

mod criteria;
mod engine;
mod error;
mod pipeline;
mod pool;

pub use criteria::{
    criterion_by_name, criterion_names, CategoryCriterion, MatchCriterion, TagCriterion,
    WeekdayCriterion,
};
pub use engine::MatchingEngine;
pub use error::MatchError;
pub use pipeline::{MatchingPipeline, MatchingPipelineBuilder};
pub use pool::{CandidatePool, DEFAULT_PARALLEL_THRESHOLD};
