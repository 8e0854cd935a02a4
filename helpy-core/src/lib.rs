//! Domain model and storage seams for the Helpy job marketplace.
//!
//! # Architecture
//!
//! - [`Job`] / [`User`] - The records the matcher reads
//! - [`JobStore`] - Job lifecycle and queries
//! - [`UserDirectory`] - Read access to the user population
//! - [`InMemoryJobStore`] / [`InMemoryUserDirectory`] - In-memory implementations
//! - [`Seed`] - JSON seed data for the in-memory stores
//!
//! # Example
//!
//! ```rust,no_run
//! use helpy_core::{InMemoryJobStore, JobStore, NewJob};
//!
//! #[tokio::main]
//! async fn main() {
//!     let store = InMemoryJobStore::new();
//!     let job = store.create(NewJob::new("Walk the dog", "seeker@email.com")).await.unwrap();
//!     println!("created job {}", job.id);
//! }
//! ```

mod directory;
mod error;
mod jobs;
mod seed;
mod types;

pub use directory::{InMemoryUserDirectory, UserDirectory};
pub use error::StoreError;
pub use jobs::{InMemoryJobStore, JobStore};
pub use seed::{Seed, SeedError};
pub use types::{
    parse_date, Category, Job, JobId, JobQuery, JobStatus, NewJob, Tag, User, UserRole, Weekday,
};

// Re-export async_trait for implementors of the store traits
pub use async_trait::async_trait;
