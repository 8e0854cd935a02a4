//! Candidate pool: the set of users a criterion narrows.

use std::collections::BTreeMap;

use helpy_core::User;
use rayon::prelude::*;
use serde::{Serialize, Serializer};

/// Pools at or above this size are filtered on the rayon thread pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 4096;

/// Set of users keyed by email, so each helper appears at most once and
/// iteration order never depends on how the pool was built.
#[derive(Debug, Clone)]
pub struct CandidatePool {
    users: BTreeMap<String, User>,
    parallel_threshold: usize,
}

impl Default for CandidatePool {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl CandidatePool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_users(users: impl IntoIterator<Item = User>) -> Self {
        users.into_iter().collect()
    }

    /// Set the pool size from which [`retain`](Self::retain) runs in parallel. Zero is treated as one.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold.max(1);
        self
    }

    #[inline]
    pub fn parallel_threshold(&self) -> usize {
        self.parallel_threshold
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.users.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    #[inline]
    pub fn contains(&self, email: &str) -> bool {
        self.users.contains_key(email)
    }

    pub fn get(&self, email: &str) -> Option<&User> {
        self.users.get(email)
    }

    pub fn iter(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    pub fn emails(&self) -> impl Iterator<Item = &str> {
        self.users.keys().map(String::as_str)
    }

    /// True when every user in `self` is also in `other`.
    pub fn is_subset(&self, other: &CandidatePool) -> bool {
        self.users.keys().all(|email| other.contains(email))
    }

    /// Keep only the users satisfying `predicate`.
    pub fn retain<F>(self, predicate: F) -> Self
    where
        F: Fn(&User) -> bool + Sync + Send,
    {
        let parallel_threshold = self.parallel_threshold;
        let users = if self.users.len() >= parallel_threshold {
            self.users
                .into_par_iter()
                .filter(|(_, user)| predicate(user))
                .collect()
        } else {
            self.users
                .into_iter()
                .filter(|(_, user)| predicate(user))
                .collect()
        };
        Self {
            users,
            parallel_threshold,
        }
    }
}

/// Pools are equal when they hold the same users; the threshold only affects how they are filtered.
impl PartialEq for CandidatePool {
    fn eq(&self, other: &Self) -> bool {
        self.users == other.users
    }
}

impl Eq for CandidatePool {}

impl FromIterator<User> for CandidatePool {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        Self {
            users: iter.into_iter().map(|u| (u.email.clone(), u)).collect(),
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl IntoIterator for CandidatePool {
    type Item = User;
    type IntoIter = std::collections::btree_map::IntoValues<String, User>;

    fn into_iter(self) -> Self::IntoIter {
        self.users.into_values()
    }
}

impl Serialize for CandidatePool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.users.values())
    }
}
