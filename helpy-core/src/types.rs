//! Core types shared by the job store, the user directory and the matcher.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Numeric job identity assigned by the job store.
pub type JobId = u64;

/// Day of the week, numbered Monday = 1 .. Sunday = 7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Self::Monday,
        Self::Tuesday,
        Self::Wednesday,
        Self::Thursday,
        Self::Friday,
        Self::Saturday,
        Self::Sunday,
    ];

    /// Weekday of a Gregorian calendar date.
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }

    /// ISO 8601 weekday number (1..=7).
    #[inline]
    pub const fn iso_number(self) -> u8 {
        self as u8 + 1
    }

    pub fn from_iso_number(n: u8) -> Option<Self> {
        Self::ALL.get(usize::from(n).checked_sub(1)?).copied()
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Monday => "MONDAY",
            Self::Tuesday => "TUESDAY",
            Self::Wednesday => "WEDNESDAY",
            Self::Thursday => "THURSDAY",
            Self::Friday => "FRIDAY",
            Self::Saturday => "SATURDAY",
            Self::Sunday => "SUNDAY",
        })
    }
}

macro_rules! label_type {
    ($(#[$meta:meta])* $name:ident, $kind:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Build a label, trimming whitespace. Blank names are rejected.
            pub fn new(name: impl AsRef<str>) -> Result<Self, StoreError> {
                let trimmed = name.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(StoreError::invalid_job_data(concat!($kind, " name must not be blank")));
                }
                Ok(Self(trimmed.to_string()))
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = StoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

label_type!(
    /// Subject-matter classification of a job or a helper's competence.
    Category,
    "category"
);

label_type!(
    /// Fine-grained label on a job or a helper profile.
    Tag,
    "tag"
);

/// Lifecycle state of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum JobStatus {
    Open,
    InProgress,
    Closed,
}

impl JobStatus {
    /// Closed jobs are not actionable and never get helpers suggested.
    #[inline]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Closed => "CLOSED",
        })
    }
}

impl FromStr for JobStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().replace('-', "_").as_str() {
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "CLOSED" => Ok(Self::Closed),
            other => Err(format!("unknown job status: {other}")),
        }
    }
}

/// Account role. Helpers and admins can accept jobs; seekers only post them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    #[default]
    Seeker,
    Helper,
    Admin,
}

impl UserRole {
    #[inline]
    pub const fn is_helper_eligible(self) -> bool {
        matches!(self, Self::Helper | Self::Admin)
    }
}

/// A registered user with the attributes the matcher reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub availability: BTreeSet<Weekday>,
    #[serde(default)]
    pub categories: BTreeSet<Category>,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
    #[serde(default)]
    pub role: UserRole,
}

impl User {
    pub fn new(email: impl Into<String>, role: UserRole) -> Self {
        Self {
            email: email.into(),
            first_name: String::new(),
            last_name: String::new(),
            availability: BTreeSet::new(),
            categories: BTreeSet::new(),
            tags: BTreeSet::new(),
            role,
        }
    }

    /// Convenience constructor for a helper available on the given days.
    pub fn helper(email: impl Into<String>, days: impl IntoIterator<Item = Weekday>) -> Self {
        let mut user = Self::new(email, UserRole::Helper);
        user.availability.extend(days);
        user
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories.extend(categories);
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags.extend(tags);
        self
    }

    #[inline]
    pub fn is_helper_eligible(&self) -> bool {
        self.role.is_helper_eligible()
    }

    #[inline]
    pub fn is_available_on(&self, day: Weekday) -> bool {
        self.availability.contains(&day)
    }
}

/// Fields a client supplies when creating or replacing a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub author: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub categories: BTreeSet<Category>,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
}

impl NewJob {
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            author: author.into(),
            due_date: None,
            categories: BTreeSet::new(),
            tags: BTreeSet::new(),
        }
    }

    pub fn due_on(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(date);
        self
    }

    pub fn with_categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories.extend(categories);
        self
    }

    pub fn with_tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.tags.extend(tags);
        self
    }
}

/// A persisted job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub author: String,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub categories: BTreeSet<Category>,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
    pub status: JobStatus,
    #[serde(default)]
    pub matched_helper: Option<String>,
    pub created: NaiveDate,
}

impl Job {
    /// Build an open job from client-supplied fields.
    pub fn from_new(id: JobId, new: NewJob, created: NaiveDate) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            author: new.author,
            due_date: new.due_date,
            categories: new.categories,
            tags: new.tags,
            status: JobStatus::Open,
            matched_helper: None,
            created,
        }
    }

    /// Weekday the job is due on.
    pub fn due_weekday(&self) -> Result<Weekday, StoreError> {
        self.due_date
            .map(Weekday::of)
            .ok_or_else(|| StoreError::invalid_job_data(format!("job {} has no due date", self.id)))
    }
}

/// Parse a `YYYY-MM-DD` date string.
pub fn parse_date(raw: &str) -> Result<NaiveDate, StoreError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|e| StoreError::invalid_job_data(format!("invalid date {raw:?}: {e}")))
}

/// Filter applied by [`JobStore::list`](crate::JobStore::list). Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobQuery {
    pub status: Option<JobStatus>,
    pub author: Option<String>,
    pub matched_helper: Option<String>,
    /// Job must carry at least one of these categories.
    pub any_category: BTreeSet<Category>,
    /// Job must carry at least one of these tags.
    pub any_tag: BTreeSet<Tag>,
    pub created: Option<NaiveDate>,
}

impl JobQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_status(status: JobStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn by_author(author: impl Into<String>) -> Self {
        Self {
            author: Some(author.into()),
            ..Self::default()
        }
    }

    pub fn by_matched_helper(email: impl Into<String>) -> Self {
        Self {
            matched_helper: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn by_categories(categories: impl IntoIterator<Item = Category>) -> Self {
        Self {
            any_category: categories.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn by_tags(tags: impl IntoIterator<Item = Tag>) -> Self {
        Self {
            any_tag: tags.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn by_created(date: NaiveDate) -> Self {
        Self {
            created: Some(date),
            ..Self::default()
        }
    }

    pub fn matches(&self, job: &Job) -> bool {
        if self.status.is_some_and(|s| s != job.status) {
            return false;
        }
        if self.author.as_deref().is_some_and(|a| a != job.author) {
            return false;
        }
        if let Some(helper) = self.matched_helper.as_deref() {
            if job.matched_helper.as_deref() != Some(helper) {
                return false;
            }
        }
        if !self.any_category.is_empty() && self.any_category.is_disjoint(&job.categories) {
            return false;
        }
        if !self.any_tag.is_empty() && self.any_tag.is_disjoint(&job.tags) {
            return false;
        }
        if self.created.is_some_and(|d| d != job.created) {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_date_is_wednesday() {
        let date = parse_date("2020-10-14").unwrap();
        assert_eq!(Weekday::of(date), Weekday::Wednesday);
        assert_eq!(Weekday::of(date).iso_number(), 3);
    }

    #[test]
    fn weekday_derivation_is_deterministic() {
        let start = NaiveDate::from_ymd_opt(1999, 12, 27).unwrap();
        for offset in 0..800 {
            let date = start + chrono::Duration::days(offset);
            let first = Weekday::of(date);
            assert_eq!(first, Weekday::of(date));
            assert_eq!(
                u32::from(first.iso_number()),
                date.weekday().number_from_monday()
            );
        }
    }

    #[test]
    fn iso_numbers_round_trip_bounds() {
        assert_eq!(Weekday::from_iso_number(1), Some(Weekday::Monday));
        assert_eq!(Weekday::from_iso_number(7), Some(Weekday::Sunday));
        assert_eq!(Weekday::from_iso_number(0), None);
        assert_eq!(Weekday::from_iso_number(8), None);
    }

    #[test]
    fn blank_labels_are_rejected() {
        assert!(Category::new("   ").is_err());
        assert_eq!(Tag::new("  garden ").unwrap().as_str(), "garden");
        let parsed: Result<Category, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());
    }

    #[test]
    fn user_sets_deduplicate() {
        let user: User = serde_json::from_str(
            r#"{"email":"a@b.c","availability":["MONDAY","MONDAY","FRIDAY"],"role":"HELPER"}"#,
        )
        .unwrap();
        assert_eq!(user.availability.len(), 2);
        assert!(user.is_helper_eligible());
    }

    #[test]
    fn missing_due_date_is_invalid_job_data() {
        let job = Job::from_new(
            7,
            NewJob::new("paint", "a@b.c"),
            NaiveDate::from_ymd_opt(2020, 10, 1).unwrap(),
        );
        assert!(matches!(
            job.due_weekday(),
            Err(StoreError::InvalidJobData(_))
        ));
    }

    #[test]
    fn unparseable_date_is_invalid_job_data() {
        assert!(matches!(
            parse_date("2020-13-45"),
            Err(StoreError::InvalidJobData(_))
        ));
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("in_progress".parse::<JobStatus>().unwrap(), JobStatus::InProgress);
        assert_eq!("Closed".parse::<JobStatus>().unwrap(), JobStatus::Closed);
        assert!("done".parse::<JobStatus>().is_err());
    }

    #[test]
    fn query_matches_any_category() {
        let garden = Category::new("garden").unwrap();
        let job = Job::from_new(
            1,
            NewJob::new("mow", "a@b.c").with_categories([garden.clone()]),
            NaiveDate::from_ymd_opt(2020, 10, 1).unwrap(),
        );
        let query = JobQuery::by_categories([garden, Category::new("it").unwrap()]);
        assert!(query.matches(&job));
        assert!(!JobQuery::by_categories([Category::new("it").unwrap()]).matches(&job));
        assert!(JobQuery::all().matches(&job));
    }
}
