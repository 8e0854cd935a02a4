//! Request bodies and their validation.

use helpy_core::{parse_date, Category, NewJob, Tag};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// One rejected field of a request body.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    pub code: &'static str,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code,
            message: message.into(),
        }
    }
}

/// Render issues as `{"validation": {field: {code, message}}}`.
pub fn to_payload(issues: &[ValidationIssue]) -> serde_json::Value {
    let map: serde_json::Map<String, serde_json::Value> = issues
        .iter()
        .map(|issue| {
            (
                issue.field.clone(),
                serde_json::json!({ "code": issue.code, "message": issue.message }),
            )
        })
        .collect();
    serde_json::json!({ "validation": map })
}

impl From<Vec<ValidationIssue>> for ApiError {
    fn from(issues: Vec<ValidationIssue>) -> Self {
        ApiError::Validation(to_payload(&issues))
    }
}

/// Job payload accepted by the add and update endpoints.
///
/// Every field is optional at the serde level so that missing values are
/// reported as validation issues rather than as a parse failure.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    #[serde(alias = "due_date", alias = "date")]
    pub due_date: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl JobDto {
    /// Check the payload and convert it into the store representation.
    pub fn into_new_job(self) -> Result<NewJob, Vec<ValidationIssue>> {
        let mut issues = Vec::new();

        let title = required(&mut issues, "title", self.title);
        let author = required(&mut issues, "author", self.author);

        let due_date = match self.due_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match parse_date(raw) {
                Ok(date) => Some(date),
                Err(_) => {
                    issues.push(ValidationIssue::new(
                        "dueDate",
                        "invalid_date",
                        format!("dueDate must be YYYY-MM-DD, got {raw:?}"),
                    ));
                    None
                }
            },
        };

        let categories = labels(&mut issues, "categories", self.categories, |n| Category::new(n));
        let tags = labels(&mut issues, "tags", self.tags, |n| Tag::new(n));

        if !issues.is_empty() {
            return Err(issues);
        }

        let mut job = NewJob::new(title, author)
            .with_categories(categories)
            .with_tags(tags);
        job.description = self.description.unwrap_or_default();
        job.due_date = due_date;
        Ok(job)
    }
}

fn required(issues: &mut Vec<ValidationIssue>, field: &str, value: Option<String>) -> String {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => v,
        _ => {
            issues.push(ValidationIssue::new(
                field,
                "missing",
                format!("{field} is required"),
            ));
            String::new()
        }
    }
}

/// Parse label names, recording one issue per blank entry.
pub fn labels<T, E>(
    issues: &mut Vec<ValidationIssue>,
    field: &str,
    raw: Vec<String>,
    parse: impl Fn(&str) -> Result<T, E>,
) -> Vec<T> {
    raw.iter()
        .enumerate()
        .filter_map(|(idx, name)| match parse(name.as_str()) {
            Ok(label) => Some(label),
            Err(_) => {
                issues.push(ValidationIssue::new(
                    format!("{field}[{idx}]"),
                    "empty",
                    format!("{field} entries cannot be blank"),
                ));
                None
            }
        })
        .collect()
}
