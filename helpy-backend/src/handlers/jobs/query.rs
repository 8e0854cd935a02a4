//! Job listing endpoints. Each one maps onto a single [`JobQuery`] filter.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::Json;
use helpy_core::{parse_date, Category, Job, JobQuery, JobStatus, Tag};
use serde_json::Value;

use crate::dto::labels;
use crate::handlers::utils::path_param;
use crate::{error::ApiError, state::AppState};

async fn list(state: &AppState, query: JobQuery) -> Result<Json<Vec<Job>>, ApiError> {
    Ok(Json(state.jobs.list(&query).await?))
}

/// GET /job/all
pub async fn all(Extension(state): Extension<Arc<AppState>>) -> Result<Json<Vec<Job>>, ApiError> {
    list(&state, JobQuery::all()).await
}

/// GET /job/status/{status}
pub async fn by_status(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
) -> Result<Json<Vec<Job>>, ApiError> {
    let status = path_param(&path, "status")?
        .parse::<JobStatus>()
        .map_err(ApiError::bad_request)?;
    list(&state, JobQuery::by_status(status)).await
}

/// GET /job/author/{author}
pub async fn by_author(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
) -> Result<Json<Vec<Job>>, ApiError> {
    let author = path_param(&path, "author")?;
    list(&state, JobQuery::by_author(author)).await
}

/// GET /job/helper/{helper}
pub async fn by_helper(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
) -> Result<Json<Vec<Job>>, ApiError> {
    let helper = path_param(&path, "helper")?;
    list(&state, JobQuery::by_matched_helper(helper)).await
}

/// GET /job/category/{category}
pub async fn by_category(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
) -> Result<Json<Vec<Job>>, ApiError> {
    let category = Category::new(path_param(&path, "category")?)?;
    list(&state, JobQuery::by_categories([category])).await
}

/// POST /job/categories
/// Body is a JSON array of category names; jobs having any of them match.
/// An empty array matches nothing.
pub async fn by_categories(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Vec<Job>>, ApiError> {
    let names: Vec<String> = serde_json::from_value(body)?;
    let mut issues = Vec::new();
    let categories = labels(&mut issues, "categories", names, |n| Category::new(n));
    if !issues.is_empty() {
        return Err(issues.into());
    }
    if categories.is_empty() {
        return Ok(Json(Vec::new()));
    }
    list(&state, JobQuery::by_categories(categories)).await
}

/// GET /job/tag/{tag}
pub async fn by_tag(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
) -> Result<Json<Vec<Job>>, ApiError> {
    let tag = Tag::new(path_param(&path, "tag")?)?;
    list(&state, JobQuery::by_tags([tag])).await
}

/// POST /job/tags
pub async fn by_tags(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Vec<Job>>, ApiError> {
    let names: Vec<String> = serde_json::from_value(body)?;
    let mut issues = Vec::new();
    let tags = labels(&mut issues, "tags", names, |n| Tag::new(n));
    if !issues.is_empty() {
        return Err(issues.into());
    }
    if tags.is_empty() {
        return Ok(Json(Vec::new()));
    }
    list(&state, JobQuery::by_tags(tags)).await
}

/// GET /job/date/{date}
/// Jobs created on the given `YYYY-MM-DD` date.
pub async fn by_date(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
) -> Result<Json<Vec<Job>>, ApiError> {
    let date = parse_date(path_param(&path, "date")?)?;
    list(&state, JobQuery::by_created(date)).await
}
