use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;
use helpy_core::Job;
use serde_json::{json, Value};

use crate::dto::JobDto;
use crate::handlers::utils::job_id;
use crate::{error::ApiError, state::AppState};

/// POST /job/add
pub async fn add(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Job>), ApiError> {
    let new_job = serde_json::from_value::<JobDto>(body)?.into_new_job()?;
    let job = state.jobs.create(new_job).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /job/id/{id}
pub async fn get(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
) -> Result<Json<Job>, ApiError> {
    let id = job_id(&path)?;
    Ok(Json(state.jobs.get(id).await?))
}

/// PUT /job/update/{id}
/// Replace the client-editable fields; status, helper and creation date stay.
pub async fn update(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Result<Json<Job>, ApiError> {
    let id = job_id(&path)?;
    let new_job = serde_json::from_value::<JobDto>(body)?.into_new_job()?;
    let job = state.jobs.update(id, new_job).await?;
    tracing::info!(job_id = id, "job updated");
    Ok(Json(job))
}

/// PUT /job/close/{id}
pub async fn close(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
) -> Result<Json<Job>, ApiError> {
    let id = job_id(&path)?;
    Ok(Json(state.jobs.close(id).await?))
}

/// DELETE /job/remove/{id}
pub async fn remove(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let id = job_id(&path)?;
    state.jobs.delete(id).await?;
    tracing::info!(job_id = id, "job removed");
    Ok(Json(json!({ "deleted": id })))
}
