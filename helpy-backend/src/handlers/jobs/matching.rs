use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Extension, Path};
use axum::Json;
use helpy_core::Job;
use helpy_matcher::CandidatePool;

use crate::handlers::utils::{job_id, path_param};
use crate::{error::ApiError, state::AppState};

/// GET /job/id/{id}/find-helper
/// Helpers who could take the job. An empty list is a normal answer.
pub async fn find_helper(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
) -> Result<Json<CandidatePool>, ApiError> {
    let id = job_id(&path)?;
    let helpers = state.engine.find_potential_helpers(id).await?;
    Ok(Json(helpers))
}

/// PUT /job/id/{id}/set-helper/{mail}
pub async fn set_helper(
    Extension(state): Extension<Arc<AppState>>,
    Path(path): Path<HashMap<String, String>>,
) -> Result<Json<Job>, ApiError> {
    let id = job_id(&path)?;
    let mail = path_param(&path, "mail")?;
    let job = state.engine.assign_helper(id, mail).await?;
    Ok(Json(job))
}
