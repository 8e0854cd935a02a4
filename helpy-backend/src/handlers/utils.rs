use std::collections::HashMap;

use helpy_core::JobId;

use crate::error::ApiError;

/// Fetch a required path parameter.
pub fn path_param<'a>(path: &'a HashMap<String, String>, name: &str) -> Result<&'a str, ApiError> {
    path.get(name)
        .map(String::as_str)
        .ok_or_else(|| ApiError::bad_request(format!("missing {name} path parameter")))
}

/// Parse the `id` path parameter as a job id.
pub fn job_id(path: &HashMap<String, String>) -> Result<JobId, ApiError> {
    let raw = path_param(path, "id")?;
    raw.trim()
        .parse::<JobId>()
        .map_err(|_| ApiError::bad_request(format!("id must be a non-negative integer, got {raw:?}")))
}
