use std::sync::Arc;

use axum::{
    extract::Extension,
    response::IntoResponse,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers::jobs::{crud, matching, query};
use crate::state::AppState;

/// Build the primary axum router with the provided shared application state.
pub fn build_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/job/all", get(query::all))
        .route("/job/add", post(crud::add))
        .route("/job/remove/{id}", delete(crud::remove))
        .route("/job/update/{id}", put(crud::update))
        .route("/job/close/{id}", put(crud::close))
        .route("/job/id/{id}", get(crud::get))
        .route("/job/id/{id}/find-helper", get(matching::find_helper))
        .route("/job/id/{id}/set-helper/{mail}", put(matching::set_helper))
        .route("/job/status/{status}", get(query::by_status))
        .route("/job/author/{author}", get(query::by_author))
        .route("/job/helper/{helper}", get(query::by_helper))
        .route("/job/category/{category}", get(query::by_category))
        .route("/job/categories", post(query::by_categories))
        .route("/job/tag/{tag}", get(query::by_tag))
        .route("/job/tags", post(query::by_tags))
        .route("/job/date/{date}", get(query::by_date))
        .route("/health", get(health_handler))
        .layer(Extension(state));

    Router::new()
        .nest("/api", router)
        .layer(TraceLayer::new_for_http())
}

async fn health_handler() -> impl IntoResponse {
    (axum::http::StatusCode::OK, "OK")
}
