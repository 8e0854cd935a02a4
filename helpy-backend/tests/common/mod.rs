#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use helpy_backend::state::AppState;
use helpy_core::{Category, InMemoryJobStore, InMemoryUserDirectory, NewJob, User, UserRole, Weekday};
use helpy_matcher::MatchingPipeline;
use serde_json::Value;
use tower::util::ServiceExt;

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Four helpers with fixed availability plus one seeker.
pub fn avengers() -> InMemoryUserDirectory {
    let mut thor = User::new("thor@email.com", UserRole::Seeker);
    thor.availability.insert(Weekday::Wednesday);
    InMemoryUserDirectory::with_users([
        User::helper("leandro@email.com", [Weekday::Wednesday, Weekday::Friday]),
        User::helper("hawkeye@email.com", [Weekday::Wednesday]),
        User::helper("spidey@email.com", [Weekday::Tuesday, Weekday::Wednesday]),
        User::helper("ironman@email.com", [Weekday::Monday]),
        thor,
    ])
}

/// Router over in-memory stores holding one job (id 1) due Wednesday 2020-10-14.
pub async fn test_app(criteria: &[&str]) -> (Router, InMemoryJobStore) {
    let jobs = InMemoryJobStore::new();
    jobs.create_on(
        NewJob::new("Groceries", "thor@email.com")
            .due_on(date(2020, 10, 14))
            .with_categories([Category::new("errands").unwrap()]),
        date(2020, 10, 1),
    )
    .await;

    let state = AppState::new(
        Arc::new(jobs.clone()),
        Arc::new(avengers()),
        MatchingPipeline::from_names(criteria).unwrap(),
        4096,
    );
    (helpy_backend::build_router(Arc::new(state)), jobs)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(v) => builder
            .header("content-type", "application/json")
            .body(Body::from(v.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

pub fn emails(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("array body")
        .iter()
        .map(|u| u["email"].as_str().unwrap().to_string())
        .collect()
}
