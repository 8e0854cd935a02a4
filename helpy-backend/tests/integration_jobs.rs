mod common;

use axum::http::{Method, StatusCode};
use common::{send, test_app};
use serde_json::json;

#[tokio::test]
async fn health_is_ok() {
    let (app, _) = test_app(&["weekday"]).await;
    let (status, _) = send(&app, Method::GET, "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn create_read_update_delete() {
    let (app, _) = test_app(&["weekday"]).await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/job/add",
        Some(json!({
            "title": "Walk the dog",
            "author": "thor@email.com",
            "dueDate": "2020-10-16",
            "tags": ["pets"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 2);
    assert_eq!(created["status"], "OPEN");
    assert_eq!(created["dueDate"], "2020-10-16");

    let (status, fetched) = send(&app, Method::GET, "/api/job/id/2", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["title"], "Walk the dog");

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/job/update/2",
        Some(json!({
            "title": "Walk both dogs",
            "author": "thor@email.com",
            "dueDate": "2020-10-16"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Walk both dogs");
    assert_eq!(updated["created"], fetched["created"]);

    let (status, _) = send(&app, Method::DELETE, "/api/job/remove/2", None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, "/api/job/id/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, "/api/job/remove/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn invalid_payload_reports_each_field() {
    let (app, _) = test_app(&["weekday"]).await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/job/add",
        Some(json!({ "title": "  ", "dueDate": "next tuesday" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let validation = &body["validation"];
    assert_eq!(validation["title"]["code"], "missing");
    assert_eq!(validation["author"]["code"], "missing");
    assert_eq!(validation["dueDate"]["code"], "invalid_date");
}

#[tokio::test]
async fn non_numeric_id_is_bad_request() {
    let (app, _) = test_app(&["weekday"]).await;
    let (status, _) = send(&app, Method::GET, "/api/job/id/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_queries_filter_jobs() {
    let (app, _) = test_app(&["weekday"]).await;
    send(
        &app,
        Method::POST,
        "/api/job/add",
        Some(json!({
            "title": "Fix bike",
            "author": "hawkeye@email.com",
            "dueDate": "2020-10-20",
            "categories": ["repairs"],
            "tags": ["bike"]
        })),
    )
    .await;

    let count = |v: &serde_json::Value| v.as_array().unwrap().len();

    let (_, all) = send(&app, Method::GET, "/api/job/all", None).await;
    assert_eq!(count(&all), 2);

    let (_, by_author) = send(&app, Method::GET, "/api/job/author/thor@email.com", None).await;
    assert_eq!(count(&by_author), 1);

    let (_, open) = send(&app, Method::GET, "/api/job/status/open", None).await;
    assert_eq!(count(&open), 2);
    let (status, _) = send(&app, Method::GET, "/api/job/status/pending", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, errands) = send(&app, Method::GET, "/api/job/category/errands", None).await;
    assert_eq!(errands[0]["title"], "Groceries");

    let (_, either) = send(
        &app,
        Method::POST,
        "/api/job/categories",
        Some(json!(["errands", "repairs"])),
    )
    .await;
    assert_eq!(count(&either), 2);

    let (_, none) = send(&app, Method::POST, "/api/job/categories", Some(json!([]))).await;
    assert_eq!(count(&none), 0);

    let (_, bike) = send(&app, Method::GET, "/api/job/tag/bike", None).await;
    assert_eq!(bike[0]["title"], "Fix bike");

    let (status, _) = send(&app, Method::POST, "/api/job/tags", Some(json!(["bike", " "]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, on_date) = send(&app, Method::GET, "/api/job/date/2020-10-01", None).await;
    assert_eq!(count(&on_date), 1);
    let (status, _) = send(&app, Method::GET, "/api/job/date/yesterday", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
