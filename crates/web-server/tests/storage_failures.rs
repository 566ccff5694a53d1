//! Storage failures must surface as a generic 500 page.

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use core_types::{NewStudent, Student, StudentId};
use database::{DbError, StudentStore};
use std::sync::Arc;
use tower::ServiceExt;
use web_server::{AppState, build_router};

/// A store whose database is unreachable.
struct UnreachableStore;

fn pool_timeout() -> DbError {
    DbError::ConnectionError(sqlx::Error::PoolTimedOut)
}

#[async_trait]
impl StudentStore for UnreachableStore {
    async fn list_all(&self) -> Result<Vec<Student>, DbError> {
        Err(pool_timeout())
    }

    async fn create(&self, _student: NewStudent) -> Result<Student, DbError> {
        Err(pool_timeout())
    }

    async fn find_by_id(&self, _id: StudentId) -> Result<Student, DbError> {
        Err(pool_timeout())
    }

    async fn update(&self, _student: Student) -> Result<Student, DbError> {
        Err(pool_timeout())
    }

    async fn delete(&self, _id: StudentId) -> Result<bool, DbError> {
        Err(pool_timeout())
    }
}

fn app() -> Router {
    let state = AppState::new(Arc::new(UnreachableStore)).expect("templates compile");
    build_router(Arc::new(state))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn assert_generic_server_error(request: Request<Body>) {
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("An internal database error occurred"));
    assert!(!html.contains(&pool_timeout().to_string()));
    assert!(!html.contains(&sqlx::Error::PoolTimedOut.to_string()));
}

#[tokio::test]
async fn list_reports_storage_failure_as_500() {
    assert_generic_server_error(get("/Student/List")).await;
}

#[tokio::test]
async fn create_submit_reports_storage_failure_as_500() {
    assert_generic_server_error(post_form(
        "/Student/Create",
        "FullName=Ann+Lee&Email=ann%40example.com&Course=Math&Age=20",
    ))
    .await;
}

#[tokio::test]
async fn edit_form_reports_storage_failure_as_500() {
    assert_generic_server_error(get("/Student/Edit/1")).await;
}

#[tokio::test]
async fn edit_submit_reports_storage_failure_as_500() {
    assert_generic_server_error(post_form(
        "/Student/Edit",
        "Id=1&FullName=Ann+Lee&Email=ann%40example.com&Course=Physics&Age=20",
    ))
    .await;
}

#[tokio::test]
async fn delete_confirmation_reports_storage_failure_as_500() {
    assert_generic_server_error(get("/Student/Delete/1")).await;
}

#[tokio::test]
async fn delete_submit_reports_storage_failure_as_500() {
    assert_generic_server_error(post_form("/Student/Delete", "Id=1")).await;
}
