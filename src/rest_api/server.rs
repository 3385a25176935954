//! # REST API HTTP Server
//!
//! Axum-based HTTP adapter over [`CourseService`].
//!
//! # Endpoints
//!
//! - `GET /health` - liveness probe, no key
//! - `GET /api/v1/` - API root
//! - `GET /api/v1/courses` - all courses
//! - `GET|POST|PUT|DELETE /api/v1/courses/:course_id` - single course

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::course::Course;

use super::errors::ApiResult;
use super::response::Outcome;
use super::service::CourseService;

/// Query parameter carrying the shared key
pub const KEY_PARAM: &str = "key";

/// REST API server state
pub struct RestServer {
    service: Arc<CourseService>,
}

/// Shared state type
type ServerState = Arc<CourseService>;

impl RestServer {
    pub fn new(service: CourseService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Build the Axum router
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/api/v1", get(home_handler))
            .route("/api/v1/", get(home_handler))
            .route("/api/v1/courses", get(list_handler))
            .route(
                "/api/v1/courses/:course_id",
                get(get_handler)
                    .post(create_handler)
                    .put(upsert_handler)
                    .delete(delete_handler),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(self.service.clone())
    }

    /// Serve until the listener fails
    pub async fn start(self, addr: SocketAddr) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(addr).await?;
        info!(%addr, "Course API listening");
        axum::serve(listener, self.router()).await
    }
}

fn supplied_key(query: &HashMap<String, String>) -> Option<&str> {
    query.get(KEY_PARAM).map(String::as_str)
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn home_handler(
    State(service): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<&'static str> {
    service.home(supplied_key(&query))
}

async fn list_handler(
    State(service): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<Course>>> {
    service.list(supplied_key(&query)).map(Json)
}

async fn get_handler(
    State(service): State<ServerState>,
    Path(course_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<Course>> {
    service.get(supplied_key(&query), &course_id).map(Json)
}

async fn create_handler(
    State(service): State<ServerState>,
    Path(course_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> ApiResult<Outcome> {
    service.create(supplied_key(&query), &course_id, &body)
}

async fn upsert_handler(
    State(service): State<ServerState>,
    Path(course_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    body: Bytes,
) -> ApiResult<Outcome> {
    service.upsert(supplied_key(&query), &course_id, &body)
}

async fn delete_handler(
    State(service): State<ServerState>,
    Path(course_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Outcome> {
    service.delete(supplied_key(&query), &course_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::auth::ApiKey;
    use crate::store::InMemoryCourseStore;

    fn create_test_router() -> Router {
        let service = CourseService::new(Arc::new(InMemoryCourseStore::new()), ApiKey::new("k"));
        RestServer::new(service).router()
    }

    async fn send(router: &Router, method: &str, uri: &str, body: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_health_needs_no_key() {
        let router = create_test_router();
        let (status, _) = send(&router, "GET", "/health", "").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_home() {
        let router = create_test_router();

        let (status, body) = send(&router, "GET", "/api/v1/?key=k", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"Welcome to the REST API!");

        let (status, _) = send(&router, "GET", "/api/v1/", "").await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_invalid_course_id_has_empty_body() {
        let router = create_test_router();
        let (status, body) = send(&router, "GET", "/api/v1/courses/abc?key=k", "").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.is_empty());
    }

    #[tokio::test]
    async fn test_unauthorized_body_is_json() {
        let router = create_test_router();
        let (status, body) = send(&router, "DELETE", "/api/v1/courses/CSE1001?key=x", "").await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Invalid key");
        assert_eq!(json["code"], 401);
    }

    #[tokio::test]
    async fn test_put_status_codes() {
        let router = create_test_router();
        let payload = r#"{"Title":"Intro to Systems","Lecturer":"Jane Doe","ClassSize":50}"#;

        let (status, body) = send(&router, "PUT", "/api/v1/courses/CSE1001?key=k", payload).await;
        assert_eq!(status, StatusCode::CREATED);
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Course added: CSE1001");

        let (status, _) = send(&router, "PUT", "/api/v1/courses/CSE1001?key=k", payload).await;
        assert_eq!(status, StatusCode::ACCEPTED);

        let (status, _) = send(&router, "PUT", "/api/v1/courses/CSE1001?key=k", "[]").await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
