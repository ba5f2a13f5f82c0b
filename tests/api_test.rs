use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode};
use course_catalog::{
    api::router,
    db::MemoryKvStore,
    models::{CatalogStats, Course, Enrollment, User},
    repository::CatalogStore,
    state::AppState,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn setup_app() -> Router {
    let store = CatalogStore::new(Arc::new(MemoryKvStore::new()));
    store.initialize_demo_data().await.expect("Failed to seed");
    router(AppState::new(store))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app.clone().oneshot(request).await.expect("Request failed");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    (status, bytes.to_vec())
}

fn parse<T: DeserializeOwned>(bytes: &[u8]) -> T {
    serde_json::from_slice(bytes).expect("Failed to parse response")
}

async fn login(app: &Router, email: &str, role: &str) -> StatusCode {
    let (status, _) = send(
        app,
        Method::POST,
        "/auth/login",
        Some(json!({ "email": email, "password": "whatever", "role": role })),
    )
    .await;
    status
}

#[tokio::test]
async fn test_health() {
    let app = setup_app().await;
    let (status, _) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_list_seeded_courses() {
    let app = setup_app().await;
    let (status, body) = send(&app, Method::GET, "/courses", None).await;
    assert_eq!(status, StatusCode::OK);

    let courses: Vec<Course> = parse(&body);
    let ids: Vec<&str> = courses.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn test_course_json_uses_stored_layout() {
    let app = setup_app().await;
    let (_, body) = send(&app, Method::GET, "/courses?search=python&category=Programming", None).await;

    let courses: Value = parse(&body);
    assert_eq!(courses.as_array().map(Vec::len), Some(1));
    assert_eq!(courses[0]["level"], "Beginner");
    assert_eq!(courses[0]["students"], 2847);
    assert_eq!(courses[0]["modules"][0], "Introduction to Programming Concepts");
}

#[tokio::test]
async fn test_categories() {
    let app = setup_app().await;
    let (status, body) = send(&app, Method::GET, "/courses/categories", None).await;
    assert_eq!(status, StatusCode::OK);

    let categories: Vec<String> = parse(&body);
    assert_eq!(categories, vec!["all", "Programming", "Data Science", "Web Development"]);
}

#[tokio::test]
async fn test_login_portals() {
    let app = setup_app().await;

    assert_eq!(login(&app, "student@demo.com", "student").await, StatusCode::OK);
    let (status, body) = send(&app, Method::GET, "/auth/me", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse::<User>(&body).id, "student1");

    assert_eq!(login(&app, "student@demo.com", "admin").await, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, Method::GET, "/auth/me", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    assert_eq!(login(&app, "nobody@demo.com", "student").await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_role_mismatch_message() {
    let app = setup_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        Some(json!({ "email": "admin@courseplatform.com", "password": "x", "role": "student" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let error: Value = parse(&body);
    assert_eq!(error["message"], "This account is not registered as a student.");
}

#[tokio::test]
async fn test_register_then_duplicate() {
    let app = setup_app().await;
    let payload = json!({ "name": "Jane", "email": "jane@x.com", "password": "pw" });

    let (status, body) = send(&app, Method::POST, "/auth/register", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);
    let jane: User = parse(&body);
    assert!(jane.enrolled_courses.is_empty());

    let (_, body) = send(&app, Method::GET, "/auth/me", None).await;
    assert_eq!(parse::<User>(&body), jane);

    let (status, _) = send(&app, Method::POST, "/auth/register", Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(&app, Method::GET, "/users", None).await;
    assert_eq!(parse::<Vec<User>>(&body).len(), 3);
}

#[tokio::test]
async fn test_create_course_requires_admin_session() {
    let app = setup_app().await;
    let payload = json!({
        "title": "Rust for Backends",
        "description": "Async services with axum",
        "instructor": "Kim Lee",
        "duration": "10 weeks",
        "level": "Advanced",
        "price": 249,
        "category": "Programming",
        "modules": ["Ownership", "", "Async"]
    });

    let (status, _) = send(&app, Method::POST, "/courses", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    login(&app, "student@demo.com", "student").await;
    let (status, _) = send(&app, Method::POST, "/courses", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    login(&app, "admin@courseplatform.com", "admin").await;
    let (status, body) = send(&app, Method::POST, "/courses", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    let course: Course = parse(&body);
    assert_eq!(course.modules, vec!["Ownership", "Async"]);
    assert_eq!(course.students, 0);

    let (_, body) = send(&app, Method::GET, "/courses", None).await;
    assert_eq!(parse::<Vec<Course>>(&body).len(), 4);
}

#[tokio::test]
async fn test_enroll_and_unenroll_flow() {
    let app = setup_app().await;
    login(&app, "student@demo.com", "student").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/enrollments",
        Some(json!({ "studentId": "student1", "courseId": "1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let enrollment: Enrollment = parse(&body);
    assert_eq!(enrollment.progress, 0);

    let (_, body) = send(&app, Method::GET, "/auth/me", None).await;
    assert_eq!(parse::<User>(&body).enrolled_courses, vec!["1"]);

    let (_, body) = send(&app, Method::GET, "/users/student1/courses", None).await;
    assert_eq!(parse::<Vec<Course>>(&body).len(), 1);

    let (_, body) = send(&app, Method::GET, "/courses?student_id=student1", None).await;
    let available: Vec<Course> = parse(&body);
    assert!(available.iter().all(|c| c.id != "1"));

    let (status, _) = send(
        &app,
        Method::POST,
        "/enrollments",
        Some(json!({ "studentId": "student1", "courseId": "1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&app, Method::DELETE, "/enrollments/student1/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, Method::GET, "/enrollments", None).await;
    assert!(parse::<Vec<Enrollment>>(&body).is_empty());
    let (_, body) = send(&app, Method::GET, "/users/student1", None).await;
    assert!(parse::<User>(&body).enrolled_courses.is_empty());
}

#[tokio::test]
async fn test_enroll_unknown_course() {
    let app = setup_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/enrollments",
        Some(json!({ "studentId": "student1", "courseId": "404" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let error: Value = parse(&body);
    assert_eq!(error["message"], "Not Found");
}

#[tokio::test]
async fn test_stats_for_admin() {
    let app = setup_app().await;
    let (status, _) = send(&app, Method::GET, "/stats", None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    send(
        &app,
        Method::POST,
        "/enrollments",
        Some(json!({ "studentId": "student1", "courseId": "2" })),
    )
    .await;

    login(&app, "admin@courseplatform.com", "admin").await;
    let (status, body) = send(&app, Method::GET, "/stats", None).await;
    assert_eq!(status, StatusCode::OK);
    let stats: CatalogStats = parse(&body);
    assert_eq!(stats.total_courses, 3);
    assert_eq!(stats.total_enrollments, 1);
}

#[tokio::test]
async fn test_logout() {
    let app = setup_app().await;
    login(&app, "student@demo.com", "student").await;

    let (status, _) = send(&app, Method::POST, "/auth/logout", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, "/auth/me", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_corrupt_bucket_is_a_server_error() {
    let kv = Arc::new(MemoryKvStore::new());
    let store = CatalogStore::new(kv.clone());
    store.initialize_demo_data().await.expect("Failed to seed");
    course_catalog::db::KvStore::set(kv.as_ref(), "courseSystem_courses", "{not json")
        .await
        .expect("Failed to corrupt");

    let app = router(AppState::new(store));
    let (status, _) = send(&app, Method::GET, "/courses", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
