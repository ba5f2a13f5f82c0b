use axum::Json;
use axum::extract::{Path, Query};
use axum::routing::{delete, post};
use axum::{Router, extract::State, http::StatusCode, routing::get};
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::models::*;
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/categories", get(list_categories))
        .route("/stats", get(stats))
        .route("/users", get(list_users))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}/courses", get(list_enrolled_courses))
        .route("/enrollments", get(list_enrollments).post(enroll))
        .route("/enrollments/{student_id}/{course_id}", delete(unenroll))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.get_current_user().await?;
    Ok(StatusCode::OK)
}

async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseQuery>,
) -> Result<Json<Vec<Course>>, AppError> {
    let courses = state.courses().search(&query).await?;
    Ok(Json(courses))
}

async fn create_course(
    State(state): State<AppState>,
    Json(req): Json<NewCourseRequest>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    state.auth().require_admin().await?;
    let course = state.courses().create_course(req).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(state.courses().categories().await?))
}

async fn stats(State(state): State<AppState>) -> Result<Json<CatalogStats>, AppError> {
    state.auth().require_admin().await?;
    Ok(Json(state.courses().stats().await?))
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(state.store.get_users().await?))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    let user = state.store.get_user(&id).await?.ok_or(AppError::NotFound)?;
    Ok(Json(user))
}

async fn list_enrolled_courses(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Course>>, AppError> {
    Ok(Json(state.enrollments().enrolled_courses(&id).await?))
}

async fn list_enrollments(State(state): State<AppState>) -> Result<Json<Vec<Enrollment>>, AppError> {
    Ok(Json(state.store.get_enrollments().await?))
}

async fn enroll(
    State(state): State<AppState>,
    Json(req): Json<EnrollRequest>,
) -> Result<(StatusCode, Json<Enrollment>), AppError> {
    let enrollment = state.enrollments().enroll(&req.student_id, &req.course_id).await?;
    Ok((StatusCode::CREATED, Json(enrollment)))
}

async fn unenroll(
    State(state): State<AppState>,
    Path((student_id, course_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    state.enrollments().unenroll(&student_id, &course_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = state.auth().register(&req.name, &req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<User>, AppError> {
    let user = state.auth().login_as(&req.email, &req.password, req.role).await?;
    Ok(Json(user))
}

async fn logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.auth().logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn me(State(state): State<AppState>) -> Result<Json<User>, AppError> {
    let user = state.auth().current_user().await?.ok_or(AppError::NotFound)?;
    Ok(Json(user))
}
