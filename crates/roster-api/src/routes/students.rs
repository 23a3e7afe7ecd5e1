use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::Response,
    routing::{get, put},
    Extension, Json, Router,
};
use roster_client::ClientError;
use roster_types::{SessionToken, Student, StudentDraft, StudentId};
use tracing::info;

use crate::middleware::auth::{error_response, require_api_auth, AppState};

pub fn routes(_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/students", get(list_students).post(create_student))
        .route(
            "/api/v1/students/:id",
            put(update_student).delete(delete_student),
        )
        .route_layer(middleware::from_fn(require_api_auth))
}

fn client_failure(e: ClientError) -> Response {
    let status = match &e {
        ClientError::Unauthorized => StatusCode::UNAUTHORIZED,
        ClientError::MissingId => StatusCode::BAD_REQUEST,
        ClientError::InvalidUrl(_) => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_GATEWAY,
    };
    error_response(status, e.user_message())
}

async fn list_students(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
) -> Result<Json<Vec<Student>>, Response> {
    let students = state
        .api
        .list_students(&token)
        .await
        .map_err(client_failure)?;
    Ok(Json(students))
}

async fn create_student(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Json(draft): Json<StudentDraft>,
) -> Result<(StatusCode, Json<Student>), Response> {
    let student = draft
        .validate()
        .map_err(|e| error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let created = state
        .api
        .create_student(&token, &student)
        .await
        .map_err(client_failure)?;
    info!("created student {}", created.name);
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_student(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<String>,
    Json(draft): Json<StudentDraft>,
) -> Result<Json<Student>, Response> {
    let student = draft
        .validate()
        .map_err(|e| error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;

    let updated = state
        .api
        .update_student(&token, &StudentId(id), &student)
        .await
        .map_err(client_failure)?;
    info!("updated student {}", updated.id);
    Ok(Json(updated))
}

async fn delete_student(
    State(state): State<AppState>,
    Extension(token): Extension<SessionToken>,
    Path(id): Path<String>,
) -> Result<StatusCode, Response> {
    let id = StudentId(id);
    state
        .api
        .delete_student(&token, &id)
        .await
        .map_err(client_failure)?;
    info!("deleted student {id}");
    Ok(StatusCode::NO_CONTENT)
}
