use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Redirect, Response},
    routing::post,
    Router,
};
use roster_client::{ClientError, StudentApi};
use roster_types::Credentials;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::session::{cookie_token, request_token, SessionSettings};

#[derive(Clone)]
pub struct AppState {
    pub api: StudentApi,
    pub session: SessionSettings,
}

#[derive(Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

pub fn auth_routes(_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/auth/login", post(handle_login))
        .route("/api/v1/auth/logout", post(handle_logout))
}

async fn handle_login(State(state): State<AppState>, Json(body): Json<LoginRequest>) -> Response {
    let credentials = match Credentials::new(&body.email, &body.password) {
        Ok(c) => c,
        Err(e) => return error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
    };

    let token = match state.api.login(&credentials).await {
        Ok(token) => token,
        Err(ClientError::Status { status, message }) if (400..500).contains(&status) => {
            return error_response(StatusCode::UNAUTHORIZED, message);
        }
        Err(e) => {
            warn!("login failed: {e}");
            return error_response(StatusCode::BAD_GATEWAY, e.user_message());
        }
    };

    info!("signed in {}", credentials.email);
    with_cookie(state.session.cookie(&token))
}

async fn handle_logout(State(state): State<AppState>) -> Response {
    with_cookie(state.session.cleared_cookie())
}

/// `{"ok":true}` carrying a `Set-Cookie` header.
fn with_cookie(cookieValue: String) -> Response {
    match HeaderValue::try_from(cookieValue) {
        Ok(value) => ([(header::SET_COOKIE, value)], Json(json!({ "ok": true }))).into_response(),
        Err(e) => {
            warn!("session cookie is not a valid header value: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "could not set session cookie")
        }
    }
}

/// Middleware for API routes: needs `Authorization: Bearer <token>` or the
/// session cookie. The token is handed to handlers as a request extension.
pub async fn require_api_auth(mut request: Request<Body>, next: Next) -> Response {
    match request_token(request.headers()) {
        Some(token) => {
            request.extensions_mut().insert(token);
            next.run(request).await
        }
        None => error_response(StatusCode::UNAUTHORIZED, "unauthorized"),
    }
}

/// Paths served without a session: the login page and its assets, and
/// everything under /api (which answers 401 itself).
const PUBLIC_PREFIXES: &[&str] = &["/login", "/favicon.svg", "/pkg/", "/assets/", "/api/"];

/// Middleware for page routes: redirects to /login when there is no session
/// cookie. The token itself is only checked by the remote API.
pub async fn require_page_auth(request: Request<Body>, next: Next) -> Response {
    let path = request.uri().path();
    let isPublic = PUBLIC_PREFIXES
        .iter()
        .any(|public| match public.strip_suffix('/') {
            Some(_) => path.starts_with(public),
            None => path == *public,
        });

    if !isPublic && cookie_token(request.headers()).is_none() {
        return Redirect::to("/login").into_response();
    }

    next.run(request).await
}
