//! Server-side session plumbing for server functions.
//!
//! The console injects a [`StudentApi`] and the [`SessionSettings`] into the
//! Leptos context of every request; the bearer token travels in the session
//! cookie.

use http::{header::SET_COOKIE, HeaderMap, HeaderValue};
use leptos::prelude::*;
use leptos_axum::ResponseOptions;
use roster_api::session::{cookie_token, SessionSettings};
use roster_client::{ClientError, StudentApi};
use roster_types::SessionToken;
use tracing::warn;

use crate::server_error::NOT_SIGNED_IN;

pub fn student_api() -> Result<StudentApi, ServerFnError> {
    use_context::<StudentApi>().ok_or_else(|| ServerFnError::new("student API unavailable"))
}

pub fn session_settings() -> SessionSettings {
    use_context::<SessionSettings>().unwrap_or_default()
}

/// The API client and the caller's token. Without a session cookie the
/// response is redirected to /login.
pub async fn require_session() -> Result<(StudentApi, SessionToken), ServerFnError> {
    let api = student_api()?;
    let headers: HeaderMap = leptos_axum::extract().await?;

    match cookie_token(&headers) {
        Some(token) => Ok((api, token)),
        None => Err(signed_out()),
    }
}

/// Maps a client failure to the message the page shows. A token the remote
/// API no longer accepts ends the session.
pub fn client_error(e: ClientError) -> ServerFnError {
    if e.is_unauthorized() {
        if let Err(cookieError) = set_session_cookie(&session_settings().cleared_cookie()) {
            warn!("could not clear session cookie: {cookieError}");
        }
        return signed_out();
    }
    warn!("student API call failed: {e}");
    ServerFnError::new(e.user_message())
}

pub fn set_session_cookie(cookieValue: &str) -> Result<(), ServerFnError> {
    let responseOptions = expect_context::<ResponseOptions>();
    responseOptions.insert_header(
        SET_COOKIE,
        HeaderValue::from_str(cookieValue)
            .map_err(|e| ServerFnError::new(format!("cookie error: {e}")))?,
    );
    Ok(())
}

fn signed_out() -> ServerFnError {
    leptos_axum::redirect("/login");
    ServerFnError::new(NOT_SIGNED_IN)
}
