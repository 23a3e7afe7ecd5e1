use axum::http::{header, HeaderMap};
use axum_extra::extract::CookieJar;
use roster_types::SessionToken;
use serde::Deserialize;

pub const SESSION_COOKIE: &str = "session_token";

/// `[session]` section of the console config.
#[derive(Deserialize, Clone, Debug)]
#[serde(default)]
pub struct SessionSettings {
    pub max_age_secs: u64,
    pub secure: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            max_age_secs: 604800,
            secure: true,
        }
    }
}

impl SessionSettings {
    /// `Set-Cookie` value that stores the bearer token.
    pub fn cookie(&self, token: &SessionToken) -> String {
        self.cookie_with(token.as_str(), self.max_age_secs)
    }

    /// `Set-Cookie` value that removes the session.
    pub fn cleared_cookie(&self) -> String {
        self.cookie_with("", 0)
    }

    fn cookie_with(&self, value: &str, maxAge: u64) -> String {
        let secure = if self.secure { " Secure;" } else { "" };
        format!("{SESSION_COOKIE}={value}; HttpOnly;{secure} SameSite=Strict; Path=/; Max-Age={maxAge}")
    }
}

/// Token from the session cookie, ignoring empty values.
pub fn cookie_token(headers: &HeaderMap) -> Option<SessionToken> {
    CookieJar::from_headers(headers)
        .get(SESSION_COOKIE)
        .map(|c| c.value().trim().to_string())
        .filter(|v| !v.is_empty())
        .map(SessionToken)
}

/// `Authorization: Bearer` first, then the session cookie.
pub fn request_token(headers: &HeaderMap) -> Option<SessionToken> {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| SessionToken(t.to_string()));

    bearer.or_else(|| cookie_token(headers))
}
