use reqwest::{header, Method, RequestBuilder, Response, StatusCode, Url};
use roster_types::{Credentials, NewStudent, Registration, SessionToken, Student, StudentId};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::{ApiConfig, EndpointPaths};
use crate::error::ClientError;
use crate::wire;

/// Client for the remote student API. Cloning shares the connection pool.
#[derive(Clone, Debug)]
pub struct StudentApi {
    http: reqwest::Client,
    base: Url,
    paths: EndpointPaths,
}

impl StudentApi {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.base_url.clone()));
        }

        Ok(Self {
            http: reqwest::Client::new(),
            base,
            paths: config.paths.clone(),
        })
    }

    /// Exchanges credentials for a bearer token.
    pub async fn login(&self, credentials: &Credentials) -> Result<SessionToken, ClientError> {
        let url = self.url(&self.paths.login, None)?;
        let response = self.http.post(url).json(credentials).send().await?;
        let status = response.status();
        let body = read_json(response).await;

        if !status.is_success() {
            let message = body
                .as_ref()
                .and_then(wire::error_message)
                .unwrap_or_else(|| "Login failed".into());
            warn!("login for {} rejected with {status}", credentials.email);
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        body.as_ref()
            .and_then(wire::token_from_login)
            .map(SessionToken)
            .ok_or(ClientError::MissingToken)
    }

    pub async fn register(&self, registration: &Registration) -> Result<(), ClientError> {
        let url = self.url(&self.paths.register, None)?;
        let response = self.http.post(url).json(registration).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = read_json(response)
                .await
                .as_ref()
                .and_then(wire::error_message)
                .unwrap_or_else(|| "Registration failed".into());
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    pub async fn list_students(&self, token: &SessionToken) -> Result<Vec<Student>, ClientError> {
        let url = self.url(&self.paths.list, None)?;
        let response = self.send(self.authorized(Method::GET, url, token)).await?;

        let body = read_json(response).await.ok_or(ClientError::UnexpectedFormat)?;
        let patches = wire::patches_from_list(&body).ok_or_else(|| {
            warn!("student list response was not an array");
            ClientError::UnexpectedFormat
        })?;

        Ok(patches.into_iter().map(Student::from).collect())
    }

    /// Creates a record. Fields the response omits are taken from `student`.
    pub async fn create_student(
        &self,
        token: &SessionToken,
        student: &NewStudent,
    ) -> Result<Student, ClientError> {
        let url = self.url(&self.paths.create, None)?;
        let request = self
            .authorized(Method::POST, url, token)
            .json(&wire::StudentBody::from(student));
        let response = self.send(request).await?;

        let returned = read_json(response)
            .await
            .as_ref()
            .and_then(wire::patch_from_response);
        Ok(Student::merged(None, student, returned))
    }

    pub async fn update_student(
        &self,
        token: &SessionToken,
        id: &StudentId,
        student: &NewStudent,
    ) -> Result<Student, ClientError> {
        let url = self.url(&self.paths.update, Some(id))?;
        let request = self
            .authorized(Method::PUT, url, token)
            .json(&wire::StudentBody::from(student));
        let response = self.send(request).await?;

        let returned = read_json(response)
            .await
            .as_ref()
            .and_then(wire::patch_from_response);
        Ok(Student::merged(Some(id), student, returned))
    }

    pub async fn delete_student(&self, token: &SessionToken, id: &StudentId) -> Result<(), ClientError> {
        let url = self.url(&self.paths.delete, Some(id))?;
        self.send(self.authorized(Method::DELETE, url, token)).await?;
        Ok(())
    }

    /// `template` joined onto the base URL. A `{id}` segment needs a
    /// non-empty `id`, otherwise the request would hit the collection path.
    fn url(&self, template: &str, id: Option<&StudentId>) -> Result<Url, ClientError> {
        let id = id.filter(|id| !id.is_empty());
        if template.contains("{id}") && id.is_none() {
            return Err(ClientError::MissingId);
        }

        let mut url = self.base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidUrl(self.base.to_string()))?;
            segments.pop_if_empty();
            for segment in template.split('/').filter(|s| !s.is_empty()) {
                match id {
                    Some(id) if segment.contains("{id}") => {
                        segments.push(&segment.replace("{id}", id.as_str()));
                    }
                    _ => {
                        segments.push(segment);
                    }
                }
            }
        }
        Ok(url)
    }

    fn authorized(&self, method: Method, url: Url, token: &SessionToken) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(header::AUTHORIZATION, format!("Bearer {}", token.as_str()))
    }

    /// Sends a bearer-authenticated request and maps failure statuses.
    async fn send(&self, request: RequestBuilder) -> Result<Response, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        debug!("{} -> {status}", response.url().path());

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!("student API refused token: {status}");
            return Err(ClientError::Unauthorized);
        }
        if !status.is_success() {
            let message = read_json(response)
                .await
                .as_ref()
                .and_then(wire::error_message)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            warn!("student API returned {status}: {message}");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

/// Body as JSON, or `None` when it is empty or not JSON.
async fn read_json(response: Response) -> Option<Value> {
    let bytes = response.bytes().await.ok()?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return None;
    }
    serde_json::from_slice(&bytes).ok()
}
