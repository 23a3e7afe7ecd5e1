use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to student API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("student API rejected the bearer token")]
    Unauthorized,
    #[error("student API returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("unexpected response format from student API")]
    UnexpectedFormat,
    #[error("login response did not include a token")]
    MissingToken,
    #[error("student record has no id")]
    MissingId,
    #[error("invalid student API url: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    /// The generic text shown to users in toasts and inline errors.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Transport(_) => "Could not reach the student service".into(),
            ClientError::Unauthorized => "Your session has expired, please sign in again".into(),
            ClientError::Status { message, .. } => message.clone(),
            ClientError::UnexpectedFormat => "Failed to load students".into(),
            ClientError::MissingToken => "Login failed".into(),
            ClientError::MissingId => {
                "This student has not been assigned an id yet, reload the list".into()
            }
            ClientError::InvalidUrl(_) => "Student service is misconfigured".into(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }
}
