use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CredentialsError {
    #[error("email is required")]
    MissingEmail,
    #[error("password is required")]
    MissingPassword,
    #[error("name is required")]
    MissingName,
    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Body of the remote login request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: &str, password: &str) -> Result<Self, CredentialsError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(CredentialsError::MissingEmail);
        }
        if password.is_empty() {
            return Err(CredentialsError::MissingPassword);
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

/// Body of the remote register request. The re-entered password never
/// leaves the console.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl Registration {
    pub fn new(
        name: &str,
        email: &str,
        password: &str,
        confirmPassword: &str,
    ) -> Result<Self, CredentialsError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CredentialsError::MissingName);
        }
        let credentials = Credentials::new(email, password)?;
        if password != confirmPassword {
            return Err(CredentialsError::PasswordMismatch);
        }
        Ok(Self {
            name: name.to_string(),
            email: credentials.email,
            password: credentials.password,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_trim_email_but_not_password() {
        let c = Credentials::new(" admin@acpt.lk ", " secret ").unwrap();
        assert_eq!(c.email, "admin@acpt.lk");
        assert_eq!(c.password, " secret ");
    }

    #[test]
    fn credentials_require_both_fields() {
        assert_eq!(Credentials::new("", "x"), Err(CredentialsError::MissingEmail));
        assert_eq!(Credentials::new("a@b", ""), Err(CredentialsError::MissingPassword));
    }

    #[test]
    fn registration_checks_confirmation() {
        assert_eq!(
            Registration::new("Sam", "s@acpt.lk", "pw1", "pw2"),
            Err(CredentialsError::PasswordMismatch)
        );
        assert_eq!(
            Registration::new(" ", "s@acpt.lk", "pw", "pw"),
            Err(CredentialsError::MissingName)
        );
        let ok = Registration::new("Sam", "s@acpt.lk", "pw", "pw").unwrap();
        assert_eq!(ok.name, "Sam");
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({"name": "Sam", "email": "s@acpt.lk", "password": "pw"})
        );
    }
}
