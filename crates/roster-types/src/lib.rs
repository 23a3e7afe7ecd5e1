#![allow(non_snake_case)]

pub mod account;
pub mod student;

pub use account::*;
pub use student::*;

/// Bearer token for the remote student API, as held in the session cookie.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionToken(pub String);

impl SessionToken {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
