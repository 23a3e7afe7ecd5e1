#![allow(non_snake_case)]

pub mod api;
pub mod config;
pub mod error;
pub mod wire;

pub use api::StudentApi;
pub use config::{ApiConfig, EndpointPaths};
pub use error::ClientError;
