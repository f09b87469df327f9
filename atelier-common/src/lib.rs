//! Common types and logic shared by the Atelier sign-in front-end
//!
//! Everything here is framework-free so it can be driven by the Leptos UI
//! and exercised by plain unit tests on the host.

pub mod auth;
pub mod config;
pub mod form;
pub mod validation;

pub use auth::{AuthClient, AuthResult, AuthUser, Credentials, Router};
pub use config::{AppConfig, FormConfig, RouteConfig};
pub use form::{FieldView, LoginForm, SubmitOutcome};
pub use validation::{validate, validate_field, Field, ValidationError, ValidationErrors};

/// Common error type
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    #[error("Form has not been modified")]
    Pristine,

    #[error("A login request is already in flight")]
    SubmitInFlight,

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
