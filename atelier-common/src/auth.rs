///! Authentication types and the capabilities the login form depends on

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role name that grants access to the admin area
pub const ADMIN_ROLE: &str = "admin";

/// Email/password pair entered by the user
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_empty() && self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Authenticated user as reported by the auth service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl AuthUser {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            is_admin: None,
        }
    }

    pub fn with_admin_flag(mut self, is_admin: bool) -> Self {
        self.is_admin = Some(is_admin);
        self
    }

    /// The service reports admin status two ways; either one is enough.
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE || self.is_admin == Some(true)
    }
}

/// Outcome of a single login attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<AuthUser>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AuthResult {
    pub fn success(user: AuthUser) -> Self {
        Self {
            success: true,
            user: Some(user),
            error_message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            user: None,
            error_message: Some(message.into()),
        }
    }
}

/// Login request body sent to the auth service
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Authentication provider
#[async_trait(?Send)]
pub trait AuthClient {
    /// Attempt to authenticate; failures are reported in the result, not as `Err`.
    async fn login(&self, email: &str, password: &str) -> AuthResult;

    /// Reset any error state held by the provider. Must be idempotent.
    fn clear_error(&self);

    /// Whether the provider is busy with a request of its own
    fn is_loading(&self) -> bool {
        false
    }
}

/// Client-side navigation
pub trait Router {
    fn navigate(&self, path: &str);
}
