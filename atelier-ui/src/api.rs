//! HTTP authentication client for the Atelier backend

use async_trait::async_trait;
use atelier_common::auth::{AuthClient, AuthResult, AuthUser, LoginRequest};
use atelier_common::form::DEFAULT_FAILURE_MESSAGE;
use leptos::*;
use serde::Deserialize;

/// Why a login request produced no usable answer
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("Unable to build the login request: {0}")]
    Request(String),

    #[error("Unable to reach the server: {0}")]
    Transport(String),

    #[error("Unexpected response from the server: {0}")]
    InvalidResponse(String),
}

/// Body of a 2xx login response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    user: Option<AuthUser>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl LoginResponse {
    fn into_result(self) -> AuthResult {
        // Some deployments only send the user on success
        let success = self.success.unwrap_or(self.user.is_some());
        if success {
            AuthResult {
                success: true,
                user: self.user,
                error_message: None,
            }
        } else {
            AuthResult::failure(
                self.error_message
                    .or(self.message)
                    .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string()),
            )
        }
    }
}

/// Body of a non-2xx response
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn decode_success_body(body: &str) -> Result<AuthResult, ApiError> {
    serde_json::from_str::<LoginResponse>(body)
        .map(LoginResponse::into_result)
        .map_err(|e| ApiError::InvalidResponse(e.to_string()))
}

fn failure_message(status: u16, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|body| body.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status))
}

/// Auth provider backed by `POST {api_base}/auth/login`.
///
/// Also holds the provider-level `loading` and `error` state so other
/// components can react to it.
#[derive(Clone)]
pub struct HttpAuthClient {
    api_base: String,
    loading: RwSignal<bool>,
    error: RwSignal<Option<String>>,
}

impl HttpAuthClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            loading: create_rw_signal(false),
            error: create_rw_signal(None),
        }
    }

    pub fn loading(&self) -> ReadSignal<bool> {
        self.loading.read_only()
    }

    /// Last authentication error, cleared by `clear_error`
    pub fn error(&self) -> ReadSignal<Option<String>> {
        self.error.read_only()
    }

    async fn request(&self, email: &str, password: &str) -> Result<AuthResult, ApiError> {
        let url = format!("{}/auth/login", self.api_base);
        let body = serde_json::to_string(&LoginRequest { email, password })
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let response = reqwasm::http::Request::post(&url)
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if response.ok() {
            decode_success_body(&text)
        } else {
            Ok(AuthResult::failure(failure_message(status, &text)))
        }
    }
}

#[async_trait(?Send)]
impl AuthClient for HttpAuthClient {
    async fn login(&self, email: &str, password: &str) -> AuthResult {
        self.loading.set(true);

        let result = match self.request(email, password).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(error = %e, "Login request failed");
                AuthResult::failure(e.to_string())
            }
        };

        if !result.success {
            self.error.set(result.error_message.clone());
        }
        self.loading.set(false);

        result
    }

    fn clear_error(&self) {
        self.error.set(None);
    }

    fn is_loading(&self) -> bool {
        self.loading.get_untracked()
    }
}
