//! Login form state and submission flow
//!
//! `LoginForm` owns the field values, touched flags and displayed errors.
//! Submission is single-flight: `begin_submit` marks the form as submitting
//! and `finish_submit` applies the auth result. `submit` chains both around
//! the `AuthClient` call for hosts that can hold `&mut` across an await.

use crate::auth::{AuthClient, AuthResult, Credentials, Router};
use crate::config::{FormConfig, RouteConfig};
use crate::validation::{self, Field, ValidationError, ValidationErrors};
use crate::{Error, Result};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// Acknowledgment shown after a successful login
pub const SUCCESS_NOTICE: &str = "Login successful!";

/// Banner text when the auth service fails without a message
pub const DEFAULT_FAILURE_MESSAGE: &str = "Login failed. Please try again.";

/// What a finished submission resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    LoggedIn { redirect: String, admin: bool },
    Failed { message: String },
}

impl SubmitOutcome {
    pub fn redirect(&self) -> Option<&str> {
        match self {
            SubmitOutcome::LoggedIn { redirect, .. } => Some(redirect),
            SubmitOutcome::Failed { .. } => None,
        }
    }
}

/// Render data for one input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldView {
    pub field: Field,
    pub value: String,
    /// Only set once the field has been touched
    pub error: Option<ValidationError>,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    config: FormConfig,
    routes: RouteConfig,
    values: Credentials,
    touched: BTreeSet<Field>,
    errors: ValidationErrors,
    submitting: bool,
    auth_error: Option<String>,
    notice: Option<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new(FormConfig::default(), RouteConfig::default())
    }
}

impl LoginForm {
    pub fn new(config: FormConfig, routes: RouteConfig) -> Self {
        Self {
            config,
            routes,
            values: Credentials::default(),
            touched: BTreeSet::new(),
            errors: ValidationErrors::default(),
            submitting: false,
            auth_error: None,
            notice: None,
        }
    }

    pub fn values(&self) -> &Credentials {
        &self.values
    }

    pub fn field(&self, field: Field) -> FieldView {
        let value = match field {
            Field::Email => self.values.email.clone(),
            Field::Password => self.values.password.clone(),
        };

        FieldView {
            field,
            value,
            error: self.displayed_error(field).cloned(),
        }
    }

    fn displayed_error(&self, field: Field) -> Option<&ValidationError> {
        if self.touched.contains(&field) {
            self.errors.get(field)
        } else {
            None
        }
    }

    pub fn has_error(&self, field: Field) -> bool {
        self.displayed_error(field).is_some()
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched.contains(&field)
    }

    /// Values still equal the (empty) initial values
    pub fn is_pristine(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        validation::validate(&self.values).is_valid()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.submitting || !self.is_valid() || self.is_pristine()
    }

    /// Authentication error currently shown in the banner
    pub fn auth_error(&self) -> Option<&str> {
        self.auth_error.as_deref()
    }

    /// Success acknowledgment from the last submission
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn routes(&self) -> &RouteConfig {
        &self.routes
    }

    /// Record a keystroke in `field`
    pub fn change(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Email => self.values.email = value,
            Field::Password => self.values.password = value,
        }

        if self.config.validate_on_change {
            validation::revalidate_field(&mut self.errors, field, &self.values);
        }
    }

    /// Mark `field` as touched after it loses focus
    pub fn blur(&mut self, field: Field) {
        self.touched.insert(field);

        if self.config.validate_on_blur {
            validation::revalidate_field(&mut self.errors, field, &self.values);
        }
    }

    /// Hide the authentication error banner
    pub fn dismiss_error(&mut self) {
        self.auth_error = None;
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Validate and enter the submitting state.
    ///
    /// Returns the credentials to send. Rejects re-entrant, pristine and
    /// invalid submissions without touching the client.
    pub fn begin_submit<C>(&mut self, client: &C) -> Result<Credentials>
    where
        C: AuthClient + ?Sized,
    {
        if self.submitting || client.is_loading() {
            debug!("Submit ignored, login already in flight");
            return Err(Error::SubmitInFlight);
        }

        self.touched.extend(Field::ALL);
        self.errors = validation::validate(&self.values);

        if self.is_pristine() {
            debug!("Submit ignored, form is pristine");
            return Err(Error::Pristine);
        }

        if !self.errors.is_valid() {
            debug!(errors = %self.errors, "Submit blocked by validation");
            return Err(Error::Validation(self.errors.clone()));
        }

        self.auth_error = None;
        self.notice = None;
        client.clear_error();

        self.submitting = true;
        info!(email = %self.values.email, "Login attempt");

        Ok(self.values.clone())
    }

    /// Apply the auth service's answer and leave the submitting state
    pub fn finish_submit(&mut self, result: AuthResult) -> SubmitOutcome {
        self.submitting = false;

        if result.success {
            let admin = result.user.as_ref().is_some_and(|user| user.is_admin());
            let redirect = if admin {
                self.routes.admin_home.clone()
            } else {
                self.routes.home.clone()
            };

            self.reset();
            self.notice = Some(SUCCESS_NOTICE.to_string());

            info!(admin, redirect = %redirect, "Login succeeded");
            SubmitOutcome::LoggedIn { redirect, admin }
        } else {
            let message = result
                .error_message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());

            warn!(error = %message, "Login failed");
            self.auth_error = Some(message.clone());
            SubmitOutcome::Failed { message }
        }
    }

    /// Run a complete submission and navigate on success
    pub async fn submit<C, R>(&mut self, client: &C, router: &R) -> Result<SubmitOutcome>
    where
        C: AuthClient + ?Sized,
        R: Router + ?Sized,
    {
        let credentials = self.begin_submit(client)?;
        let result = client.login(&credentials.email, &credentials.password).await;
        let outcome = self.finish_submit(result);

        if let Some(path) = outcome.redirect() {
            router.navigate(path);
        }

        Ok(outcome)
    }

    pub fn go_to_register<R>(&self, router: &R)
    where
        R: Router + ?Sized,
    {
        router.navigate(&self.routes.register);
    }

    fn reset(&mut self) {
        self.values = Credentials::default();
        self.touched.clear();
        self.errors = ValidationErrors::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthUser;
    use async_trait::async_trait;
    use std::cell::{Cell, RefCell};

    fn init_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }

    struct MockAuthClient {
        result: AuthResult,
        calls: RefCell<Vec<(String, String)>>,
        error: RefCell<Option<String>>,
        clears: Cell<usize>,
    }

    impl MockAuthClient {
        fn new(result: AuthResult) -> Self {
            Self {
                result,
                calls: RefCell::new(Vec::new()),
                error: RefCell::new(Some("stale error".to_string())),
                clears: Cell::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl AuthClient for MockAuthClient {
        async fn login(&self, email: &str, password: &str) -> AuthResult {
            self.calls.borrow_mut().push((email.to_string(), password.to_string()));
            if !self.result.success {
                *self.error.borrow_mut() = self.result.error_message.clone();
            }
            self.result.clone()
        }

        fn clear_error(&self) {
            self.clears.set(self.clears.get() + 1);
            *self.error.borrow_mut() = None;
        }
    }

    #[derive(Default)]
    struct RecordingRouter {
        paths: RefCell<Vec<String>>,
    }

    impl Router for RecordingRouter {
        fn navigate(&self, path: &str) {
            self.paths.borrow_mut().push(path.to_string());
        }
    }

    fn filled_form(email: &str, password: &str) -> LoginForm {
        let mut form = LoginForm::default();
        form.change(Field::Email, email);
        form.change(Field::Password, password);
        form
    }

    #[test]
    fn test_errors_shown_only_after_blur() {
        let mut form = LoginForm::default();
        form.change(Field::Email, "not-an-email");
        assert_eq!(form.field(Field::Email).error, None);

        form.blur(Field::Email);
        assert_eq!(form.field(Field::Email).error, Some(ValidationError::Format));
        assert!(form.has_error(Field::Email));

        form.change(Field::Email, "user@example.com");
        assert_eq!(form.field(Field::Email).error, None);
        assert_eq!(form.field(Field::Email).value, "user@example.com");
    }

    #[test]
    fn test_blur_without_change_validation() {
        let config = FormConfig {
            validate_on_change: false,
            validate_on_blur: true,
        };
        let mut form = LoginForm::new(config, RouteConfig::default());
        form.blur(Field::Password);
        assert_eq!(
            form.field(Field::Password).error,
            Some(ValidationError::Required(Field::Password))
        );

        // Without change validation the displayed error waits for the next blur
        form.change(Field::Password, "secret");
        assert!(form.has_error(Field::Password));
        form.blur(Field::Password);
        assert!(!form.has_error(Field::Password));
    }

    #[test]
    fn test_blur_only_validates_that_field() {
        let mut form = LoginForm::default();
        form.blur(Field::Email);
        assert!(form.has_error(Field::Email));
        assert!(!form.is_touched(Field::Password));
        assert!(!form.has_error(Field::Password));
    }

    #[tokio::test]
    async fn test_invalid_email_blocks_submit() {
        init_logging();
        let client = MockAuthClient::new(AuthResult::success(AuthUser::new("user")));
        let router = RecordingRouter::default();

        for email in ["", "user@", "plainaddress"] {
            let mut form = filled_form(email, "password123");
            assert!(form.is_submit_disabled());

            let err = form.submit(&client, &router).await.unwrap_err();
            assert!(matches!(err, Error::Validation(_)));

            let expected = if email.is_empty() {
                ValidationError::Required(Field::Email)
            } else {
                ValidationError::Format
            };
            assert_eq!(form.field(Field::Email).error, Some(expected));
        }

        assert_eq!(client.call_count(), 0);
        assert!(router.paths.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_short_password_blocks_submit() {
        let client = MockAuthClient::new(AuthResult::success(AuthUser::new("user")));
        let router = RecordingRouter::default();
        let mut form = filled_form("user@example.com", "1234");

        assert!(form.is_submit_disabled());
        let err = form.submit(&client, &router).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(
            form.field(Field::Password).error,
            Some(ValidationError::TooShort { min: 5 })
        );
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_admin_role_redirects_to_admin_home() {
        init_logging();
        let client = MockAuthClient::new(AuthResult::success(AuthUser::new("admin")));
        let router = RecordingRouter::default();
        let mut form = filled_form("admin@example.com", "hunter22");

        let outcome = form.submit(&client, &router).await.unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::LoggedIn {
                redirect: "/adminhome".to_string(),
                admin: true
            }
        );
        assert_eq!(*router.paths.borrow(), vec!["/adminhome".to_string()]);
        assert_eq!(
            *client.calls.borrow(),
            vec![("admin@example.com".to_string(), "hunter22".to_string())]
        );
        assert_eq!(form.values(), &Credentials::default());
        assert!(form.is_pristine());
        assert!(!form.is_submitting());
        assert_eq!(form.notice(), Some(SUCCESS_NOTICE));
        assert!(!form.has_error(Field::Email));
    }

    #[tokio::test]
    async fn test_admin_flag_redirects_to_admin_home() {
        let client = MockAuthClient::new(AuthResult::success(
            AuthUser::new("editor").with_admin_flag(true),
        ));
        let router = RecordingRouter::default();
        let mut form = filled_form("editor@example.com", "hunter22");

        form.submit(&client, &router).await.unwrap();
        assert_eq!(*router.paths.borrow(), vec!["/adminhome".to_string()]);
    }

    #[tokio::test]
    async fn test_regular_user_redirects_home() {
        let client = MockAuthClient::new(AuthResult::success(
            AuthUser::new("user").with_admin_flag(false),
        ));
        let router = RecordingRouter::default();
        let mut form = filled_form("user@example.com", "hunter22");

        let outcome = form.submit(&client, &router).await.unwrap();

        assert_eq!(outcome.redirect(), Some("/"));
        assert_eq!(*router.paths.borrow(), vec!["/".to_string()]);
        assert!(form.is_pristine());
    }

    #[tokio::test]
    async fn test_success_without_user_is_not_admin() {
        let client = MockAuthClient::new(AuthResult {
            success: true,
            user: None,
            error_message: None,
        });
        let router = RecordingRouter::default();
        let mut form = filled_form("user@example.com", "hunter22");

        form.submit(&client, &router).await.unwrap();
        assert_eq!(*router.paths.borrow(), vec!["/".to_string()]);
    }

    #[tokio::test]
    async fn test_failure_shows_message_and_keeps_values() {
        init_logging();
        let client = MockAuthClient::new(AuthResult::failure("Invalid password"));
        let router = RecordingRouter::default();
        let mut form = filled_form("user@example.com", "wrongpass");

        let outcome = form.submit(&client, &router).await.unwrap();

        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: "Invalid password".to_string()
            }
        );
        assert_eq!(form.auth_error(), Some("Invalid password"));
        assert!(router.paths.borrow().is_empty());
        assert_eq!(form.values(), &Credentials::new("user@example.com", "wrongpass"));
        assert!(!form.is_submitting());
        assert!(!form.is_submit_disabled());
        assert_eq!(form.notice(), None);
    }

    #[tokio::test]
    async fn test_failure_without_message_uses_default() {
        let client = MockAuthClient::new(AuthResult {
            success: false,
            user: None,
            error_message: None,
        });
        let router = RecordingRouter::default();
        let mut form = filled_form("user@example.com", "wrongpass");

        form.submit(&client, &router).await.unwrap();
        assert_eq!(form.auth_error(), Some(DEFAULT_FAILURE_MESSAGE));
    }

    #[tokio::test]
    async fn test_resubmit_clears_previous_error() {
        let failing = MockAuthClient::new(AuthResult::failure("Invalid password"));
        let succeeding = MockAuthClient::new(AuthResult::success(AuthUser::new("user")));
        let router = RecordingRouter::default();
        let mut form = filled_form("user@example.com", "wrongpass");

        form.submit(&failing, &router).await.unwrap();
        assert!(form.auth_error().is_some());

        form.change(Field::Password, "rightpass");
        form.submit(&succeeding, &router).await.unwrap();
        assert_eq!(form.auth_error(), None);
        assert_eq!(succeeding.clears.get(), 1);
        assert!(succeeding.error.borrow().is_none());
    }

    #[test]
    fn test_disabled_when_pristine() {
        let form = LoginForm::default();
        assert!(form.is_pristine());
        assert!(!form.is_submitting());
        assert!(form.is_submit_disabled());
    }

    #[test]
    fn test_disabled_when_invalid() {
        let mut form = filled_form("user@example.com", "hunter22");
        assert!(!form.is_submit_disabled());

        form.change(Field::Password, "abc");
        assert!(!form.is_pristine());
        assert!(!form.is_valid());
        assert!(form.is_submit_disabled());

        form.change(Field::Password, "abcdef");
        assert!(!form.is_submit_disabled());
    }

    #[test]
    fn test_disabled_while_in_flight() {
        let client = MockAuthClient::new(AuthResult::failure("nope"));
        let mut form = filled_form("user@example.com", "hunter22");
        assert!(!form.is_submit_disabled());

        let credentials = form.begin_submit(&client).unwrap();
        assert_eq!(credentials, Credentials::new("user@example.com", "hunter22"));
        assert!(form.is_valid());
        assert!(!form.is_pristine());
        assert!(form.is_submit_disabled());

        assert!(matches!(form.begin_submit(&client), Err(Error::SubmitInFlight)));
        assert_eq!(client.clears.get(), 1);

        form.finish_submit(AuthResult::failure("nope"));
        assert!(!form.is_submit_disabled());
    }

    struct BusyClient;

    #[async_trait(?Send)]
    impl AuthClient for BusyClient {
        async fn login(&self, _email: &str, _password: &str) -> AuthResult {
            unreachable!("busy client must not be called")
        }

        fn clear_error(&self) {}

        fn is_loading(&self) -> bool {
            true
        }
    }

    #[tokio::test]
    async fn test_busy_client_rejects_submit() {
        let router = RecordingRouter::default();
        let mut form = filled_form("user@example.com", "hunter22");

        let err = form.submit(&BusyClient, &router).await.unwrap_err();
        assert!(matches!(err, Error::SubmitInFlight));
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn test_pristine_submit_rejected() {
        let client = MockAuthClient::new(AuthResult::success(AuthUser::new("user")));
        let router = RecordingRouter::default();
        let mut form = LoginForm::default();

        let err = form.submit(&client, &router).await.unwrap_err();
        assert!(matches!(err, Error::Pristine));
        assert_eq!(client.call_count(), 0);
        assert_eq!(client.clears.get(), 0);
    }

    #[test]
    fn test_clear_error_is_idempotent() {
        let client = MockAuthClient::new(AuthResult::failure("Invalid password"));
        client.clear_error();
        assert!(client.error.borrow().is_none());
        client.clear_error();
        assert!(client.error.borrow().is_none());

        let mut form = LoginForm::default();
        form.dismiss_error();
        form.dismiss_error();
        assert_eq!(form.auth_error(), None);
    }

    #[test]
    fn test_go_to_register_leaves_state_alone() {
        let router = RecordingRouter::default();
        let mut form = filled_form("user@example.com", "abc");
        form.blur(Field::Password);
        let before = form.field(Field::Password);

        form.go_to_register(&router);

        assert_eq!(*router.paths.borrow(), vec!["/register".to_string()]);
        assert_eq!(form.field(Field::Password), before);
        assert_eq!(form.values(), &Credentials::new("user@example.com", "abc"));
    }

    #[tokio::test]
    async fn test_custom_routes() {
        let routes = RouteConfig {
            admin_home: "/admin".to_string(),
            home: "/shop".to_string(),
            ..RouteConfig::default()
        };
        let client = MockAuthClient::new(AuthResult::success(AuthUser::new("user")));
        let router = RecordingRouter::default();
        let mut form = LoginForm::new(FormConfig::default(), routes);
        form.change(Field::Email, "user@example.com");
        form.change(Field::Password, "hunter22");

        form.submit(&client, &router).await.unwrap();
        assert_eq!(*router.paths.borrow(), vec!["/shop".to_string()]);
    }
}
