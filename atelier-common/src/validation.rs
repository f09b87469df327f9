///! Field validation rules for the login form
///!
///! Pure functions: the same credentials always produce the same errors.

use crate::auth::Credentials;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LENGTH: usize = 5;

/// Same shape browsers use for `<input type="email">`: dotted labels, no TLD required
static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

/// Form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Email,
    Password,
}

impl Field {
    pub const ALL: [Field; 2] = [Field::Email, Field::Password];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Per-field validation failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please enter your {0}")]
    Required(Field),

    #[error("Please enter a valid email")]
    Format,

    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },
}

/// Mapping from field to its current error
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<Field, ValidationError>);

impl ValidationErrors {
    pub fn is_valid(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: Field) -> Option<&ValidationError> {
        self.0.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &ValidationError)> {
        self.0.iter().map(|(field, error)| (*field, error))
    }

    fn set(&mut self, field: Field, error: Option<ValidationError>) {
        match error {
            Some(error) => {
                self.0.insert(field, error);
            }
            None => {
                self.0.remove(&field);
            }
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self
            .iter()
            .map(|(field, error)| format!("{}: {}", field, error))
            .collect();
        f.write_str(&messages.join(", "))
    }
}

/// Validate a single field of the credentials
pub fn validate_field(field: Field, credentials: &Credentials) -> Option<ValidationError> {
    match field {
        Field::Email => validate_email(&credentials.email),
        Field::Password => validate_password(&credentials.password),
    }
}

/// Validate every field of the credentials
pub fn validate(credentials: &Credentials) -> ValidationErrors {
    let mut errors = ValidationErrors::default();
    for field in Field::ALL {
        errors.set(field, validate_field(field, credentials));
    }
    errors
}

/// Refresh the entry for one field in an existing error map
pub(crate) fn revalidate_field(errors: &mut ValidationErrors, field: Field, credentials: &Credentials) {
    errors.set(field, validate_field(field, credentials));
}

fn validate_email(email: &str) -> Option<ValidationError> {
    if email.is_empty() {
        return Some(ValidationError::Required(Field::Email));
    }

    if !EMAIL_REGEX.is_match(email) {
        return Some(ValidationError::Format);
    }

    None
}

fn validate_password(password: &str) -> Option<ValidationError> {
    if password.is_empty() {
        return Some(ValidationError::Required(Field::Password));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Some(ValidationError::TooShort { min: MIN_PASSWORD_LENGTH });
    }

    None
}
