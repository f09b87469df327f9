//! Configuration for the sign-in front-end
//!
//! Settings come from, in order of priority:
//! 1. Overrides applied by the host (e.g. a build-time API base)
//! 2. A TOML document
//! 3. Default values

use serde::{Deserialize, Serialize};

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the authentication API
    pub api_base: String,
    /// Navigation targets
    pub routes: RouteConfig,
    /// Form validation behaviour
    pub form: FormConfig,
}

/// Navigation targets used by the login form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteConfig {
    /// Landing route for admins
    pub admin_home: String,
    /// Landing route for everyone else
    pub home: String,
    /// Registration route
    pub register: String,
    /// Where the login form itself lives
    pub login: String,
}

/// When the validation schema is re-run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub validate_on_change: bool,
    pub validate_on_blur: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base: "/api".to_string(),
            routes: RouteConfig::default(),
            form: FormConfig::default(),
        }
    }
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            admin_home: "/adminhome".to_string(),
            home: "/".to_string(),
            register: "/register".to_string(),
            login: "/login".to_string(),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            validate_on_change: true,
            validate_on_blur: true,
        }
    }
}

impl AppConfig {
    /// Parse configuration from a TOML document; missing keys take defaults
    pub fn from_toml_str(input: &str) -> crate::Result<Self> {
        let config = toml::from_str(input)?;
        Ok(config)
    }

    /// Replace the API base when an override is present
    pub fn with_api_base(mut self, api_base: Option<&str>) -> Self {
        if let Some(base) = api_base.filter(|b| !b.is_empty()) {
            self.api_base = base.trim_end_matches('/').to_string();
        }
        self
    }
}
