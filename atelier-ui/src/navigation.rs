//! `Router` capability backed by leptos_router

use atelier_common::auth::Router;
use leptos_router::{use_navigate, NavigateOptions};
use std::rc::Rc;

/// Must be created inside a `<Router>`.
#[derive(Clone)]
pub struct LeptosRouter {
    navigate: Rc<dyn Fn(&str, NavigateOptions)>,
}

impl LeptosRouter {
    pub fn new() -> Self {
        Self {
            navigate: Rc::new(use_navigate()),
        }
    }
}

impl Default for LeptosRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Router for LeptosRouter {
    fn navigate(&self, path: &str) {
        tracing::debug!(path, "Navigating");
        (self.navigate)(path, NavigateOptions::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_default<T: Default + Clone>() {}

    #[test]
    fn test_router_is_default_constructible() {
        assert_default::<LeptosRouter>();
    }
}
