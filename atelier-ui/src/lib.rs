use atelier_common::AppConfig;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

mod api;
mod error;
pub mod logging;
mod navigation;
mod pages;

use api::HttpAuthClient;
use pages::{AdminHome, Home, Login, Register};

/// Build-time override for the auth API location
const API_BASE_OVERRIDE: Option<&str> = option_env!("ATELIER_API_BASE");

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let config = AppConfig::default().with_api_base(API_BASE_OVERRIDE);
    let routes = config.routes.clone();
    tracing::info!(api_base = %config.api_base, "Starting sign-in UI");

    provide_context(HttpAuthClient::new(config.api_base.clone()));
    provide_context(config);

    view! {
        <Stylesheet id="leptos" href="/pkg/atelier-ui.css"/>
        <Title text="Atelier - Sign In"/>
        <Meta name="description" content="Sign in to Atelier"/>

        <Router>
            <main class="container">
                <Routes>
                    <Route path=routes.login.clone() view=Login/>
                    <Route path=routes.register.clone() view=Register/>
                    <Route path=routes.admin_home.clone() view=AdminHome/>
                    <Route path=routes.home.clone() view=Home/>
                </Routes>
            </main>
        </Router>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    logging::init(tracing::Level::INFO);
    mount_to_body(App);
}
