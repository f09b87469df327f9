//! Landing pages the login form redirects to

use atelier_common::AppConfig;
use leptos::*;
use leptos_router::A;

/// Root route text; shown to visitors whether or not they signed in
const HOME_HEADING: &str = "Atelier";
const HOME_MESSAGE: &str = "Welcome to Atelier.";

#[component]
pub fn Home() -> impl IntoView {
    view! {
        <div class="landing-page">
            <h1>{HOME_HEADING}</h1>
            <p>{HOME_MESSAGE}</p>
        </div>
    }
}

#[component]
pub fn AdminHome() -> impl IntoView {
    view! {
        <div class="landing-page admin">
            <h1>"Admin Console"</h1>
            <p>"Signed in with administrator access."</p>
        </div>
    }
}

/// Registration lives in its own flow; this only links back to sign-in.
#[component]
pub fn Register() -> impl IntoView {
    let login = expect_context::<AppConfig>().routes.login;

    view! {
        <div class="landing-page">
            <h1>"Create Account"</h1>
            <p>"Registration is not available yet."</p>
            <A href=login class="btn-link">"Back to sign in"</A>
        </div>
    }
}
