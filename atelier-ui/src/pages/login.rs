use atelier_common::auth::{AuthClient, Router};
use atelier_common::{AppConfig, Field, LoginForm, SubmitOutcome};
use leptos::*;
use std::fmt::Debug;

use crate::api::HttpAuthClient;
use crate::error::{ErrorBanner, FieldError};
use crate::navigation::LeptosRouter;

#[component]
pub fn Login() -> impl IntoView {
    let config = expect_context::<AppConfig>();
    let client = expect_context::<HttpAuthClient>();
    let router = LeptosRouter::new();

    let form = create_rw_signal(LoginForm::new(config.form, config.routes.clone()));
    let loading = client.loading();
    let auth_error = client.error();

    let submit = {
        let client = client.clone();
        let router = router.clone();
        move |ev: ev::SubmitEvent| {
            ev.prevent_default();

            let credentials = match form.try_update(|f| f.begin_submit(&client)) {
                Some(Ok(credentials)) => credentials,
                Some(Err(e)) => {
                    tracing::debug!(reason = %e, "Submit rejected");
                    return;
                }
                None => return,
            };

            let client = client.clone();
            let router = router.clone();
            spawn_local(async move {
                let result = client.login(&credentials.email, &credentials.password).await;
                let Some(outcome) = form.try_update(|f| f.finish_submit(result)) else {
                    return;
                };

                match &outcome {
                    SubmitOutcome::LoggedIn { redirect, admin } => {
                        tracing::info!(admin = *admin, redirect = %redirect, "Signed in");
                        acknowledge(form, |notice| window().alert_with_message(notice));
                        router.navigate(redirect);
                    }
                    SubmitOutcome::Failed { message } => {
                        tracing::warn!(error = %message, "Sign-in failed");
                    }
                }
            });
        }
    };

    let dismiss_error = Callback::new({
        let client = client.clone();
        move |_: ()| {
            client.clear_error();
            form.update(|f| f.dismiss_error());
        }
    });

    let go_to_register = move |_| form.with_untracked(|f| f.go_to_register(&router));

    let submitting = move || form.with(|f| f.is_submitting()) || loading.get();
    let disabled = move || form.with(|f| f.is_submit_disabled()) || loading.get();

    view! {
        <div class="login-page">
            <div class="login-card">
                <div class="login-header">
                    <h1>"SIGN IN"</h1>
                    <div class="divider"></div>
                    <p class="tagline">"Use your registered email and password"</p>
                </div>

                <form class="login-form" on:submit=submit>
                    <ErrorBanner message=auth_error on_dismiss=dismiss_error/>

                    <FormField
                        form=form
                        field=Field::Email
                        label="EMAIL ADDRESS"
                        input_type="email"
                        placeholder="Enter your email"
                    />
                    <FormField
                        form=form
                        field=Field::Password
                        label="PASSWORD"
                        input_type="password"
                        placeholder="Enter your password"
                    />

                    <button type="submit" class="btn btn-primary btn-block" disabled=disabled>
                        {move || if submitting() {
                            view! { <span class="spinner"></span>"SIGNING IN..." }.into_view()
                        } else {
                            "SIGN IN".into_view()
                        }}
                    </button>

                    <div class="login-links">
                        <button type="button" class="btn-link">"FORGOT YOUR PASSWORD?"</button>
                    </div>

                    <p class="register-prompt">
                        "DON'T HAVE AN ACCOUNT? "
                        <button type="button" class="btn-link" on:click=go_to_register>
                            "SIGN UP"
                        </button>
                    </p>
                </form>
            </div>
        </div>
    }
}

/// Show the success notice once, then drop it from the form
fn acknowledge<E: Debug>(form: RwSignal<LoginForm>, show: impl FnOnce(&str) -> Result<(), E>) {
    let Some(notice) = form.with_untracked(|f| f.notice().map(str::to_string)) else {
        return;
    };

    if let Err(e) = show(&notice) {
        logging::warn!("Unable to show login notice: {:?}", e);
    }
    form.update(|f| f.dismiss_notice());
}

#[component]
fn FormField(
    form: RwSignal<LoginForm>,
    field: Field,
    label: &'static str,
    input_type: &'static str,
    placeholder: &'static str,
) -> impl IntoView {
    let id = field.name();

    view! {
        <div class="form-group">
            <label for=id>{label}</label>
            <input
                id=id
                name=id
                type=input_type
                placeholder=placeholder
                class=move || if form.with(|f| f.has_error(field)) { "form-input input-error" } else { "form-input" }
                prop:value=move || form.with(|f| f.field(field).value)
                on:input=move |ev| form.update(|f| f.change(field, event_target_value(&ev)))
                on:blur=move |_| form.update(|f| f.blur(field))
            />
            <FieldError error=Signal::derive(move || form.with(|f| f.field(field).error))/>
        </div>
    }
}
