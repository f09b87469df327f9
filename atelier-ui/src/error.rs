///! Error display components for the sign-in UI

use atelier_common::ValidationError;
use leptos::*;

/// Dismissible banner for authentication errors
#[component]
pub fn ErrorBanner(
    /// Message to display; nothing is rendered while `None`
    #[prop(into)]
    message: Signal<Option<String>>,
    /// Callback for dismiss button
    #[prop(optional)]
    on_dismiss: Option<Callback<()>>,
) -> impl IntoView {
    move || {
        message.get().map(|message| {
            view! {
                <div class="alert alert-error" role="alert">
                    <div class="alert-icon">"🔐"</div>
                    <div class="alert-content">
                        <div class="alert-message">{message}</div>
                    </div>
                    <div class="alert-actions">
                        {on_dismiss.map(|on_dismiss| view! {
                            <button
                                type="button"
                                class="btn-ghost btn-sm"
                                on:click=move |_| on_dismiss.call(())
                            >
                                "✕"
                            </button>
                        })}
                    </div>
                </div>
            }
        })
    }
}

/// Inline error under a form input
#[component]
pub fn FieldError(#[prop(into)] error: Signal<Option<ValidationError>>) -> impl IntoView {
    move || {
        error.get().map(|error| view! {
            <div class="field-error">{error.to_string()}</div>
        })
    }
}
