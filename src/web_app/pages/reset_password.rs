// web_app/pages/reset_password.rs - Password reset from the emailed link
//
// The link carries `email` and `token` query parameters; without both the
// page sends the user back to /login.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::hooks::{use_navigate, use_query_map};
use leptos_router::NavigateOptions;

use crate::web_app::components::{AuthCard, Button, FormBanner, PasswordChecklist, TextInput};
use crate::web_app::model::PasswordReset;
use crate::web_app::server_fns::{reset_password, to_api_error};
use crate::web_app::validation::{validate_password_reset, FieldErrors};

#[component]
pub fn ResetPasswordPage() -> impl IntoView {
    let query = use_query_map();
    let navigate = use_navigate();

    let link = Memo::new(move |_| {
        query.with(|q| {
            let email = q.get("email").map(|e| e.trim().to_string()).filter(|e| !e.is_empty());
            let token = q.get("token").map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
            email.zip(token)
        })
    });

    {
        let navigate = navigate.clone();
        Effect::new(move |_| {
            if link.get().is_none() {
                tracing::warn!("Reset link without email or token, redirecting to login");
                navigate("/login", NavigateOptions { replace: true, ..Default::default() });
            }
        });
    }

    let password = RwSignal::new(String::new());
    let password_confirmation = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::default());
    let server_error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);
    let field_error = move |field: &'static str| Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)));

    let submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some((email, token)) = link.get_untracked() else {
            return;
        };
        let reset = PasswordReset {
            email,
            token,
            password: password.get_untracked(),
            password_confirmation: password_confirmation.get_untracked(),
        };
        if let Err(invalid) = validate_password_reset(&reset) {
            errors.set(invalid);
            return;
        }
        errors.set(FieldErrors::default());
        server_error.set(None);
        pending.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            let result = reset_password(reset).await;
            pending.set(false);
            match result {
                Ok(message) => {
                    tracing::info!("Password reset: {}", message);
                    navigate("/login", Default::default());
                }
                Err(e) => server_error.set(Some(to_api_error(&e).to_string())),
            }
        });
    };

    view! {
        <AuthCard title="Choose a new password">
            <form class="space-y-4" on:submit=submit>
                <p class="text-sm text-gray-600">
                    {move || link.get().map(|(email, _)| format!("Resetting the password for {email}")).unwrap_or_default()}
                </p>
                <FormBanner message=server_error />
                <div>
                    <TextInput
                        value=password
                        label="New password"
                        input_type="password"
                        autocomplete="new-password"
                        error=field_error("password")
                    />
                    <PasswordChecklist password=password />
                </div>
                <TextInput
                    value=password_confirmation
                    label="Confirm password"
                    input_type="password"
                    autocomplete="new-password"
                    error=field_error("password_confirmation")
                />
                <Button button_type="submit" disabled=pending class="w-full">
                    {move || if pending.get() { "Saving..." } else { "Reset password" }}
                </Button>
            </form>
        </AuthCard>
    }
}
