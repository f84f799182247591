// web_app/pages/login.rs - Login with a forgot-password toggle

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::web_app::components::{redirect_if_authenticated, AuthCard, Button, FormBanner, TextInput};
use crate::web_app::context::use_session;
use crate::web_app::server_fns::{forgot_password, login, to_api_error};
use crate::web_app::validation::{validate_forgot_password, validate_login, FieldErrors};

#[component]
pub fn LoginPage() -> impl IntoView {
    redirect_if_authenticated("/products");

    let forgot_mode = RwSignal::new(false);

    view! {
        <AuthCard title="Sign in">
            <Show
                when=move || forgot_mode.get()
                fallback=move || view! { <LoginForm on_forgot=Callback::new(move |_| forgot_mode.set(true)) /> }
            >
                <ForgotPasswordForm on_back=Callback::new(move |_| forgot_mode.set(false)) />
            </Show>
        </AuthCard>
    }
}

#[component]
fn LoginForm(on_forgot: Callback<()>) -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::default());
    let server_error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);
    let field_error = move |field: &'static str| Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)));

    let submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let (email_value, password_value) = (email.get_untracked().trim().to_string(), password.get_untracked());
        if let Err(invalid) = validate_login(&email_value, &password_value) {
            errors.set(invalid);
            return;
        }
        errors.set(FieldErrors::default());
        server_error.set(None);
        pending.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            let result = login(email_value, password_value).await;
            pending.set(false);
            match result {
                Ok(auth) => {
                    tracing::info!("Logged in");
                    session.sign_in(auth);
                    navigate("/products", Default::default());
                }
                Err(e) => server_error.set(Some(to_api_error(&e).to_string())),
            }
        });
    };

    view! {
        <form class="space-y-4" on:submit=submit>
            <FormBanner message=server_error />
            <TextInput value=email label="Email" input_type="email" autocomplete="email" error=field_error("email") />
            <TextInput
                value=password
                label="Password"
                input_type="password"
                autocomplete="current-password"
                error=field_error("password")
            />
            <div class="flex justify-end">
                <button type="button" class="text-sm text-blue-600 hover:underline" on:click=move |_| on_forgot.run(())>
                    "Forgot your password?"
                </button>
            </div>
            <Button button_type="submit" disabled=pending class="w-full">
                {move || if pending.get() { "Signing in..." } else { "Sign in" }}
            </Button>
            <p class="text-sm text-center text-gray-600">
                "No account yet? " <A href="/register" attr:class="text-blue-600 hover:underline">"Create one"</A>
            </p>
        </form>
    }
}

#[component]
fn ForgotPasswordForm(on_back: Callback<()>) -> impl IntoView {
    let email = RwSignal::new(String::new());
    let errors = RwSignal::new(FieldErrors::default());
    let server_error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);

    let submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let email_value = email.get_untracked().trim().to_string();
        if let Err(invalid) = validate_forgot_password(&email_value) {
            errors.set(invalid);
            return;
        }
        errors.set(FieldErrors::default());
        server_error.set(None);
        pending.set(true);

        spawn_local(async move {
            let result = forgot_password(email_value).await;
            pending.set(false);
            match result {
                Ok(message) => notice.set(Some(message)),
                Err(e) => server_error.set(Some(to_api_error(&e).to_string())),
            }
        });
    };

    view! {
        <form class="space-y-4" on:submit=submit>
            <p class="text-sm text-gray-600">"Enter your email and we will send you a link to reset your password."</p>
            <FormBanner message=server_error />
            <FormBanner message=notice success=true />
            <TextInput
                value=email
                label="Email"
                input_type="email"
                autocomplete="email"
                error=Signal::derive(move || errors.with(|e| e.get("email").map(str::to_string)))
            />
            <Button button_type="submit" disabled=pending class="w-full">
                {move || if pending.get() { "Sending..." } else { "Send reset link" }}
            </Button>
            <button type="button" class="w-full text-sm text-gray-600 hover:underline" on:click=move |_| on_back.run(())>
                "Back to sign in"
            </button>
        </form>
    }
}
