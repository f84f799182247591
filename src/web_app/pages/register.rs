// web_app/pages/register.rs - Self-registration

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::web_app::components::{
    redirect_if_authenticated, AuthCard, Button, FormBanner, PasswordChecklist, TextInput,
};
use crate::web_app::context::use_session;
use crate::web_app::model::RegisterData;
use crate::web_app::server_fns::{register, to_api_error};
use crate::web_app::validation::{validate_register, FieldErrors};

#[component]
pub fn RegisterPage() -> impl IntoView {
    redirect_if_authenticated("/products");

    let session = use_session();
    let navigate = use_navigate();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let repeat_password = RwSignal::new(String::new());

    let errors = RwSignal::new(FieldErrors::default());
    let server_error = RwSignal::new(None::<String>);
    let pending = RwSignal::new(false);
    let field_error = move |field: &'static str| Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)));

    let submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let data = RegisterData {
            name: name.get_untracked(),
            email: email.get_untracked(),
            phone: phone.get_untracked(),
            password: password.get_untracked(),
            repeat_password: repeat_password.get_untracked(),
        };
        if let Err(invalid) = validate_register(&data) {
            errors.set(invalid);
            return;
        }
        errors.set(FieldErrors::default());
        server_error.set(None);
        pending.set(true);

        let navigate = navigate.clone();
        spawn_local(async move {
            let result = register(data).await;
            pending.set(false);
            match result {
                Ok(auth) => {
                    tracing::info!("Account created");
                    session.sign_in(auth);
                    navigate("/products", Default::default());
                }
                Err(e) => server_error.set(Some(to_api_error(&e).to_string())),
            }
        });
    };

    view! {
        <AuthCard title="Create an account">
            <form class="space-y-4" on:submit=submit>
                <FormBanner message=server_error />
                <TextInput value=name label="Name" autocomplete="name" error=field_error("name") />
                <TextInput value=email label="Email" input_type="email" autocomplete="email" error=field_error("email") />
                <TextInput value=phone label="Phone" input_type="tel" autocomplete="tel" error=field_error("phone") />
                <div>
                    <TextInput
                        value=password
                        label="Password"
                        input_type="password"
                        autocomplete="new-password"
                        error=field_error("password")
                    />
                    <PasswordChecklist password=password />
                </div>
                <TextInput
                    value=repeat_password
                    label="Repeat password"
                    input_type="password"
                    autocomplete="new-password"
                    error=field_error("repeat_password")
                />
                <Button button_type="submit" disabled=pending class="w-full">
                    {move || if pending.get() { "Creating account..." } else { "Create account" }}
                </Button>
                <p class="text-sm text-center text-gray-600">
                    "Already registered? " <A href="/login" attr:class="text-blue-600 hover:underline">"Sign in"</A>
                </p>
            </form>
        </AuthCard>
    }
}
