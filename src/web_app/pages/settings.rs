// web_app/pages/settings.rs - Profile settings, plus user management for admins

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::web_app::components::{Button, FormBanner, TextInput, UsersTable};
use crate::web_app::context::use_session;
use crate::web_app::model::{ContactMethod, UserPayload};
use crate::web_app::server_fns::update_profile;
use crate::web_app::validation::{validate_user_form, FieldErrors};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tab {
    Profile,
    Users,
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let session = use_session();
    let tab = RwSignal::new(Tab::Profile);

    let tab_class = move |which: Tab| {
        move || {
            if tab.get() == which {
                "px-4 py-2 -mb-px border-b-2 border-blue-600 text-blue-600 font-medium"
            } else {
                "px-4 py-2 -mb-px border-b-2 border-transparent text-gray-500 hover:text-gray-700"
            }
        }
    };

    view! {
        <div class="max-w-5xl mx-auto px-4 py-8">
            <h1 class="text-2xl font-bold text-gray-900 mb-6">"Settings"</h1>
            <div class="flex gap-2 border-b border-gray-200 mb-6">
                <button class=tab_class(Tab::Profile) on:click=move |_| tab.set(Tab::Profile)>"Profile"</button>
                <Show when=move || session.is_admin()>
                    <button class=tab_class(Tab::Users) on:click=move |_| tab.set(Tab::Users)>"Users"</button>
                </Show>
            </div>

            {move || match tab.get() {
                Tab::Users if session.is_admin() => view! { <UsersTable /> }.into_any(),
                _ => view! { <ProfileForm /> }.into_any(),
            }}
        </div>
    }
}

#[component]
fn ProfileForm() -> impl IntoView {
    let session = use_session();
    let current = session.user();

    let name = RwSignal::new(current.as_ref().map(|u| u.name.clone()).unwrap_or_default());
    let email = RwSignal::new(current.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let phone = RwSignal::new(current.as_ref().map(|u| u.phone.clone()).unwrap_or_default());
    let document = RwSignal::new(current.as_ref().and_then(|u| u.document.clone()).unwrap_or_default());
    let contact = RwSignal::new(current.as_ref().map(|u| u.preferred_contact_method).unwrap_or_default());
    let password = RwSignal::new(String::new());
    let password_confirmation = RwSignal::new(String::new());

    let errors = RwSignal::new(FieldErrors::default());
    let server_error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);
    let field_error = move |field: &'static str| Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)));

    let submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let optional = |value: String| Some(value).filter(|v| !v.trim().is_empty());
        let payload = UserPayload {
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            phone: phone.get_untracked().trim().to_string(),
            document: optional(document.get_untracked()),
            password: optional(password.get_untracked()),
            password_confirmation: optional(password_confirmation.get_untracked()),
            role: None,
            preferred_contact_method: Some(contact.get_untracked()),
        };
        if let Err(invalid) = validate_user_form(&payload, false) {
            errors.set(invalid);
            return;
        }
        errors.set(FieldErrors::default());
        server_error.set(None);
        notice.set(None);
        saving.set(true);

        let token = session.token().unwrap_or_default();
        spawn_local(async move {
            let result = update_profile(token, payload).await;
            saving.set(false);
            match result {
                Ok(user) => {
                    tracing::info!("Profile updated");
                    session.set_user(user);
                    password.set(String::new());
                    password_confirmation.set(String::new());
                    notice.set(Some("Profile saved".to_string()));
                }
                Err(e) => server_error.set(Some(session.error_message(&e))),
            }
        });
    };

    view! {
        <form class="max-w-xl space-y-4 bg-white rounded-xl border border-gray-100 shadow-sm p-6" on:submit=submit>
            <FormBanner message=server_error />
            <FormBanner message=notice success=true />
            <TextInput value=name label="Name" autocomplete="name" error=field_error("name") />
            <TextInput value=email label="Email" input_type="email" autocomplete="email" error=field_error("email") />
            <div class="grid grid-cols-2 gap-3">
                <TextInput value=phone label="Phone" input_type="tel" error=field_error("phone") />
                <TextInput value=document label="CPF / CNPJ" />
            </div>
            <label class="block text-sm">
                <span class="block font-medium text-gray-700 mb-1">"Preferred contact"</span>
                <select
                    class="w-full px-3 py-2 border border-gray-300 rounded-lg bg-white"
                    on:change=move |ev| {
                        if let Some(method) = ContactMethod::parse(&event_target_value(&ev)) {
                            contact.set(method);
                        }
                    }
                >
                    {ContactMethod::ALL.into_iter().map(|method| view! {
                        <option value=method.as_str() selected=move || contact.get() == method>
                            {method.to_string()}
                        </option>
                    }).collect_view()}
                </select>
            </label>
            <div class="grid grid-cols-2 gap-3">
                <TextInput
                    value=password
                    label="New password"
                    placeholder="Leave blank to keep"
                    input_type="password"
                    autocomplete="new-password"
                    error=field_error("password")
                />
                <TextInput
                    value=password_confirmation
                    label="Confirm password"
                    input_type="password"
                    autocomplete="new-password"
                    error=field_error("password_confirmation")
                />
            </div>
            <div class="flex justify-end">
                <Button button_type="submit" disabled=saving>
                    {move || if saving.get() { "Saving..." } else { "Save profile" }}
                </Button>
            </div>
        </form>
    }
}
