// web_app/components/auth.rs - Route guard and auth form pieces

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

use super::common::Loading;
use crate::web_app::context::use_session;
use crate::web_app::validation::password_checklist;

/// Renders `children` only for a live session; otherwise sends the user to /login
///
/// Nothing is decided until storage has been read, so a reload does not
/// bounce a logged-in user.
#[component]
pub fn ProtectedRoute(children: ChildrenFn) -> impl IntoView {
    let session = use_session();
    let navigate = use_navigate();

    Effect::new(move |_| {
        if session.ready() && !session.is_authenticated() {
            tracing::info!("No active session, redirecting to login");
            navigate(
                "/login",
                NavigateOptions {
                    replace: true,
                    ..Default::default()
                },
            );
        }
    });

    view! {
        <Show
            when=move || session.ready() && session.is_authenticated()
            fallback=|| view! { <Loading message="Checking session..." /> }
        >
            {children()}
        </Show>
    }
}

/// Redirects an already logged-in user away from the auth pages
pub fn redirect_if_authenticated(to: &'static str) {
    let session = use_session();
    let navigate = use_navigate();
    Effect::new(move |_| {
        if session.ready() && session.is_authenticated() {
            navigate(to, NavigateOptions { replace: true, ..Default::default() });
        }
    });
}

/// Live password rule checklist
#[component]
pub fn PasswordChecklist(
    #[prop(into)]
    password: Signal<String>,
) -> impl IntoView {
    view! {
        <ul class="text-xs space-y-1 mt-2">
            {move || {
                password.with(|p| password_checklist(p))
                    .into_iter()
                    .map(|(label, met)| {
                        let class = if met { "text-green-600" } else { "text-gray-400" };
                        view! {
                            <li class=class>{if met { "✓ " } else { "○ " }}{label}</li>
                        }
                    })
                    .collect_view()
            }}
        </ul>
    }
}

/// Card layout shared by the login, register and reset pages
#[component]
pub fn AuthCard(
    #[prop(into)]
    title: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="min-h-[calc(100vh-4rem)] flex items-center justify-center bg-gradient-to-br from-blue-50 to-gray-100 px-4 py-12">
            <div class="w-full max-w-md bg-white rounded-2xl shadow-xl border border-gray-100 p-8">
                <h1 class="text-2xl font-bold text-gray-900 mb-6 text-center">{title}</h1>
                {children()}
            </div>
        </div>
    }
}

/// Form-level error or notice banner
#[component]
pub fn FormBanner(
    #[prop(into)]
    message: Signal<Option<String>>,
    #[prop(default = false)]
    success: bool,
) -> impl IntoView {
    let class = if success {
        "mb-4 px-4 py-3 rounded-lg text-sm bg-green-50 text-green-800 border border-green-200"
    } else {
        "mb-4 px-4 py-3 rounded-lg text-sm bg-red-50 text-red-700 border border-red-200"
    };
    move || message.get().map(|text| view! { <div role="alert" class=class>{text}</div> })
}
