// web_app/components/navbar.rs - Top navigation bar

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::web_app::context::{use_selection, use_session};

#[component]
pub fn Navbar() -> impl IntoView {
    let session = use_session();
    let selection = use_selection();
    let drawer_open = selection.drawer_open();
    let navigate = use_navigate();

    let logout = move |_| {
        tracing::info!("User logged out");
        session.teardown();
        selection.set().set(Default::default());
        navigate("/login", Default::default());
    };

    let count = move || selection.len();
    let user_name = move || session.user().map(|u| u.name).unwrap_or_default();

    view! {
        <header class="bg-white border-b border-gray-200 sticky top-0 z-40 shadow-sm">
            <nav class="max-w-7xl mx-auto px-4 h-16 flex items-center justify-between gap-4">
                <A href="/" attr:class="text-xl font-bold text-blue-600 tracking-tight">
                    "Catalog Proposals"
                </A>

                <Show when=move || session.is_authenticated()>
                    <div class="flex items-center gap-2 sm:gap-4">
                        <A href="/products" attr:class="text-sm font-medium text-gray-600 hover:text-blue-600">
                            "Products"
                        </A>

                        <button
                            type="button"
                            class="relative px-3 py-2 rounded-lg text-sm font-medium text-gray-700 hover:bg-gray-100"
                            title="Selected products"
                            on:click=move |_| drawer_open.update(|open| *open = !*open)
                        >
                            "Selection"
                            <Show when=move || { count() > 0 }>
                                <span class="absolute -top-1 -right-1 min-w-5 h-5 px-1 rounded-full bg-blue-600 \
                                             text-white text-xs flex items-center justify-center">
                                    {count}
                                </span>
                            </Show>
                        </button>

                        <A href="/settings" attr:class="text-sm text-gray-600 hover:text-blue-600 hidden sm:inline">
                            {user_name}
                        </A>

                        <button
                            type="button"
                            class="px-3 py-2 rounded-lg text-sm font-medium text-red-600 hover:bg-red-50"
                            on:click=logout.clone()
                        >
                            "Log out"
                        </button>
                    </div>
                </Show>
            </nav>
        </header>
    }
}
