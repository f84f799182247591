// web_app/pages/home.rs - Landing page with the catalog search bar

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::web_app::components::SearchBar;
use crate::web_app::model::ProductQuery;

#[component]
pub fn HomePage() -> impl IntoView {
    let navigate = use_navigate();

    let on_search = Callback::new(move |q: String| {
        let query = ProductQuery { search: q, ..ProductQuery::default() };
        navigate(&query.to_url(), Default::default());
    });

    view! {
        <div class="bg-gradient-to-b from-blue-50 to-gray-50 min-h-[calc(100vh-4rem)]">
            <div class="max-w-3xl mx-auto px-4 pt-24 pb-16 text-center">
                <h1 class="text-4xl font-extrabold text-gray-900 tracking-tight mb-4">
                    "Build a proposal in minutes"
                </h1>
                <p class="text-lg text-gray-600 mb-10">
                    "Search the catalog, pick products and quantities, and download a ready-to-send Word proposal."
                </p>
                <SearchBar query={Signal::<String>::from(String::new())} on_search=on_search large=true />
                <p class="mt-4 text-sm text-gray-400">"Leave it empty to browse every product."</p>
            </div>
        </div>
    }
}
