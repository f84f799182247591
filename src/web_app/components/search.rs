// web_app/components/search.rs - Catalog search controls
//
// - SearchBar: query input submitted with Enter or the button
// - SortSelect: name/price, ascending/descending
// - PerPageSelect: page size choices

use leptos::prelude::*;

use crate::web_app::model::{SortOption, PER_PAGE_CHOICES};

/// Search bar component
///
/// Typing only edits local state; the search runs on submit.
#[component]
pub fn SearchBar(
    /// Query currently in effect (e.g. from the URL)
    #[prop(into)]
    query: Signal<String>,
    /// Callback with the submitted query
    on_search: Callback<String>,
    #[prop(default = false)]
    large: bool,
) -> impl IntoView {
    let local_query = RwSignal::new(query.get_untracked());

    Effect::new(move || {
        local_query.set(query.get());
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        on_search.run(local_query.get_untracked().trim().to_string());
    };

    let input_class = if large {
        "w-full pl-10 pr-4 py-4 border-2 border-gray-200 rounded-xl text-lg \
         focus:ring-4 focus:ring-blue-100 focus:border-blue-500 outline-none transition-all shadow-sm"
    } else {
        "w-full pl-10 pr-4 py-2.5 border-2 border-gray-200 rounded-xl \
         focus:ring-4 focus:ring-blue-100 focus:border-blue-500 outline-none transition-all shadow-sm"
    };

    view! {
        <form on:submit=on_submit class="w-full">
            <div class="flex gap-3">
                <div class="relative flex-1">
                    <div class="absolute inset-y-0 left-0 pl-3 flex items-center pointer-events-none">
                        <span class="text-gray-400">"🔍"</span>
                    </div>
                    <input
                        type="search"
                        placeholder="Search products by name..."
                        class=input_class
                        prop:value=move || local_query.get()
                        on:input=move |ev| local_query.set(event_target_value(&ev))
                    />
                </div>
                <button
                    type="submit"
                    class="px-6 bg-blue-600 text-white rounded-xl hover:bg-blue-700 active:bg-blue-800 \
                           transition-all font-semibold shadow-md"
                >
                    "Search"
                </button>
            </div>
        </form>
    }
}

/// Sort options selector
#[component]
pub fn SortSelect(
    #[prop(into)]
    sort: Signal<SortOption>,
    on_change: Callback<SortOption>,
) -> impl IntoView {
    view! {
        <label class="flex items-center gap-2 text-sm text-gray-600">
            "Sort by"
            <select
                class="px-3 py-2 border border-gray-300 rounded-lg bg-white focus:ring-2 \
                       focus:ring-blue-500 outline-none cursor-pointer shadow-sm"
                on:change=move |ev| {
                    if let Some(option) = SortOption::from_key(&event_target_value(&ev)) {
                        on_change.run(option);
                    }
                }
            >
                {SortOption::ALL.into_iter().map(|option| view! {
                    <option value=option.key() selected=move || sort.get() == option>
                        {option.to_string()}
                    </option>
                }).collect_view()}
            </select>
        </label>
    }
}

#[component]
pub fn PerPageSelect(
    #[prop(into)]
    per_page: Signal<u32>,
    on_change: Callback<u32>,
) -> impl IntoView {
    view! {
        <label class="flex items-center gap-2 text-sm text-gray-600">
            "Show"
            <select
                class="px-3 py-2 border border-gray-300 rounded-lg bg-white focus:ring-2 \
                       focus:ring-blue-500 outline-none cursor-pointer shadow-sm"
                on:change=move |ev| {
                    if let Ok(value) = event_target_value(&ev).parse::<u32>() {
                        on_change.run(value);
                    }
                }
            >
                {PER_PAGE_CHOICES.into_iter().map(|choice| view! {
                    <option value=choice.to_string() selected=move || per_page.get() == choice>
                        {choice.to_string()}
                    </option>
                }).collect_view()}
            </select>
            "per page"
        </label>
    }
}
