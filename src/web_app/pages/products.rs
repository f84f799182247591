// web_app/pages/products.rs - Catalog listing
//
// All state lives in the URL (`q`, `page`, `per_page`, `name_sort` /
// `price_sort`); every control navigates to a new query string.

use leptos::prelude::*;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::web_app::components::*;
use crate::web_app::context::{describe_error, use_selection, use_session};
use crate::web_app::model::{Product, ProductQuery};
use crate::web_app::server_fns::list_products;

#[component]
pub fn ProductsPage() -> impl IntoView {
    let session = use_session();
    let selection = use_selection();
    let query_map = use_query_map();
    let navigate = use_navigate();

    let query = Memo::new(move |_| query_map.with(|q| ProductQuery::from_url_params(|key| q.get(key))));

    let products = LocalResource::new(move || {
        let query = query.get();
        async move {
            let token = session.token();
            list_products(token, query).await
        }
    });

    session.logout_on_unauthorized(products);

    // Selected products pick up fresh stock from every page we load
    Effect::new(move |_| {
        if let Some(Ok(page)) = products.get() {
            selection.refresh(&page.items);
        }
    });

    let go = move |next: ProductQuery| navigate(&next.to_url(), Default::default());

    let on_search = {
        let go = go.clone();
        Callback::new(move |search: String| {
            go(ProductQuery { search, page: 1, ..query.get_untracked() });
        })
    };
    let on_sort = {
        let go = go.clone();
        Callback::new(move |sort| go(ProductQuery { sort, page: 1, ..query.get_untracked() }))
    };
    let on_per_page = {
        let go = go.clone();
        Callback::new(move |per_page| go(ProductQuery { per_page, page: 1, ..query.get_untracked() }))
    };
    let on_page = Callback::new(move |page| go(ProductQuery { page, ..query.get_untracked() }));

    let detail = RwSignal::new(None::<Product>);
    let on_open = Callback::new(move |product: Product| detail.set(Some(product)));

    let search_text = Signal::derive(move || query.with(|q| q.search.clone()));
    let sort = Signal::derive(move || query.with(|q| q.sort));
    let per_page = Signal::derive(move || query.with(|q| q.per_page));

    view! {
        <div class="max-w-7xl mx-auto px-4 py-8 space-y-6">
            <SearchBar query=search_text on_search=on_search />

            <div class="flex flex-wrap items-center justify-between gap-3">
                <p class="text-sm text-gray-500">
                    {move || match products.get() {
                        Some(Ok(page)) => format!("{} products", page.total),
                        _ => String::new(),
                    }}
                </p>
                <div class="flex gap-4">
                    <SortSelect sort=sort on_change=on_sort />
                    <PerPageSelect per_page=per_page on_change=on_per_page />
                </div>
            </div>

            <Transition fallback=|| view! { <Loading message="Loading products..." /> }>
                {move || products.get().map(|result| match result {
                    Err(e) => view! {
                        <ErrorDisplay
                            error=describe_error(&e)
                            on_retry=Callback::new(move |_| products.refetch())
                        />
                    }
                    .into_any(),
                    Ok(page) if page.is_empty() => view! {
                        <EmptyState
                            title="No products found"
                            description="Try another search term or clear the search."
                        />
                    }
                    .into_any(),
                    Ok(page) => {
                        let (current, last) = (page.current_page, page.last_page);
                        view! {
                            <ResultsGrid products=Signal::from(page.items) on_open=on_open />
                            <Show when=move || { last > 1 }>
                                <Pagination
                                    current_page=Signal::from(current)
                                    last_page=Signal::from(last)
                                    on_page=on_page
                                />
                            </Show>
                        }
                        .into_any()
                    }
                })}
            </Transition>

            {move || detail.get().map(|product| view! {
                <ModalWrapper
                    title=product.name.clone()
                    width="max-w-5xl"
                    on_close=Callback::new(move |_| detail.set(None))
                >
                    <ProductDetail product=product.clone() />
                </ModalWrapper>
            })}
        </div>
    }
}
