// web_app/components/product.rs - Product display components
//
// - ProductCard: grid card with the selection checkbox
// - ProductDetail: full view with an image carousel (shown in a modal)
// - ResultsGrid: the catalog grid

use leptos::prelude::*;

use super::common::{Badge, PriceDisplay};
use crate::web_app::context::use_selection;
use crate::web_app::model::Product;

/// Shorten to `max` characters, adding an ellipsis when cut
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut.trim_end())
    }
}

/// Badge variant and text for a product's stock
pub fn stock_label(product: &Product) -> (&'static str, String) {
    match product.stock() {
        None => ("gray", "Stock not tracked".to_string()),
        Some(0) => ("red", "Out of stock".to_string()),
        Some(n) if n <= 10 => ("yellow", format!("Only {n} left")),
        Some(n) => ("green", format!("{n} in stock")),
    }
}

#[component]
fn ProductImage(
    #[prop(into)]
    src: Option<String>,
    alt: String,
    #[prop(default = "h-48")]
    height: &'static str,
) -> impl IntoView {
    match src {
        Some(src) => view! {
            <img
                src=src
                alt=alt
                loading="lazy"
                class=format!("{height} w-full object-contain bg-white")
            />
        }
        .into_any(),
        None => view! {
            <div class=format!("{height} bg-gray-100 flex items-center justify-center text-gray-300")>
                <span class="text-4xl">"📦"</span>
            </div>
        }
        .into_any(),
    }
}

/// Product card for the catalog grid
#[component]
pub fn ProductCard(
    product: Product,
    /// Opens the detail modal
    on_open: Callback<Product>,
) -> impl IntoView {
    let selection = use_selection();
    let code = product.code.clone();
    let is_selected = Signal::derive(move || selection.contains(&code));

    let (stock_variant, stock_text) = stock_label(&product);
    let description_preview = truncate_chars(&product.description, 120);
    let cover = product.all_images().into_iter().next();
    let for_toggle = product.clone();
    let for_open = product.clone();

    view! {
        <div
            class=move || {
                let ring = if is_selected.get() { "ring-2 ring-blue-500" } else { "" };
                format!(
                    "group bg-white rounded-xl shadow-sm hover:shadow-xl transition-all duration-300 \
                     border border-gray-100 flex flex-col h-full overflow-hidden relative {ring}"
                )
            }
        >
            <label
                class="absolute top-3 left-3 z-10 bg-white/90 rounded-md p-1.5 shadow cursor-pointer"
                title="Add to proposal"
                on:click=|ev| ev.stop_propagation()
            >
                <input
                    type="checkbox"
                    class="rounded border-gray-300 text-blue-600 focus:ring-blue-500 h-5 w-5"
                    prop:checked=move || is_selected.get()
                    on:change=move |_| selection.toggle(for_toggle.clone())
                />
            </label>

            <button
                type="button"
                class="text-left flex flex-col flex-1 cursor-pointer"
                on:click=move |_| on_open.run(for_open.clone())
            >
                <ProductImage src=cover alt=product.name.clone() />

                <div class="p-5 flex flex-col flex-1">
                    <div class="flex justify-between items-start mb-3 gap-2">
                        <span class="text-xs font-mono text-gray-400">{product.code.clone()}</span>
                        <span class="text-lg font-bold text-blue-600 bg-blue-50 px-2 py-1 rounded-lg">
                            {product.price_label()}
                        </span>
                    </div>

                    <h3 class="font-bold text-gray-900 mb-2 line-clamp-2 text-lg group-hover:text-blue-600 transition-colors">
                        {product.name.clone()}
                    </h3>

                    <p class="text-gray-600 text-sm mb-4 line-clamp-3 flex-1">{description_preview}</p>

                    <div class="flex justify-between items-center pt-3 border-t border-gray-100">
                        <Badge variant=stock_variant>{stock_text}</Badge>
                        <span class="text-xs text-gray-400">{product.provider.clone()}</span>
                    </div>
                </div>
            </button>
        </div>
    }
}

/// Product detail view
///
/// Full information plus an image carousel over the primary image and gallery.
#[component]
pub fn ProductDetail(product: Product) -> impl IntoView {
    let selection = use_selection();
    let images = product.all_images();
    let image_count = images.len();
    let current = RwSignal::new(0_usize);

    let code = product.code.clone();
    let is_selected = Signal::derive(move || selection.contains(&code));
    let (stock_variant, stock_text) = stock_label(&product);
    let for_toggle = product.clone();

    let details: Vec<(&'static str, String)> = [
        ("Code", Some(product.code.clone())),
        ("Provider", Some(product.provider.clone()).filter(|p| !p.is_empty())),
        ("Weight", product.weight.clone()),
        ("Units per box", product.box_quantity.clone()),
        ("Box details", product.box_mention.clone()),
        ("Notes", product.mention.clone()),
    ]
    .into_iter()
    .filter_map(|(label, value)| value.filter(|v| !v.trim().is_empty()).map(|v| (label, v)))
    .collect();

    let slides = images.clone();
    let carousel = move || {
        let index = current.get();
        let src = slides.get(index).cloned();
        view! {
            <div class="relative bg-white rounded-xl border border-gray-100 overflow-hidden">
                <ProductImage src=src alt=format!("Image {} of {}", index + 1, image_count.max(1)) height="h-80" />
                <Show when=move || { image_count > 1 }>
                    <button
                        class="absolute left-2 top-1/2 -translate-y-1/2 bg-white/80 rounded-full w-9 h-9 shadow hover:bg-white"
                        on:click=move |_| current.update(|i| *i = (*i + image_count - 1) % image_count)
                        title="Previous image"
                    >
                        "‹"
                    </button>
                    <button
                        class="absolute right-2 top-1/2 -translate-y-1/2 bg-white/80 rounded-full w-9 h-9 shadow hover:bg-white"
                        on:click=move |_| current.update(|i| *i = (*i + 1) % image_count)
                        title="Next image"
                    >
                        "›"
                    </button>
                    <span class="absolute bottom-2 right-3 text-xs bg-gray-900/60 text-white px-2 py-0.5 rounded-full">
                        {move || format!("{} / {}", current.get() + 1, image_count)}
                    </span>
                </Show>
            </div>
        }
    };

    view! {
        <div class="space-y-8">
            <div class="flex flex-col md:flex-row gap-6">
                <div class="w-full md:w-1/2 space-y-3">
                    {carousel}
                    <div class="flex gap-2 overflow-x-auto">
                        {images.into_iter().enumerate().map(|(i, src)| view! {
                            <button
                                class=move || if current.get() == i {
                                    "w-16 h-16 rounded-lg border-2 border-blue-500 overflow-hidden flex-shrink-0"
                                } else {
                                    "w-16 h-16 rounded-lg border border-gray-200 overflow-hidden flex-shrink-0"
                                }
                                on:click=move |_| current.set(i)
                            >
                                <img src=src class="w-full h-full object-cover" alt="" />
                            </button>
                        }).collect_view()}
                    </div>
                </div>

                <div class="flex-1 space-y-4">
                    <h2 class="text-3xl font-bold text-gray-900 leading-tight">{product.name.clone()}</h2>
                    <div class="flex items-center gap-3">
                        <PriceDisplay price=product.unit_price() highlight=true />
                        <Badge variant=stock_variant>{stock_text}</Badge>
                    </div>

                    <dl class="grid grid-cols-2 gap-x-4 gap-y-2 text-sm">
                        {details.into_iter().map(|(label, value)| view! {
                            <dt class="text-gray-500">{label}</dt>
                            <dd class="font-medium text-gray-900">{value}</dd>
                        }).collect_view()}
                    </dl>

                    <button
                        type="button"
                        class=move || if is_selected.get() {
                            "w-full px-4 py-2.5 rounded-lg font-medium border border-red-300 text-red-700 hover:bg-red-50"
                        } else {
                            "w-full px-4 py-2.5 rounded-lg font-medium bg-blue-600 text-white hover:bg-blue-700"
                        }
                        on:click=move |_| selection.toggle(for_toggle.clone())
                    >
                        {move || if is_selected.get() { "Remove from proposal" } else { "Add to proposal" }}
                    </button>
                </div>
            </div>

            {(!product.variations.is_empty()).then(|| view! {
                <div class="bg-gray-50 rounded-xl p-6 border border-gray-100">
                    <h3 class="text-lg font-bold text-gray-900 mb-4">"Variations"</h3>
                    <table class="w-full text-sm">
                        <thead class="text-left text-gray-500">
                            <tr><th>"Code"</th><th>"Name"</th><th class="text-right">"Stock"</th></tr>
                        </thead>
                        <tbody>
                            {product.variations.iter().map(|v| view! {
                                <tr class="border-t border-gray-200">
                                    <td class="py-1.5 font-mono text-xs">{v.code.clone()}</td>
                                    <td>{v.name.clone()}</td>
                                    <td class="text-right">{v.stock.max(0)}</td>
                                </tr>
                            }).collect_view()}
                        </tbody>
                    </table>
                </div>
            })}

            <div>
                <h3 class="text-lg font-bold text-gray-900 mb-3">"Description"</h3>
                <p class="text-gray-600 leading-relaxed">
                    {if product.description.trim().is_empty() { "N/A".to_string() } else { product.description.clone() }}
                </p>
            </div>
        </div>
    }
}

/// Catalog grid
#[component]
pub fn ResultsGrid(
    #[prop(into)]
    products: Signal<Vec<Product>>,
    on_open: Callback<Product>,
) -> impl IntoView {
    view! {
        <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-6">
            <For
                each=move || products.get()
                key=|product| product.code.clone()
                children=move |product| view! { <ProductCard product=product on_open=on_open /> }
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate_chars("short", 10), "short");
        assert_eq!(truncate_chars("caneca térmica azul", 14), "caneca térmica...");
        assert_eq!(truncate_chars("ééééé", 3), "ééé...");
    }

    #[test]
    fn test_stock_label_levels() {
        let mut product: Product = serde_json::from_str(r#"{"ProductCod": "A", "Name": "Pen"}"#).unwrap();
        assert_eq!(stock_label(&product).1, "Stock not tracked");

        product.variations = serde_json::from_str(r#"[{"Stock": 0}]"#).unwrap();
        assert_eq!(stock_label(&product), ("red", "Out of stock".to_string()));

        product.variations = serde_json::from_str(r#"[{"Stock": 4}, {"Stock": 3}]"#).unwrap();
        assert_eq!(stock_label(&product), ("yellow", "Only 7 left".to_string()));
    }
}
