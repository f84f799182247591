// web_app/components/selection.rs - Selected-products drawer
//
// Slides in from the right. Quantities are edited here; warnings explain
// clamped quantities and out-of-stock items left out of the total.

use leptos::prelude::*;

use super::common::{Button, EmptyState, QuantityInput, SecondaryButton};
use crate::web_app::context::{use_export, use_selection};
use crate::web_app::pricing::format_brl;
use crate::web_app::selection::{QuantityChange, SelectedItem};

#[component]
fn SelectedRow(item: SelectedItem) -> impl IntoView {
    let selection = use_selection();
    let set = selection.set();
    let code = item.code().to_string();

    let quantity = {
        let code = code.clone();
        Signal::derive(move || set.with(|s| s.quantity(&code).unwrap_or(1)))
    };
    let warning = {
        let code = code.clone();
        Signal::derive(move || set.with(|s| s.warning(&code)).map(|w| w.to_string()))
    };
    let line_total = {
        let code = code.clone();
        Signal::derive(move || {
            set.with(|s| {
                s.get(&code)
                    .and_then(|item| item.line_total())
                    .map(format_brl)
                    .unwrap_or_else(|| "N/A".to_string())
            })
        })
    };

    let stock = item.stock();
    let in_stock = item.is_in_stock();
    let thumbnail = item.product.all_images().into_iter().next();

    let on_change = {
        let code = code.clone();
        Callback::new(move |requested: u32| {
            if let QuantityChange::Clamped { requested, applied } = selection.set_quantity(&code, requested) {
                tracing::debug!("Quantity for {} clamped from {} to {}", code, requested, applied);
            }
        })
    };
    let remove_code = code.clone();

    view! {
        <li class="flex gap-3 py-4 border-b border-gray-100">
            {match thumbnail {
                Some(src) => view! { <img src=src alt="" class="w-16 h-16 rounded-lg object-contain bg-white border" /> }.into_any(),
                None => view! { <div class="w-16 h-16 rounded-lg bg-gray-100"></div> }.into_any(),
            }}
            <div class="flex-1 min-w-0">
                <div class="flex justify-between gap-2">
                    <p class="font-medium text-gray-900 truncate">{item.product.name.clone()}</p>
                    <button
                        type="button"
                        class="text-gray-400 hover:text-red-600 text-sm"
                        title="Remove"
                        on:click=move |_| selection.remove(&remove_code)
                    >
                        "✕"
                    </button>
                </div>
                <p class="text-xs text-gray-500">{item.product.price_label()} " each"</p>

                <div class="flex items-center justify-between mt-2">
                    {if in_stock {
                        view! { <QuantityInput value=quantity max={Signal::<Option<u32>>::from(stock)} on_change=on_change /> }.into_any()
                    } else {
                        view! { <span class="text-sm text-gray-400">"Qty 1"</span> }.into_any()
                    }}
                    <span class=move || if in_stock { "font-semibold text-gray-900" } else { "text-gray-400 line-through" }>
                        {line_total}
                    </span>
                </div>

                {move || warning.get().map(|message| view! {
                    <p class="mt-2 text-xs font-medium text-amber-700 bg-amber-50 border border-amber-200 rounded px-2 py-1">
                        {message}
                    </p>
                })}
            </div>
        </li>
    }
}

#[component]
pub fn SelectionDrawer() -> impl IntoView {
    let selection = use_selection();
    let export = use_export();
    let open = selection.drawer_open();
    let set = selection.set();

    let total = Signal::derive(move || set.with(|s| format_brl(s.total())));
    let has_warnings = Signal::derive(move || set.with(|s| s.has_warnings()));
    let empty = Signal::derive(move || selection.is_empty());
    let close = move || open.set(false);

    view! {
        <Show when=move || open.get()>
            <div class="fixed inset-0 z-40 bg-gray-900/40" on:click=move |_| close()></div>
            <aside class="fixed right-0 top-0 bottom-0 z-50 w-full max-w-md bg-white shadow-2xl flex flex-col">
                <div class="flex items-center justify-between px-5 py-4 border-b">
                    <h2 class="text-lg font-bold text-gray-900">
                        "Selected products (" {move || selection.len()} ")"
                    </h2>
                    <button class="text-gray-400 hover:text-gray-600" title="Close" on:click=move |_| close()>
                        "✕"
                    </button>
                </div>

                <div class="flex-1 overflow-y-auto px-5">
                    <Show
                        when=move || !empty.get()
                        fallback=|| view! {
                            <EmptyState title="Nothing selected" description="Tick products in the catalog to build a proposal." />
                        }
                    >
                        <ul>
                            <For
                                each=move || set.get().items().to_vec()
                                key=|item| item.code().to_string()
                                children=|item| view! { <SelectedRow item=item /> }
                            />
                        </ul>
                    </Show>
                </div>

                <div class="border-t px-5 py-4 space-y-3 bg-gray-50">
                    <Show when=move || has_warnings.get()>
                        <p class="text-xs text-amber-700">
                            "Some items have stock warnings. Out-of-stock items are not counted."
                        </p>
                    </Show>
                    <div class="flex justify-between text-lg">
                        <span class="text-gray-600">"Total"</span>
                        <span class="font-bold text-gray-900">{total}</span>
                    </div>
                    <div class="flex gap-2 justify-end">
                        <SecondaryButton
                            disabled=empty
                            on_click=Callback::new(move |_| selection.clear())
                        >
                            "Clear"
                        </SecondaryButton>
                        <Button
                            disabled=empty
                            on_click=Callback::new(move |_| {
                                open.set(false);
                                export.modal_open().set(true);
                            })
                        >
                            "Export proposal"
                        </Button>
                    </div>
                </div>
            </aside>
        </Show>
    }
}
