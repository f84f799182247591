// web_app/components/common.rs - Reusable UI components
//
// Small, composable pieces used throughout the application. They are
// stateless: data arrives through props, changes leave through callbacks
// or the signals they are handed.

use leptos::prelude::*;
use leptos::web_sys::KeyboardEvent;
use rust_decimal::Decimal;

use crate::web_app::pricing::format_brl;

/// Loading spinner component
#[component]
pub fn Loading(
    /// Optional message to display below the spinner
    #[prop(default = "Loading...")]
    message: &'static str,
) -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center p-12">
            <div class="animate-spin rounded-full h-10 w-10 border-4 border-gray-200 border-t-blue-600"></div>
            <span class="mt-4 text-gray-500 font-medium animate-pulse">{message}</span>
        </div>
    }
}

/// Error panel with an optional retry action
#[component]
pub fn ErrorDisplay(
    /// The error message to display
    #[prop(into)]
    error: String,
    #[prop(optional)]
    on_retry: Option<Callback<()>>,
) -> impl IntoView {
    view! {
        <div class="bg-red-50 border border-red-200 rounded-xl p-6 flex items-start gap-4">
            <div class="bg-red-100 p-2 rounded-full text-red-600">
                <span class="text-xl font-bold">"⚠"</span>
            </div>
            <div class="flex-1">
                <h3 class="text-red-800 font-bold mb-1">"Something went wrong"</h3>
                <p class="text-red-600 text-sm">{error}</p>
                {on_retry.map(|retry| view! {
                    <button
                        class="mt-3 text-sm font-medium text-red-700 underline hover:text-red-900"
                        on:click=move |_| retry.run(())
                    >
                        "Try again"
                    </button>
                })}
            </div>
        </div>
    }
}

#[component]
pub fn EmptyState(
    #[prop(into)]
    title: String,
    #[prop(into, default = String::new())]
    description: String,
) -> impl IntoView {
    view! {
        <div class="bg-white rounded-2xl p-12 shadow-sm border border-gray-100 text-center">
            <div class="text-5xl mb-4 text-gray-300">"∅"</div>
            <h3 class="text-lg font-semibold text-gray-700">{title}</h3>
            <p class="text-gray-500 mt-1">{description}</p>
        </div>
    }
}

/// Primary button component
#[component]
pub fn Button(
    /// Button label text
    children: Children,
    /// Click handler
    #[prop(optional)]
    on_click: Option<Callback<()>>,
    /// Whether the button is disabled
    #[prop(into, default = Signal::from(false))]
    disabled: Signal<bool>,
    /// Button type (submit, button, reset)
    #[prop(default = "button")]
    button_type: &'static str,
    /// Additional CSS classes
    #[prop(default = "")]
    class: &'static str,
) -> impl IntoView {
    let base_class = "px-4 py-2 bg-blue-600 text-white rounded-lg hover:bg-blue-700 \
                      transition-colors disabled:bg-gray-400 disabled:cursor-not-allowed \
                      font-medium shadow-sm active:transform active:scale-95";

    view! {
        <button
            type=button_type
            disabled=move || disabled.get()
            class=format!("{} {}", base_class, class)
            on:click=move |_| {
                if let Some(handler) = on_click {
                    handler.run(());
                }
            }
        >
            {children()}
        </button>
    }
}

/// Secondary button component
#[component]
pub fn SecondaryButton(
    children: Children,
    #[prop(optional)]
    on_click: Option<Callback<()>>,
    #[prop(into, default = Signal::from(false))]
    disabled: Signal<bool>,
) -> impl IntoView {
    let class = "px-4 py-2 bg-white text-gray-700 rounded-lg hover:bg-gray-50 \
                 transition-colors border border-gray-300 disabled:opacity-50 \
                 font-medium shadow-sm active:bg-gray-100";

    view! {
        <button
            type="button"
            disabled=move || disabled.get()
            class=class
            on:click=move |_| {
                if let Some(handler) = on_click {
                    handler.run(());
                }
            }
        >
            {children()}
        </button>
    }
}

/// Red button for destructive actions
#[component]
pub fn DangerButton(
    children: Children,
    on_click: Callback<()>,
    #[prop(into, default = Signal::from(false))]
    disabled: Signal<bool>,
) -> impl IntoView {
    view! {
        <button
            type="button"
            disabled=move || disabled.get()
            class="px-4 py-2 bg-red-600 text-white rounded-lg hover:bg-red-700 transition-colors \
                   disabled:bg-gray-400 font-medium shadow-sm"
            on:click=move |_| on_click.run(())
        >
            {children()}
        </button>
    }
}

/// Modal wrapper component
///
/// Provides the backdrop and frame. Open/close is owned by the parent through `Show`.
#[component]
pub fn ModalWrapper(
    /// Modal content
    children: Children,
    /// Callback when modal should close
    on_close: Callback<()>,
    /// Modal title
    #[prop(into, default = String::new())]
    title: String,
    /// Width utility for the frame
    #[prop(default = "max-w-3xl")]
    width: &'static str,
) -> impl IntoView {
    let handle_keydown = move |ev: KeyboardEvent| {
        if ev.key() == "Escape" {
            on_close.run(());
        }
    };

    view! {
        <div
            class="fixed inset-0 z-50 flex items-center justify-center p-4 sm:p-6"
            on:keydown=handle_keydown
        >
            <div
                class="absolute inset-0 bg-gray-900/60 backdrop-blur-sm transition-opacity"
                on:click=move |_| on_close.run(())
            ></div>

            <div
                class=format!("relative bg-white rounded-2xl shadow-2xl w-full {width} max-h-[90vh] flex flex-col overflow-hidden")
                on:click=|ev| ev.stop_propagation()
            >
                <div class="flex justify-between items-center px-6 py-4 border-b border-gray-100 bg-gray-50/50">
                    <h2 class="text-xl font-bold text-gray-800">{title}</h2>
                    <button
                        class="text-gray-400 hover:text-gray-600 hover:bg-gray-100 rounded-full p-2 transition-colors"
                        on:click=move |_| on_close.run(())
                        title="Close"
                    >
                        <svg class="w-6 h-6" fill="none" stroke="currentColor" viewBox="0 0 24 24">
                            <path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M6 18L18 6M6 6l12 12"></path>
                        </svg>
                    </button>
                </div>

                <div class="p-6 overflow-y-auto custom-scrollbar">
                    {children()}
                </div>
            </div>
        </div>
    }
}

pub fn badge_class(variant: &str) -> &'static str {
    match variant {
        "green" => "px-2.5 py-0.5 text-xs font-medium rounded-full bg-green-100 text-green-800 border border-green-200",
        "red" => "px-2.5 py-0.5 text-xs font-medium rounded-full bg-red-100 text-red-800 border border-red-200",
        "blue" => "px-2.5 py-0.5 text-xs font-medium rounded-full bg-blue-100 text-blue-800 border border-blue-200",
        "yellow" => "px-2.5 py-0.5 text-xs font-medium rounded-full bg-yellow-100 text-yellow-800 border border-yellow-200",
        _ => "px-2.5 py-0.5 text-xs font-medium rounded-full bg-gray-100 text-gray-800 border border-gray-200",
    }
}

/// Badge component
#[component]
pub fn Badge(
    children: Children,
    /// Badge color variant
    #[prop(default = "gray")]
    variant: &'static str,
) -> impl IntoView {
    view! {
        <span class=badge_class(variant)>
            {children()}
        </span>
    }
}

/// Labelled text input with an inline error line
#[component]
pub fn TextInput(
    /// The current value
    value: RwSignal<String>,
    #[prop(default = "")]
    label: &'static str,
    /// Placeholder text
    #[prop(default = "")]
    placeholder: &'static str,
    /// Input type (text, search, email, password, tel)
    #[prop(default = "text")]
    input_type: &'static str,
    #[prop(default = "off")]
    autocomplete: &'static str,
    #[prop(into, default = Signal::from(None::<String>))]
    error: Signal<Option<String>>,
    /// Additional CSS classes
    #[prop(default = "")]
    class: &'static str,
) -> impl IntoView {
    let base_class = "w-full px-4 py-2 border rounded-lg \
                      focus:ring-2 focus:ring-blue-500 focus:border-transparent \
                      outline-none transition-shadow shadow-sm";

    view! {
        <label class="block">
            <Show when=move || !label.is_empty()>
                <span class="block text-sm font-medium text-gray-700 mb-1">{label}</span>
            </Show>
            <input
                type=input_type
                placeholder=placeholder
                autocomplete=autocomplete
                class=move || {
                    let border = if error.with(Option::is_some) { "border-red-400" } else { "border-gray-300" };
                    format!("{base_class} {border} {class}")
                }
                prop:value=move || value.get()
                on:input=move |ev| {
                    value.set(event_target_value(&ev));
                }
            />
            {move || error.get().map(|message| view! {
                <span class="block mt-1 text-sm text-red-600">{message}</span>
            })}
        </label>
    }
}

/// Price display component
///
/// Unparseable prices render as "N/A".
#[component]
pub fn PriceDisplay(
    price: Option<Decimal>,
    /// Whether to highlight (larger, bolder)
    #[prop(default = false)]
    highlight: bool,
) -> impl IntoView {
    let class = if highlight {
        "text-xl font-bold text-green-600"
    } else {
        "text-gray-900 font-medium"
    };

    view! {
        <span class=class>
            {price.map(format_brl).unwrap_or_else(|| "N/A".to_string())}
        </span>
    }
}

/// Numeric stepper bounded below by 1 (and above by `max` when known)
#[component]
pub fn QuantityInput(
    #[prop(into)]
    value: Signal<u32>,
    #[prop(into)]
    max: Signal<Option<u32>>,
    on_change: Callback<u32>,
) -> impl IntoView {
    let step = move |delta: i64| {
        let next = (i64::from(value.get_untracked()) + delta).max(1);
        on_change.run(u32::try_from(next).unwrap_or(u32::MAX));
    };

    view! {
        <div class="inline-flex items-center border border-gray-300 rounded-lg overflow-hidden">
            <button
                type="button"
                class="px-2 py-1 text-gray-600 hover:bg-gray-100 disabled:opacity-40"
                disabled=move || value.get() <= 1
                on:click=move |_| step(-1)
            >
                "−"
            </button>
            <input
                type="number"
                min="1"
                max=move || max.get().map(|m| m.to_string())
                class="w-14 text-center outline-none"
                prop:value=move || value.get().to_string()
                on:change=move |ev| {
                    let parsed = event_target_value(&ev).trim().parse::<u32>().unwrap_or(1);
                    on_change.run(parsed.max(1));
                }
            />
            <button
                type="button"
                class="px-2 py-1 text-gray-600 hover:bg-gray-100 disabled:opacity-40"
                disabled=move || max.get().is_some_and(|m| value.get() >= m)
                on:click=move |_| step(1)
            >
                "+"
            </button>
        </div>
    }
}

/// Page numbers shown around the current page, `None` marking a gap
pub fn page_window(current: u32, last: u32) -> Vec<Option<u32>> {
    let last = last.max(1);
    let current = current.clamp(1, last);
    let mut pages = Vec::new();
    let mut previous = 0;
    for page in 1..=last {
        let near = page + 1 >= current && page <= current + 1;
        if page == 1 || page == last || near {
            if page > previous + 1 {
                pages.push(None);
            }
            pages.push(Some(page));
            previous = page;
        }
    }
    pages
}

/// Previous / numbered / next controls
#[component]
pub fn Pagination(
    /// 1-based
    #[prop(into)]
    current_page: Signal<u32>,
    #[prop(into)]
    last_page: Signal<u32>,
    on_page: Callback<u32>,
) -> impl IntoView {
    let button_class = "min-w-9 px-3 py-1.5 rounded-lg border text-sm font-medium transition-colors";

    view! {
        <nav class="flex items-center justify-center gap-1 mt-8" aria-label="Pagination">
            <button
                class=format!("{button_class} border-gray-300 bg-white hover:bg-gray-50 disabled:opacity-40")
                disabled=move || current_page.get() <= 1
                on:click=move |_| on_page.run(current_page.get_untracked().saturating_sub(1).max(1))
            >
                "Previous"
            </button>
            {move || {
                let current = current_page.get();
                page_window(current, last_page.get())
                    .into_iter()
                    .map(|entry| match entry {
                        Some(page) => {
                            let class = if page == current {
                                format!("{button_class} bg-blue-600 border-blue-600 text-white")
                            } else {
                                format!("{button_class} bg-white border-gray-300 hover:bg-gray-50")
                            };
                            view! {
                                <button class=class on:click=move |_| on_page.run(page)>
                                    {page.to_string()}
                                </button>
                            }
                            .into_any()
                        }
                        None => view! { <span class="px-2 text-gray-400">"…"</span> }.into_any(),
                    })
                    .collect_view()
            }}
            <button
                class=format!("{button_class} border-gray-300 bg-white hover:bg-gray-50 disabled:opacity-40")
                disabled=move || current_page.get() >= last_page.get()
                on:click=move |_| on_page.run(current_page.get_untracked() + 1)
            >
                "Next"
            </button>
        </nav>
    }
}
