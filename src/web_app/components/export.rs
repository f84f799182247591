// web_app/components/export.rs - Proposal export modal and status toast

use leptos::prelude::*;

use super::common::{Button, ModalWrapper, SecondaryButton, TextInput};
use crate::web_app::context::{use_export, use_selection};
use crate::web_app::export::ExportStatus;
use crate::web_app::model::ProposalMetadata;
use crate::web_app::pricing::format_brl;

/// Collects the optional seller/company/contact header and starts the export
#[component]
pub fn ExportProposalModal() -> impl IntoView {
    let export = use_export();
    let selection = use_selection();
    let open = export.modal_open();

    let seller = RwSignal::new(String::new());
    let company = RwSignal::new(String::new());
    let contact = RwSignal::new(String::new());

    let busy = Signal::derive(move || export.status() == ExportStatus::Processing);
    let cannot_export = Signal::derive(move || busy.get() || selection.is_empty());
    let summary = move || {
        selection.set().with(|s| {
            format!("{} products, total {}", s.len(), format_brl(s.total()))
        })
    };

    let submit = move || {
        let metadata = ProposalMetadata::from_form(
            &seller.get_untracked(),
            &company.get_untracked(),
            &contact.get_untracked(),
        );
        tracing::info!("Exporting proposal for {} products", selection.set().with_untracked(|s| s.len()));
        export.start(selection, metadata);
    };

    view! {
        <Show when=move || open.get()>
            <ModalWrapper
                title="Export proposal"
                width="max-w-lg"
                on_close=Callback::new(move |_| open.set(false))
            >
                <form
                    class="space-y-4"
                    on:submit=move |ev| {
                        ev.prevent_default();
                        submit();
                    }
                >
                    <p class="text-sm text-gray-600">{summary}</p>
                    <TextInput value=seller label="Seller" placeholder="Optional" autocomplete="name" />
                    <TextInput value=company label="Company" placeholder="Optional" autocomplete="organization" />
                    <TextInput value=contact label="Contact" placeholder="Optional" />
                    <div class="flex justify-end gap-2 pt-2">
                        <SecondaryButton on_click=Callback::new(move |_| open.set(false))>"Cancel"</SecondaryButton>
                        <Button button_type="submit" disabled=cannot_export>"Generate Word file"</Button>
                    </div>
                </form>
            </ModalWrapper>
        </Show>
    }
}

/// Bottom-right export status; success and error hide themselves
#[component]
pub fn ExportToast() -> impl IntoView {
    let export = use_export();

    view! {
        {move || {
            let (class, message) = match export.status() {
                ExportStatus::Hidden => return None,
                ExportStatus::Processing => ("bg-blue-600", "Generating proposal...".to_string()),
                ExportStatus::Success => ("bg-green-600", "Proposal downloaded".to_string()),
                ExportStatus::Error(message) => ("bg-red-600", message),
            };
            let dismissable = export.status() != ExportStatus::Processing;
            Some(view! {
                <div
                    role="status"
                    class=format!("fixed bottom-6 right-6 z-50 px-5 py-3 rounded-xl shadow-lg text-white flex items-center gap-3 {class}")
                >
                    <span class="text-sm font-medium">{message}</span>
                    <Show when=move || dismissable>
                        <button class="text-white/80 hover:text-white" title="Dismiss" on:click=move |_| export.dismiss()>
                            "✕"
                        </button>
                    </Show>
                </div>
            })
        }}
    }
}
