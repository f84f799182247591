// web_app/export/mod.rs - Selected products to proposal document
//
// Pipeline:
// 1. pick one image per selected product (images::resolve_image_url)
// 2. fetch all of them at once through the image proxy (images::fetch_all)
// 3. lay out the document model with totals and stock warnings (document)
// 4. serialize to .docx (docx)
// 5. hand the bytes to the browser (download), driven by the caller
//
// Image failures degrade to a placeholder. Anything else is terminal and
// no partial file is produced.

pub mod document;
pub mod docx;
pub mod download;
pub mod images;
pub mod status;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::web_app::model::{ExportSettings, ProposalMetadata};
use crate::web_app::selection::SelectionSet;

pub use document::{export_filename, Letterhead, ProductBlock, ProposalDocument};
pub use download::{trigger_download, DOCX_MIME};
pub use images::{fetch_all, proxied_image_url, resolve_image_url, HttpImageFetcher, ImageFetcher, ImagePolicy};
pub use status::{ExportStatus, ExportStatusTracker, StatusTransitionError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("Select at least one product to export")]
    EmptySelection,

    #[error("Could not load image {url}: {reason}")]
    ImageLoad { url: String, reason: String },

    #[error("Could not load export settings: {0}")]
    Settings(String),

    #[error("Error generating the Word file: {0}")]
    Serialization(String),

    #[error("Could not start the download: {0}")]
    Download(String),
}

/// A finished proposal, ready to be saved
#[derive(Clone, Debug, PartialEq)]
pub struct ExportedProposal {
    pub filename: String,
    pub bytes: Vec<u8>,
    pub grand_total: Decimal,
}

/// Build the proposal for the current selection
pub async fn run_export<F: ImageFetcher>(
    fetcher: &F,
    selection: &SelectionSet,
    metadata: ProposalMetadata,
    settings: &ExportSettings,
    generated_on: NaiveDate,
) -> Result<ExportedProposal, ExportError> {
    if selection.is_empty() {
        return Err(ExportError::EmptySelection);
    }

    tracing::info!("Exporting proposal with {} products", selection.len());

    let policy = ImagePolicy::from_settings(settings);
    let urls: Vec<Option<String>> = selection
        .items()
        .iter()
        .map(|item| resolve_image_url(&item.product, &policy))
        .collect();
    let images = fetch_all(fetcher, &urls, &policy, Some(images::PLACEHOLDER_PNG)).await;

    let letterhead = Letterhead {
        company_name: settings.company_name.clone(),
        logo: Some(images::LOGO_PNG.to_vec()),
    };
    let document = ProposalDocument::assemble(selection, images, metadata, letterhead, generated_on);
    let bytes = docx::render_docx(&document).inspect_err(|e| tracing::error!("Proposal export failed: {}", e))?;

    Ok(ExportedProposal {
        filename: export_filename(generated_on),
        bytes,
        grand_total: document.grand_total,
    })
}
