// tests/export_tests.rs - Proposal export: image selection, placeholder fallback, document layout, .docx output

use std::sync::Mutex;

use catalog_proposals::web_app::export::images::{PLACEHOLDER_PNG, LOGO_PNG};
use catalog_proposals::web_app::export::{
    export_filename, fetch_all, resolve_image_url, run_export, ExportError, ImageFetcher, ImagePolicy,
    Letterhead, ProposalDocument,
};
use catalog_proposals::web_app::model::{ExportSettings, Product, ProposalMetadata};
use catalog_proposals::web_app::selection::SelectionSet;
use chrono::NaiveDate;
use serde_json::json;

/// Records every URL and serves LOGO_PNG, failing for URLs containing "broken"
#[derive(Default)]
struct FakeFetcher {
    requested: Mutex<Vec<String>>,
}

impl FakeFetcher {
    fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl ImageFetcher for FakeFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ExportError> {
        self.requested.lock().unwrap().push(url.to_string());
        if url.contains("broken") {
            Err(ExportError::ImageLoad {
                url: url.to_string(),
                reason: "status 404 Not Found".to_string(),
            })
        } else {
            Ok(LOGO_PNG.to_vec())
        }
    }
}

fn product(code: &str, provider: &str, image: &str, gallery: &[&str], stock: Option<i64>) -> Product {
    let variations = match stock {
        Some(stock) => json!([{ "Stock": stock }]),
        None => json!([]),
    };
    serde_json::from_value(json!({
        "ProductCod": code,
        "Provider": provider,
        "Name": format!("Item {code}"),
        "Description": "Stainless steel",
        "Price": "25,00",
        "Image": image,
        "Gallery": gallery,
        "variation": variations,
    }))
    .expect("valid product json")
}

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 9).unwrap()
}

#[test]
fn test_image_choice_follows_provider_policy() {
    let policy = ImagePolicy {
        gallery_first_providers: vec!["Asia".to_string()],
        ..ImagePolicy::default()
    };
    let banner_led = product("A", "asia", "https://cdn/banner.jpg", &["https://cdn/1.jpg", "https://cdn/2.jpg"], None);
    let normal = product("B", "Spot", "https://cdn/main.jpg", &["https://cdn/1.jpg"], None);
    let gallery_only = product("C", "Spot", "  ", &["", "https://cdn/g.jpg"], None);
    let short_gallery = product("D", "Asia", "https://cdn/main.jpg", &["https://cdn/1.jpg"], None);

    assert_eq!(resolve_image_url(&banner_led, &policy).as_deref(), Some("https://cdn/2.jpg"));
    assert_eq!(resolve_image_url(&normal, &policy).as_deref(), Some("https://cdn/main.jpg"));
    assert_eq!(resolve_image_url(&gallery_only, &policy).as_deref(), Some("https://cdn/g.jpg"));
    assert_eq!(resolve_image_url(&short_gallery, &policy).as_deref(), Some("https://cdn/main.jpg"));
    assert_eq!(resolve_image_url(&product("E", "", "", &[], None), &policy), None);
}

#[tokio::test]
async fn test_fetch_all_goes_through_proxy_and_falls_back() {
    let fetcher = FakeFetcher::default();
    let urls = vec![
        Some("https://cdn.example.com/ok.jpg".to_string()),
        Some("https://cdn.example.com/broken.jpg".to_string()),
        None,
    ];

    let images = fetch_all(&fetcher, &urls, &ImagePolicy::default(), Some(PLACEHOLDER_PNG)).await;

    assert_eq!(images.len(), 3);
    assert_eq!(images[0].as_deref(), Some(LOGO_PNG));
    assert_eq!(images[1].as_deref(), Some(PLACEHOLDER_PNG));
    assert_eq!(images[2].as_deref(), Some(PLACEHOLDER_PNG));

    let requested = fetcher.requested();
    assert_eq!(requested.len(), 2);
    assert!(requested
        .iter()
        .all(|url| url.starts_with("/api/image-proxy?url=https%3A%2F%2Fcdn.example.com%2F")));
}

#[tokio::test]
async fn test_fetch_all_without_placeholder_leaves_gaps() {
    let fetcher = FakeFetcher::default();
    let urls = vec![Some("https://x/broken.png".to_string())];
    let images = fetch_all(&fetcher, &urls, &ImagePolicy::default(), None).await;
    assert_eq!(images, vec![None]);
}

#[test]
fn test_document_layout_and_totals() {
    let mut selection = SelectionSet::new();
    selection.toggle(product("A", "Spot", "", &[], Some(2)));
    selection.toggle(product("B", "Spot", "", &[], Some(0)));
    selection.set_quantity("A", 5);

    let metadata = ProposalMetadata::from_form("Ana", "  ", "ana@example.com");
    let document = ProposalDocument::assemble(&selection, vec![None, None], metadata, Letterhead::default(), date());

    assert_eq!(document.blocks.len(), 2);
    let first = &document.blocks[0];
    assert_eq!(first.heading(), "Product 1: Item A");
    assert_eq!(first.description_line(), "Description: Stainless steel");
    assert_eq!(first.price_line(), "Unit price: R$ 25,00 | Quantity: 2 | Total: R$ 50,00");
    assert_eq!(first.warning_line().as_deref(), Some("Requested 5, only 2 available"));

    let second = &document.blocks[1];
    assert!(!second.counts_toward_total);
    assert_eq!(second.warning_line().as_deref(), Some("Out of stock - not included in the total"));

    assert_eq!(document.metadata_lines(), vec!["Seller: Ana", "Contact: ana@example.com"]);
    assert_eq!(document.grand_total_line(), "Proposal grand total: R$ 50,00");
    assert_eq!(document.footer_text(), "Generated on 09/03/2026");
}

#[tokio::test]
async fn test_run_export_produces_docx() -> anyhow::Result<()> {
    let fetcher = FakeFetcher::default();
    let mut selection = SelectionSet::new();
    selection.toggle(product("A", "Spot", "https://cdn/a.jpg", &[], None));
    selection.toggle(product("B", "Spot", "https://cdn/broken.jpg", &[], Some(4)));
    selection.set_quantity("A", 3);

    let settings = ExportSettings {
        gallery_first_providers: vec![],
        company_name: "Acme Brindes".to_string(),
    };
    let proposal = run_export(&fetcher, &selection, ProposalMetadata::default(), &settings, date()).await?;

    println!("Generated {} ({} bytes)", proposal.filename, proposal.bytes.len());
    assert_eq!(proposal.filename, "proposal_2026-03-09.docx");
    assert_eq!(proposal.grand_total, "100.00".parse::<rust_decimal::Decimal>()?);
    // A .docx is a zip archive with the body in word/document.xml
    assert!(proposal.bytes.starts_with(b"PK"));
    assert!(proposal
        .bytes
        .windows(b"word/document.xml".len())
        .any(|w| w == b"word/document.xml"));
    assert_eq!(fetcher.requested().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_run_export_rejects_empty_selection() {
    let fetcher = FakeFetcher::default();
    let result = run_export(
        &fetcher,
        &SelectionSet::new(),
        ProposalMetadata::default(),
        &ExportSettings::default(),
        date(),
    )
    .await;

    assert_eq!(result, Err(ExportError::EmptySelection));
    assert!(fetcher.requested().is_empty());
}

#[test]
fn test_export_filename_uses_iso_date() {
    assert_eq!(export_filename(NaiveDate::from_ymd_opt(2025, 12, 1).unwrap()), "proposal_2025-12-01.docx");
}
