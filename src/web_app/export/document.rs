// web_app/export/document.rs - Proposal document model
//
// Pure data: everything the renderer prints, already formatted. Building it
// needs no I/O, so the layout rules (totals, warnings, labels) are testable
// without producing a .docx.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::web_app::model::ProposalMetadata;
use crate::web_app::pricing::format_brl;
use crate::web_app::selection::{SelectionSet, StockWarning};

pub const DOCUMENT_TITLE: &str = "Selected Products";
pub const SEPARATOR: &str = "----------------------------------------";

/// Company block printed in the page header
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Letterhead {
    pub company_name: String,
    pub logo: Option<Vec<u8>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProductBlock {
    /// 1-based position in the document
    pub index: usize,
    pub name: String,
    pub description: String,
    pub unit_price: Option<Decimal>,
    pub quantity: u32,
    pub line_total: Option<Decimal>,
    pub warning: Option<StockWarning>,
    pub counts_toward_total: bool,
    pub image: Option<Vec<u8>>,
}

fn money(amount: Option<Decimal>) -> String {
    amount.map(format_brl).unwrap_or_else(|| "N/A".to_string())
}

impl ProductBlock {
    pub fn heading(&self) -> String {
        format!("Product {}: {}", self.index, self.name)
    }

    pub fn description_line(&self) -> String {
        let description = self.description.trim();
        if description.is_empty() {
            "Description: N/A".to_string()
        } else {
            format!("Description: {description}")
        }
    }

    pub fn price_line(&self) -> String {
        format!(
            "Unit price: {} | Quantity: {} | Total: {}",
            money(self.unit_price),
            self.quantity,
            money(self.line_total)
        )
    }

    pub fn warning_line(&self) -> Option<String> {
        self.warning.map(|w| w.to_string())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ProposalDocument {
    pub title: String,
    pub generated_on: NaiveDate,
    pub metadata: ProposalMetadata,
    pub letterhead: Letterhead,
    pub blocks: Vec<ProductBlock>,
    pub grand_total: Decimal,
}

impl ProposalDocument {
    /// Lay out the selection in order
    ///
    /// `images` lines up with the selection; missing entries mean no image.
    pub fn assemble(
        selection: &SelectionSet,
        images: Vec<Option<Vec<u8>>>,
        metadata: ProposalMetadata,
        letterhead: Letterhead,
        generated_on: NaiveDate,
    ) -> Self {
        let mut images = images.into_iter();
        let blocks = selection
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| ProductBlock {
                index: i + 1,
                name: item.product.name.clone(),
                description: item.product.description.clone(),
                unit_price: item.product.unit_price(),
                quantity: item.quantity,
                line_total: item.line_total(),
                warning: item.warning(),
                counts_toward_total: item.is_in_stock(),
                image: images.next().flatten(),
            })
            .collect();

        Self {
            title: DOCUMENT_TITLE.to_string(),
            generated_on,
            metadata,
            letterhead,
            blocks,
            grand_total: selection.total(),
        }
    }

    pub fn footer_text(&self) -> String {
        format!("Generated on {}", self.generated_on.format("%d/%m/%Y"))
    }

    /// "Label: value" lines for the metadata fields that were filled in
    pub fn metadata_lines(&self) -> Vec<String> {
        [
            ("Seller", &self.metadata.seller),
            ("Company", &self.metadata.company),
            ("Contact", &self.metadata.contact),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_ref().map(|v| format!("{label}: {v}")))
        .collect()
    }

    pub fn grand_total_line(&self) -> String {
        format!("Proposal grand total: {}", format_brl(self.grand_total))
    }
}

/// `proposal_YYYY-MM-DD.docx`
pub fn export_filename(date: NaiveDate) -> String {
    format!("proposal_{}.docx", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> ProductBlock {
        ProductBlock {
            index: 2,
            name: "Mug".to_string(),
            description: "  ".to_string(),
            unit_price: None,
            quantity: 3,
            line_total: None,
            warning: None,
            counts_toward_total: true,
            image: None,
        }
    }

    #[test]
    fn test_unparseable_price_prints_na() {
        let b = block();
        assert_eq!(b.heading(), "Product 2: Mug");
        assert_eq!(b.description_line(), "Description: N/A");
        assert_eq!(b.price_line(), "Unit price: N/A | Quantity: 3 | Total: N/A");
        assert_eq!(b.warning_line(), None);
    }

    #[test]
    fn test_filename_and_footer_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(export_filename(date), "proposal_2024-03-07.docx");

        let doc = ProposalDocument::assemble(
            &SelectionSet::new(),
            vec![],
            ProposalMetadata::default(),
            Letterhead::default(),
            date,
        );
        assert_eq!(doc.footer_text(), "Generated on 07/03/2024");
        assert!(doc.metadata_lines().is_empty());
        assert_eq!(doc.grand_total_line(), "Proposal grand total: R$ 0,00");
    }
}
