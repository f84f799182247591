// web_app/model/product.rs - Catalog product types
//
// Field names follow the backend's JSON (`ProductCod`, `Name`, ...) through
// serde renames; the Rust side uses plain snake_case names.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use crate::web_app::pricing;

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));

/// Product variation (size, color, ...) carrying its own stock
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    #[serde(rename = "ProductCod", default)]
    pub code: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Price", default, deserialize_with = "lenient_string")]
    pub price: String,
    #[serde(rename = "Stock", default, deserialize_with = "lenient_int")]
    pub stock: i64,
    #[serde(rename = "Image", default, deserialize_with = "null_as_default")]
    pub image: String,
}

/// Catalog item as returned by the backend
///
/// Immutable from the client's point of view; the backend is the source of truth.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "ProductCod")]
    pub code: String,
    #[serde(rename = "Provider", default, deserialize_with = "null_as_default")]
    pub provider: String,
    #[serde(rename = "Name", default)]
    pub name: String,
    #[serde(rename = "Description", default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(rename = "Price", default, deserialize_with = "lenient_string")]
    pub price: String,
    #[serde(rename = "Image", default, deserialize_with = "null_as_default")]
    pub image: String,
    #[serde(rename = "Gallery", default, deserialize_with = "null_as_default")]
    pub gallery: Vec<String>,
    #[serde(rename = "Product_Mention", default)]
    pub mention: Option<String>,
    #[serde(rename = "Product_Weight", default)]
    pub weight: Option<String>,
    #[serde(rename = "Quantity_Box", default)]
    pub box_quantity: Option<String>,
    #[serde(rename = "Box_Mention", default)]
    pub box_mention: Option<String>,
    #[serde(rename = "variation", default, deserialize_with = "null_as_default")]
    pub variations: Vec<Variation>,
}

impl Product {
    /// Available stock, `None` when the product has no variations (unlimited)
    pub fn stock(&self) -> Option<u32> {
        if self.variations.is_empty() {
            return None;
        }
        let total: i64 = self.variations.iter().map(|v| v.stock.max(0)).sum();
        Some(u32::try_from(total).unwrap_or(u32::MAX))
    }

    pub fn is_out_of_stock(&self) -> bool {
        self.stock() == Some(0)
    }

    /// Parsed unit price, `None` when the backend string is not a number
    pub fn unit_price(&self) -> Option<Decimal> {
        pricing::parse_price(&self.price)
    }

    /// Display price, or "N/A" when unparseable
    pub fn price_label(&self) -> String {
        self.unit_price()
            .map(pricing::format_brl)
            .unwrap_or_else(|| "N/A".to_string())
    }

    /// Every image URL for the detail carousel (primary first, no blanks, no duplicates)
    pub fn all_images(&self) -> Vec<String> {
        let mut images: Vec<String> = Vec::with_capacity(self.gallery.len() + 1);
        for url in std::iter::once(&self.image).chain(self.gallery.iter()) {
            let url = url.trim();
            if !url.is_empty() && !images.iter().any(|existing| existing == url) {
                images.push(url.to_string());
            }
        }
        images
    }

    /// Copy of the product with HTML markup removed from the description
    pub fn with_plain_description(mut self) -> Self {
        self.description = strip_html(&self.description);
        self
    }
}

/// Remove HTML tags and collapse the whitespace they leave behind
pub fn strip_html(input: &str) -> String {
    let without_tags = HTML_TAG.replace_all(input, " ");
    let decoded = without_tags
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a JSON string or number (prices arrive both ways across backend revisions)
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Number(n)) => n.to_string(),
        _ => String::new(),
    })
}

/// Accepts a JSON integer, float, or numeric string; anything else is zero
fn lenient_int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variation(stock: i64) -> Variation {
        Variation {
            code: "V".to_string(),
            name: "Blue".to_string(),
            price: "10,00".to_string(),
            stock,
            image: String::new(),
        }
    }

    fn product(code: &str) -> Product {
        Product {
            code: code.to_string(),
            provider: String::new(),
            name: format!("Product {code}"),
            description: String::new(),
            price: "10,00".to_string(),
            image: String::new(),
            gallery: vec![],
            mention: None,
            weight: None,
            box_quantity: None,
            box_mention: None,
            variations: vec![],
        }
    }

    #[test]
    fn test_stock_absent_without_variations() {
        assert_eq!(product("A").stock(), None);
        assert!(!product("A").is_out_of_stock());
    }

    #[test]
    fn test_stock_sums_variations_ignoring_negatives() {
        let mut p = product("A");
        p.variations = vec![variation(3), variation(-2), variation(4)];
        assert_eq!(p.stock(), Some(7));
    }

    #[test]
    fn test_out_of_stock_when_all_variations_empty() {
        let mut p = product("A");
        p.variations = vec![variation(0), variation(0)];
        assert!(p.is_out_of_stock());
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Mug <b>300ml</b></p>&nbsp;ceramic"), "Mug 300ml ceramic");
        assert_eq!(strip_html("plain"), "plain");
    }

    #[test]
    fn test_all_images_dedupes_and_skips_blanks() {
        let mut p = product("A");
        p.image = "https://cdn/a.jpg".to_string();
        p.gallery = vec![
            "https://cdn/a.jpg".to_string(),
            " ".to_string(),
            "https://cdn/b.jpg".to_string(),
        ];
        assert_eq!(p.all_images(), vec!["https://cdn/a.jpg", "https://cdn/b.jpg"]);
    }

    #[test]
    fn test_deserialize_tolerates_nulls_and_numeric_fields() {
        let json = r#"{
            "ProductCod": "X1",
            "Provider": null,
            "Name": "Pen",
            "Description": null,
            "Price": 12.5,
            "Image": "https://cdn/x1.jpg",
            "Gallery": null,
            "variation": [{"ProductCod": "X1-B", "Name": "Blue", "Price": "12,50", "Stock": "4", "Image": null}]
        }"#;
        let p: Product = serde_json::from_str(json).unwrap();
        assert_eq!(p.price, "12.5");
        assert!(p.gallery.is_empty());
        assert_eq!(p.stock(), Some(4));
        assert_eq!(p.provider, "");
    }
}
