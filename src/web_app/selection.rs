// web_app/selection.rs - The selected-products working set
//
// Products the user intends to put in a proposal, in the order they were
// picked, each with a quantity. The set lives in memory and is mirrored to
// session storage so it survives navigation and reloads.
//
// Stock policy is warning-only: quantities are clamped to the known stock
// and a warning is attached, but nothing here ever blocks an export.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::web_app::model::Product;
use crate::web_app::pricing;
use crate::web_app::storage::{put_json, KeyValueStore, StorageError};

/// Session storage key for the persisted selection
pub const SELECTION_KEY: &str = "selectedProducts";

/// Clamp a requested quantity into `[1, stock]`
///
/// Unknown stock means unlimited. A known stock of zero still yields 1: the
/// item stays listed (with an out-of-stock warning) rather than disappearing.
pub fn clamp_quantity(requested: u32, stock: Option<u32>) -> u32 {
    let quantity = requested.max(1);
    match stock {
        Some(0) => 1,
        Some(available) => quantity.min(available),
        None => quantity,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockWarning {
    OutOfStock,
    QuantityExceeded { requested: u32, available: u32 },
}

impl std::fmt::Display for StockWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StockWarning::OutOfStock => write!(f, "Out of stock - not included in the total"),
            StockWarning::QuantityExceeded { requested, available } => {
                write!(f, "Requested {requested}, only {available} available")
            }
        }
    }
}

/// Outcome of a quantity edit
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuantityChange {
    Accepted(u32),
    Clamped { requested: u32, applied: u32 },
    NotSelected,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SelectedItem {
    pub product: Product,
    /// Quantity used for totals, always within `[1, stock]`
    pub quantity: u32,
    /// What the user last asked for, kept to explain a clamp
    pub requested: u32,
}

impl SelectedItem {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
            requested: 1,
        }
    }

    pub fn code(&self) -> &str {
        &self.product.code
    }

    pub fn stock(&self) -> Option<u32> {
        self.product.stock()
    }

    pub fn is_in_stock(&self) -> bool {
        !self.product.is_out_of_stock()
    }

    pub fn warning(&self) -> Option<StockWarning> {
        match self.stock() {
            Some(0) => Some(StockWarning::OutOfStock),
            Some(available) if self.requested > available => Some(StockWarning::QuantityExceeded {
                requested: self.requested,
                available,
            }),
            _ => None,
        }
    }

    /// Unit price × quantity, `None` when the price is unparseable
    pub fn line_total(&self) -> Option<Decimal> {
        self.product
            .unit_price()
            .map(|unit| pricing::line_total(unit, self.quantity))
    }

    fn apply(&mut self, requested: u32) -> QuantityChange {
        let requested = requested.max(1);
        let applied = clamp_quantity(requested, self.stock());
        self.requested = requested;
        self.quantity = applied;
        if applied == requested {
            QuantityChange::Accepted(applied)
        } else {
            QuantityChange::Clamped { requested, applied }
        }
    }
}

/// Ordered selection keyed by product code
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet {
    items: Vec<SelectedItem>,
}

// Earlier builds persisted a bare list of products; keep reading that shape.
#[derive(Deserialize)]
#[serde(untagged)]
enum Persisted {
    Items(Vec<SelectedItem>),
    Products(Vec<Product>),
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[SelectedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn get(&self, code: &str) -> Option<&SelectedItem> {
        self.items.iter().find(|item| item.code() == code)
    }

    pub fn quantity(&self, code: &str) -> Option<u32> {
        self.get(code).map(|item| item.quantity)
    }

    /// Product code and applied quantity, in selection order
    pub fn quantities(&self) -> Vec<(&str, u32)> {
        self.items.iter().map(|item| (item.code(), item.quantity)).collect()
    }

    pub fn warning(&self, code: &str) -> Option<StockWarning> {
        self.get(code).and_then(SelectedItem::warning)
    }

    /// Add the product with quantity 1, or remove it if already selected
    ///
    /// Returns whether the product is selected afterwards.
    pub fn toggle(&mut self, product: Product) -> bool {
        if self.remove(&product.code) {
            false
        } else {
            self.items.push(SelectedItem::new(product));
            true
        }
    }

    pub fn remove(&mut self, code: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.code() != code);
        self.items.len() != before
    }

    pub fn set_quantity(&mut self, code: &str, requested: u32) -> QuantityChange {
        match self.items.iter_mut().find(|item| item.code() == code) {
            Some(item) => item.apply(requested),
            None => QuantityChange::NotSelected,
        }
    }

    /// Replace stored product data with fresher copies and re-clamp quantities
    pub fn refresh(&mut self, products: &[Product]) {
        for item in &mut self.items {
            if let Some(fresh) = products.iter().find(|p| p.code == item.product.code) {
                item.product = fresh.clone();
                let requested = item.requested;
                item.apply(requested);
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of unit price × quantity over in-stock items
    ///
    /// Out-of-stock items stay in the set but never count. Unparseable prices count as zero.
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .filter(|item| item.is_in_stock())
            .filter_map(SelectedItem::line_total)
            .sum()
    }

    pub fn has_warnings(&self) -> bool {
        self.items.iter().any(|item| item.warning().is_some())
    }

    /// Restore the selection from session storage; anything unreadable is dropped
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let Some(raw) = store.get(SELECTION_KEY) else {
            return Self::default();
        };

        match serde_json::from_str::<Persisted>(&raw) {
            Ok(Persisted::Items(items)) => Self { items },
            Ok(Persisted::Products(products)) => Self {
                items: products.into_iter().map(SelectedItem::new).collect(),
            },
            Err(e) => {
                tracing::error!("Failed to restore selected products: {}", e);
                store.remove(SELECTION_KEY);
                Self::default()
            }
        }
    }

    pub fn persist(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        put_json(store, SELECTION_KEY, self)
    }

    /// Empty the selection in memory and in storage
    pub fn clear_persisted(&mut self, store: &dyn KeyValueStore) {
        self.clear();
        store.remove(SELECTION_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_quantity_bounds() {
        assert_eq!(clamp_quantity(0, None), 1);
        assert_eq!(clamp_quantity(500, None), 500);
        assert_eq!(clamp_quantity(9, Some(5)), 5);
        assert_eq!(clamp_quantity(3, Some(5)), 3);
        assert_eq!(clamp_quantity(4, Some(0)), 1);
    }

    #[test]
    fn test_stock_warning_messages() {
        assert_eq!(StockWarning::OutOfStock.to_string(), "Out of stock - not included in the total");
        assert_eq!(
            StockWarning::QuantityExceeded { requested: 8, available: 5 }.to_string(),
            "Requested 8, only 5 available"
        );
    }
}
