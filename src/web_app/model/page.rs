// web_app/model/page.rs - Pagination envelope and list queries
//
// The backend has shipped several list shapes over time:
// - a Laravel paginator: {current_page, data: [...], last_page, per_page, total, ...}
// - the same paginator wrapped once more: {data: {current_page, data: [...], ...}}
// - an API resource collection: {data: [...], meta: {current_page, last_page, ...}}
// - a bare JSON array (no pagination)
// `Page::from_value` normalizes all of them into one schema.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::ApiError;

/// One page of results in the only shape the rest of the app sees
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based
    pub current_page: u32,
    pub last_page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            current_page: 1,
            last_page: 1,
            per_page: 0,
            total: 0,
        }
    }
}

impl<T> Page<T> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.last_page
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            current_page: self.current_page,
            last_page: self.last_page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

impl<T: DeserializeOwned> Page<T> {
    /// Version-tolerant adapter from any known backend list shape
    pub fn from_value(value: Value) -> Result<Self, ApiError> {
        match value {
            Value::Array(items) => {
                let items = decode_items::<T>(items)?;
                let len = items.len();
                Ok(Page {
                    items,
                    current_page: 1,
                    last_page: 1,
                    per_page: len as u32,
                    total: len as u64,
                })
            }
            Value::Object(mut envelope) => match envelope.remove("data") {
                Some(Value::Array(items)) => {
                    let meta = match envelope.remove("meta") {
                        Some(Value::Object(meta)) => meta,
                        _ => envelope,
                    };
                    let items = decode_items::<T>(items)?;
                    Ok(paginate(items, &meta))
                }
                Some(inner @ Value::Object(_)) => Self::from_value(inner),
                Some(other) => Err(ApiError::Decode(format!(
                    "expected a list under \"data\", found {}",
                    kind_of(&other)
                ))),
                None => Err(ApiError::Decode("response has no \"data\" field".to_string())),
            },
            other => Err(ApiError::Decode(format!(
                "expected a page object or list, found {}",
                kind_of(&other)
            ))),
        }
    }
}

fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> Result<Vec<T>, ApiError> {
    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|e| ApiError::Decode(e.to_string())))
        .collect()
}

fn paginate<T>(items: Vec<T>, meta: &Map<String, Value>) -> Page<T> {
    let len = items.len();
    let current_page = lenient_u64(meta.get("current_page")).unwrap_or(1).max(1) as u32;
    let per_page = lenient_u64(meta.get("per_page")).unwrap_or(len as u64) as u32;
    let total = lenient_u64(meta.get("total")).unwrap_or(len as u64);
    let last_page = lenient_u64(meta.get("last_page"))
        .map(|p| p as u32)
        .unwrap_or_else(|| match per_page {
            0 => 1,
            per_page => total.div_ceil(u64::from(per_page)) as u32,
        })
        .max(current_page);

    Page {
        items,
        current_page,
        last_page,
        per_page,
        total,
    }
}

fn lenient_u64(value: Option<&Value>) -> Option<u64> {
    match value? {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Field used to order the catalog
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortField {
    #[default]
    Name,
    Price,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Some(SortOrder::Asc),
            "desc" => Some(SortOrder::Desc),
            _ => None,
        }
    }
}

/// Combined sort choice offered in the catalog dropdown
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOption {
    pub field: SortField,
    pub order: SortOrder,
}

impl SortOption {
    pub const ALL: [SortOption; 4] = [
        SortOption { field: SortField::Name, order: SortOrder::Asc },
        SortOption { field: SortField::Name, order: SortOrder::Desc },
        SortOption { field: SortField::Price, order: SortOrder::Asc },
        SortOption { field: SortField::Price, order: SortOrder::Desc },
    ];

    /// Stable key used as the `<option>` value, e.g. `price-desc`
    pub fn key(&self) -> String {
        let field = match self.field {
            SortField::Name => "name",
            SortField::Price => "price",
        };
        format!("{field}-{}", self.order.as_str())
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|option| option.key() == key)
    }

    /// Backend query parameter name for this field
    pub fn param(&self) -> &'static str {
        match self.field {
            SortField::Name => "name_sort",
            SortField::Price => "price_sort",
        }
    }
}

impl std::fmt::Display for SortOption {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.field, self.order) {
            (SortField::Name, SortOrder::Asc) => write!(f, "Name: A to Z"),
            (SortField::Name, SortOrder::Desc) => write!(f, "Name: Z to A"),
            (SortField::Price, SortOrder::Asc) => write!(f, "Price: Low to High"),
            (SortField::Price, SortOrder::Desc) => write!(f, "Price: High to Low"),
        }
    }
}

pub const DEFAULT_PER_PAGE: u32 = 12;
pub const PER_PAGE_CHOICES: [u32; 3] = [12, 24, 48];

/// Catalog search request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub search: String,
    /// 1-based
    pub page: u32,
    pub per_page: u32,
    pub sort: SortOption,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
            sort: SortOption::default(),
        }
    }
}

impl ProductQuery {
    /// Build from the `/products` URL parameters (`q`, `page`, `per_page`, `name_sort`, `price_sort`)
    pub fn from_url_params(get: impl Fn(&str) -> Option<String>) -> Self {
        let page = get("page").and_then(|p| p.parse().ok()).filter(|p| *p >= 1).unwrap_or(1);
        let per_page = get("per_page")
            .and_then(|p| p.parse().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(DEFAULT_PER_PAGE);
        let sort = if let Some(order) = get("name_sort").as_deref().and_then(SortOrder::parse) {
            SortOption { field: SortField::Name, order }
        } else if let Some(order) = get("price_sort").as_deref().and_then(SortOrder::parse) {
            SortOption { field: SortField::Price, order }
        } else {
            SortOption::default()
        };

        Self {
            search: get("q").unwrap_or_default().trim().to_string(),
            page,
            per_page,
            sort,
        }
    }

    /// Parameters sent to the backend catalog endpoint
    pub fn backend_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("productName", self.search.clone()),
            ("page", self.page.to_string()),
            ("per_page", self.per_page.to_string()),
            (self.sort.param(), self.sort.order.as_str().to_string()),
        ]
    }

    /// Browser URL for this query, used when navigating between pages and sorts
    pub fn to_url(&self) -> String {
        format!(
            "/products?q={}&page={}&per_page={}&{}={}",
            urlencoding::encode(&self.search),
            self.page,
            self.per_page,
            self.sort.param(),
            self.sort.order.as_str()
        )
    }
}

/// Admin user table request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserQuery {
    pub page: u32,
    pub per_page: u32,
    pub search: Option<String>,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            search: None,
        }
    }
}

impl UserQuery {
    pub fn backend_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("page", self.page.to_string()), ("per_page", self.per_page.to_string())];
        if let Some(search) = self.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array_is_single_page() {
        let page: Page<u32> = Page::from_value(json!([1, 2, 3])).unwrap();
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.last_page, 1);
        assert!(!page.has_next());
    }

    #[test]
    fn test_last_page_derived_when_missing() {
        let page: Page<u32> =
            Page::from_value(json!({"data": [1, 2], "current_page": 1, "per_page": 2, "total": 5})).unwrap();
        assert_eq!(page.last_page, 3);
        assert!(page.has_next());
    }

    #[test]
    fn test_non_list_data_is_decode_error() {
        let err = Page::<u32>::from_value(json!({"data": "oops"})).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_sort_option_keys_round_trip() {
        for option in SortOption::ALL {
            assert_eq!(SortOption::from_key(&option.key()), Some(option));
        }
        assert_eq!(SortOption::from_key("rating-asc"), None);
    }

    #[test]
    fn test_user_query_omits_blank_search() {
        let query = UserQuery { search: Some("  ".to_string()), ..Default::default() };
        assert!(query.backend_params().iter().all(|(k, _)| *k != "search"));
    }
}
