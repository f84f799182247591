// tests/model_adapter_tests.rs - Backend response adapters: list shapes, lenient product fields, users

use catalog_proposals::web_app::model::{
    ApiError, ContactMethod, Page, Product, ProductQuery, SortField, SortOrder, User, UserId, UserRole,
};
use catalog_proposals::web_app::pricing::{format_brl, parse_price};
use serde_json::json;

fn codes(page: &Page<Product>) -> Vec<&str> {
    page.items.iter().map(|p| p.code.as_str()).collect()
}

#[test]
fn test_laravel_paginator_shape() {
    let body = json!({
        "current_page": 2,
        "data": [{ "ProductCod": "A", "Name": "Pen" }, { "ProductCod": "B", "Name": "Mug" }],
        "last_page": 5,
        "per_page": 2,
        "total": 10
    });
    let page = Page::<Product>::from_value(body).unwrap();
    assert_eq!(codes(&page), vec!["A", "B"]);
    assert_eq!((page.current_page, page.last_page, page.per_page, page.total), (2, 5, 2, 10));
    assert!(page.has_next());
    assert!(page.has_previous());
}

#[test]
fn test_double_wrapped_paginator_shape() {
    let body = json!({
        "data": {
            "current_page": "1",
            "data": [{ "ProductCod": "A", "Name": "Pen" }],
            "last_page": "3",
            "per_page": "12",
            "total": "30"
        }
    });
    let page = Page::<Product>::from_value(body).unwrap();
    assert_eq!(codes(&page), vec!["A"]);
    assert_eq!((page.current_page, page.last_page, page.total), (1, 3, 30));
}

#[test]
fn test_resource_collection_with_meta() {
    let body = json!({
        "data": [{ "ProductCod": "A", "Name": "Pen" }],
        "links": {},
        "meta": { "current_page": 4, "per_page": 12, "total": 40 }
    });
    let page = Page::<Product>::from_value(body).unwrap();
    // last_page derived from total / per_page when missing
    assert_eq!((page.current_page, page.last_page), (4, 4));
    assert!(!page.has_next());
}

#[test]
fn test_bare_array_is_one_page() {
    let page = Page::<Product>::from_value(json!([{ "ProductCod": "A" }, { "ProductCod": "B" }])).unwrap();
    assert_eq!((page.current_page, page.last_page, page.total), (1, 1, 2));
}

#[test]
fn test_unknown_shape_is_decode_error() {
    assert!(matches!(Page::<Product>::from_value(json!({ "items": [] })), Err(ApiError::Decode(_))));
    assert!(matches!(Page::<Product>::from_value(json!("nope")), Err(ApiError::Decode(_))));
}

#[test]
fn test_product_tolerates_nulls_and_numbers() {
    let product: Product = serde_json::from_value(json!({
        "ProductCod": "X1",
        "Provider": null,
        "Name": "Garrafa",
        "Description": null,
        "Price": 19.9,
        "Image": null,
        "Gallery": null,
        "variation": [{ "ProductCod": "X1-A", "Stock": "7" }, { "Stock": 2.0 }]
    }))
    .unwrap();

    assert_eq!(product.provider, "");
    assert!(product.gallery.is_empty());
    assert_eq!(product.stock(), Some(9));
    assert_eq!(product.price_label(), "R$ 19,90");
    assert!(product.all_images().is_empty());
}

#[test]
fn test_carousel_images_skip_blanks_and_duplicates() {
    let product: Product = serde_json::from_value(json!({
        "ProductCod": "X1",
        "Image": "https://cdn/a.jpg",
        "Gallery": ["https://cdn/a.jpg", " ", "https://cdn/b.jpg"]
    }))
    .unwrap();
    assert_eq!(product.all_images(), vec!["https://cdn/a.jpg", "https://cdn/b.jpg"]);
}

#[test]
fn test_plain_description_drops_markup() {
    let product: Product = serde_json::from_value(json!({
        "ProductCod": "X1",
        "Description": "<p>Caneca <b>térmica</b>&nbsp;500ml</p>"
    }))
    .unwrap();
    assert_eq!(product.with_plain_description().description, "Caneca térmica 500ml");
}

#[test]
fn test_price_formats() {
    assert_eq!(parse_price("1.234,56").map(format_brl).as_deref(), Some("R$ 1.234,56"));
    assert_eq!(parse_price("1,234.56").map(format_brl).as_deref(), Some("R$ 1.234,56"));
    assert_eq!(parse_price("R$ 12,5").map(format_brl).as_deref(), Some("R$ 12,50"));
    assert_eq!(parse_price("sob consulta"), None);
    assert_eq!(parse_price("   "), None);
}

#[test]
fn test_user_ids_and_lenient_enums() {
    let user: User = serde_json::from_value(json!({
        "id": 42,
        "name": "Ana",
        "email": "ana@example.com",
        "phone": null,
        "preferred_contact_method": "WhatsApp",
        "role": "admin"
    }))
    .unwrap();
    assert_eq!(user.id, UserId("42".to_string()));
    assert_eq!(user.phone, "");
    assert_eq!(user.preferred_contact_method, ContactMethod::Whatsapp);
    assert_eq!(user.role, UserRole::Admin);
    assert!(user.is_admin());

    let other: User = serde_json::from_value(json!({
        "id": "u-7",
        "name": "Bia",
        "email": "bia@example.com",
        "preferred_contact_method": "carrier pigeon"
    }))
    .unwrap();
    assert_eq!(other.id.to_string(), "u-7");
    assert_eq!(other.preferred_contact_method, ContactMethod::Email);
    assert_eq!(other.role, UserRole::User);

    // Numeric ids go back out as numbers
    assert_eq!(serde_json::to_value(&user.id).unwrap(), json!(42));
}

#[test]
fn test_product_query_from_url_and_back() {
    let params = [("q", " caneca "), ("page", "3"), ("per_page", "24"), ("price_sort", "desc")];
    let query = ProductQuery::from_url_params(|key| {
        params.iter().find(|(k, _)| *k == key).map(|(_, v)| v.to_string())
    });

    assert_eq!(query.search, "caneca");
    assert_eq!((query.page, query.per_page), (3, 24));
    assert_eq!((query.sort.field, query.sort.order), (SortField::Price, SortOrder::Desc));
    assert_eq!(query.to_url(), "/products?q=caneca&page=3&per_page=24&price_sort=desc");
    assert!(query.backend_params().contains(&("productName", "caneca".to_string())));
}

#[test]
fn test_product_query_defaults_on_bad_params() {
    let query = ProductQuery::from_url_params(|key| match key {
        "page" => Some("0".to_string()),
        "per_page" => Some("lots".to_string()),
        _ => None,
    });
    assert_eq!(query, ProductQuery::default());
}
