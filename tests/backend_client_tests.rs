// tests/backend_client_tests.rs - BackendClient against a fake REST backend
//
// Requires the ssr feature:
//   cargo test --features ssr --test backend_client_tests

use std::time::Duration;

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use catalog_proposals::web_app::api::BackendClient;
use catalog_proposals::web_app::model::{ApiError, ProductQuery, UserId, UserPayload, UserQuery};
use serde_json::{json, Value};

const TOKEN: &str = "good-token";

fn authorized(req: &HttpRequest) -> bool {
    req.headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == format!("Bearer {TOKEN}"))
        .unwrap_or(false)
}

async fn login(body: web::Json<Value>) -> HttpResponse {
    match body.get("password").and_then(Value::as_str) {
        Some("right") => HttpResponse::Ok().json(json!({ "token": TOKEN, "expires_in": 3600, "token_type": "bearer" })),
        Some("blank") => HttpResponse::Ok().json(json!({ "token": "" })),
        _ => HttpResponse::Unauthorized().json(json!({ "message": "Invalid credentials" })),
    }
}

async fn me(req: HttpRequest) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    HttpResponse::Ok().json(json!({ "data": { "id": 1, "name": "Ana", "email": "ana@example.com", "role": "admin" } }))
}

async fn products(query: web::Query<Vec<(String, String)>>) -> HttpResponse {
    let name = query
        .iter()
        .find(|(k, _)| k == "productName")
        .map(|(_, v)| v.clone())
        .unwrap_or_default();
    HttpResponse::Ok().json(json!({
        "current_page": 1,
        "data": [{ "ProductCod": "P1", "Name": format!("Match {name}"), "Description": "<b>Bold</b> text", "Price": "10,00" }],
        "last_page": 1,
        "per_page": 12,
        "total": 1
    }))
}

async fn create_user(req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    if !authorized(&req) {
        // Self-registration
        if body.get("email").and_then(Value::as_str) == Some("taken@example.com") {
            return HttpResponse::UnprocessableEntity().json(json!({
                "message": "The email has already been taken.",
                "errors": { "email": ["The email has already been taken."] }
            }));
        }
    }
    HttpResponse::Created().json(json!({ "user": { "id": "u-9", "name": body["name"], "email": body["email"] } }))
}

async fn list_users(req: HttpRequest) -> HttpResponse {
    if !authorized(&req) {
        return HttpResponse::Unauthorized().finish();
    }
    HttpResponse::Ok().json(json!({
        "data": [{ "id": 1, "name": "Ana", "email": "ana@example.com" }],
        "meta": { "current_page": 1, "last_page": 1, "per_page": 10, "total": 1 }
    }))
}

async fn update_user() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

async fn delete_user(path: web::Path<String>) -> HttpResponse {
    if path.as_str() == "404" {
        HttpResponse::NotFound().finish()
    } else {
        HttpResponse::NoContent().finish()
    }
}

async fn broken() -> HttpResponse {
    HttpResponse::InternalServerError().body("stack trace here")
}

async fn start_backend() -> anyhow::Result<BackendClient> {
    let server = HttpServer::new(|| {
        App::new()
            .route("/api/login", web::post().to(login))
            .route("/api/me", web::get().to(me))
            .route("/api/dados", web::get().to(products))
            .route("/api/users", web::post().to(create_user))
            .route("/api/users", web::get().to(list_users))
            .route("/api/users/{id}", web::put().to(update_user))
            .route("/api/users/{id}", web::delete().to(delete_user))
            .route("/api/password/email", web::post().to(broken))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))?;
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    let client = BackendClient::new(&format!("http://{addr}/api/"), Duration::from_secs(5))?;
    Ok(client)
}

#[actix_web::test]
async fn test_login_success_and_failures() -> anyhow::Result<()> {
    let client = start_backend().await?;

    let login = client.login("ana@example.com", "right").await?;
    assert_eq!(login.token, TOKEN);
    assert_eq!(login.expires_in, Some(3600));

    assert_eq!(client.login("ana@example.com", "wrong").await, Err(ApiError::Unauthorized));
    // A success without a token is still a failed login
    assert_eq!(client.login("ana@example.com", "blank").await, Err(ApiError::Unauthorized));
    Ok(())
}

#[actix_web::test]
async fn test_me_sends_bearer_and_unwraps_record() -> anyhow::Result<()> {
    let client = start_backend().await?;

    let user = client.me(TOKEN).await?;
    assert_eq!(user.name, "Ana");
    assert!(user.is_admin());

    let err = client.me("stale").await.unwrap_err();
    assert!(err.is_unauthorized());
    Ok(())
}

#[actix_web::test]
async fn test_products_page_strips_description_markup() -> anyhow::Result<()> {
    let client = start_backend().await?;
    let query = ProductQuery {
        search: "caneca".to_string(),
        ..ProductQuery::default()
    };

    let page = client.list_products(Some(TOKEN), &query).await?;
    assert_eq!(page.total, 1);
    let product = &page.items[0];
    assert_eq!(product.name, "Match caneca");
    assert_eq!(product.description, "Bold text");
    Ok(())
}

#[actix_web::test]
async fn test_register_validation_message() -> anyhow::Result<()> {
    let client = start_backend().await?;
    let payload = UserPayload {
        name: "Bia".to_string(),
        email: "taken@example.com".to_string(),
        ..UserPayload::default()
    };

    let err = client.register(&payload).await.unwrap_err();
    assert_eq!(err, ApiError::Validation("The email has already been taken.".to_string()));

    let created = client
        .register(&UserPayload {
            email: "new@example.com".to_string(),
            ..payload
        })
        .await?;
    assert_eq!(created.id, UserId("u-9".to_string()));
    Ok(())
}

#[actix_web::test]
async fn test_user_management_calls() -> anyhow::Result<()> {
    let client = start_backend().await?;

    let users = client.list_users(TOKEN, &UserQuery::default()).await?;
    assert_eq!(users.items.len(), 1);
    assert!(client.list_users("stale", &UserQuery::default()).await.unwrap_err().is_unauthorized());

    let id = UserId("1".to_string());
    // Empty update body is not an error
    assert_eq!(client.update_user(TOKEN, &id, &UserPayload::default()).await?, None);

    client.delete_user(TOKEN, &id).await?;
    assert_eq!(
        client.delete_user(TOKEN, &UserId("404".to_string())).await,
        Err(ApiError::NotFound)
    );
    Ok(())
}

#[actix_web::test]
async fn test_server_error_keeps_status_and_body() -> anyhow::Result<()> {
    let client = start_backend().await?;

    match client.forgot_password("ana@example.com").await {
        Err(ApiError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "stack trace here");
        }
        other => panic!("expected status error, got {other:?}"),
    }
    Ok(())
}

#[actix_web::test]
async fn test_unreachable_backend_is_network_error() {
    let client = BackendClient::new("http://127.0.0.1:9/api", Duration::from_secs(2)).unwrap();
    assert!(matches!(client.me(TOKEN).await, Err(ApiError::Network(_))));
}
