// web_app/api/client.rs - REST backend client
//
// One shared client per server process (reqwest keeps its own connection
// pool). Every call takes the caller's bearer token explicitly; the client
// itself holds no session.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::web_app::config::Settings;
use crate::web_app::model::{
    ApiError, LoginResponse, Page, PasswordReset, Product, ProductQuery, User, UserId, UserPayload, UserQuery,
};

#[derive(Clone, Debug)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

fn transport_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else if e.is_decode() {
        ApiError::Decode(e.to_string())
    } else {
        ApiError::Network(e.to_string())
    }
}

/// Single records arrive bare, as `{data: {...}}`, or as `{user: {...}}`
fn unwrap_record(value: Value) -> Value {
    match value {
        Value::Object(mut map) => match map.remove("data").or_else(|| map.remove("user")) {
            Some(inner @ Value::Object(_)) => inner,
            Some(other) => {
                map.insert("data".to_string(), other);
                Value::Object(map)
            }
            None => Value::Object(map),
        },
        other => other,
    }
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        Self::new(&settings.backend_url, settings.backend_timeout)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let request = self.http.request(method, url);
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Send and return the JSON body; an empty success body becomes `null`
    async fn send(&self, request: RequestBuilder) -> Result<Value, ApiError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let url = response.url().path().to_string();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let err = ApiError::from_response(status.as_u16(), &body);
            tracing::warn!("Backend {} returned {}: {}", url, status.as_u16(), err);
            return Err(err);
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let request = self
            .request(Method::POST, "login", None)
            .json(&json!({ "email": email, "password": password }));
        let response: LoginResponse = decode(self.send(request).await?)?;
        if response.token.trim().is_empty() {
            return Err(ApiError::Unauthorized);
        }
        Ok(response)
    }

    pub async fn me(&self, token: &str) -> Result<User, ApiError> {
        let value = self.send(self.request(Method::GET, "me", Some(token))).await?;
        decode(unwrap_record(value))
    }

    /// Self-registration (`POST /users` without a token)
    pub async fn register(&self, payload: &UserPayload) -> Result<User, ApiError> {
        let value = self.send(self.request(Method::POST, "users", None).json(payload)).await?;
        decode(unwrap_record(value))
    }

    /// Ask the backend to email a reset link; returns the backend's confirmation message
    pub async fn forgot_password(&self, email: &str) -> Result<String, ApiError> {
        let request = self
            .request(Method::POST, "password/email", None)
            .json(&json!({ "email": email }));
        let value = self.send(request).await?;
        Ok(message_or(&value, "If the address is registered, a reset link is on its way."))
    }

    pub async fn reset_password(&self, reset: &PasswordReset) -> Result<String, ApiError> {
        let value = self
            .send(self.request(Method::POST, "password/reset", None).json(reset))
            .await?;
        Ok(message_or(&value, "Your password has been reset."))
    }

    /// Catalog page; descriptions come back with HTML stripped
    pub async fn list_products(&self, token: Option<&str>, query: &ProductQuery) -> Result<Page<Product>, ApiError> {
        let request = self
            .request(Method::GET, "dados", token)
            .query(&query.backend_params());
        let page: Page<Product> = Page::from_value(self.send(request).await?)?;
        Ok(page.map(Product::with_plain_description))
    }

    pub async fn list_users(&self, token: &str, query: &UserQuery) -> Result<Page<User>, ApiError> {
        let request = self
            .request(Method::GET, "users", Some(token))
            .query(&query.backend_params());
        Page::from_value(self.send(request).await?)
    }

    pub async fn create_user(&self, token: &str, payload: &UserPayload) -> Result<User, ApiError> {
        let value = self
            .send(self.request(Method::POST, "users", Some(token)).json(payload))
            .await?;
        decode(unwrap_record(value))
    }

    /// Update a user; some backend revisions answer with an empty body, so the result is optional
    pub async fn update_user(&self, token: &str, id: &UserId, payload: &UserPayload) -> Result<Option<User>, ApiError> {
        let value = self
            .send(self.request(Method::PUT, &format!("users/{id}"), Some(token)).json(payload))
            .await?;
        Ok(decode(unwrap_record(value)).ok())
    }

    pub async fn delete_user(&self, token: &str, id: &UserId) -> Result<(), ApiError> {
        self.send(self.request(Method::DELETE, &format!("users/{id}"), Some(token)))
            .await
            .map(|_| ())
    }
}

fn message_or(value: &Value, fallback: &str) -> String {
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(fallback)
        .to_string()
}
