// web_app/api/image_proxy.rs - Same-origin proxy for external product images
//
// GET /api/image-proxy?url=<encoded>
// - upstream bytes with the upstream Content-Type (default image/jpeg), cached for an hour
// - on any upstream failure: the placeholder PNG, cached for five minutes
// - missing or non-http(s) `url`: 400
// Responses carry `Access-Control-Allow-Origin: *` so the export can read them.

use std::sync::Arc;
use std::time::Duration;

use actix_web::http::header;
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::web_app::config::Settings;
use crate::web_app::export::images::PLACEHOLDER_PNG;
use crate::web_app::model::ApiError;

pub const PROXY_PATH: &str = "/api/image-proxy";

const UPSTREAM_CACHE: &str = "public, max-age=3600";
const PLACEHOLDER_CACHE: &str = "public, max-age=300";

#[derive(Clone)]
pub struct ImageProxy {
    http: reqwest::Client,
    placeholder: Arc<Vec<u8>>,
}

impl ImageProxy {
    pub fn new(timeout: Duration, placeholder: Vec<u8>) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            http,
            placeholder: Arc::new(placeholder),
        })
    }

    /// Uses the configured placeholder file, or the bundled one if it cannot be read
    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        let placeholder = match &settings.placeholder_image_path {
            Some(path) => std::fs::read(path).unwrap_or_else(|e| {
                tracing::warn!("Cannot read placeholder {}: {}; using bundled image", path.display(), e);
                PLACEHOLDER_PNG.to_vec()
            }),
            None => PLACEHOLDER_PNG.to_vec(),
        };
        Self::new(settings.backend_timeout, placeholder)
    }

    async fn fetch(&self, url: &str) -> Result<(Vec<u8>, String), String> {
        let response = self.http.get(url).send().await.map_err(|e| e.to_string())?;
        if !response.status().is_success() {
            return Err(format!("upstream returned {}", response.status()));
        }
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.trim().is_empty())
            .unwrap_or("image/jpeg")
            .to_string();
        let bytes = response.bytes().await.map_err(|e| e.to_string())?;
        Ok((bytes.to_vec(), content_type))
    }

    fn placeholder_response(&self) -> HttpResponse {
        HttpResponse::Ok()
            .content_type("image/png")
            .insert_header((header::CACHE_CONTROL, PLACEHOLDER_CACHE))
            .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
            .body(self.placeholder.as_ref().clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct ProxyParams {
    pub url: Option<String>,
}

pub async fn image_proxy(proxy: web::Data<ImageProxy>, params: web::Query<ProxyParams>) -> HttpResponse {
    let Some(url) = params.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) else {
        return HttpResponse::BadRequest().body("Missing url parameter");
    };
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return HttpResponse::BadRequest().body("Only http(s) image URLs can be proxied");
    }

    match proxy.fetch(url).await {
        Ok((bytes, content_type)) => {
            tracing::debug!("Proxied {} ({} bytes, {})", url, bytes.len(), content_type);
            HttpResponse::Ok()
                .content_type(content_type)
                .insert_header((header::CACHE_CONTROL, UPSTREAM_CACHE))
                .insert_header((header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"))
                .body(bytes)
        }
        Err(reason) => {
            tracing::warn!("Image proxy falling back to placeholder for {}: {}", url, reason);
            proxy.placeholder_response()
        }
    }
}

/// Register the proxy route; must come before the server-function catch-all under `/api`
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route(PROXY_PATH, web::get().to(image_proxy));
}
