// web_app/export/images.rs - Picking and fetching product images for a proposal
//
// External images are fetched through our own `/api/image-proxy` so the
// browser never makes a cross-origin request. All fetches for an export
// start together and are awaited as a group.

use std::future::Future;

use futures::future::join_all;

use crate::web_app::model::{ExportSettings, Product};

use super::ExportError;

/// Grey "no image" tile used when a product image cannot be loaded
pub const PLACEHOLDER_PNG: &[u8] = include_bytes!("../../../public/placeholder.png");

/// Letterhead logo
pub const LOGO_PNG: &[u8] = include_bytes!("../../../public/logo.png");

pub const DEFAULT_PROXY_ENDPOINT: &str = "/api/image-proxy";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImagePolicy {
    /// Providers whose primary image is a logo or banner; their second gallery image is used instead
    pub gallery_first_providers: Vec<String>,
    pub proxy_endpoint: String,
}

impl Default for ImagePolicy {
    fn default() -> Self {
        Self {
            gallery_first_providers: Vec::new(),
            proxy_endpoint: DEFAULT_PROXY_ENDPOINT.to_string(),
        }
    }
}

impl ImagePolicy {
    pub fn from_settings(settings: &ExportSettings) -> Self {
        Self {
            gallery_first_providers: settings.gallery_first_providers.clone(),
            ..Self::default()
        }
    }

    fn prefers_gallery(&self, provider: &str) -> bool {
        let provider = provider.trim();
        !provider.is_empty()
            && self
                .gallery_first_providers
                .iter()
                .any(|p| p.trim().eq_ignore_ascii_case(provider))
    }
}

fn non_blank(url: &str) -> Option<String> {
    let url = url.trim();
    (!url.is_empty()).then(|| url.to_string())
}

/// Image to print for a product, if it has any
pub fn resolve_image_url(product: &Product, policy: &ImagePolicy) -> Option<String> {
    if policy.prefers_gallery(&product.provider) {
        if let Some(url) = product.gallery.get(1).and_then(|u| non_blank(u)) {
            return Some(url);
        }
    }

    non_blank(&product.image).or_else(|| product.gallery.iter().find_map(|u| non_blank(u)))
}

fn is_local_host(url: &str) -> bool {
    let rest = url
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    let host = rest.split(['/', ':', '?']).next().unwrap_or_default();
    host.eq_ignore_ascii_case("localhost") || host == "127.0.0.1" || host == "[::1]"
}

/// Route external `http(s)` URLs through the proxy; relative and local URLs are used as-is
pub fn proxied_image_url(proxy_endpoint: &str, url: &str) -> String {
    let external = url.starts_with("http://") || url.starts_with("https://");
    if external && !is_local_host(url) {
        format!("{}?url={}", proxy_endpoint, urlencoding::encode(url))
    } else {
        url.to_string()
    }
}

/// Source of image bytes for an export
pub trait ImageFetcher {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Vec<u8>, ExportError>>;
}

/// Fetches over HTTP; relative URLs are resolved against `origin`
#[derive(Clone, Debug)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
    origin: Option<String>,
}

impl HttpImageFetcher {
    pub fn new(origin: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            origin: origin.map(|o| o.trim_end_matches('/').to_string()),
        }
    }

    /// Fetcher bound to the page's own origin
    pub fn for_current_page() -> Self {
        #[cfg(feature = "hydrate")]
        let origin = web_sys::window().and_then(|w| w.location().origin().ok());
        #[cfg(not(feature = "hydrate"))]
        let origin = None;
        Self::new(origin)
    }

    fn absolute(&self, url: &str) -> String {
        match (&self.origin, url.starts_with('/')) {
            (Some(origin), true) => format!("{origin}{url}"),
            _ => url.to_string(),
        }
    }
}

impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, ExportError> {
        let target = self.absolute(url);
        let load_error = |reason: String| ExportError::ImageLoad {
            url: url.to_string(),
            reason,
        };

        let request = self.client.get(&target);
        #[cfg(not(target_arch = "wasm32"))]
        let request = request.timeout(std::time::Duration::from_secs(15));

        let response = request.send().await.map_err(|e| load_error(e.to_string()))?;
        if !response.status().is_success() {
            return Err(load_error(format!("status {}", response.status())));
        }
        let bytes = response.bytes().await.map_err(|e| load_error(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Fetch every image concurrently, substituting the placeholder for failures
///
/// Entries line up with `urls`. A `None` result means neither the image nor
/// the placeholder was available and the image is left out of the document.
pub async fn fetch_all<F: ImageFetcher>(
    fetcher: &F,
    urls: &[Option<String>],
    policy: &ImagePolicy,
    placeholder: Option<&[u8]>,
) -> Vec<Option<Vec<u8>>> {
    let requests = urls.iter().map(|url| async move {
        let Some(url) = url else {
            return placeholder.map(<[u8]>::to_vec);
        };

        match fetcher.fetch(&proxied_image_url(&policy.proxy_endpoint, url)).await {
            Ok(bytes) if !bytes.is_empty() => Some(bytes),
            Ok(_) => {
                tracing::warn!("Empty image body for {}, using placeholder", url);
                placeholder.map(<[u8]>::to_vec)
            }
            Err(e) => {
                tracing::warn!("{}, using placeholder", e);
                placeholder.map(<[u8]>::to_vec)
            }
        }
    });

    join_all(requests).await
}
