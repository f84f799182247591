// web_app/config.rs - Server settings from environment variables
//
// Read once at startup, after `.env` has been loaded:
// - BACKEND_URL              REST backend base URL (default http://localhost:8000/api)
// - BACKEND_TIMEOUT_SECS     per-request timeout for backend calls (default 10)
// - PLACEHOLDER_IMAGE_PATH   image served when a proxied fetch fails (default: bundled PNG)
// - GALLERY_FIRST_PROVIDERS  comma-separated providers whose second gallery image is the cover
// - COMPANY_NAME             letterhead name on exported proposals

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::web_app::model::ExportSettings;

pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_COMPANY_NAME: &str = "Catalog Proposals";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    Invalid(&'static str, String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub backend_url: String,
    pub backend_timeout: Duration,
    pub placeholder_image_path: Option<PathBuf>,
    pub gallery_first_providers: Vec<String>,
    pub company_name: String,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let backend_url = get("BACKEND_URL").unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());
        if !(backend_url.starts_with("http://") || backend_url.starts_with("https://")) {
            return Err(ConfigError::Invalid("BACKEND_URL", format!("'{backend_url}' is not an http(s) URL")));
        }

        let timeout_secs = match get("BACKEND_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::Invalid("BACKEND_TIMEOUT_SECS", format!("'{raw}' is not a positive number")))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let gallery_first_providers = get("GALLERY_FIRST_PROVIDERS")
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            backend_timeout: Duration::from_secs(timeout_secs),
            placeholder_image_path: get("PLACEHOLDER_IMAGE_PATH").map(PathBuf::from),
            gallery_first_providers,
            company_name: get("COMPANY_NAME").unwrap_or_else(|| DEFAULT_COMPANY_NAME.to_string()),
        })
    }

    /// The part of the configuration the browser needs for exports
    pub fn export_settings(&self) -> ExportSettings {
        ExportSettings {
            gallery_first_providers: self.gallery_first_providers.clone(),
            company_name: self.company_name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(s.backend_timeout, Duration::from_secs(10));
        assert!(s.gallery_first_providers.is_empty());
        assert_eq!(s.placeholder_image_path, None);
    }

    #[test]
    fn test_provider_list_and_trailing_slash() {
        let s = settings(&[
            ("BACKEND_URL", "https://api.example.com/v1/"),
            ("GALLERY_FIRST_PROVIDERS", " Asia, ,XBZ "),
            ("COMPANY_NAME", "Santo Mimo"),
        ])
        .unwrap();
        assert_eq!(s.backend_url, "https://api.example.com/v1");
        assert_eq!(s.gallery_first_providers, vec!["Asia", "XBZ"]);
        assert_eq!(s.export_settings().company_name, "Santo Mimo");
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            settings(&[("BACKEND_TIMEOUT_SECS", "0")]),
            Err(ConfigError::Invalid("BACKEND_TIMEOUT_SECS", _))
        ));
        assert!(matches!(
            settings(&[("BACKEND_URL", "ftp://x")]),
            Err(ConfigError::Invalid("BACKEND_URL", _))
        ));
    }
}
