//! API endpoint configuration
//!
//! The backend address is derived from the page location (same host, port 3000).
//! A full base URL stored in localStorage under `api_base_url` takes precedence,
//! which lets a deployed dashboard talk to a backend on another host.

use web_sys::window;

/// Port of the backend server when no override is configured
pub const DEFAULT_API_PORT: u16 = 3000;

const API_BASE_OVERRIDE_KEY: &str = "api_base_url";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without trailing slash, e.g. "http://localhost:3000"
    pub base_url: String,
}

impl ApiConfig {
    /// Build the config from `window.location` parts
    pub fn from_location(protocol: &str, hostname: &str, port: u16) -> Self {
        let protocol = if protocol.ends_with(':') {
            protocol.to_string()
        } else {
            format!("{}:", protocol)
        };
        Self {
            base_url: format!("{}//{}:{}", protocol, hostname, port),
        }
    }

    /// Parse an override value; only absolute http(s) URLs are accepted
    pub fn from_override(value: &str) -> Option<Self> {
        let value = value.trim().trim_end_matches('/');
        if value.starts_with("http://") || value.starts_with("https://") {
            Some(Self {
                base_url: value.to_string(),
            })
        } else {
            None
        }
    }

    /// Join base URL and path with exactly one slash
    pub fn url(&self, path: &str) -> String {
        if path.is_empty() {
            return self.base_url.clone();
        }
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Resolve from localStorage override, then window location.
    /// Empty base URL if window is not available.
    pub fn load() -> Self {
        if let Some(cfg) = load_override().as_deref().and_then(Self::from_override) {
            return cfg;
        }
        let window = match window() {
            Some(w) => w,
            None => {
                return Self {
                    base_url: String::new(),
                }
            }
        };
        let location = window.location();
        let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
        let hostname = location
            .hostname()
            .unwrap_or_else(|_| "127.0.0.1".to_string());
        Self::from_location(&protocol, &hostname, DEFAULT_API_PORT)
    }
}

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

fn load_override() -> Option<String> {
    get_local_storage()?.get_item(API_BASE_OVERRIDE_KEY).ok()?
}

/// Save API base URL override to localStorage
pub fn save_api_base_override(url: &str) -> Result<(), String> {
    let cfg = ApiConfig::from_override(url).ok_or_else(|| format!("Invalid API URL: {}", url))?;
    if let Some(storage) = get_local_storage() {
        let _ = storage.set_item(API_BASE_OVERRIDE_KEY, &cfg.base_url);
        log::info!("API base URL set to {}", cfg.base_url);
    }
    Ok(())
}

/// Remove the override; the location-derived URL is used again
pub fn clear_api_base_override() {
    if let Some(storage) = get_local_storage() {
        let _ = storage.remove_item(API_BASE_OVERRIDE_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_location() {
        let cfg = ApiConfig::from_location("https:", "shop.example.com", DEFAULT_API_PORT);
        assert_eq!(cfg.base_url, "https://shop.example.com:3000");

        let cfg = ApiConfig::from_location("http", "localhost", 8080);
        assert_eq!(cfg.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_override_parsing() {
        assert_eq!(
            ApiConfig::from_override(" https://api.example.com/ "),
            Some(ApiConfig {
                base_url: "https://api.example.com".to_string()
            })
        );
        assert_eq!(ApiConfig::from_override("api.example.com"), None);
        assert_eq!(ApiConfig::from_override(""), None);
    }

    #[test]
    fn test_url_join() {
        let cfg = ApiConfig {
            base_url: "http://localhost:3000".to_string(),
        };
        assert_eq!(cfg.url("/api/collections"), "http://localhost:3000/api/collections");
        assert_eq!(cfg.url("api/collections"), "http://localhost:3000/api/collections");
        assert_eq!(cfg.url(""), "http://localhost:3000");
    }
}
