//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

use super::config::ApiConfig;

/// Build a full API URL from a path
///
/// # Example
/// ```rust,ignore
/// let url = api_url("/api/collections/123");
/// ```
pub fn api_url(path: &str) -> String {
    ApiConfig::load().url(path)
}
