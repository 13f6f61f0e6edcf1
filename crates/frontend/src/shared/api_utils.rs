//! API utilities for frontend-backend communication
//!
//! Provides helper functions for constructing API URLs.

/// Get the base URL for API requests
///
/// Constructs the API base URL from the current window location and the
/// backend port.
///
/// # Returns
/// - API base URL like "http://localhost:3000" or "https://example.com:3000"
/// - Empty string if window is not available
pub fn api_base(api_port: u16) -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    base_url(&protocol, &hostname, api_port)
}

/// `protocol` as reported by `Location` (with the trailing colon)
pub fn base_url(protocol: &str, hostname: &str, api_port: u16) -> String {
    format!("{}//{}:{}", protocol, hostname, api_port)
}

/// Join a base URL and an API path without doubling the slash
///
/// # Example
/// ```rust
/// use frontend::shared::api_utils::join_url;
/// assert_eq!(join_url("http://h:3000/", "/user/x"), "http://h:3000/user/x");
/// ```
pub fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_uses_given_port() {
        assert_eq!(base_url("https:", "erp.example.com", 8443), "https://erp.example.com:8443");
        assert_eq!(base_url("http:", "localhost", 3000), "http://localhost:3000");
    }

    #[test]
    fn test_join_url() {
        assert_eq!(
            join_url("http://localhost:3000", "/admin/menu-raw/configurations/active"),
            "http://localhost:3000/admin/menu-raw/configurations/active"
        );
        assert_eq!(join_url("http://h:3000/", "user"), "http://h:3000/user");
        assert_eq!(join_url("", "/user"), "/user");
    }
}
