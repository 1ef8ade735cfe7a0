//! CORS configuration for the browser extension and frontend.

use serde::{Deserialize, Serialize};

/// CORS configuration for browser-based access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Exact origins allowed to call the API. `"*"` admits any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Admit any `chrome-extension://` origin.
    #[serde(default = "default_true")]
    pub allow_browser_extensions: bool,
}

/// Origin prefix used by Chromium browser extensions.
pub const EXTENSION_ORIGIN_PREFIX: &str = "chrome-extension://";

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:5173".to_string(),
    ]
}

fn default_true() -> bool {
    true
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allow_browser_extensions: true,
        }
    }
}

impl CorsConfig {
    /// Check whether a request origin is admitted.
    pub fn allows(&self, origin: &str) -> bool {
        if self.allow_browser_extensions && origin.starts_with(EXTENSION_ORIGIN_PREFIX) {
            return true;
        }
        self.allowed_origins
            .iter()
            .any(|allowed| allowed == "*" || allowed == origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allows_local_frontends() {
        let config = CorsConfig::default();

        assert!(config.allows("http://localhost:3000"));
        assert!(config.allows("http://localhost:5173"));
        assert!(!config.allows("https://evil.example"));
    }

    #[test]
    fn test_extension_origins() {
        let config = CorsConfig::default();
        assert!(config.allows("chrome-extension://abcdefghijklmnop"));

        let config = CorsConfig {
            allow_browser_extensions: false,
            ..config
        };
        assert!(!config.allows("chrome-extension://abcdefghijklmnop"));
    }

    #[test]
    fn test_wildcard_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["*".to_string()],
            allow_browser_extensions: false,
        };

        assert!(config.allows("https://anywhere.example"));
    }

    #[test]
    fn test_configured_origins_replace_defaults() {
        let config: CorsConfig = serde_json::from_str(
            r#"{"allowed_origins": ["https://deals.example"], "allow_browser_extensions": false}"#,
        )
        .unwrap();

        assert!(config.allows("https://deals.example"));
        assert!(!config.allows("http://localhost:3000"));
        assert!(!config.allows("chrome-extension://abcdefghijklmnop"));
    }
}
