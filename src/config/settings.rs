//! Settings structures for Artifind configuration

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main settings structure matching `settings.yml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    pub chat: ChatSettings,
    pub ai: AiSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        Ok(settings)
    }

    /// Merge with environment variables (ARTIFIND_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("ARTIFIND_DEBUG") {
            self.general.debug = val.parse().unwrap_or(false);
        }
        if let Ok(val) = std::env::var("ARTIFIND_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("ARTIFIND_BIND_ADDRESS") {
            self.server.bind_address = val;
        }
        if let Ok(val) = std::env::var("ARTIFIND_FRONTEND_URL") {
            self.server.frontend_url = val;
        }
    }
}

/// General settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    /// Enable debug mode
    pub debug: bool,
    /// Name reported by the health endpoint
    pub instance_name: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            debug: false,
            instance_name: "Artifind".to_string(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Server port
    pub port: u16,
    /// Bind address
    pub bind_address: String,
    /// Origin allowed by CORS (the storefront SPA)
    pub frontend_url: String,
    /// Maximum accepted request body in bytes
    pub body_limit: usize,
    /// Per-client request limiting
    pub rate_limit: RateLimitSettings,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            port: 3001,
            bind_address: "127.0.0.1".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            body_limit: 10 * 1024 * 1024,
            rate_limit: RateLimitSettings::default(),
        }
    }
}

/// Rate limiter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitSettings {
    pub enabled: bool,
    /// Requests allowed per client within one window
    pub max_requests: u32,
    /// Window length in seconds
    pub window_secs: u64,
}

impl Default for RateLimitSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            max_requests: 100,
            window_secs: 15 * 60,
        }
    }
}

/// Catalog query defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// Page size used for product queries without a usable `limit`
    pub product_page_size: usize,
    /// Page size used for artisan queries without a usable `limit`
    pub artisan_page_size: usize,
    /// Load the bundled demo products and artisans on startup
    pub seed_demo_data: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            product_page_size: 12,
            artisan_page_size: 10,
            seed_demo_data: true,
        }
    }
}

/// Chat assistant settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// Messages retained per session
    pub history_limit: usize,
    /// Messages returned by the history endpoint when no limit is given
    pub default_history_page: usize,
    /// Idle session lifetime in seconds
    pub session_ttl_secs: u64,
    /// Maximum number of live sessions
    pub max_sessions: u64,
}

impl Default for ChatSettings {
    fn default() -> Self {
        Self {
            history_limit: 20,
            default_history_page: 50,
            session_ttl_secs: 24 * 60 * 60,
            max_sessions: 10_000,
        }
    }
}

/// AI helper settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiSettings {
    /// Largest image accepted by the analysis endpoint, in bytes
    pub max_upload_bytes: usize,
    /// Accepted image file extensions
    pub allowed_image_types: Vec<String>,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * 1024 * 1024,
            allowed_image_types: ["jpeg", "jpg", "png", "gif", "webp"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}
