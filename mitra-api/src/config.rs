//! API Configuration Module
//!
//! Bind address, CORS, storage deadlines, activity-log size and the intent
//! classifier endpoint. Everything is loaded from environment variables with
//! defaults suitable for development.

use std::net::SocketAddr;
use std::time::Duration;

use mitra_llm::providers::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};

use crate::error::{ApiError, ApiResult};

// ============================================================================
// API CONFIGURATION
// ============================================================================

#[derive(Debug, Clone)]
pub struct ApiConfig {
    // ========================================================================
    // Server
    // ========================================================================
    pub bind_host: String,
    pub port: u16,

    // ========================================================================
    // CORS Configuration
    // ========================================================================
    /// Allowed CORS origins (comma-separated in env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,

    /// Max age for CORS preflight cache in seconds.
    pub cors_max_age_secs: u64,

    // ========================================================================
    // Coordinator
    // ========================================================================
    /// Deadline for the concurrent storage reads behind schedule operations.
    pub fetch_timeout: Duration,

    /// Number of routed events kept in memory; 0 keeps none.
    pub activity_log_capacity: usize,

    // ========================================================================
    // Intent classifier
    // ========================================================================
    /// Without a key `/chat` answers 503.
    pub llm_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_requests_per_minute: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            port: 3000,
            cors_origins: Vec::new(),
            cors_max_age_secs: 86400,
            fetch_timeout: Duration::from_secs(10),
            activity_log_capacity: 1000,
            llm_api_key: None,
            llm_base_url: DEFAULT_BASE_URL.to_string(),
            llm_model: DEFAULT_MODEL.to_string(),
            llm_requests_per_minute: 30,
        }
    }
}

impl ApiConfig {
    /// Create ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `MITRA_API_BIND`: Bind host (default: 0.0.0.0)
    /// - `PORT` or `MITRA_API_PORT`: Listen port (default: 3000)
    /// - `MITRA_CORS_ORIGINS`: Comma-separated allowed origins (empty = allow all)
    /// - `MITRA_CORS_MAX_AGE_SECS`: Preflight cache duration (default: 86400)
    /// - `MITRA_FETCH_TIMEOUT_MS`: Storage fan-out deadline (default: 10000)
    /// - `MITRA_ACTIVITY_LOG_CAPACITY`: Activity entries kept (default: 1000)
    /// - `GROQ_API_KEY` or `MITRA_LLM_API_KEY`: Classifier bearer token
    /// - `MITRA_LLM_BASE_URL`: OpenAI-compatible endpoint (default: Groq)
    /// - `MITRA_LLM_MODEL`: Model name
    /// - `MITRA_LLM_REQUESTS_PER_MINUTE`: Classifier rate limit (default: 30)
    ///
    /// Unparseable numeric values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let parsed = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        let cors_origins = lookup("MITRA_CORS_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let port = lookup("PORT")
            .or_else(|| lookup("MITRA_API_PORT"))
            .and_then(|s| s.trim().parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let llm_api_key = lookup("GROQ_API_KEY")
            .or_else(|| lookup("MITRA_LLM_API_KEY"))
            .filter(|key| !key.trim().is_empty());

        Self {
            bind_host: lookup("MITRA_API_BIND").unwrap_or(defaults.bind_host),
            port,
            cors_origins,
            cors_max_age_secs: parsed("MITRA_CORS_MAX_AGE_SECS")
                .unwrap_or(defaults.cors_max_age_secs),
            fetch_timeout: parsed("MITRA_FETCH_TIMEOUT_MS")
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(defaults.fetch_timeout),
            activity_log_capacity: parsed("MITRA_ACTIVITY_LOG_CAPACITY")
                .and_then(|n| usize::try_from(n).ok())
                .unwrap_or(defaults.activity_log_capacity),
            llm_api_key,
            llm_base_url: lookup("MITRA_LLM_BASE_URL").unwrap_or(defaults.llm_base_url),
            llm_model: lookup("MITRA_LLM_MODEL").unwrap_or(defaults.llm_model),
            llm_requests_per_minute: parsed("MITRA_LLM_REQUESTS_PER_MINUTE")
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0)
                .unwrap_or(defaults.llm_requests_per_minute),
        }
    }

    /// Socket address to listen on.
    pub fn bind_addr(&self) -> ApiResult<SocketAddr> {
        let addr = format!("{}:{}", self.bind_host, self.port);
        addr.parse::<SocketAddr>()
            .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
    }

    /// Check if a given origin is allowed.
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        if self.cors_origins.is_empty() {
            return true;
        }

        self.cors_origins.iter().any(|allowed| {
            if allowed == origin {
                return true;
            }
            // *.example.com matches any https subdomain
            if let Some(pattern) = allowed.strip_prefix("*.") {
                if let Some(origin_domain) = origin.strip_prefix("https://") {
                    return origin_domain.ends_with(&format!(".{}", pattern));
                }
            }
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> ApiConfig {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_default_config() {
        let config = config_from(&[]);
        assert!(config.cors_origins.is_empty());
        assert_eq!(config.port, 3000);
        assert_eq!(config.cors_max_age_secs, 86400);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.activity_log_capacity, 1000);
        assert!(config.llm_api_key.is_none());
        assert_eq!(config.llm_model, DEFAULT_MODEL);
    }

    #[test]
    fn test_port_precedence_and_bind_addr() -> ApiResult<()> {
        let config = config_from(&[("PORT", "8080"), ("MITRA_API_PORT", "9090")]);
        assert_eq!(config.port, 8080);

        let config = config_from(&[("MITRA_API_PORT", "9090"), ("MITRA_API_BIND", "127.0.0.1")]);
        assert_eq!(config.bind_addr()?.to_string(), "127.0.0.1:9090");

        let config = config_from(&[("PORT", "not-a-port")]);
        assert_eq!(config.port, 3000);
        Ok(())
    }

    #[test]
    fn test_invalid_bind_host_is_rejected() {
        let config = config_from(&[("MITRA_API_BIND", "not a host")]);
        assert!(config.bind_addr().is_err());
    }

    #[test]
    fn test_coordinator_and_llm_settings() {
        let config = config_from(&[
            ("MITRA_FETCH_TIMEOUT_MS", "250"),
            ("MITRA_ACTIVITY_LOG_CAPACITY", "0"),
            ("GROQ_API_KEY", "gsk-test"),
            ("MITRA_LLM_REQUESTS_PER_MINUTE", "0"),
        ]);
        assert_eq!(config.fetch_timeout, Duration::from_millis(250));
        assert_eq!(config.activity_log_capacity, 0);
        assert_eq!(config.llm_api_key.as_deref(), Some("gsk-test"));
        assert_eq!(config.llm_requests_per_minute, 30);

        let config = config_from(&[("MITRA_FETCH_TIMEOUT_MS", "0"), ("MITRA_LLM_API_KEY", "  ")]);
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert!(config.llm_api_key.is_none());
    }

    #[test]
    fn test_origin_allowed() {
        assert!(config_from(&[]).is_origin_allowed("http://localhost:3000"));

        let config = config_from(&[("MITRA_CORS_ORIGINS", "https://mitra.app, *.mitra.app")]);
        assert_eq!(config.cors_origins.len(), 2);
        assert!(config.is_origin_allowed("https://mitra.app"));
        assert!(config.is_origin_allowed("https://web.mitra.app"));
        assert!(!config.is_origin_allowed("https://notmitra.app"));
        assert!(!config.is_origin_allowed("https://evil.com"));
    }
}
