// src/config.rs
use crate::error::{PredictError, Result};
use reqwest::Url;
use std::env;
use std::str::FromStr;
use tracing::warn;

/// Base URL used during local development
pub const DEFAULT_DEV_BASE_URL: &str = "http://localhost:8000";
/// Base path used when served behind the production reverse proxy
pub const PRODUCTION_BASE_PATH: &str = "/api";
/// Origin a relative base URL is resolved against outside the browser
pub const DEFAULT_ORIGIN: &str = "http://localhost";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl FromStr for Environment {
    type Err = PredictError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Ok(Environment::Production),
            "development" | "dev" | "test" | "" => Ok(Environment::Development),
            // Anything that is not production uses the local service
            other => {
                warn!(value = other, "Unrecognized PRICEPREDICT_ENV, using development");
                Ok(Environment::Development)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub origin: String,
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DEV_BASE_URL.to_string(),
            origin: DEFAULT_ORIGIN.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Load configuration from `.env` and the process environment
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("PRICEPREDICT_ENV") {
            Some(raw) => raw.parse()?,
            None => Environment::default(),
        };
        let override_url = lookup("PRICEPREDICT_API_URL");
        let base_url = resolve_base_url(override_url.as_deref(), environment);

        let origin = lookup("PRICEPREDICT_ORIGIN")
            .filter(|o| !o.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());

        let timeout_secs = match lookup("PRICEPREDICT_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse().map_err(|_| PredictError::Config {
                key: "PRICEPREDICT_TIMEOUT_SECS".to_string(),
                value: raw.clone(),
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            base_url,
            origin,
            timeout_secs,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Absolute URL for an endpoint path such as `/form-options`
    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.trim_end_matches('/');
        let absolute = if base.starts_with("http://") || base.starts_with("https://") {
            format!("{}{}", base, path)
        } else if base.is_empty() || base.starts_with('/') {
            format!("{}{}{}", self.origin.trim_end_matches('/'), base, path)
        } else {
            return Err(PredictError::InvalidBaseUrl {
                url: self.base_url.clone(),
                reason: "expected an http(s) URL or an absolute path".to_string(),
            });
        };

        Url::parse(&absolute).map_err(|e| PredictError::InvalidBaseUrl {
            url: absolute,
            reason: e.to_string(),
        })
    }
}

/// Explicit override wins, then the production path, then the local default
pub fn resolve_base_url(override_url: Option<&str>, environment: Environment) -> String {
    if let Some(url) = override_url.map(str::trim).filter(|u| !u.is_empty()) {
        return url.to_string();
    }
    match environment {
        Environment::Production => PRODUCTION_BASE_PATH.to_string(),
        Environment::Development => DEFAULT_DEV_BASE_URL.to_string(),
    }
}
