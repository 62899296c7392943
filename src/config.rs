use std::env;
use anyhow::{bail, Context, Result};

/// Shipped value of the viewer's API URL; it must be replaced before deployment.
pub const API_URL_PLACEHOLDER: &str = "API-URL-GOES-HERE!";

#[derive(Debug, Clone)]
pub struct Config {
    pub table_name: String,
    pub dynamodb_endpoint: Option<String>,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let table_name = lookup("TABLE_NAME")
            .context("TABLE_NAME environment variable is required")?;
        if table_name.trim().is_empty() {
            bail!("TABLE_NAME environment variable must not be empty");
        }

        let dynamodb_endpoint = lookup("DYNAMODB_ENDPOINT").filter(|v| !v.trim().is_empty());

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST")
            .unwrap_or_else(|| "0.0.0.0".to_string());

        Ok(Config {
            table_name,
            dynamodb_endpoint,
            service_port,
            service_host,
        })
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  DynamoDB table: {}", self.table_name);
        tracing::info!("  DynamoDB endpoint: {}",
            self.dynamodb_endpoint.as_deref().unwrap_or("default (AWS)"));
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}

/// Configuration for the viewer client.
#[derive(Debug, Clone)]
pub struct ViewerConfig {
    pub api_url: String,
}

impl ViewerConfig {
    pub fn from_env() -> Result<Self> {
        let api_url = env::var("LOOKUP_API_URL")
            .context("LOOKUP_API_URL environment variable is required")?;
        Self::new(api_url)
    }

    /// Validate an API URL. Empty values and the shipped placeholder are rejected.
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        let api_url = api_url.into();
        let trimmed = api_url.trim();

        if trimmed.is_empty() {
            bail!("LOOKUP_API_URL must not be empty");
        }
        if trimmed == API_URL_PLACEHOLDER {
            bail!("LOOKUP_API_URL is still set to the placeholder '{}'", API_URL_PLACEHOLDER);
        }

        let parsed = reqwest::Url::parse(trimmed)
            .with_context(|| format!("LOOKUP_API_URL is not a valid URL: '{}'", trimmed))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!("LOOKUP_API_URL must use http or https, got '{}'", parsed.scheme());
        }

        Ok(ViewerConfig {
            api_url: trimmed.to_string(),
        })
    }
}
