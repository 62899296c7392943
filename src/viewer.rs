//! Client side of the demo: one action that fetches the lookup endpoint and
//! renders the outcome into a single text region.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use serde_json::Value as JsonValue;

use crate::config::ViewerConfig;

/// Text shown while a request is outstanding
pub const PENDING_MESSAGE: &str = "Fetching...";

/// Prefix of a successful render
pub const VALUE_PREFIX: &str = "Value from DynamoDB: ";

/// Prefix of a failed render
pub const ERROR_PREFIX: &str = "Error: ";

/// Fetches and parses the lookup endpoint's JSON body.
#[async_trait]
pub trait LookupFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<JsonValue>;
}

/// A single text-bearing display region.
pub trait TextDisplay: Send + Sync {
    fn set_text(&self, text: &str);
}

/// Production fetcher over HTTP.
///
/// The response status is not inspected: a 500 with a JSON body parses the
/// same way a 200 does.
#[derive(Clone, Debug, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl LookupFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<JsonValue> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("Request to {} failed", url))?;

        tracing::debug!("Lookup responded with status {}", response.status());

        response
            .json::<JsonValue>()
            .await
            .context("Response body is not valid JSON")
    }
}

/// Display that writes each update to stdout.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdoutDisplay;

impl TextDisplay for StdoutDisplay {
    fn set_text(&self, text: &str) {
        println!("{}", text);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerState {
    Idle,
    Pending,
    Displayed(String),
}

pub struct Viewer<F, D> {
    config: ViewerConfig,
    fetcher: F,
    display: D,
    latest_request: AtomicU64,
    state: Mutex<ViewerState>,
}

impl<F: LookupFetcher, D: TextDisplay> Viewer<F, D> {
    pub fn new(config: ViewerConfig, fetcher: F, display: D) -> Self {
        Self {
            config,
            fetcher,
            display,
            latest_request: AtomicU64::new(0),
            state: Mutex::new(ViewerState::Idle),
        }
    }

    pub fn state(&self) -> ViewerState {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Handle one click.
    ///
    /// The display switches to [`PENDING_MESSAGE`] before the request is
    /// issued. A response that arrives after a newer click has started is
    /// dropped, so the display always reflects the most recent click.
    pub async fn click(&self) {
        let token = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_state(ViewerState::Pending, PENDING_MESSAGE);

        let text = match self.load().await {
            Ok(data) => format!("{}{}", VALUE_PREFIX, render_script_value(data.get("value"))),
            Err(err) => {
                tracing::warn!("Lookup failed: {:#}", err);
                format!("{}{:#}", ERROR_PREFIX, err)
            }
        };

        if self.latest_request.load(Ordering::SeqCst) != token {
            tracing::debug!("Discarding stale response for request {}", token);
            return;
        }

        self.set_state(ViewerState::Displayed(text.clone()), &text);
    }

    async fn load(&self) -> Result<JsonValue> {
        let data = self.fetcher.fetch(&self.config.api_url).await?;
        if data.is_null() {
            bail!("Response body is null");
        }
        Ok(data)
    }

    fn set_state(&self, state: ViewerState, text: &str) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
        self.display.set_text(text);
    }
}

/// Render a JSON value the way string concatenation in a browser script
/// would: a missing field reads `undefined`, objects read `[object Object]`.
pub fn render_script_value(value: Option<&JsonValue>) -> String {
    match value {
        None => "undefined".to_string(),
        Some(JsonValue::Null) => "null".to_string(),
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Bool(b)) => b.to_string(),
        Some(JsonValue::Number(n)) => match n.as_f64() {
            Some(f) if n.is_f64() && f == 0.0 => "0".to_string(),
            // f64 Display never uses an exponent, matching script output below 1e21
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{}", f),
            _ => n.to_string(),
        },
        Some(JsonValue::Array(items)) => items
            .iter()
            .map(|item| match item {
                JsonValue::Null => String::new(),
                other => render_script_value(Some(other)),
            })
            .collect::<Vec<_>>()
            .join(","),
        Some(JsonValue::Object(_)) => "[object Object]".to_string(),
    }
}
