//! Headless Firefox backend, driven over the W3C WebDriver protocol.
//!
//! By default every fetch starts its own geckodriver from PATH (or the
//! `--geckodriver` binary) and stops it afterwards. With `--webdriver-url`
//! an already running driver is used instead.
//!
//! One WebDriver session per fetch: create, navigate, settle, read source,
//! delete. The delete is issued whether or not the navigation succeeded.

use crate::browser::geckodriver::GeckoService;
use crate::browser::PageFetcher;
use crate::error::FetchError;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Where the WebDriver endpoint comes from
#[derive(Debug, Clone)]
enum Driver {
    /// geckodriver binary spawned per fetch
    Managed(PathBuf),
    /// Externally run endpoint
    Remote(String),
}

pub struct FirefoxRenderer {
    client: Client,
    driver: Driver,
    settle: Duration,
}

impl FirefoxRenderer {
    /// Spawn `geckodriver` for each fetch
    pub fn managed(geckodriver: PathBuf, settle: Duration) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            driver: Driver::Managed(geckodriver),
            settle,
        })
    }

    /// Use a WebDriver endpoint that is already listening
    pub fn remote(webdriver_url: &str, settle: Duration) -> anyhow::Result<Self> {
        let endpoint = Url::parse(webdriver_url)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            anyhow::bail!("WebDriver endpoint must be http(s): {}", webdriver_url);
        }

        Ok(Self {
            client: Client::builder().build()?,
            driver: Driver::Remote(endpoint.as_str().trim_end_matches('/').to_string()),
            settle,
        })
    }

    fn session_url(endpoint: &str, session_id: &str, command: &str) -> String {
        if command.is_empty() {
            format!("{}/session/{}", endpoint, session_id)
        } else {
            format!("{}/session/{}/{}", endpoint, session_id, command)
        }
    }

    /// Send a WebDriver command and unwrap the `value` member of the reply
    async fn call(req: RequestBuilder) -> Result<Value, String> {
        let response = req.send().await.map_err(|e| e.to_string())?;
        let status = response.status();
        let body: Value = response.json().await.map_err(|e| e.to_string())?;
        let value = body.get("value").cloned().unwrap_or(Value::Null);

        if status.is_success() {
            Ok(value)
        } else {
            let message = value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("unknown WebDriver error");
            Err(format!("{} ({})", message, status))
        }
    }

    async fn open_session(&self, endpoint: &str) -> Result<String, FetchError> {
        let capabilities = json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": "firefox",
                    "moz:firefoxOptions": { "args": ["-headless"] }
                }
            }
        });

        let value = Self::call(
            self.client
                .post(format!("{}/session", endpoint))
                .json(&capabilities),
        )
        .await
        .map_err(FetchError::Launch)?;

        value
            .get("sessionId")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| FetchError::Launch("WebDriver reply carried no sessionId".to_string()))
    }

    async fn visit(&self, endpoint: &str, session_id: &str, url: &str) -> Result<String, FetchError> {
        Self::call(
            self.client
                .post(Self::session_url(endpoint, session_id, "url"))
                .json(&json!({ "url": url })),
        )
        .await
        .map_err(|e| FetchError::navigation(url, e))?;

        tokio::time::sleep(self.settle).await;

        let source = Self::call(self.client.get(Self::session_url(endpoint, session_id, "source")))
            .await
            .map_err(|e| FetchError::navigation(url, e))?;

        source
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| FetchError::navigation(url, "page source was not a string"))
    }

    async fn close_session(&self, endpoint: &str, session_id: &str) {
        if let Err(e) = Self::call(self.client.delete(Self::session_url(endpoint, session_id, ""))).await {
            tracing::warn!("Failed to close WebDriver session {}: {}", session_id, e);
        }
    }

    async fn render(&self, endpoint: &str, url: &str) -> Result<String, FetchError> {
        let session_id = self.open_session(endpoint).await?;
        let result = self.visit(endpoint, &session_id, url).await;
        self.close_session(endpoint, &session_id).await;
        result
    }
}

#[async_trait]
impl PageFetcher for FirefoxRenderer {
    fn name(&self) -> &'static str {
        "firefox"
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let result = match &self.driver {
            Driver::Remote(endpoint) => self.render(endpoint, url).await,
            Driver::Managed(binary) => {
                let service = GeckoService::start(binary, &self.client).await?;
                let result = self.render(service.endpoint(), url).await;
                service.stop().await;
                result
            }
        };

        if let Ok(ref content) = result {
            tracing::debug!("Firefox rendered {} bytes from {}", content.len(), url);
        }
        result
    }
}
