//! Plain HTTP fetch: raw server markup, no rendering, no JavaScript

use crate::browser::PageFetcher;
use crate::error::FetchError;
use crate::http::response::HttpResponse;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Instant;

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> anyhow::Result<Self> {
        let client = Client::builder()
            .danger_accept_invalid_certs(true)
            .build()?;

        Ok(Self { client })
    }

    pub async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let start = Instant::now();

        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();

        let body = response.bytes().await?.to_vec();

        Ok(HttpResponse {
            status,
            body,
            elapsed_ms: start.elapsed().as_millis(),
        })
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.get(url).await?;
        tracing::debug!(
            "HTTP {} for {} ({} bytes, {}ms)",
            response.status,
            url,
            response.body.len(),
            response.elapsed_ms
        );
        Ok(response.body_text())
    }
}
