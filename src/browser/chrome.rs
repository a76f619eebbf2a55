//! Headless Chrome backend
//!
//! `headless_chrome` is synchronous, so each fetch runs on the blocking pool.
//! The `Browser` value owns the Chrome process and kills it when dropped,
//! which covers both the success and the error paths below.

use crate::browser::PageFetcher;
use crate::error::FetchError;
use async_trait::async_trait;
use headless_chrome::{Browser, LaunchOptions};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::time::Duration;

const CHROME_ARGS: [&str; 2] = ["--disable-gpu", "--disable-dev-shm-usage"];

pub struct ChromeRenderer {
    settle: Duration,
    chrome_path: Option<PathBuf>,
}

impl ChromeRenderer {
    pub fn new(settle: Duration, chrome_path: Option<PathBuf>) -> Self {
        Self { settle, chrome_path }
    }

    fn render_sync(url: &str, settle: Duration, chrome_path: Option<PathBuf>) -> Result<String, FetchError> {
        let options = LaunchOptions::default_builder()
            .headless(true)
            .sandbox(false)
            .path(chrome_path)
            .args(CHROME_ARGS.into_iter().map(OsStr::new).collect())
            .build()
            .map_err(|e| FetchError::Launch(e.to_string()))?;

        let browser = Browser::new(options).map_err(|e| FetchError::Launch(e.to_string()))?;
        let tab = browser
            .new_tab()
            .map_err(|e| FetchError::Launch(e.to_string()))?;

        tab.navigate_to(url)
            .map_err(|e| FetchError::navigation(url, e))?;
        tab.wait_until_navigated()
            .map_err(|e| FetchError::navigation(url, e))?;

        std::thread::sleep(settle);

        let content = tab
            .get_content()
            .map_err(|e| FetchError::navigation(url, e))?;

        tracing::debug!("Chrome rendered {} bytes from {}", content.len(), url);
        Ok(content)
    }
}

#[async_trait]
impl PageFetcher for ChromeRenderer {
    fn name(&self) -> &'static str {
        "chrome"
    }

    async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url_owned = url.to_string();
        let settle = self.settle;
        let chrome_path = self.chrome_path.clone();

        tokio::task::spawn_blocking(move || Self::render_sync(&url_owned, settle, chrome_path))
            .await
            .map_err(|e| FetchError::Task(e.to_string()))?
    }
}
