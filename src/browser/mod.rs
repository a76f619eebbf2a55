//! Page fetchers
//!
//! Every fetch is one self-contained session: acquire a browser, perform a
//! single navigation, read the serialized document, release the browser.
//! Release happens on every exit path, whichever backend is in use.

pub mod chrome;
pub mod firefox;
pub mod geckodriver;

use crate::error::FetchError;
use async_trait::async_trait;
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

pub use chrome::ChromeRenderer;
pub use firefox::FirefoxRenderer;

/// Wait after navigation before reading the page, for asynchronous rendering
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(3);

/// Anything that turns a URL into page markup
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Short backend name for logs and findings
    fn name(&self) -> &'static str;

    async fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BrowserKind {
    #[default]
    Chrome,
    Firefox,
}

impl BrowserKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chrome",
            BrowserKind::Firefox => "firefox",
        }
    }
}

/// Backend-independent renderer settings
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub settle: Duration,
    pub chrome_path: Option<PathBuf>,
    /// geckodriver binary spawned per Firefox fetch
    pub geckodriver: PathBuf,
    /// Already running WebDriver endpoint; replaces the spawned geckodriver
    pub webdriver_url: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            settle: DEFAULT_SETTLE,
            chrome_path: None,
            geckodriver: PathBuf::from(geckodriver::DEFAULT_GECKODRIVER),
            webdriver_url: None,
        }
    }
}

/// Build the rendering fetcher for the selected backend
pub fn renderer_for(kind: BrowserKind, opts: &RenderOptions) -> anyhow::Result<Box<dyn PageFetcher>> {
    let renderer: Box<dyn PageFetcher> = match kind {
        BrowserKind::Chrome => Box::new(ChromeRenderer::new(opts.settle, opts.chrome_path.clone())),
        BrowserKind::Firefox => match &opts.webdriver_url {
            Some(endpoint) => Box::new(FirefoxRenderer::remote(endpoint, opts.settle)?),
            None => Box::new(FirefoxRenderer::managed(opts.geckodriver.clone(), opts.settle)?),
        },
    };
    Ok(renderer)
}
