//! Typed failures at the fetch and input seams.
//!
//! Everything above these seams (setup, reporting) works in `anyhow::Result`.

use std::path::PathBuf;
use thiserror::Error;

/// Why a single page fetch produced no usable markup
#[derive(Error, Debug)]
pub enum FetchError {
    /// Browser process or WebDriver session could not be created
    #[error("browser launch failed: {0}")]
    Launch(String),

    /// Navigation or page-source retrieval failed
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    /// Plain HTTP fetch failed
    #[error("http fetch failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The blocking browser task did not complete
    #[error("browser task failed: {0}")]
    Task(String),
}

impl FetchError {
    pub fn navigation(url: &str, reason: impl ToString) -> Self {
        Self::Navigation {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Input resolution failures. Both end the scan before any fetch.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("could not read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input contains no URLs")]
    Empty,
}
