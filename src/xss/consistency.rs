// Source Consistency Check
// Plain HTTP markup vs rendered markup for the same URL. A failed fetch on
// either side counts as an empty source, so failures surface as mismatches.

use crate::error::FetchError;
use crate::validation::diff::{diff, DiffResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consistency {
    Match,
    Mismatch,
}

#[derive(Debug, Clone)]
pub struct SourceComparison {
    pub outcome: Consistency,
    pub plain_failed: bool,
    pub rendered_failed: bool,
    pub diff: DiffResult,
}

impl SourceComparison {
    pub fn evidence(&self) -> String {
        let mut line = format!(
            "http {} bytes (sha256 {}) vs rendered {} bytes (sha256 {}), delta {:+}",
            self.diff.left.len,
            &self.diff.left.sha256[..12],
            self.diff.right.len,
            &self.diff.right.sha256[..12],
            self.diff.len_delta,
        );
        if self.plain_failed {
            line.push_str("; http fetch failed");
        }
        if self.rendered_failed {
            line.push_str("; rendered fetch failed");
        }
        line
    }
}

/// Compare the plain and rendered fetch outcomes for `url` byte for byte
pub fn compare_results(
    url: &str,
    plain: &Result<String, FetchError>,
    rendered: &Result<String, FetchError>,
    rendered_name: &str,
) -> SourceComparison {
    let (plain_source, plain_failed) = source_or_empty(plain, url, "http");
    let (rendered_source, rendered_failed) = source_or_empty(rendered, url, rendered_name);

    let diff = diff(plain_source, rendered_source);
    let outcome = if diff.identical {
        Consistency::Match
    } else {
        Consistency::Mismatch
    };

    match outcome {
        Consistency::Match => tracing::info!("Sources match for: {}", url),
        Consistency::Mismatch => tracing::warn!(
            "Source mismatch for {} (http {} bytes, {} {} bytes)",
            url,
            diff.left.len,
            rendered_name,
            diff.right.len
        ),
    }

    SourceComparison {
        outcome,
        plain_failed,
        rendered_failed,
        diff,
    }
}

fn source_or_empty<'a>(result: &'a Result<String, FetchError>, url: &str, via: &str) -> (&'a str, bool) {
    match result {
        Ok(source) => (source.as_str(), false),
        Err(e) => {
            tracing::error!("Error fetching {} via {}: {}", url, via, e);
            ("", true)
        }
    }
}
