//! Scan driver
//!
//! One pass, no backtracking: resolve input, then for each URL extract its
//! parameters, generate candidates for every active strategy, and fetch and
//! judge each candidate in turn. A failed fetch is recorded and the scan
//! moves on; only an unusable input ends the run early.

use crate::browser::{renderer_for, PageFetcher};
use crate::core::context::Context;
use crate::core::input::resolve_targets;
use crate::http::client::HttpClient;
use crate::payload::generator::{Candidate, CandidateGenerator};
use crate::payload::params::extract_params;
use crate::reporting::model::{Finding, ScanSummary};
use crate::reporting::reporter::Reporter;
use crate::validation::verdict::Verdict;
use crate::xss::consistency::{compare_results, Consistency};
use crate::xss::reflect::judge;
use tracing::Instrument;

pub struct Engine {
    ctx: Context,
    renderer: Box<dyn PageFetcher>,
    plain: Option<Box<dyn PageFetcher>>,
    generator: CandidateGenerator,
}

impl Engine {
    pub fn new(ctx: Context) -> anyhow::Result<Self> {
        let renderer = renderer_for(ctx.browser, &ctx.render)?;
        let plain: Option<Box<dyn PageFetcher>> = if ctx.compare {
            Some(Box::new(HttpClient::new()?))
        } else {
            None
        };

        Ok(Self::with_fetchers(ctx, renderer, plain))
    }

    pub fn with_fetchers(
        ctx: Context,
        renderer: Box<dyn PageFetcher>,
        plain: Option<Box<dyn PageFetcher>>,
    ) -> Self {
        let generator = CandidateGenerator::new(ctx.encode);
        Self {
            ctx,
            renderer,
            plain,
            generator,
        }
    }

    pub async fn run(&self, reporter: &mut Reporter) -> ScanSummary {
        let mut summary = ScanSummary::default();

        let urls = match resolve_targets(&self.ctx.input) {
            Ok(urls) => urls,
            Err(e) => {
                tracing::error!("{}", e);
                tracing::error!("No URLs to test.");
                return summary;
            }
        };

        summary.urls_total = urls.len();
        tracing::info!(
            "Loaded {} URL(s); browser: {}; compare: {}",
            urls.len(),
            self.renderer.name(),
            self.plain.is_some()
        );

        for url in &urls {
            self.scan_url(url, reporter, &mut summary).await;
        }

        tracing::info!(
            "Scan complete: {} candidate(s) tested, {} potential finding(s)",
            summary.candidates_tested,
            summary.potential_findings
        );
        summary
    }

    async fn scan_url(&self, url: &str, reporter: &mut Reporter, summary: &mut ScanSummary) {
        tracing::info!("Starting scan for URL: {}", url);

        let params = extract_params(url);
        if params.is_empty() {
            tracing::info!("No parameters found in {}", url);
            summary.urls_skipped += 1;
            return;
        }
        summary.urls_scanned += 1;

        let listing: Vec<String> = params
            .iter()
            .map(|p| format!("{}{}", p.separator, p.key))
            .collect();
        tracing::info!("Parameters: {}", listing.join(" "));

        for strategy in &self.ctx.strategies {
            let candidates = self.generator.generate(url, &params, *strategy);
            tracing::debug!(
                "{} candidate(s) from {} parameter(s) using {}",
                candidates.len(),
                params.len(),
                strategy.label()
            );

            for candidate in &candidates {
                let span = tracing::info_span!("candidate", url = %candidate.url, param = %candidate.parameter);
                self.test_candidate(candidate, reporter, summary)
                    .instrument(span)
                    .await;
            }
        }
    }

    async fn test_candidate(&self, candidate: &Candidate, reporter: &mut Reporter, summary: &mut ScanSummary) {
        tracing::info!("Testing URL: {} with browser: {}", candidate.url, self.renderer.name());
        summary.candidates_tested += 1;

        let rendered = self.renderer.fetch(&candidate.url).await;

        match &rendered {
            Ok(markup) => {
                let (verdict, evidence) = judge(candidate.strategy, markup, &candidate.url);
                if verdict.is_positive() {
                    summary.potential_findings += 1;
                }
                reporter.add(Finding::for_candidate(candidate, verdict, evidence, self.renderer.name()));
            }
            Err(e) => {
                tracing::error!("Error testing URL {}: {}", candidate.url, e);
                summary.fetch_errors += 1;
                reporter.add(Finding::for_candidate(
                    candidate,
                    Verdict::FetchError,
                    e.to_string(),
                    self.renderer.name(),
                ));
            }
        }

        if let Some(plain) = &self.plain {
            let plain_result = plain.fetch(&candidate.url).await;
            let comparison = compare_results(&candidate.url, &plain_result, &rendered, self.renderer.name());

            if comparison.outcome == Consistency::Mismatch {
                summary.source_mismatches += 1;
                reporter.add(Finding::for_candidate(
                    candidate,
                    Verdict::SourceMismatch,
                    comparison.evidence(),
                    plain.name(),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::{BrowserKind, RenderOptions};
    use crate::cli::args::OutputFormat;
    use crate::error::FetchError;
    use crate::payload::generator::Strategy;
    use async_trait::async_trait;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tempfile::NamedTempFile;

    /// Echoes the requested URL into a page, like a naive search results page
    struct EchoPage {
        calls: Arc<AtomicUsize>,
        seen: Arc<Mutex<Vec<String>>>,
        fail_containing: Option<&'static str>,
    }

    impl EchoPage {
        fn new() -> Self {
            Self {
                calls: Arc::new(AtomicUsize::new(0)),
                seen: Arc::new(Mutex::new(Vec::new())),
                fail_containing: None,
            }
        }
    }

    #[async_trait]
    impl PageFetcher for EchoPage {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(url.to_string());
            if let Some(needle) = self.fail_containing {
                if url.contains(needle) {
                    return Err(FetchError::navigation(url, "net::ERR_CONNECTION_RESET"));
                }
            }
            Ok(format!("results for {}", url))
        }
    }

    struct Failing;

    #[async_trait]
    impl PageFetcher for Failing {
        fn name(&self) -> &'static str {
            "http"
        }

        async fn fetch(&self, url: &str) -> Result<String, FetchError> {
            Err(FetchError::navigation(url, "connection refused"))
        }
    }

    fn context(input: &str, strategies: Vec<Strategy>, compare: bool) -> Context {
        Context {
            input: input.to_string(),
            browser: BrowserKind::Chrome,
            render: RenderOptions::default(),
            strategies,
            encode: false,
            compare,
            quiet: false,
            verbose: false,
            output_format: OutputFormat::Text,
            output_file: None,
        }
    }

    #[tokio::test]
    async fn test_missing_input_file_fetches_nothing() {
        let page = EchoPage::new();
        let calls = page.calls.clone();
        let engine = Engine::with_fetchers(
            context("/nonexistent/xssprobe/urls.txt", vec![Strategy::BoundaryChars], false),
            Box::new(page),
            None,
        );

        let mut reporter = Reporter::new();
        let summary = engine.run(&mut reporter).await;

        assert_eq!(summary.urls_total, 0);
        assert_eq!(summary.candidates_tested, 0);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(reporter.findings().is_empty());
    }

    #[tokio::test]
    async fn test_comment_only_file_fetches_nothing() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# staging hosts").unwrap();
        writeln!(file).unwrap();

        let page = EchoPage::new();
        let calls = page.calls.clone();
        let engine = Engine::with_fetchers(
            context(file.path().to_str().unwrap(), vec![Strategy::BoundaryChars], false),
            Box::new(page),
            None,
        );

        let summary = engine.run(&mut Reporter::new()).await;

        assert_eq!(summary, ScanSummary::default());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_boundary_scan_of_single_url() {
        let page = EchoPage::new();
        let seen = page.seen.clone();
        let engine = Engine::with_fetchers(
            context("http://x.test/p?a=1&b=two", vec![Strategy::BoundaryChars], false),
            Box::new(page),
            None,
        );

        let mut reporter = Reporter::new();
        let summary = engine.run(&mut reporter).await;

        assert_eq!(summary.urls_total, 1);
        assert_eq!(summary.urls_scanned, 1);
        assert_eq!(summary.candidates_tested, 16);
        assert_eq!(reporter.findings().len(), 16);
        assert!(seen.lock().unwrap().contains(&"http://x.test/p?a=1<&b=two".to_string()));

        // Every echoed page contains its injected boundary character
        assert_eq!(summary.potential_findings, 16);
        assert_eq!(reporter.count(Verdict::ReflectedRawChar), 16);
    }

    #[tokio::test]
    async fn test_payload_scan_detects_marker() {
        let engine = Engine::with_fetchers(
            context("http://x.test/search?q=lamp", vec![Strategy::FixedPayloads], false),
            Box::new(EchoPage::new()),
            None,
        );

        let mut reporter = Reporter::new();
        let summary = engine.run(&mut reporter).await;

        assert_eq!(summary.candidates_tested, 6);
        assert_eq!(reporter.count(Verdict::ReflectedPayload), 6);
    }

    #[tokio::test]
    async fn test_url_list_with_parameterless_entry() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "http://x.test/about").unwrap();
        writeln!(file, "http://x.test/item?id=7").unwrap();

        let engine = Engine::with_fetchers(
            context(file.path().to_str().unwrap(), vec![Strategy::BoundaryChars, Strategy::FixedPayloads], false),
            Box::new(EchoPage::new()),
            None,
        );

        let mut reporter = Reporter::new();
        let summary = engine.run(&mut reporter).await;

        assert_eq!(summary.urls_total, 2);
        assert_eq!(summary.urls_skipped, 1);
        assert_eq!(summary.urls_scanned, 1);
        assert_eq!(summary.candidates_tested, 8 + 6);
    }

    #[tokio::test]
    async fn test_fetch_failure_does_not_abort() {
        let mut page = EchoPage::new();
        page.fail_containing = Some("a=1\"");
        let calls = page.calls.clone();

        let engine = Engine::with_fetchers(
            context("http://x.test/p?a=1", vec![Strategy::BoundaryChars], false),
            Box::new(page),
            None,
        );

        let mut reporter = Reporter::new();
        let summary = engine.run(&mut reporter).await;

        assert_eq!(calls.load(Ordering::SeqCst), 8);
        assert_eq!(summary.fetch_errors, 2);
        assert_eq!(reporter.count(Verdict::FetchError), 2);
        assert_eq!(summary.candidates_tested, 8);
    }

    #[tokio::test]
    async fn test_compare_reports_mismatch_on_http_failure() {
        let engine = Engine::with_fetchers(
            context("http://x.test/p?a=1", vec![Strategy::BoundaryChars], true),
            Box::new(EchoPage::new()),
            Some(Box::new(Failing)),
        );

        let mut reporter = Reporter::new();
        let summary = engine.run(&mut reporter).await;

        assert_eq!(summary.source_mismatches, 8);
        assert_eq!(reporter.count(Verdict::SourceMismatch), 8);
    }

    #[tokio::test]
    async fn test_compare_match_adds_no_finding() {
        let engine = Engine::with_fetchers(
            context("http://x.test/p?a=1", vec![Strategy::BoundaryChars], true),
            Box::new(EchoPage::new()),
            Some(Box::new(EchoPage::new())),
        );

        let mut reporter = Reporter::new();
        let summary = engine.run(&mut reporter).await;

        assert_eq!(summary.source_mismatches, 0);
        assert_eq!(reporter.findings().len(), 8);
    }
}
