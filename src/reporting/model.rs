use crate::payload::generator::{Candidate, Strategy};
use crate::payload::injector::InjectionMode;
use crate::validation::verdict::Verdict;
use serde::Serialize;

/// Judgement of one candidate URL (or of its source comparison)
#[derive(Debug, Serialize, Clone)]
pub struct Finding {
    pub url: String,
    pub parameter: String,
    pub injected: String,
    pub mode: InjectionMode,
    pub strategy: Strategy,
    pub verdict: Verdict,
    pub severity: Severity,
    pub evidence: String,
    pub fetcher: String,
}

impl Finding {
    pub fn for_candidate(candidate: &Candidate, verdict: Verdict, evidence: String, fetcher: &str) -> Self {
        Self {
            url: candidate.url.clone(),
            parameter: candidate.parameter.clone(),
            injected: candidate.injected.clone(),
            mode: candidate.mode,
            strategy: candidate.strategy,
            verdict,
            severity: Severity::for_verdict(verdict),
            evidence,
            fetcher: fetcher.to_string(),
        }
    }

    /// Anything other than a clean page is worth listing
    pub fn is_notable(&self) -> bool {
        self.verdict != Verdict::NoSignal
    }
}

/// Run totals returned by the engine
#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub urls_total: usize,
    pub urls_scanned: usize,
    pub urls_skipped: usize,
    pub candidates_tested: usize,
    pub fetch_errors: usize,
    pub potential_findings: usize,
    pub source_mismatches: usize,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
}

impl Severity {
    /// Every positive verdict is unconfirmed, so nothing rates above High
    pub fn for_verdict(verdict: Verdict) -> Self {
        match verdict {
            Verdict::ReflectedPayload => Severity::High,
            Verdict::ReflectedInEventHandler => Severity::Medium,
            Verdict::ReflectedRawChar => Severity::Low,
            Verdict::NoSignal | Verdict::FetchError | Verdict::SourceMismatch => Severity::Info,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "ℹ️  INFO"),
            Severity::Low => write!(f, "🟢 LOW"),
            Severity::Medium => write!(f, "🟡 MEDIUM"),
            Severity::High => write!(f, "🟠 HIGH"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate() -> Candidate {
        Candidate {
            url: "http://x.test/?q=<script>alert(1)</script>".to_string(),
            parameter: "q".to_string(),
            injected: "<script>alert(1)</script>".to_string(),
            mode: InjectionMode::ReplaceValue,
            strategy: Strategy::FixedPayloads,
        }
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(Severity::for_verdict(Verdict::ReflectedPayload), Severity::High);
        assert_eq!(Severity::for_verdict(Verdict::ReflectedRawChar), Severity::Low);
        assert_eq!(Severity::for_verdict(Verdict::FetchError), Severity::Info);
    }

    #[test]
    fn test_finding_from_candidate() {
        let f = Finding::for_candidate(&candidate(), Verdict::ReflectedPayload, "marker".into(), "chrome");
        assert_eq!(f.parameter, "q");
        assert_eq!(f.mode, InjectionMode::ReplaceValue);
        assert_eq!(f.severity, Severity::High);
        assert!(f.is_notable());
    }

    #[test]
    fn test_clean_page_not_notable() {
        let f = Finding::for_candidate(&candidate(), Verdict::NoSignal, String::new(), "chrome");
        assert!(!f.is_notable());
    }
}
