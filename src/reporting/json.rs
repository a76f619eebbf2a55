use crate::reporting::model::{Finding, ScanSummary};
use serde::Serialize;

#[derive(Serialize)]
struct Report<'a> {
    scan_metadata: ScanMetadata,
    summary: &'a ScanSummary,
    findings: &'a [Finding],
}

#[derive(Serialize)]
struct ScanMetadata {
    tool: String,
    version: String,
    scan_date: String,
    browser: String,
    note: String,
}

pub fn render(summary: &ScanSummary, findings: &[Finding], browser: &str) -> anyhow::Result<String> {
    let report = Report {
        scan_metadata: ScanMetadata {
            tool: "xssprobe".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            scan_date: chrono::Utc::now().to_rfc3339(),
            browser: browser.to_string(),
            note: "Findings are potential: detection is a literal substring heuristic".to_string(),
        },
        summary,
        findings,
    };

    let json = serde_json::to_string_pretty(&report)?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::generator::{Candidate, Strategy};
    use crate::payload::injector::InjectionMode;
    use crate::validation::verdict::Verdict;

    #[test]
    fn test_render_json() {
        let candidate = Candidate {
            url: "http://x.test/p?a=1<&b=two".to_string(),
            parameter: "a".to_string(),
            injected: "<".to_string(),
            mode: InjectionMode::AppendAfterPair,
            strategy: Strategy::BoundaryChars,
        };
        let findings = vec![Finding::for_candidate(
            &candidate,
            Verdict::ReflectedRawChar,
            "raw characters present: <".to_string(),
            "chrome",
        )];
        let summary = ScanSummary {
            urls_total: 1,
            urls_scanned: 1,
            candidates_tested: 16,
            potential_findings: 1,
            ..ScanSummary::default()
        };

        let out = render(&summary, &findings, "chrome").unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["scan_metadata"]["tool"], "xssprobe");
        assert_eq!(value["summary"]["candidates_tested"], 16);
        assert_eq!(value["findings"][0]["verdict"], "ReflectedRawChar");
        assert_eq!(value["findings"][0]["url"], "http://x.test/p?a=1<&b=two");
        assert_eq!(value["findings"][0]["mode"], "AppendAfterPair");
    }
}
