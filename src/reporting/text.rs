use crate::reporting::model::{Finding, ScanSummary, Severity};
use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

const FRAME_WIDTH: usize = 70;
const INNER: usize = FRAME_WIDTH - 2;

enum Align {
    Left,
    Center,
}

fn rule(left: char, right: char) -> String {
    format!("{}{}{}", left, "═".repeat(INNER), right)
}

/// One framed row, padded by display width so emoji don't push the border
fn row(content: &str, align: Align) -> String {
    let cell = format!(" {} ", content);
    let gap = INNER.saturating_sub(UnicodeWidthStr::width(cell.as_str()));
    let (left, right) = match align {
        Align::Left => (0, gap),
        Align::Center => (gap / 2, gap - gap / 2),
    };
    format!("║{}{}{}║", " ".repeat(left), cell, " ".repeat(right))
}

pub fn render(summary: &ScanSummary, findings: &[Finding]) -> String {
    let mut out = String::new();

    let mut rows = vec![
        format!(
            "URLs:         {} ({} scanned, {} without parameters)",
            summary.urls_total, summary.urls_scanned, summary.urls_skipped
        ),
        format!("Candidates:   {}", summary.candidates_tested),
        format!("Potential:    {}", summary.potential_findings),
    ];
    if summary.source_mismatches > 0 {
        rows.push(format!("Mismatches:   {}", summary.source_mismatches));
    }
    if summary.fetch_errors > 0 {
        rows.push(format!("Fetch errors: {}", summary.fetch_errors));
    }

    let _ = writeln!(out, "\n{}", rule('╔', '╗'));
    let _ = writeln!(out, "{}", row("SCAN COMPLETE", Align::Center));
    let _ = writeln!(out, "{}", rule('╠', '╣'));
    for line in &rows {
        let _ = writeln!(out, "{}", row(line, Align::Left));
    }
    let _ = writeln!(out, "{}", rule('╚', '╝'));

    if findings.is_empty() {
        let _ = writeln!(out, "\nNo potential reflections observed.");
        return out;
    }

    let medium_or_worse = findings
        .iter()
        .filter(|f| matches!(f.severity, Severity::Medium | Severity::High))
        .count();
    if medium_or_worse > 0 {
        let _ = writeln!(out, "\n{} finding(s) rated MEDIUM or higher.", medium_or_worse);
    }

    for (idx, f) in findings.iter().enumerate() {
        let _ = writeln!(out, "\n{}", "═".repeat(80));
        let _ = writeln!(out, "#{} {} [{}]", idx + 1, f.verdict, f.severity);
        let _ = writeln!(out, "{}", "═".repeat(80));
        let _ = writeln!(out, "   URL:        {}", f.url);
        let _ = writeln!(out, "   Parameter:  {}", f.parameter);
        let _ = writeln!(out, "   Injected:   {}", f.injected);
        let _ = writeln!(out, "   Strategy:   {} ({})", f.strategy.label(), f.mode.label());
        let _ = writeln!(out, "   Fetcher:    {}", f.fetcher);
        let _ = writeln!(out, "   Evidence:   {}", f.evidence);
    }

    let _ = writeln!(
        out,
        "\nAll findings are potential. Confirm each one manually before reporting."
    );
    out
}
