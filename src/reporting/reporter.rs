use crate::reporting::model::Finding;
use crate::validation::verdict::Verdict;

/// Collects every candidate outcome for the end-of-run summary
#[derive(Default)]
pub struct Reporter {
    findings: Vec<Finding>,
}

impl Reporter {
    pub fn new() -> Self {
        Self {
            findings: Vec::new(),
        }
    }

    pub fn add(&mut self, finding: Finding) {
        self.findings.push(finding);
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    /// Outcomes other than a clean page, in scan order
    pub fn notable(&self) -> Vec<Finding> {
        self.findings.iter().filter(|f| f.is_notable()).cloned().collect()
    }

    pub fn count(&self, verdict: Verdict) -> usize {
        self.findings.iter().filter(|f| f.verdict == verdict).count()
    }
}
