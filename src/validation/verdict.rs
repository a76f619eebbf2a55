use serde::Serialize;
use std::fmt;

/// Outcome for a single candidate URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    NoSignal,
    ReflectedRawChar,
    ReflectedInEventHandler,
    /// Fixed payload marker found in the rendered page
    ReflectedPayload,
    FetchError,
    SourceMismatch,
}

impl Verdict {
    /// Warn-worthy signal of possible injection
    pub fn is_positive(&self) -> bool {
        matches!(
            self,
            Verdict::ReflectedRawChar | Verdict::ReflectedInEventHandler | Verdict::ReflectedPayload
        )
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::NoSignal => "no signal",
            Verdict::ReflectedRawChar => "potential reflected XSS (raw boundary character)",
            Verdict::ReflectedInEventHandler => "potential reflected XSS (event handler)",
            Verdict::ReflectedPayload => "potential XSS (payload marker reflected)",
            Verdict::FetchError => "fetch error",
            Verdict::SourceMismatch => "source mismatch",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_verdicts() {
        assert!(Verdict::ReflectedRawChar.is_positive());
        assert!(Verdict::ReflectedInEventHandler.is_positive());
        assert!(Verdict::ReflectedPayload.is_positive());
        assert!(!Verdict::NoSignal.is_positive());
        assert!(!Verdict::FetchError.is_positive());
        assert!(!Verdict::SourceMismatch.is_positive());
    }

    #[test]
    fn test_reported_as_potential() {
        assert!(Verdict::ReflectedRawChar.to_string().starts_with("potential"));
        assert!(Verdict::ReflectedPayload.to_string().starts_with("potential"));
    }
}
