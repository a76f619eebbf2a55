// Reflection Detection Module
// Literal substring checks on serialized page output. This is a coarse
// heuristic: any `<` in ordinary markup counts, so hits are "potential" only.

use crate::payload::catalog::{BOUNDARY_CHARS, EVENT_HANDLERS, PAYLOAD_MARKER};
use crate::payload::generator::Strategy;
use crate::validation::verdict::Verdict;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Detection {
    /// Boundary characters present anywhere in the markup
    pub raw_chars: Vec<char>,
    /// First event-handler attribute name found
    pub event_handler: Option<&'static str>,
}

impl Detection {
    /// Most specific signal wins: event handler, then raw character
    pub fn verdict(&self) -> Verdict {
        if self.event_handler.is_some() {
            Verdict::ReflectedInEventHandler
        } else if !self.raw_chars.is_empty() {
            Verdict::ReflectedRawChar
        } else {
            Verdict::NoSignal
        }
    }

    pub fn evidence(&self) -> String {
        let mut parts = Vec::new();
        if !self.raw_chars.is_empty() {
            let chars: Vec<String> = self.raw_chars.iter().map(|c| c.to_string()).collect();
            parts.push(format!("raw characters present: {}", chars.join(" ")));
        }
        if let Some(handler) = self.event_handler {
            parts.push(format!("event handler present: {}", handler));
        }
        if parts.is_empty() {
            "no boundary characters or event handlers".to_string()
        } else {
            parts.join("; ")
        }
    }
}

/// Boundary-character strategy check
pub fn detect(markup: &str) -> Detection {
    let raw_chars = BOUNDARY_CHARS
        .iter()
        .copied()
        .filter(|c| markup.contains(*c))
        .collect();

    let event_handler = EVENT_HANDLERS.iter().copied().find(|h| markup.contains(h));

    Detection {
        raw_chars,
        event_handler,
    }
}

/// Fixed-payload strategy check: the shared call expression in the page
pub fn detect_marker(markup: &str) -> Verdict {
    if markup.contains(PAYLOAD_MARKER) {
        Verdict::ReflectedPayload
    } else {
        Verdict::NoSignal
    }
}

/// Judge markup the way the given strategy expects, with a short evidence line
pub fn judge(strategy: Strategy, markup: &str, url: &str) -> (Verdict, String) {
    match strategy {
        Strategy::BoundaryChars => {
            let detection = detect(markup);

            // Both signals are logged independently
            if detection.raw_chars.is_empty() {
                tracing::info!("No reflected XSS vulnerability found at: {}", url);
            } else {
                tracing::warn!("Potential reflected XSS vulnerability found at: {}", url);
            }
            if let Some(handler) = detection.event_handler {
                tracing::warn!(
                    "Potential reflected XSS vulnerability found in event handlers ({}) at: {}",
                    handler,
                    url
                );
            }

            (detection.verdict(), detection.evidence())
        }
        Strategy::FixedPayloads => {
            let verdict = detect_marker(markup);
            if verdict.is_positive() {
                tracing::warn!("Potential XSS vulnerability found at: {}", url);
                (verdict, format!("marker {} present in rendered page", PAYLOAD_MARKER))
            } else {
                tracing::info!("No XSS vulnerability found at: {}", url);
                (verdict, format!("marker {} absent", PAYLOAD_MARKER))
            }
        }
    }
}
