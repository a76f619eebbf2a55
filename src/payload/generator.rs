//! Candidate URL generation.
//!
//! Two strategies mutate one parameter at a time:
//! - boundary characters: each of `< > " '` appended to the value and,
//!   separately, right after the `key=value` pair (8 candidates per parameter)
//! - fixed payloads: each known XSS string substituted for the value
//!   (one candidate per parameter per payload)

use crate::payload::catalog::{BOUNDARY_CHARS, XSS_PAYLOADS};
use crate::payload::injector::{inject, is_well_formed, InjectionMode};
use crate::payload::params::ParsedParam;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strategy {
    BoundaryChars,
    FixedPayloads,
}

impl Strategy {
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::BoundaryChars => "boundary-chars",
            Strategy::FixedPayloads => "fixed-payloads",
        }
    }
}

/// Which strategies a run applies, as chosen on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum StrategySelection {
    #[default]
    Chars,
    Payloads,
    All,
}

impl StrategySelection {
    pub fn strategies(&self) -> Vec<Strategy> {
        match self {
            StrategySelection::Chars => vec![Strategy::BoundaryChars],
            StrategySelection::Payloads => vec![Strategy::FixedPayloads],
            StrategySelection::All => vec![Strategy::BoundaryChars, Strategy::FixedPayloads],
        }
    }
}

/// One mutated URL under test
#[derive(Debug, Clone)]
pub struct Candidate {
    pub url: String,
    pub parameter: String,
    pub injected: String,
    pub mode: InjectionMode,
    pub strategy: Strategy,
}

#[derive(Debug, Clone, Default)]
pub struct CandidateGenerator {
    /// Percent-encode injected text before insertion
    pub encode: bool,
}

impl CandidateGenerator {
    pub fn new(encode: bool) -> Self {
        Self { encode }
    }

    pub fn generate(&self, url: &str, params: &[ParsedParam], strategy: Strategy) -> Vec<Candidate> {
        let candidates = match strategy {
            Strategy::BoundaryChars => self.boundary_candidates(url, params),
            Strategy::FixedPayloads => self.payload_candidates(url, params),
        };

        for candidate in &candidates {
            if !is_well_formed(&candidate.url) {
                tracing::debug!("Candidate does not parse as a URL: {}", candidate.url);
            }
        }

        candidates
    }

    fn boundary_candidates(&self, url: &str, params: &[ParsedParam]) -> Vec<Candidate> {
        let mut out = Vec::with_capacity(params.len() * BOUNDARY_CHARS.len() * 2);

        for param in params {
            for ch in BOUNDARY_CHARS {
                let injected = ch.to_string();
                for mode in [InjectionMode::AppendToValue, InjectionMode::AppendAfterPair] {
                    out.push(Candidate {
                        url: inject(url, param, &injected, mode, self.encode),
                        parameter: param.key.clone(),
                        injected: injected.clone(),
                        mode,
                        strategy: Strategy::BoundaryChars,
                    });
                }
            }
        }

        out
    }

    fn payload_candidates(&self, url: &str, params: &[ParsedParam]) -> Vec<Candidate> {
        let mut out = Vec::with_capacity(params.len() * XSS_PAYLOADS.len());

        for param in params {
            for payload in XSS_PAYLOADS {
                out.push(Candidate {
                    url: inject(url, param, payload, InjectionMode::ReplaceValue, self.encode),
                    parameter: param.key.clone(),
                    injected: payload.to_string(),
                    mode: InjectionMode::ReplaceValue,
                    strategy: Strategy::FixedPayloads,
                });
            }
        }

        out
    }
}
