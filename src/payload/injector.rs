use crate::payload::params::ParsedParam;
use regex::Regex;
use serde::Serialize;
use url::Url;

/// Where injected text lands relative to the targeted parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InjectionMode {
    /// `key=value` becomes `key=value<inj>` as the parameter's new value
    AppendToValue,
    /// `inj` is placed immediately after the existing `key=value` text
    AppendAfterPair,
    /// `key=value` becomes `key=<inj>`
    ReplaceValue,
}

impl InjectionMode {
    pub fn label(&self) -> &'static str {
        match self {
            InjectionMode::AppendToValue => "append-to-value",
            InjectionMode::AppendAfterPair => "append-after-pair",
            InjectionMode::ReplaceValue => "replace-value",
        }
    }
}

/// Rewrite `url` so that the textual `key=value` of `param` carries `injected`.
///
/// The match is literal and anchored to whole parameters: it must start right
/// after a `?` or `&` and end at `&`, `#` or the end of the URL. A URL that
/// repeats the same pair gets all copies mutated. Other parameters, including
/// ones whose text merely ends in `key=value`, are never touched.
pub fn inject(url: &str, param: &ParsedParam, injected: &str, mode: InjectionMode, encode: bool) -> String {
    let original = param.pair();
    let injected = if encode {
        urlencoding::encode(injected).into_owned()
    } else {
        injected.to_string()
    };

    let replacement = match mode {
        InjectionMode::AppendToValue => format!("{}={}{}", param.key, param.value, injected),
        InjectionMode::AppendAfterPair => format!("{}{}", original, injected),
        InjectionMode::ReplaceValue => format!("{}={}", param.key, injected),
    };

    substitute(url, &original, &replacement)
}

/// Replace every whole-parameter occurrence of the literal `pair` in `url`.
///
/// The leading separator is kept. Matches running into anything other than
/// `&`, `#` or the end of the URL belong to a longer value and are skipped.
pub fn substitute(url: &str, pair: &str, replacement: &str) -> String {
    if pair.is_empty() {
        return url.to_string();
    }

    let re = match Regex::new(&format!("[?&]{}", regex::escape(pair))) {
        Ok(re) => re,
        Err(e) => {
            tracing::debug!("Could not build matcher for {}: {}", pair, e);
            return url.to_string();
        }
    };

    let mut out = String::with_capacity(url.len() + replacement.len());
    let mut last = 0;

    for m in re.find_iter(url) {
        if !matches!(url[m.end()..].chars().next(), None | Some('&') | Some('#')) {
            continue;
        }
        // separators are ASCII, so the pair starts one byte in
        let start = m.start() + 1;
        out.push_str(&url[last..start]);
        out.push_str(replacement);
        last = m.end();
    }

    out.push_str(&url[last..]);
    out
}

/// Whether a candidate still parses as an absolute URL
pub fn is_well_formed(candidate: &str) -> bool {
    Url::parse(candidate).is_ok()
}
