//! Query parameter extraction over raw URL text.
//!
//! Parameters are recognized textually rather than through a URL parser so
//! that values are returned exactly as written (no percent-decoding) and the
//! injector can later locate the same `key=value` text verbatim.

use regex::Regex;

/// `?` or `&`, a key of one or more non-`=` characters, `=`, then a value
/// running up to the next `&`.
const PARAM_PATTERN: &str = r"([?&])([^=]+)=([^&]*)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedParam {
    pub separator: char,
    pub key: String,
    pub value: String,
}

impl ParsedParam {
    /// The literal `key=value` text as it appears in the URL
    pub fn pair(&self) -> String {
        format!("{}={}", self.key, self.value)
    }
}

/// Extract every query parameter in order of appearance.
///
/// Repeated keys yield repeated entries. Returns an empty vector when the
/// URL has no query component. The scheme and host are not validated.
pub fn extract_params(url: &str) -> Vec<ParsedParam> {
    let mut params = Vec::new();

    if let Ok(re) = Regex::new(PARAM_PATTERN) {
        for caps in re.captures_iter(url) {
            let separator = caps
                .get(1)
                .and_then(|m| m.as_str().chars().next())
                .unwrap_or('?');
            let key = caps.get(2).map(|m| m.as_str()).unwrap_or_default();
            let value = caps.get(3).map(|m| m.as_str()).unwrap_or_default();

            params.push(ParsedParam {
                separator,
                key: key.to_string(),
                value: value.to_string(),
            });
        }
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_in_order() {
        let params = extract_params("http://x.test/p?a=1&b=two");

        assert_eq!(params.len(), 2);
        assert_eq!(params[0].separator, '?');
        assert_eq!(params[0].key, "a");
        assert_eq!(params[0].value, "1");
        assert_eq!(params[1].separator, '&');
        assert_eq!(params[1].key, "b");
        assert_eq!(params[1].value, "two");
    }

    #[test]
    fn test_no_query() {
        assert!(extract_params("https://example.com/index.html").is_empty());
    }

    #[test]
    fn test_empty_value() {
        let params = extract_params("http://x.test/?q=&page=2");
        assert_eq!(params[0].key, "q");
        assert_eq!(params[0].value, "");
        assert_eq!(params[1].value, "2");
    }

    #[test]
    fn test_value_may_contain_equals() {
        let params = extract_params("http://x.test/?token=abc==&next=/home");
        assert_eq!(params[0].value, "abc==");
        assert_eq!(params[1].value, "/home");
    }

    #[test]
    fn test_values_not_decoded() {
        let params = extract_params("http://x.test/?q=hello%20world");
        assert_eq!(params[0].value, "hello%20world");
    }

    #[test]
    fn test_repeated_keys_kept() {
        let params = extract_params("http://x.test/?id=1&id=2&id=1");
        let keys: Vec<&str> = params.iter().map(|p| p.key.as_str()).collect();
        assert_eq!(keys, vec!["id", "id", "id"]);
    }

    #[test]
    fn test_pair_text() {
        let params = extract_params("http://x.test/?q=a=b");
        assert_eq!(params[0].pair(), "q=a=b");
    }

    #[test]
    fn test_scheme_not_validated() {
        let params = extract_params("not a url?x=1");
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].key, "x");
    }
}
