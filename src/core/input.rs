//! Scan input resolution: a literal URL or a file listing URLs

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Whether the input is a URL rather than a path
pub fn is_url(input: &str) -> bool {
    input.starts_with("http://") || input.starts_with("https://")
}

/// Resolve the CLI input into the list of URLs to scan.
///
/// File lines are trimmed; blank lines and `#` comments are skipped.
pub fn resolve_targets(input: &str) -> Result<Vec<String>, InputError> {
    let urls = if is_url(input) {
        vec![input.to_string()]
    } else {
        read_url_list(Path::new(input))?
    };

    if urls.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(urls)
}

fn read_url_list(path: &Path) -> Result<Vec<String>, InputError> {
    let content = fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => InputError::NotFound {
            path: path.to_path_buf(),
        },
        _ => InputError::Unreadable {
            path: path.to_path_buf(),
            source: e,
        },
    })?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_literal_url() {
        let urls = resolve_targets("https://x.test/?a=1").unwrap();
        assert_eq!(urls, vec!["https://x.test/?a=1"]);
    }

    #[test]
    fn test_url_list_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "http://a.test/?x=1").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "# staging hosts").unwrap();
        writeln!(file, "  http://b.test/p?y=2  ").unwrap();

        let urls = resolve_targets(file.path().to_str().unwrap()).unwrap();
        assert_eq!(urls, vec!["http://a.test/?x=1", "http://b.test/p?y=2"]);
    }

    #[test]
    fn test_missing_file() {
        let err = resolve_targets("/nonexistent/xssprobe/urls.txt").unwrap_err();
        assert!(matches!(err, InputError::NotFound { .. }));
    }

    #[test]
    fn test_empty_file() {
        let file = NamedTempFile::new().unwrap();
        let err = resolve_targets(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, InputError::Empty));
    }

    #[test]
    fn test_ftp_is_treated_as_path() {
        assert!(!is_url("ftp://x.test/?a=1"));
        assert!(matches!(
            resolve_targets("ftp://x.test/?a=1"),
            Err(InputError::NotFound { .. })
        ));
    }
}
