//! `.env` override file
//!
//! Lines are matched on a literal key-name prefix rather than parsed as
//! assignments, so `SWITCHBOT_API_TOKEN_OLD=x` also matches
//! `SWITCHBOT_API_TOKEN`. The first matching line wins and its value is
//! everything after the first `=`, trimmed.

use std::io::ErrorKind;
use std::path::PathBuf;

use super::CredentialSource;
use crate::Result;

/// Reads keys from a `KEY=value` override file
#[derive(Debug, Clone)]
pub struct EnvFileSource {
    path: PathBuf,
}

impl EnvFileSource {
    /// Source backed by the file at `path`, which need not exist
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CredentialSource for EnvFileSource {
    fn lookup(&self, key: &str) -> Result<Option<String>> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let value = find_value(&contents, key);
        if value.is_some() {
            tracing::debug!(key, path = %self.path.display(), "key found in override file");
        }
        Ok(value)
    }
}

/// Value of the first line starting with `key`
///
/// A matching line without `=` yields an empty value.
fn find_value(contents: &str, key: &str) -> Option<String> {
    contents
        .lines()
        .find(|line| line.starts_with(key))
        .map(|line| {
            line.split_once('=')
                .map_or("", |(_, value)| value)
                .trim()
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_find_value_trims() {
        let contents = "SWITCHBOT_API_TOKEN =  abc123  \nOTHER=1\n";
        assert_eq!(
            find_value(contents, "SWITCHBOT_API_TOKEN").as_deref(),
            Some("abc123")
        );
    }

    #[test]
    fn test_first_match_wins() {
        let contents = "KEY=first\nKEY=second\n";
        assert_eq!(find_value(contents, "KEY").as_deref(), Some("first"));
    }

    #[test]
    fn test_prefix_match() {
        let contents = "SWITCHBOT_API_TOKEN_OLD=stale\nSWITCHBOT_API_TOKEN=fresh\n";
        assert_eq!(
            find_value(contents, "SWITCHBOT_API_TOKEN").as_deref(),
            Some("stale")
        );
    }

    #[test]
    fn test_value_keeps_later_equals() {
        let contents = "SWITCHBOT_API_SECRET=ab==\n";
        assert_eq!(
            find_value(contents, "SWITCHBOT_API_SECRET").as_deref(),
            Some("ab==")
        );
    }

    #[test]
    fn test_line_without_equals_is_empty() {
        assert_eq!(find_value("SWITCHBOT_DEVICE_ID\n", "SWITCHBOT_DEVICE_ID").as_deref(), Some(""));
    }

    #[test]
    fn test_indented_line_does_not_match() {
        assert_eq!(find_value("  KEY=v\n", "KEY"), None);
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let source = EnvFileSource::new(dir.path().join(".env"));
        assert!(source.lookup("KEY").unwrap().is_none());
    }

    #[test]
    fn test_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# comment").unwrap();
        writeln!(file, "SWITCHBOT_DEVICE_ID=ABCDEF123456").unwrap();

        let source = EnvFileSource::new(file.path());
        assert_eq!(
            source.lookup("SWITCHBOT_DEVICE_ID").unwrap().as_deref(),
            Some("ABCDEF123456")
        );
        assert!(source.lookup("SWITCHBOT_API_TOKEN").unwrap().is_none());
    }
}
