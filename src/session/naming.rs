//! Order identifiers and output file naming.

use chrono::{DateTime, Local};
use std::fmt;
use std::path::{Path, PathBuf};

/// Timestamp format embedded in output file names.
pub const FILE_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// A non-blank, trimmed order identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(String);

impl OrderId {
    /// Parse user input. Blank input yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The id with characters that are unsafe in file names replaced by `_`.
    pub fn file_stem(&self) -> String {
        self.0
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_control() => '_',
                c => c,
            })
            .collect()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `<order_id>_<YYYYMMDD_HHMMSS>.<extension>`
pub fn output_file_name(order_id: &OrderId, started_at: &DateTime<Local>, extension: &str) -> String {
    format!(
        "{}_{}.{}",
        order_id.file_stem(),
        started_at.format(FILE_TIMESTAMP_FORMAT),
        extension
    )
}

/// Full output path inside `dir`.
///
/// A file left by an earlier session of the same order in the same second
/// is never reused: `_1`, `_2`, ... is appended to the stem until the name
/// is free.
pub fn output_path(
    dir: &Path,
    order_id: &OrderId,
    started_at: &DateTime<Local>,
    extension: &str,
) -> PathBuf {
    let path = dir.join(output_file_name(order_id, started_at, extension));
    if !path.exists() {
        return path;
    }

    let stem = format!("{}_{}", order_id.file_stem(), started_at.format(FILE_TIMESTAMP_FORMAT));
    (1u32..)
        .map(|n| dir.join(format!("{}_{}.{}", stem, n, extension)))
        .find(|candidate| !candidate.exists())
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_trims_and_rejects_blank() {
        assert_eq!(OrderId::parse("  A-17 \n").unwrap().as_str(), "A-17");
        assert!(OrderId::parse("").is_none());
        assert!(OrderId::parse("   \t").is_none());
    }

    #[test]
    fn test_output_file_name_pattern() {
        let id = OrderId::parse("ORD42").unwrap();
        let at = Local.with_ymd_and_hms(2024, 11, 5, 9, 3, 7).unwrap();
        assert_eq!(output_file_name(&id, &at, "mp4"), "ORD42_20241105_090307.mp4");
    }

    #[test]
    fn test_file_stem_replaces_path_separators() {
        let id = OrderId::parse("a/b\\c:d").unwrap();
        assert_eq!(id.file_stem(), "a_b_c_d");
        // The id itself is left untouched for the overlay
        assert_eq!(id.as_str(), "a/b\\c:d");
    }

    #[test]
    fn test_output_path_joins_dir() {
        let id = OrderId::parse("X").unwrap();
        let at = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let path = output_path(Path::new("/data/videos"), &id, &at, "mp4");
        assert_eq!(path, PathBuf::from("/data/videos/X_20240102_030405.mp4"));
    }

    #[test]
    fn test_output_path_never_reuses_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let id = OrderId::parse("SAME").unwrap();
        let at = Local.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();

        let first = output_path(dir.path(), &id, &at, "mp4");
        assert_eq!(first.file_name().unwrap(), "SAME_20240601_120000.mp4");
        std::fs::write(&first, b"finalized").unwrap();

        let second = output_path(dir.path(), &id, &at, "mp4");
        assert_eq!(second.file_name().unwrap(), "SAME_20240601_120000_1.mp4");
        std::fs::write(&second, b"finalized").unwrap();

        let third = output_path(dir.path(), &id, &at, "mp4");
        assert_eq!(third.file_name().unwrap(), "SAME_20240601_120000_2.mp4");
        assert_eq!(std::fs::read(&first).unwrap(), b"finalized");
    }
}
