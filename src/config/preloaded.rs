//! Preloaded fortune file loading.
//!
//! The file is a TOML list of `[[fortunes]]` tables:
//!
//! ```toml
//! [[fortunes]]
//! ordinal = 1
//! text = "A surprise awaits you."
//! ```
//!
//! Individual rows are read as plain TOML values and kept loose here (missing
//! or wrongly typed fields are `None`) so one bad row is skipped by the import
//! instead of failing the whole file.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::warn;

/// One raw row of the preloaded file
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PreloadedEntry {
    /// Position in the source archive
    pub ordinal: Option<i64>,
    /// Fortune text
    pub text: Option<String>,
}

impl From<&toml::Value> for PreloadedEntry {
    fn from(row: &toml::Value) -> Self {
        let ordinal = match row.get("ordinal") {
            Some(toml::Value::Integer(ordinal)) => Some(*ordinal),
            Some(toml::Value::String(raw)) => raw.trim().parse::<i64>().ok(),
            _ => None,
        };
        let text = row
            .get("text")
            .and_then(toml::Value::as_str)
            .map(ToString::to_string);
        Self { ordinal, text }
    }
}

#[derive(Debug, Deserialize)]
struct PreloadedFile {
    #[serde(default)]
    fortunes: Vec<toml::Value>,
}

/// Parses preloaded entries from TOML text. Only a document that is not valid
/// TOML fails; bad rows come back with `None` fields.
pub fn parse_preloaded(contents: &str) -> Result<Vec<PreloadedEntry>> {
    let file: PreloadedFile = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse preloaded fortunes: {e}"),
    })?;
    Ok(file.fortunes.iter().map(PreloadedEntry::from).collect())
}

/// Reads the preloaded fortune file. A missing file yields an empty pool.
pub fn load_preloaded<P: AsRef<Path>>(path: P) -> Result<Vec<PreloadedEntry>> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        warn!("Preloaded fortune file {:?} not found, starting with an empty pool", path_ref);
        return Ok(Vec::new());
    }
    let contents = std::fs::read_to_string(path_ref)?;
    parse_preloaded(&contents)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_preloaded_keeps_malformed_rows() {
        let entries = parse_preloaded(
            r#"
            [[fortunes]]
            ordinal = 1
            text = "You will find a lost sock."

            [[fortunes]]
            text = "No ordinal here."

            [[fortunes]]
            ordinal = 3
        "#,
        )
        .unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].ordinal, Some(1));
        assert_eq!(entries[1].ordinal, None);
        assert_eq!(entries[2].text, None);
    }

    #[test]
    fn test_wrongly_typed_fields_do_not_fail_the_file() {
        let entries = parse_preloaded(
            r#"
            [[fortunes]]
            ordinal = 1
            text = "ok"

            [[fortunes]]
            ordinal = "seven"
            text = "bad"

            [[fortunes]]
            ordinal = 1.5
            text = "fractional"

            [[fortunes]]
            ordinal = " 12 "
            text = "quoted number"

            [[fortunes]]
            ordinal = 4
            text = 42
        "#,
        )
        .unwrap();

        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].ordinal, Some(1));
        assert_eq!(entries[0].text.as_deref(), Some("ok"));
        assert_eq!(entries[1].ordinal, None);
        assert_eq!(entries[1].text.as_deref(), Some("bad"));
        assert_eq!(entries[2].ordinal, None);
        assert_eq!(entries[3].ordinal, Some(12));
        assert_eq!(entries[4].ordinal, Some(4));
        assert_eq!(entries[4].text, None);
    }

    #[test]
    fn test_empty_document_is_empty_pool() {
        assert!(parse_preloaded("").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        assert!(matches!(
            parse_preloaded("[[fortunes]\nordinal ="),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let entries = load_preloaded("/no/such/fortunes.toml").unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[[fortunes]]\nordinal = 7\ntext = \"Seven\"").unwrap();

        let entries = load_preloaded(file.path()).unwrap();
        assert_eq!(
            entries,
            vec![PreloadedEntry {
                ordinal: Some(7),
                text: Some("Seven".to_string()),
            }]
        );
    }
}
