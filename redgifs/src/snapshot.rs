//! Tag snapshot: the bundled dictionary of canonical tag names
//!
//! A snapshot is a JSON object mapping a lower-cased key to the canonical
//! display form of the tag:
//!
//! ```json
//! {"hitomi tanaka": "Hitomi Tanaka", "ass": "Ass"}
//! ```
//!
//! The crate embeds one such file. [`mapping_from_records`], [`save_snapshot`]
//! and [`added_tags`] are the building blocks used to regenerate it from the
//! live tag list of the service.

use crate::error::Result;
use crate::models::TagRecord;
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Lower-cased key → canonical tag
pub type TagMapping = IndexMap<String, String>;

/// Snapshot bundled with the crate
const EMBEDDED_SNAPSHOT: &str = include_str!("tags.json");

/// Where a resolver gets its dictionary from
///
/// Implementations are called at most once per load and may block.
pub trait SnapshotSource: Send + Sync {
    /// Reads and parses the whole snapshot
    fn load(&self) -> Result<TagMapping>;

    /// Human readable origin, used in logs
    fn describe(&self) -> String;
}

/// The snapshot compiled into the crate
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSnapshot;

impl SnapshotSource for EmbeddedSnapshot {
    fn load(&self) -> Result<TagMapping> {
        parse_snapshot(EMBEDDED_SNAPSHOT)
    }

    fn describe(&self) -> String {
        "embedded tags.json".to_string()
    }
}

/// A snapshot file on disk
#[derive(Debug, Clone)]
pub struct FileSnapshot {
    path: PathBuf,
}

impl FileSnapshot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotSource for FileSnapshot {
    fn load(&self) -> Result<TagMapping> {
        load_file(&self.path)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Parses snapshot JSON
pub fn parse_snapshot(json: &str) -> Result<TagMapping> {
    let mapping: TagMapping = serde_json::from_str(json)?;
    debug!(entries = mapping.len(), "Parsed tag snapshot");
    Ok(mapping)
}

/// Reads a snapshot file
pub fn load_file(path: impl AsRef<Path>) -> Result<TagMapping> {
    let path = path.as_ref();
    let data = fs::read_to_string(path)?;
    let mapping = parse_snapshot(&data)?;
    info!(path = %path.display(), entries = mapping.len(), "Loaded tag snapshot");
    Ok(mapping)
}

/// Reads a snapshot file on the blocking thread pool
pub async fn load_file_async(path: impl Into<PathBuf>) -> Result<TagMapping> {
    let path = path.into();
    tokio::task::spawn_blocking(move || load_file(path)).await?
}

/// Builds a snapshot mapping from the service's tag list
///
/// Each key is the lower-cased tag name. When two names only differ by case
/// the last one wins, as it would when the file is rewritten.
pub fn mapping_from_records(records: &[TagRecord]) -> TagMapping {
    records
        .iter()
        .map(|record| (record.name.to_lowercase(), record.name.clone()))
        .collect()
}

/// Writes a snapshot file
pub fn save_snapshot(path: impl AsRef<Path>, mapping: &TagMapping) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string(mapping)?;
    fs::write(path, json)?;
    info!(path = %path.display(), entries = mapping.len(), "Saved tag snapshot");
    Ok(())
}

/// Keys present in `after` but not in `before`, in `after` order
pub fn added_tags(before: &TagMapping, after: &TagMapping) -> Vec<String> {
    after
        .keys()
        .filter(|key| !before.contains_key(*key))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_snapshot_is_well_formed() {
        let mapping = EmbeddedSnapshot.load().unwrap();
        assert!(mapping.len() > 100);
        for (key, value) in &mapping {
            assert_eq!(key, &value.to_lowercase());
        }
        assert_eq!(mapping.get("hitomi tanaka").map(String::as_str), Some("Hitomi Tanaka"));
    }

    #[test]
    fn test_mapping_from_records() {
        let records = vec![
            TagRecord::new("Big Dick", 10),
            TagRecord::new("ASMR", 4),
            TagRecord::new("Ass", 99),
        ];
        let mapping = mapping_from_records(&records);
        assert_eq!(mapping.len(), 3);
        assert_eq!(mapping["big dick"], "Big Dick");
        assert_eq!(mapping["asmr"], "ASMR");
        assert_eq!(mapping.keys().next().map(String::as_str), Some("big dick"));
    }

    #[test]
    fn test_added_tags() {
        let before = mapping_from_records(&[TagRecord::new("Ass", 1)]);
        let after = mapping_from_records(&[
            TagRecord::new("Ass", 1),
            TagRecord::new("Cosplay", 1),
            TagRecord::new("Redhead", 1),
        ]);
        assert_eq!(added_tags(&before, &after), vec!["cosplay", "redhead"]);
        assert!(added_tags(&after, &before).is_empty());
    }

    #[test]
    fn test_parse_snapshot_rejects_non_object() {
        assert!(parse_snapshot("[\"Ass\"]").is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_file("/nonexistent/redgifs/tags.json").unwrap_err();
        assert!(matches!(err, crate::RedgifsError::Io(_)));
    }
}
