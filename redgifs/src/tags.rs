//! Tag resolver: maps user supplied strings to canonical RedGifs tags
//!
//! The resolver owns a dictionary of lower-cased keys to canonical tag names.
//! The dictionary is either injected with [`Tags::set`] or read from the
//! resolver's [`SnapshotSource`] the first time [`Tags::search`] runs on an
//! empty dictionary.
//!
//! ```rust
//! use redgifs::Tags;
//!
//! # fn main() -> redgifs::Result<()> {
//! let mut tags = Tags::new();
//! assert_eq!(tags.search("hitomi tanaka")?, vec!["Hitomi Tanaka"]);
//! assert_eq!(tags.search("americam")?[0], "American");
//! # Ok(())
//! # }
//! ```

use crate::config::Config;
use crate::error::{RedgifsError, Result};
use crate::fuzzy::{self, MatchOptions};
use crate::snapshot::{EmbeddedSnapshot, FileSnapshot, SnapshotSource, TagMapping};
use rand::Rng;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

/// Resolver of canonical tag names
pub struct Tags {
    /// Lower-cased key → canonical tag
    mapping: TagMapping,
    /// Origin of the dictionary for lazy loading
    source: Arc<dyn SnapshotSource>,
    /// Close-match limits
    options: MatchOptions,
}

impl Tags {
    /// Resolver backed by the snapshot embedded in the crate
    pub fn new() -> Self {
        Self::with_source(EmbeddedSnapshot)
    }

    /// Resolver backed by a custom snapshot source
    pub fn with_source(source: impl SnapshotSource + 'static) -> Self {
        Self::with_shared_source(Arc::new(source))
    }

    pub fn with_shared_source(source: Arc<dyn SnapshotSource>) -> Self {
        Self {
            mapping: TagMapping::new(),
            source,
            options: MatchOptions::default(),
        }
    }

    /// Resolver configured from a [`Config`]
    ///
    /// Uses the configured snapshot file when one is set, the embedded
    /// snapshot otherwise.
    pub fn from_config(config: &Config) -> Result<Self> {
        let tags = match config.get_snapshot_path()? {
            Some(path) => Self::with_source(FileSnapshot::new(path)),
            None => Self::new(),
        };
        Ok(tags.with_options(config.match_options()?))
    }

    /// Replaces the close-match limits
    pub fn with_options(mut self, options: MatchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> MatchOptions {
        self.options
    }

    pub fn set_options(&mut self, options: MatchOptions) {
        self.options = options;
    }

    pub(crate) fn source(&self) -> Arc<dyn SnapshotSource> {
        self.source.clone()
    }

    // ============ Dictionnaire ============

    /// Replaces the whole dictionary
    pub fn set(&mut self, mapping: TagMapping) {
        debug!(entries = mapping.len(), "Tag mapping replaced");
        self.mapping = mapping;
    }

    /// Empties the dictionary; the next search reloads the snapshot
    pub fn clear(&mut self) {
        self.mapping.clear();
    }

    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }

    pub fn is_loaded(&self) -> bool {
        !self.mapping.is_empty()
    }

    /// Canonical tag for an exact (case-insensitive) key
    pub fn get(&self, tag: &str) -> Option<&str> {
        self.mapping.get(&tag.to_lowercase()).map(String::as_str)
    }

    /// All canonical tags
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.mapping.values().map(String::as_str)
    }

    /// Loads the snapshot if the dictionary is empty
    pub fn ensure_loaded(&mut self) -> Result<()> {
        if self.mapping.is_empty() {
            let mapping = self.source.load()?;
            info!(
                source = %self.source.describe(),
                entries = mapping.len(),
                "Tag dictionary loaded"
            );
            self.mapping = mapping;
        }
        Ok(())
    }

    // ============ Recherche ============

    /// Searches canonical tags matching `tag`
    ///
    /// Loads the snapshot first when the dictionary is empty. An exact
    /// case-insensitive key wins; otherwise the title-cased string is compared
    /// with every canonical tag and the closest ones are returned, best first.
    ///
    /// # Errors
    ///
    /// [`RedgifsError::InvalidTag`] with `tag` when nothing is close enough,
    /// I/O and JSON errors from the snapshot load.
    pub fn search(&mut self, tag: &str) -> Result<Vec<String>> {
        self.ensure_loaded()?;
        self.lookup(tag)
    }

    /// Same as [`Tags::search`] without loading the snapshot
    pub fn lookup(&self, tag: &str) -> Result<Vec<String>> {
        if let Some(canonical) = self.mapping.get(&tag.to_lowercase()) {
            debug!(tag, canonical = %canonical, "Exact tag match");
            return Ok(vec![canonical.clone()]);
        }

        let title = fuzzy::title_case(tag);
        let matches = fuzzy::close_matches(&title, self.values(), &self.options);

        if matches.is_empty() {
            debug!(tag, "No tag close enough");
            return Err(RedgifsError::InvalidTag(tag.to_string()));
        }

        debug!(tag, best = matches[0], count = matches.len(), "Fuzzy tag match");
        Ok(matches.into_iter().map(str::to_string).collect())
    }

    // ============ Aléatoire ============

    /// A random canonical tag, `None` when the dictionary is empty
    ///
    /// Does not load the snapshot.
    pub fn random(&self) -> Option<String> {
        self.random_with(&mut rand::rng())
    }

    pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        if self.mapping.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.mapping.len());
        self.mapping.get_index(index).map(|(_, value)| value.clone())
    }

    /// `count` canonical tags drawn independently (duplicates possible)
    ///
    /// Returns an empty vector when `count` is 0 or the dictionary is empty.
    /// Does not load the snapshot.
    pub fn random_many(&self, count: usize) -> Vec<String> {
        self.random_many_with(&mut rand::rng(), count)
    }

    pub fn random_many_with<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<String> {
        (0..count).map_while(|_| self.random_with(rng)).collect()
    }
}

impl Default for Tags {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tags")
            .field("entries", &self.mapping.len())
            .field("source", &self.source.describe())
            .field("options", &self.options)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn sample_mapping() -> TagMapping {
        [
            ("tits", "Tits"),
            ("ass", "Ass"),
            ("hitomi tanaka", "Hitomi Tanaka"),
            ("big dick", "Big Dick"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn loaded() -> Tags {
        let mut tags = Tags::new();
        tags.set(sample_mapping());
        tags
    }

    #[test]
    fn test_exact_match() {
        let mut tags = loaded();
        assert_eq!(tags.search("tits").unwrap(), vec!["Tits"]);
        assert_eq!(tags.search("hitomi tanaka").unwrap(), vec!["Hitomi Tanaka"]);
    }

    #[test]
    fn test_exact_match_is_case_insensitive() {
        let mut tags = loaded();
        assert_eq!(tags.search("ASS").unwrap(), tags.search("ass").unwrap());
        assert_eq!(tags.get("Big DICK"), Some("Big Dick"));
    }

    #[test]
    fn test_fuzzy_match() {
        let mut tags = loaded();
        assert_eq!(tags.search("big dikc").unwrap()[0], "Big Dick");
    }

    #[test]
    fn test_no_match_carries_query() {
        let mut tags = loaded();
        let err = tags.search("xqzzvkj").unwrap_err();
        assert_eq!(err.invalid_tag(), Some("xqzzvkj"));
    }

    #[test]
    fn test_set_bypasses_snapshot() {
        let mut tags = loaded();
        // Not in the embedded snapshot.
        assert!(tags.search("americam").is_err());
        assert_eq!(tags.len(), 4);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut tags = loaded();
        tags.clear();
        tags.clear();
        assert!(tags.is_empty());
        assert!(!tags.is_loaded());
    }

    #[test]
    fn test_random_does_not_load() {
        let tags = Tags::new();
        assert_eq!(tags.random(), None);
        assert!(tags.random_many(4).is_empty());
        assert!(tags.is_empty());
    }

    #[test]
    fn test_random_draws_from_values() {
        let tags = loaded();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let tag = tags.random_with(&mut rng).unwrap();
            assert!(tags.values().any(|v| v == tag));
        }
    }

    #[test]
    fn test_random_many_length() {
        let tags = loaded();
        let picked = tags.random_many(10);
        assert_eq!(picked.len(), 10);
        assert!(picked.iter().all(|t| tags.values().any(|v| v == t)));
        assert!(tags.random_many(0).is_empty());
    }

    #[test]
    fn test_random_is_reproducible_with_seed() {
        let tags = loaded();
        let a = tags.random_many_with(&mut StdRng::seed_from_u64(42), 8);
        let b = tags.random_many_with(&mut StdRng::seed_from_u64(42), 8);
        assert_eq!(a, b);
    }

    #[test]
    fn test_options_limit_results() {
        let mut tags = Tags::new().with_options(MatchOptions::new(1, 0.6));
        let results = tags.search("hige tits").unwrap();
        assert_eq!(results, vec!["Huge Tits"]);
    }
}
