//! Tag resolver shared between async tasks
//!
//! [`Tags`] is a plain synchronous value. `SharedTags` wraps it for async
//! hosts: the first search loads the snapshot on tokio's blocking pool while
//! holding the write lock, so concurrent first searches read it only once.

use crate::error::Result;
use crate::snapshot::TagMapping;
use crate::tags::Tags;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Cloneable handle on a shared [`Tags`]
#[derive(Clone, Debug)]
pub struct SharedTags {
    inner: Arc<RwLock<Tags>>,
}

impl SharedTags {
    pub fn new(tags: Tags) -> Self {
        Self {
            inner: Arc::new(RwLock::new(tags)),
        }
    }

    /// Loads the snapshot unless the dictionary is already populated
    pub async fn ensure_loaded(&self) -> Result<()> {
        if self.inner.read().await.is_loaded() {
            return Ok(());
        }

        let mut tags = self.inner.write().await;
        if tags.is_loaded() {
            debug!("Tag dictionary loaded by another task");
            return Ok(());
        }

        let source = tags.source();
        let mapping = tokio::task::spawn_blocking(move || source.load()).await??;
        info!(entries = mapping.len(), "Tag dictionary loaded");
        tags.set(mapping);
        Ok(())
    }

    /// See [`Tags::search`]
    pub async fn search(&self, tag: &str) -> Result<Vec<String>> {
        self.ensure_loaded().await?;
        self.inner.read().await.lookup(tag)
    }

    /// See [`Tags::random`]; does not load the snapshot
    pub async fn random(&self) -> Option<String> {
        self.inner.read().await.random()
    }

    /// See [`Tags::random_many`]; does not load the snapshot
    pub async fn random_many(&self, count: usize) -> Vec<String> {
        self.inner.read().await.random_many(count)
    }

    pub async fn set(&self, mapping: TagMapping) {
        self.inner.write().await.set(mapping);
    }

    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_loaded(&self) -> bool {
        self.inner.read().await.is_loaded()
    }
}

impl From<Tags> for SharedTags {
    fn from(tags: Tags) -> Self {
        Self::new(tags)
    }
}

impl Default for SharedTags {
    fn default() -> Self {
        Self::new(Tags::new())
    }
}
