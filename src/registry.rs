//! Memoized lookups into a model's metadata tables.
//!
//! Resolving a name against the generated tables is a linear scan, so
//! resolved row indices are cached per key. The maps are keyed by the
//! composite keys from [`crate::keys`], which keeps entries from distinct
//! loaded models apart even when names repeat.

use anyhow::Result;
use indexmap::IndexMap;

use crate::keys::{BlockScopedKey, ModelScopedKey};

/// Per-process cache of resolved table row indices.
///
/// Insertion order is preserved, so iterating a map replays the order in
/// which entries were first resolved.
#[derive(Debug, Default)]
pub struct LookupCache<'m> {
    model_params: IndexMap<ModelScopedKey<'m>, usize>,
    block_params: IndexMap<BlockScopedKey<'m>, usize>,
    signals: IndexMap<BlockScopedKey<'m>, usize>,
}

impl<'m> LookupCache<'m> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn signal(&self, key: &BlockScopedKey<'m>) -> Option<usize> {
        self.signals.get(key).copied()
    }

    pub fn block_param(&self, key: &BlockScopedKey<'m>) -> Option<usize> {
        self.block_params.get(key).copied()
    }

    pub fn model_param(&self, key: &ModelScopedKey<'m>) -> Option<usize> {
        self.model_params.get(key).copied()
    }

    /// Cached signal index, or run `resolve` and memoize its result.
    /// `resolve` is only called on a miss.
    pub fn signal_or_insert_with<F>(&mut self, key: BlockScopedKey<'m>, resolve: F) -> Result<usize>
    where
        F: FnOnce() -> Result<usize>,
    {
        if let Some(&idx) = self.signals.get(&key) {
            return Ok(idx);
        }
        let idx = resolve()?;
        self.signals.insert(key, idx);
        Ok(idx)
    }

    /// Cached block parameter index, or run `resolve` and memoize its result.
    pub fn block_param_or_insert_with<F>(
        &mut self,
        key: BlockScopedKey<'m>,
        resolve: F,
    ) -> Result<usize>
    where
        F: FnOnce() -> Result<usize>,
    {
        if let Some(&idx) = self.block_params.get(&key) {
            return Ok(idx);
        }
        let idx = resolve()?;
        self.block_params.insert(key, idx);
        Ok(idx)
    }

    /// Cached model parameter index, or run `resolve` and memoize its result.
    pub fn model_param_or_insert_with<F>(
        &mut self,
        key: ModelScopedKey<'m>,
        resolve: F,
    ) -> Result<usize>
    where
        F: FnOnce() -> Result<usize>,
    {
        if let Some(&idx) = self.model_params.get(&key) {
            return Ok(idx);
        }
        let idx = resolve()?;
        self.model_params.insert(key, idx);
        Ok(idx)
    }

    /// Number of cached entries across all three tables.
    pub fn len(&self) -> usize {
        self.model_params.len() + self.block_params.len() + self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop everything cached for every model.
    pub fn clear(&mut self) {
        self.model_params.clear();
        self.block_params.clear();
        self.signals.clear();
    }
}
